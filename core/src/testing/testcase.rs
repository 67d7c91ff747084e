use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use lazy_regex::{lazy_regex, Lazy, Regex};

static RE_INPUT_FILENAME: Lazy<Regex> = lazy_regex!(r"^test([0-9]+)\.in$");

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TestcaseId(pub u32);

impl fmt::Display for TestcaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TestcaseId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// A testcase stored as `test{ID}.in` / `test{ID}.out` / `test{ID}.res` in one dir.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsTestcase {
    id: TestcaseId,
    input_path: PathBuf,
    expected_path: PathBuf,
    result_path: PathBuf,
}

impl FsTestcase {
    pub const INPUT_EXT: &str = "in";
    pub const EXPECTED_EXT: &str = "out";
    pub const RESULT_EXT: &str = "res";

    pub fn new(tests_dir: impl AsRef<Path>, id: TestcaseId) -> Self {
        let dir = tests_dir.as_ref();
        let path = |ext: &str| dir.join(format!("test{}.{}", id, ext));
        Self {
            id,
            input_path: path(Self::INPUT_EXT),
            expected_path: path(Self::EXPECTED_EXT),
            result_path: path(Self::RESULT_EXT),
        }
    }

    pub fn id(&self) -> TestcaseId {
        self.id
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn expected_path(&self) -> &Path {
        &self.expected_path
    }

    pub fn result_path(&self) -> &Path {
        &self.result_path
    }

    /// Extracts the id from an input file name such as `test12.in`.
    pub fn parse_input_filename(filename: &str) -> Option<TestcaseId> {
        let caps = RE_INPUT_FILENAME.captures(filename)?;
        match caps[1].parse() {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("Ignoring '{}': testcase id out of range ({})", filename, e);
                None
            }
        }
    }

    pub fn is_result_filename(filename: &str) -> bool {
        filename.ends_with(".res")
    }

    /// Ids of every `test{ID}.in` in `tests_dir`, deduplicated and ascending.
    pub fn discover(tests_dir: impl AsRef<Path>) -> fsutil::Result<Vec<TestcaseId>> {
        let mut ids: Vec<_> = fsutil::list_files(&tests_dir)?
            .iter()
            .filter_map(|path| path.file_name())
            .filter_map(|name| Self::parse_input_filename(&name.to_string_lossy()))
            .collect();
        ids.sort();
        ids.dedup();
        log::debug!(
            "Discovered {} testcases in {:?}",
            ids.len(),
            tests_dir.as_ref()
        );
        Ok(ids)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn paths_follow_naming_convention() {
        let t = FsTestcase::new("tests", TestcaseId(7));
        assert_eq!(t.id(), TestcaseId(7));
        assert_eq!(t.input_path(), Path::new("tests/test7.in"));
        assert_eq!(t.expected_path(), Path::new("tests/test7.out"));
        assert_eq!(t.result_path(), Path::new("tests/test7.res"));
    }

    #[test]
    fn parse_input_filename_accepts_only_input_files() {
        assert_eq!(
            FsTestcase::parse_input_filename("test12.in"),
            Some(TestcaseId(12))
        );
        assert_eq!(
            FsTestcase::parse_input_filename("test007.in"),
            Some(TestcaseId(7))
        );
        assert_eq!(FsTestcase::parse_input_filename("test12.out"), None);
        assert_eq!(FsTestcase::parse_input_filename("test.in"), None);
        assert_eq!(FsTestcase::parse_input_filename("testx.in"), None);
        assert_eq!(FsTestcase::parse_input_filename("mytest1.in"), None);
        assert_eq!(FsTestcase::parse_input_filename("test1.in.bak"), None);
        assert_eq!(FsTestcase::parse_input_filename("test99999999999.in"), None);
    }

    #[test]
    fn discover_sorts_numerically_and_dedups() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "test10.in",
            "test2.in",
            "test02.in",
            "test1.in",
            "test1.out",
            "test3.res",
            "notes.txt",
        ] {
            fsutil::write(dir.path().join(name), "").unwrap();
        }
        // a directory that looks like an input file is not a testcase
        fsutil::mkdir_all(dir.path().join("test5.in")).unwrap();

        let ids = FsTestcase::discover(dir.path()).unwrap();
        assert_eq!(ids, [TestcaseId(1), TestcaseId(2), TestcaseId(10)]);
    }

    #[test]
    fn discover_fails_on_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FsTestcase::discover(dir.path().join("absent")).is_err());
    }
}

use std::{
    fs::{self, File, ReadDir},
    path::{Path, PathBuf},
};

pub mod error {
    use std::{io, path::PathBuf};

    pub type Result<T> = std::result::Result<T, self::Error>;

    type Msg = &'static str;

    #[derive(Debug, thiserror::Error)]
    pub enum Error {
        #[error("{0} ({1}): {2}")]
        SingleIO(Msg, PathBuf, #[source] io::Error),
    }

    impl Error {
        pub fn path(&self) -> &std::path::Path {
            match self {
                Self::SingleIO(_, path, _) => path,
            }
        }

        pub fn io_error(&self) -> &io::Error {
            match self {
                Self::SingleIO(_, _, e) => e,
            }
        }
    }
}
pub use error::{Error, Result};

#[must_use]
pub fn mkdir_all(path: impl AsRef<Path>) -> Result<()> {
    let dir = path.as_ref();
    fs::create_dir_all(dir).map_err(|e| Error::SingleIO("Cannot create dir", dir.to_owned(), e))
}

#[must_use]
pub fn write<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    fs::write(&filepath, contents)
        .map_err(|e| Error::SingleIO("Cannot write file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn read_to_string(filepath: impl AsRef<Path>) -> Result<String> {
    fs::read_to_string(&filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.as_ref().to_owned(), e))
}

/// Reads the whole file and decodes it as UTF-8, replacing invalid sequences.
#[must_use]
pub fn read_to_string_lossy(filepath: impl AsRef<Path>) -> Result<String> {
    let bytes = fs::read(&filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.as_ref().to_owned(), e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[must_use]
pub fn open_file(filepath: impl AsRef<Path>) -> Result<File> {
    File::open(&filepath)
        .map_err(|e| Error::SingleIO("Cannot open file", filepath.as_ref().to_owned(), e))
}

/// Creates the file, truncating it if it already exists.
#[must_use]
pub fn create_file(filepath: impl AsRef<Path>) -> Result<File> {
    File::create(&filepath)
        .map_err(|e| Error::SingleIO("Cannot create file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn remove_file(filepath: impl AsRef<Path>) -> Result<()> {
    fs::remove_file(&filepath)
        .map_err(|e| Error::SingleIO("Cannot remove file", filepath.as_ref().to_owned(), e))
}

/// Removes the file if present. Returns whether a file was removed.
#[must_use]
pub fn remove_file_if_exists(filepath: impl AsRef<Path>) -> Result<bool> {
    let filepath = filepath.as_ref();
    if !filepath.is_file() {
        return Ok(false);
    }
    self::remove_file(filepath).map(|_| true)
}

#[must_use]
pub fn read_dir(dir: impl AsRef<Path>) -> Result<ReadDir> {
    fs::read_dir(&dir).map_err(|e| Error::SingleIO("Cannot read dir", dir.as_ref().to_owned(), e))
}

/// Lists non-directory entries directly inside `dir` (non-recursive), sorted by file name.
pub fn list_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in self::read_dir(&dir)?.filter_map(std::result::Result::ok) {
        let Ok(ft) = entry.file_type() else {
            continue
        };
        if ft.is_dir() {
            continue;
        }
        files.push(entry.path());
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Finds `filename` in `cur_dir` or in its nearest ancestor.
pub fn find_file_in_ancestors(cur_dir: impl AsRef<Path>, filename: &str) -> Option<PathBuf> {
    cur_dir
        .as_ref()
        .ancestors()
        .map(|dir| dir.join(filename))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn list_files_skips_dirs_and_sorts_by_name() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path().join("b.txt"), "b").unwrap();
        write(dir.path().join("a.txt"), "a").unwrap();
        mkdir_all(dir.path().join("sub")).unwrap();
        write(dir.path().join("sub/c.txt"), "c").unwrap();

        let names: Vec<_> = list_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
    }

    #[test]
    fn read_dir_error_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = read_dir(&missing).unwrap_err();
        assert_eq!(err.path(), missing);
        assert_eq!(err.io_error().kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn remove_file_if_exists_reports_removal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.res");
        assert!(!remove_file_if_exists(&path).unwrap());
        write(&path, "").unwrap();
        assert!(remove_file_if_exists(&path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn find_file_in_ancestors_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        mkdir_all(&nested).unwrap();
        write(dir.path().join("a/marker.toml"), "").unwrap();

        let found = find_file_in_ancestors(&nested, "marker.toml").unwrap();
        assert_eq!(found, dir.path().join("a/marker.toml"));
        assert_eq!(find_file_in_ancestors(&nested, "absent.toml"), None);
    }

    #[test]
    fn read_to_string_lossy_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin");
        write(&path, [b'o', b'k', 0xff]).unwrap();
        assert_eq!(read_to_string_lossy(&path).unwrap(), "ok\u{fffd}");
    }
}

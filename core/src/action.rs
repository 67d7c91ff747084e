pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use error::*;

use crate::compiler::Compiler;
use crate::config::HarnessConfig;
use crate::style;
use crate::testing::{FsTestcase, TestOutcome, TestRunner, TestcaseId, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestStatus {
    AllPassed,
    TestsFailed,
    CompileFailed,
}

#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    pub outcomes: Vec<TestOutcome>,
    pub aborted: bool,
}

impl SuiteReport {
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(TestOutcome::is_passed)
    }

    pub fn num_failed(&self) -> usize {
        self.outcomes.iter().filter(|r| !r.is_passed()).count()
    }
}

#[derive(Debug, Default)]
pub struct CleanReport {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<fsutil::Error>,
}

/// Drops repeated ids, keeping the first occurrence of each.
pub fn dedup_keep_order(ids: &[TestcaseId]) -> Vec<TestcaseId> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|&id| seen.insert(id)).collect()
}

/// Explicit ids keep the given order (duplicates dropped); otherwise every
/// testcase in `tests_dir` in ascending order.
pub fn select_testcases(
    tests_dir: impl AsRef<Path>,
    explicit: Option<&[TestcaseId]>,
) -> Result<Vec<TestcaseId>> {
    match explicit {
        Some(ids) => Ok(dedup_keep_order(ids)),
        None => FsTestcase::discover(&tests_dir).context("Failed to find testcases"),
    }
}

/// Runs `ids` one by one. With `abort_on_fail`, stops right after the first failure.
pub async fn run_suite(
    runner: &TestRunner,
    tests_dir: impl AsRef<Path>,
    ids: &[TestcaseId],
    abort_on_fail: bool,
) -> SuiteReport {
    let mut report = SuiteReport::default();

    for &id in ids {
        let t = FsTestcase::new(&tests_dir, id);
        let outcome = runner.run(&t).await.unwrap_or_else(|e| {
            log::debug!("Harness error on test {}: {:?}", id, e);
            TestOutcome::not_executed(id, Verdict::HarnessError(format!("{:#}", e)))
        });
        style::print_test_outcome(&outcome);

        let passed = outcome.is_passed();
        report.outcomes.push(outcome);

        if !passed && abort_on_fail {
            println!("Aborting on first failed test (as requested).");
            report.aborted = true;
            break;
        }
    }
    report
}

/// Compiles the sources, then runs the selected testcases against the artifact.
pub async fn do_test(
    cfg: &HarnessConfig,
    explicit_ids: Option<&[TestcaseId]>,
    abort_on_fail: bool,
) -> Result<TestStatus> {
    let exe = cfg.executable_path();
    let compiler = Compiler::new(&cfg.compiler).flags(cfg.flags.iter().cloned());

    if let Err(e) = compiler.build(&cfg.code_dir, &cfg.sources, &exe).await {
        println!("{}", e);
        log::debug!("{:?}", e);
        return Ok(TestStatus::CompileFailed);
    }

    let ids = select_testcases(&cfg.tests_dir, explicit_ids)?;
    if ids.is_empty() {
        println!("No tests to run.");
        return Ok(TestStatus::AllPassed);
    }

    let runner = TestRunner::new(&exe).execution_time_limit(cfg.timeout());
    log::info!(
        "Running {} testcase(s) with a limit of {:?}",
        ids.len(),
        runner.get_exec_time_limit()
    );

    let report = run_suite(&runner, &cfg.tests_dir, &ids, abort_on_fail).await;
    style::print_test_result_summary(&report.outcomes);

    if report.all_passed() {
        Ok(TestStatus::AllPassed)
    } else {
        Ok(TestStatus::TestsFailed)
    }
}

/// Removes every `*.res` file in `tests_dir`. A failed removal is reported and skipped.
pub fn clean_result_files(tests_dir: impl AsRef<Path>) -> Result<CleanReport> {
    let files = fsutil::list_files(&tests_dir).context("Failed to clean result files")?;
    let result_files = files.into_iter().filter(|path| {
        path.file_name()
            .map_or(false, |name| FsTestcase::is_result_filename(&name.to_string_lossy()))
    });
    Ok(remove_files(result_files))
}

fn remove_files(paths: impl IntoIterator<Item = PathBuf>) -> CleanReport {
    let mut report = CleanReport::default();
    for path in paths {
        match fsutil::remove_file(&path) {
            Ok(()) => {
                println!("Removed {}", path.display());
                report.removed.push(path);
            }
            Err(e) => {
                println!("Could not remove {}: {}", path.display(), e.io_error());
                report.failed.push(e);
            }
        }
    }
    report
}

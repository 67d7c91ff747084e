use std::{
    ffi::OsString,
    path::PathBuf,
    process::Stdio,
    time::Duration,
};

use anyhow::Context;
use tokio::process::Command;

use super::{result::*, testcase::*};

/// Edge-trimmed exact comparison. Internal whitespace and line endings are significant.
pub fn outputs_match(actual: &str, expected: &str) -> bool {
    actual.trim() == expected.trim()
}

#[derive(Debug, Clone)]
pub struct TestRunner {
    program: PathBuf,
    args: Vec<OsString>,
    execution_time_limit: Duration,
}

impl TestRunner {
    pub const DEFAULT_EXEC_TIME_LIMIT: Duration = Duration::from_secs(10);

    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            execution_time_limit: Self::DEFAULT_EXEC_TIME_LIMIT,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn execution_time_limit(mut self, limit: Duration) -> Self {
        self.execution_time_limit = limit;
        self
    }

    pub fn get_exec_time_limit(&self) -> Duration {
        self.execution_time_limit
    }

    /// Runs the program with the testcase input on stdin and stdout redirected to the
    /// result file, then judges the result.
    ///
    /// Missing fixtures, timeouts, non-zero exits and mismatches are all reported as a
    /// [`Verdict`]. `Err` means the harness itself could not do its job (e.g. the
    /// program could not be spawned).
    pub async fn run(&self, testcase: &FsTestcase) -> anyhow::Result<TestOutcome> {
        let id = testcase.id();

        if !testcase.input_path().is_file() {
            let path = testcase.input_path().to_owned();
            return Ok(TestOutcome::not_executed(id, Verdict::InputNotFound(path)));
        }
        if !testcase.expected_path().is_file() {
            let path = testcase.expected_path().to_owned();
            return Ok(TestOutcome::not_executed(id, Verdict::ExpectedNotFound(path)));
        }

        let stdin = fsutil::open_file(testcase.input_path())?;
        let stdout = fsutil::create_file(testcase.result_path())?;

        log::debug!(
            "Running {:?} < {:?} > {:?}",
            self.program,
            testcase.input_path(),
            testcase.result_path()
        );
        let mut proc = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::from(stdin))
            .stdout(Stdio::from(stdout))
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to spawn '{}'", self.program.to_string_lossy()))?;

        let start_at = tokio::time::Instant::now();
        let res = tokio::time::timeout(self.execution_time_limit, proc.wait()).await;
        let execution_time = start_at.elapsed();

        let verdict = match res {
            Err(_) => {
                // kill() also reaps the child
                proc.kill()
                    .await
                    .unwrap_or_else(|e| log::warn!("Failed to kill TLE process: {:#}", e));
                Verdict::TimedOut(self.execution_time_limit)
            }

            Ok(Err(e)) => {
                return Err(e).context("Failed to wait for subprocess");
            }

            Ok(Ok(status)) if !status.success() => Verdict::ExecutionError(status),

            Ok(Ok(_)) => Self::judge_output(testcase)?,
        };

        Ok(TestOutcome {
            id,
            verdict,
            execution_time: Some(execution_time),
        })
    }

    fn judge_output(testcase: &FsTestcase) -> anyhow::Result<Verdict> {
        if !testcase.result_path().is_file() {
            return Ok(Verdict::ResultNotCreated(testcase.result_path().to_owned()));
        }
        let actual = fsutil::read_to_string_lossy(testcase.result_path())?;
        let expected = fsutil::read_to_string_lossy(testcase.expected_path())?;
        if outputs_match(&actual, &expected) {
            Ok(Verdict::Passed)
        } else {
            Ok(Verdict::Mismatch)
        }
    }
}

use std::{fmt, path::PathBuf, process::ExitStatus, time::Duration};

use super::testcase::TestcaseId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
pub enum JudgeCode {
    AC,
    WA,
    TLE,
    RE,
    /// Harness-side failure: a missing fixture or result file, or a spawn error.
    IE,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    InputNotFound(PathBuf),
    ExpectedNotFound(PathBuf),
    TimedOut(Duration),
    ExecutionError(ExitStatus),
    ResultNotCreated(PathBuf),
    Mismatch,
    /// The harness could not run the test (e.g. the program failed to spawn).
    HarnessError(String),
}

impl Verdict {
    pub fn judge(&self) -> JudgeCode {
        use Verdict::*;
        match self {
            Passed => JudgeCode::AC,
            Mismatch => JudgeCode::WA,
            TimedOut(_) => JudgeCode::TLE,
            ExecutionError(_) => JudgeCode::RE,
            InputNotFound(_) | ExpectedNotFound(_) | ResultNotCreated(_) | HarnessError(_) => {
                JudgeCode::IE
            }
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Verdict::Passed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub id: TestcaseId,
    pub verdict: Verdict,
    /// `None` when no process was launched.
    pub execution_time: Option<Duration>,
}

impl TestOutcome {
    pub fn not_executed(id: TestcaseId, verdict: Verdict) -> Self {
        Self {
            id,
            verdict,
            execution_time: None,
        }
    }

    pub fn judge(&self) -> JudgeCode {
        self.verdict.judge()
    }

    pub fn is_passed(&self) -> bool {
        self.verdict.is_passed()
    }
}

/// Human-readable status line. The phrases are stable; scripts grep for them.
impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Verdict::*;
        let id = self.id;
        match &self.verdict {
            Passed => write!(f, "Test {} Passed", id),
            InputNotFound(path) => {
                write!(f, "Input file for test {} not found: {}", id, path.display())
            }
            ExpectedNotFound(path) => write!(
                f,
                "Expected output file for test {} not found: {}",
                id,
                path.display()
            ),
            TimedOut(limit) => write!(
                f,
                "Test {} Failed: Execution timed out after {} seconds.",
                id,
                limit.as_secs_f64()
            ),
            ExecutionError(status) => {
                write!(f, "Test {} Failed: Command execution error. {}", id, status)
            }
            ResultNotCreated(_) => write!(f, "Test {} Failed: result file not created", id),
            Mismatch => write!(f, "Test {} Failed: Output does not match expected.", id),
            HarnessError(msg) => write!(f, "Test {} Failed: {}", id, msg),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn outcome(verdict: Verdict) -> TestOutcome {
        TestOutcome::not_executed(TestcaseId(3), verdict)
    }

    #[test]
    fn status_lines_are_distinguishable() {
        assert_eq!(outcome(Verdict::Passed).to_string(), "Test 3 Passed");
        assert_eq!(
            outcome(Verdict::InputNotFound("t/test3.in".into())).to_string(),
            "Input file for test 3 not found: t/test3.in"
        );
        assert_eq!(
            outcome(Verdict::ExpectedNotFound("t/test3.out".into())).to_string(),
            "Expected output file for test 3 not found: t/test3.out"
        );
        assert_eq!(
            outcome(Verdict::TimedOut(Duration::from_secs(10))).to_string(),
            "Test 3 Failed: Execution timed out after 10 seconds."
        );
        assert_eq!(
            outcome(Verdict::TimedOut(Duration::from_millis(300))).to_string(),
            "Test 3 Failed: Execution timed out after 0.3 seconds."
        );
        assert_eq!(
            outcome(Verdict::ResultNotCreated("t/test3.res".into())).to_string(),
            "Test 3 Failed: result file not created"
        );
        assert_eq!(
            outcome(Verdict::Mismatch).to_string(),
            "Test 3 Failed: Output does not match expected."
        );
    }

    #[test]
    fn judge_codes() {
        assert_eq!(Verdict::Passed.judge(), JudgeCode::AC);
        assert_eq!(Verdict::Mismatch.judge(), JudgeCode::WA);
        assert_eq!(Verdict::TimedOut(Duration::ZERO).judge(), JudgeCode::TLE);
        assert_eq!(Verdict::InputNotFound(PathBuf::new()).judge(), JudgeCode::IE);
        assert_eq!(JudgeCode::TLE.to_string(), "TLE");
    }
}

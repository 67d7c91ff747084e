use tjudge_core::{
    action::{self, TestStatus},
    testing::TestcaseId,
    HarnessConfig,
};

use super::{GlobalArgs, SubcmdResult, EXIT_COMPILE_FAILED, EXIT_SUCCESS, EXIT_TESTS_FAILED};

pub async fn exec(args: &GlobalArgs, cfg: &HarnessConfig) -> SubcmdResult {
    let explicit: Option<Vec<TestcaseId>> = args
        .tests
        .as_ref()
        .map(|ids| ids.iter().copied().map(TestcaseId).collect());

    let status = action::do_test(cfg, explicit.as_deref(), args.abort_on_fail).await?;
    Ok(match status {
        TestStatus::AllPassed => EXIT_SUCCESS,
        TestStatus::TestsFailed => EXIT_TESTS_FAILED,
        TestStatus::CompileFailed => EXIT_COMPILE_FAILED,
    })
}

use tjudge_core::{action, print_success, HarnessConfig};

use super::{GlobalArgs, SubcmdResult, EXIT_SUCCESS};

pub fn exec(_: &GlobalArgs, cfg: &HarnessConfig) -> SubcmdResult {
    let report = action::clean_result_files(&cfg.tests_dir)?;
    if !report.failed.is_empty() {
        log::warn!("{} result file(s) could not be removed", report.failed.len());
    }
    print_success!("Clean done: {} result file(s) removed.", report.removed.len());
    Ok(EXIT_SUCCESS)
}

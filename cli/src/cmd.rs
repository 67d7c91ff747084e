pub mod clean;
pub mod test;

use std::path::PathBuf;

use anyhow::Context as _;
use tjudge_core::HarnessConfig;

use crate::util;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_TESTS_FAILED: i32 = 1;
/// Bad configuration or an unexpected I/O failure.
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_COMPILE_FAILED: i32 = 255;

/// Run tests against expected outputs.
#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    /// Path to the dir with the tests to run [default: ./tests/]
    #[arg(long, alias = "tests_dir", value_name = "DIR")]
    pub tests_dir: Option<PathBuf>,

    /// Path to the dir with the code to compile and test [default: ./]
    #[arg(long, alias = "code_dir", value_name = "DIR")]
    pub code_dir: Option<PathBuf>,

    /// Path to the compiler [default: g++]
    #[arg(long, alias = "compiler_path", value_name = "PATH")]
    pub compiler_path: Option<PathBuf>,

    /// Remove all .res files from the tests dir and exit
    #[arg(long)]
    pub clean: bool,

    /// Abort on first test that fails
    #[arg(long, alias = "abort_on_fail")]
    pub abort_on_fail: bool,

    /// List of test IDs to run [default: run all tests]
    #[arg(short = 't', long, num_args = 0.., value_name = "ID")]
    pub tests: Option<Vec<u32>>,

    /// Per-test wall-clock limit [default: 10]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Config file [default: nearest tjudge.toml, if any]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub type SubcmdResult = anyhow::Result<i32>;

impl GlobalArgs {
    pub async fn exec(&self) -> SubcmdResult {
        let cfg = self.resolve_config()?;
        log::debug!("{:#?}", cfg);
        if self.clean {
            clean::exec(self, &cfg)
        } else {
            test::exec(self, &cfg).await
        }
    }

    /// Defaults < config file < `TJUDGE_*` env < command-line flags.
    pub fn resolve_config(&self) -> anyhow::Result<HarnessConfig> {
        let cfg = HarnessConfig::load(self.config.as_deref(), util::current_dir()?)?
            .with_env()?
            .with_args(self);
        cfg.validate().context("Invalid configuration")?;
        Ok(cfg)
    }
}

trait WithArgs {
    fn with_args(self, args: &GlobalArgs) -> Self;
}

impl WithArgs for HarnessConfig {
    fn with_args(mut self, args: &GlobalArgs) -> Self {
        let GlobalArgs {
            tests_dir,
            code_dir,
            compiler_path,
            clean: _,
            abort_on_fail: _,
            tests: _,
            timeout,
            config: _,
            verbose: _,
        } = args;

        tests_dir.as_ref().map(|d| self.tests_dir = d.clone());
        code_dir.as_ref().map(|d| self.code_dir = d.clone());
        compiler_path.as_ref().map(|p| self.compiler = p.clone());
        timeout.map(|t| self.timeout_secs = t);
        self
    }
}

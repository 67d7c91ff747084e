use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use anyhow::{ensure, Context as _};
use serde::Deserialize;

use crate::serdable::GlobPattern;

/// Settings for one harness run.
///
/// Resolved from (lowest precedence first) built-in defaults, `tjudge.toml`,
/// `TJUDGE_*` environment variables and finally command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,
    pub compiler: PathBuf,
    pub flags: Vec<String>,
    pub sources: GlobPattern,
    pub executable: PathBuf,
    pub tests_dir: PathBuf,
    pub code_dir: PathBuf,
    pub timeout_secs: u64,
}

#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    compiler: Option<PathBuf>,
    flags: Option<Vec<String>>,
    sources: Option<GlobPattern>,
    executable: Option<PathBuf>,
    tests_dir: Option<PathBuf>,
    code_dir: Option<PathBuf>,
    timeout_secs: Option<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            source_config_file: None,
            compiler: PathBuf::from("g++"),
            flags: ["-std=c++14", "-DNDEBUG", "-Wall"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            sources: GlobPattern::parse("*.cpp").expect("default source pattern is valid"),
            executable: PathBuf::from("main.out"),
            tests_dir: PathBuf::from("./tests/"),
            code_dir: PathBuf::from("./"),
            timeout_secs: 10,
        }
    }
}

impl HarnessConfig {
    pub const FILENAME: &str = "tjudge.toml";
    pub const ENV_PREFIX: &str = "TJUDGE_";

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let filepath = filepath.into();
        let toml = fsutil::read_to_string(&filepath).context("Cannot read a config file")?;
        let mut cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
        cfg.source_config_file = Some(filepath);
        Ok(cfg)
    }

    /// Loads `explicit_file` if given, otherwise the nearest `tjudge.toml` found
    /// from `cur_dir` upwards. Falls back to defaults when there is none.
    pub fn load(explicit_file: Option<&Path>, cur_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit_file {
            return Self::from_toml_file(path);
        }
        match fsutil::find_file_in_ancestors(cur_dir, Self::FILENAME) {
            Some(path) => {
                log::debug!("Using config file {:?}", path);
                Self::from_toml_file(path)
            }
            None => {
                log::debug!("No {} found; using built-in defaults", Self::FILENAME);
                Ok(Self::default())
            }
        }
    }

    pub fn with_env(self) -> anyhow::Result<Self> {
        self.with_env_vars(std::env::vars())
    }

    /// Applies `TJUDGE_*` variables from `vars` on top of `self`.
    pub fn with_env_vars<I>(mut self, vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env: EnvOverrides = envy::prefixed(Self::ENV_PREFIX)
            .from_iter(vars)
            .with_context(|| format!("Invalid {}* environment variable", Self::ENV_PREFIX))?;

        let EnvOverrides {
            compiler,
            flags,
            sources,
            executable,
            tests_dir,
            code_dir,
            timeout_secs,
        } = env;

        compiler.map(|v| self.compiler = v);
        flags.map(|v| self.flags = v);
        sources.map(|v| self.sources = v);
        executable.map(|v| self.executable = v);
        tests_dir.map(|v| self.tests_dir = v);
        code_dir.map(|v| self.code_dir = v);
        timeout_secs.map(|v| self.timeout_secs = v);
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.timeout_secs > 0, "timeout must be at least 1 second");
        ensure!(
            self.executable.file_name().is_some(),
            "Invalid executable name: {:?}",
            self.executable
        );
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The compiled artifact lives inside the code dir.
    pub fn executable_path(&self) -> PathBuf {
        self.code_dir.join(&self.executable)
    }
}

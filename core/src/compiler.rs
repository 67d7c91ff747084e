use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
    process::ExitStatus,
};

use tokio::process::Command;

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("No source files matching '{pattern}' found in code_dir: {}", dir.display())]
    NoSources { pattern: String, dir: PathBuf },

    #[error("Cannot scan code_dir: {0}")]
    ScanSources(#[source] fsutil::Error),

    #[error("Cannot remove stale executable: {0}")]
    RemoveStale(#[source] fsutil::Error),

    #[error("Failed to spawn compiler '{}': {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Compilation failed with error: {status}")]
    Failed { status: ExitStatus },

    #[error("Compilation succeeded, but the executable {} was not created.", path.display())]
    ArtifactMissing { path: PathBuf },
}

#[derive(Debug, Clone)]
pub struct Compiler {
    program: PathBuf,
    flags: Vec<String>,
}

impl Compiler {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            flags: Vec::new(),
        }
    }

    pub fn flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags = flags.into_iter().map(Into::into).collect();
        self
    }

    /// Files directly in `dir` whose name matches `pattern`, sorted by name.
    pub fn collect_sources(
        dir: impl AsRef<Path>,
        pattern: &glob::Pattern,
    ) -> Result<Vec<PathBuf>, CompileError> {
        let dir = dir.as_ref();
        let sources: Vec<_> = fsutil::list_files(dir)
            .map_err(CompileError::ScanSources)?
            .into_iter()
            .filter(|path| {
                path.file_name()
                    .map_or(false, |name| pattern.matches(&name.to_string_lossy()))
            })
            .collect();

        if sources.is_empty() {
            return Err(CompileError::NoSources {
                pattern: pattern.as_str().to_owned(),
                dir: dir.to_owned(),
            });
        }
        Ok(sources)
    }

    /// `<compiler> <flags...> -o <exe> <sources...>`
    pub fn command_line(&self, sources: &[PathBuf], exe: &Path) -> Vec<OsString> {
        let mut cmd: Vec<OsString> = Vec::with_capacity(self.flags.len() + sources.len() + 3);
        cmd.push(self.program.clone().into());
        cmd.extend(self.flags.iter().map(OsString::from));
        cmd.push("-o".into());
        cmd.push(exe.into());
        cmd.extend(sources.iter().map(OsString::from));
        cmd
    }

    /// Compiles `sources` into `exe`, echoing the command line first.
    pub async fn compile(&self, sources: &[PathBuf], exe: &Path) -> Result<(), CompileError> {
        if fsutil::remove_file_if_exists(exe).map_err(CompileError::RemoveStale)? {
            log::debug!("Removed stale executable {:?}", exe);
        }

        let cmd = self.command_line(sources, exe);
        let shown = cmd
            .iter()
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");
        println!("Compiling: {}", shown);

        let status = Command::new(&cmd[0])
            .args(&cmd[1..])
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|source| CompileError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(CompileError::Failed { status });
        }
        if !exe.is_file() {
            return Err(CompileError::ArtifactMissing {
                path: exe.to_owned(),
            });
        }
        Ok(())
    }

    /// Collects sources in `code_dir` and compiles them into `exe`.
    pub async fn build(
        &self,
        code_dir: impl AsRef<Path>,
        pattern: &glob::Pattern,
        exe: &Path,
    ) -> Result<(), CompileError> {
        let sources = Self::collect_sources(code_dir, pattern)?;
        log::info!("Found {} source file(s)", sources.len());
        self.compile(&sources, exe).await
    }
}

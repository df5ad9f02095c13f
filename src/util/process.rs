//! Subprocess execution utilities.
//!
//! Tools are run with inherited standard streams and waited on without a
//! timeout. The [`ProcessRunner`] trait is the seam tests use to replace
//! real tools with recorders.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;

/// Builder for subprocess execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Get the working directory, if set.
    pub fn get_cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    fn build_command(&self, program: &Path) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Resolve the program on PATH, run it with inherited stdio and wait.
    pub fn status(&self) -> Result<ProcessStatus, ProcessError> {
        let program = find_executable(&self.program).ok_or_else(|| ProcessError::NotFound {
            program: self.program.clone(),
        })?;

        let status = self
            .build_command(&program)
            .status()
            .map_err(|source| ProcessError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        Ok(status.into())
    }

    /// Display the command for logs and error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// How a finished process exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    code: Option<i32>,
}

impl ProcessStatus {
    /// A process that exited normally with `code`.
    pub fn from_code(code: i32) -> Self {
        ProcessStatus { code: Some(code) }
    }

    /// A process terminated without an exit code (e.g. by a signal).
    pub fn terminated() -> Self {
        ProcessStatus { code: None }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }
}

impl From<ExitStatus> for ProcessStatus {
    fn from(status: ExitStatus) -> Self {
        ProcessStatus {
            code: status.code(),
        }
    }
}

impl std::fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => f.write_str("termination by signal"),
        }
    }
}

/// Failure to start a process at all.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("`{}` not found in PATH", .program.display())]
    NotFound { program: PathBuf },

    #[error("failed to execute `{}`", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Capability to run an external command to completion.
pub trait ProcessRunner {
    fn run(&mut self, cmd: &ProcessBuilder) -> Result<ProcessStatus, ProcessError>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&mut self, cmd: &ProcessBuilder) -> Result<ProcessStatus, ProcessError> {
        tracing::debug!("running `{}`", cmd.display_command());
        cmd.status()
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: impl AsRef<OsStr>) -> Option<PathBuf> {
    which::which(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("cmake").args(["-GNinja", "/src"]);

        assert_eq!(pb.display_command(), "cmake -GNinja /src");
    }

    #[test]
    fn test_builder_records_cwd() {
        let pb = ProcessBuilder::new("ninja").cwd("/proj/build-debug");
        assert_eq!(pb.get_cwd(), Some(Path::new("/proj/build-debug")));
        assert!(pb.get_args().is_empty());
    }

    #[test]
    fn test_missing_program() {
        let err = ProcessBuilder::new("vswitch-no-such-tool-1b7e")
            .status()
            .unwrap_err();
        assert!(matches!(err, ProcessError::NotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_status_codes() {
        assert!(ProcessBuilder::new("true").status().unwrap().success());

        let status = ProcessBuilder::new("sh")
            .args(["-c", "exit 3"])
            .status()
            .unwrap();
        assert!(!status.success());
        assert_eq!(status.code(), Some(3));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ProcessStatus::from_code(2).to_string(), "exit code 2");
        assert!(!ProcessStatus::terminated().success());
    }
}

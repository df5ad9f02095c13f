//! Test utilities and mocks for vswitch unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use vswitch::test_support::{scratch_project, RecordingRunner};
//!
//! #[test]
//! fn test_example() {
//!     let (_tmp, config) = scratch_project();
//!     let mut runner = RecordingRunner::new();
//!     runner.respond("cmake", ProcessStatus::from_code(1));
//!
//!     // Pass `&mut runner` wherever a ProcessRunner is expected...
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::config::SwitchConfig;
use crate::util::process::{ProcessBuilder, ProcessError, ProcessRunner, ProcessStatus};

/// One command seen by [`RecordingRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    /// Whether the working directory existed when the command ran.
    pub cwd_existed: bool,
}

#[derive(Debug, Clone, Copy)]
enum Response {
    Status(ProcessStatus),
    Missing,
}

/// Process runner that records commands instead of spawning them.
///
/// Every program succeeds unless a different response was configured.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    responses: HashMap<PathBuf, Response>,
    calls: Vec<RecordedCall>,
}

impl RecordingRunner {
    /// Create a runner where every program exits 0.
    pub fn new() -> Self {
        RecordingRunner {
            responses: HashMap::new(),
            calls: Vec::new(),
        }
    }

    /// Make `program` exit with `status`.
    pub fn respond(&mut self, program: impl AsRef<Path>, status: ProcessStatus) -> &mut Self {
        self.responses
            .insert(program.as_ref().to_path_buf(), Response::Status(status));
        self
    }

    /// Make `program` unresolvable.
    pub fn missing(&mut self, program: impl AsRef<Path>) -> &mut Self {
        self.responses
            .insert(program.as_ref().to_path_buf(), Response::Missing);
        self
    }

    /// Get all commands that were run, in order.
    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&mut self, cmd: &ProcessBuilder) -> Result<ProcessStatus, ProcessError> {
        self.calls.push(RecordedCall {
            program: cmd.get_program().to_path_buf(),
            args: cmd.get_args().to_vec(),
            cwd: cmd.get_cwd().map(Path::to_path_buf),
            cwd_existed: cmd.get_cwd().is_some_and(Path::is_dir),
        });

        match self.responses.get(cmd.get_program()) {
            Some(Response::Status(status)) => Ok(*status),
            Some(Response::Missing) => Err(ProcessError::NotFound {
                program: cmd.get_program().to_path_buf(),
            }),
            None => Ok(ProcessStatus::from_code(0)),
        }
    }
}

/// Create an empty CMake project in a temp dir with the default configuration.
///
/// Returns the TempDir handle - dropping it will clean up the directory.
pub fn scratch_project() -> (tempfile::TempDir, SwitchConfig) {
    let tmp = tempfile::TempDir::new().expect("failed to create temp dir");
    std::fs::write(tmp.path().join("CMakeLists.txt"), minimal_cmake_lists())
        .expect("failed to write CMakeLists.txt");

    let root = tmp
        .path()
        .canonicalize()
        .expect("failed to canonicalize temp dir");
    (tmp, SwitchConfig::new(root))
}

/// A top-level CMakeLists.txt that configures without sources.
pub fn minimal_cmake_lists() -> &'static str {
    "cmake_minimum_required(VERSION 3.10)\nproject(scratch CXX)\n"
}

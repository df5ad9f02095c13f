//! Switch error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::variant::Variant;
use crate::util::process::{ProcessError, ProcessStatus};

/// Which external tool a step runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Configure,
    Build,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Configure => "configuration",
            Step::Build => "build",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error while switching or inspecting build trees.
#[derive(Debug, Error)]
pub enum SwitchError {
    #[error(
        "{variant} tree exists both as `{}` and `{}`; remove or move one of them",
        .active.display(),
        .hidden.display()
    )]
    TreeConflict {
        variant: Variant,
        active: PathBuf,
        hidden: PathBuf,
    },

    #[error("{variant} tree path `{}` exists but is not a directory", .path.display())]
    TreeBlocked { variant: Variant, path: PathBuf },

    #[error("{step} step `{}` failed with {status}", .program.display())]
    ToolFailed {
        step: Step,
        program: PathBuf,
        status: ProcessStatus,
    },

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Filesystem(#[from] anyhow::Error),
}

impl SwitchError {
    /// Process exit code to report for this error.
    ///
    /// A tool's own non-zero exit code is passed through; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            SwitchError::ToolFailed { status, .. } => match status.code() {
                Some(code) if code != 0 => code,
                _ => 1,
            },
            _ => 1,
        }
    }
}

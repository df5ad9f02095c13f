//! Read-only report of both build trees.

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::Context;

use crate::core::config::SwitchConfig;
use crate::core::tree::TreeState;
use crate::core::variant::Variant;
use crate::ops::errors::SwitchError;

/// State of one variant's tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStatus {
    pub variant: Variant,
    pub state: TreeState,
    pub active_path: PathBuf,
    pub hidden_path: PathBuf,
}

/// State of both trees, debug first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub trees: Vec<TreeStatus>,
}

impl StatusReport {
    /// The single active variant, if exactly one tree is active.
    pub fn active_variant(&self) -> Option<Variant> {
        let mut active = self.trees.iter().filter(|t| t.state == TreeState::Active);
        match (active.next(), active.next()) {
            (Some(tree), None) => Some(tree.variant),
            _ => None,
        }
    }

    /// True if every tree can be switched without intervention.
    pub fn is_consistent(&self) -> bool {
        self.trees.iter().all(|t| t.state.is_consistent())
    }
}

/// Inspect both trees without touching them.
pub fn status(config: &SwitchConfig) -> Result<StatusReport, SwitchError> {
    let mut trees = Vec::with_capacity(Variant::ALL.len());
    for variant in Variant::ALL {
        let tree = config.tree(variant);
        let state = tree.inspect().with_context(|| {
            format!("failed to inspect build tree {}", tree.active_path().display())
        })?;
        trees.push(TreeStatus {
            variant,
            state,
            active_path: tree.active_path().to_path_buf(),
            hidden_path: tree.hidden_path().to_path_buf(),
        });
    }
    Ok(StatusReport { trees })
}

/// Format a status report for human output.
pub fn format_report(report: &StatusReport) -> String {
    let mut out = String::new();
    let active = report.active_variant();

    for tree in &report.trees {
        let marker = if active == Some(tree.variant) { "*" } else { " " };
        let location = match tree.state {
            TreeState::Active => tree.active_path.display().to_string(),
            TreeState::Inactive => tree.hidden_path.display().to_string(),
            TreeState::Blocked(ref path) => format!("{} is not a directory", path.display()),
            TreeState::Conflict => format!(
                "both {} and {} exist",
                tree.active_path.display(),
                tree.hidden_path.display()
            ),
            TreeState::Absent => "-".to_string(),
        };
        let _ = writeln!(
            out,
            "{} {:<8} {:<9} {}",
            marker,
            tree.variant.as_str(),
            tree.state.as_str(),
            location
        );
    }

    out
}

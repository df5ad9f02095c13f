//! Variant activation.
//!
//! Activating a variant moves the other variant's tree aside, brings this
//! variant's tree back (or creates it), then configures and builds inside
//! it. Every failure is terminal: nothing is retried and completed renames
//! are not rolled back.

use std::path::PathBuf;

use anyhow::Context;

use crate::core::args::OptimizationMapping;
use crate::core::config::SwitchConfig;
use crate::core::tree::{BuildTree, TreeState};
use crate::core::variant::Variant;
use crate::ops::errors::{Step, SwitchError};
use crate::util::fs::{ensure_dir, rename_if_exists};
use crate::util::process::{ProcessBuilder, ProcessRunner};

/// What an activation did to the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchReport {
    /// Variant that is now active
    pub variant: Variant,
    /// Active directory the tools ran in
    pub active_path: PathBuf,
    /// The other variant's tree was moved to its hidden path
    pub deactivated_other: bool,
    /// This variant's tree was restored from its hidden path
    pub restored: bool,
    /// This variant's tree was created fresh
    pub created: bool,
}

/// Activate `variant`: hide the other tree, restore or create this one,
/// then run the configuration and build tools in it.
pub fn activate(
    config: &SwitchConfig,
    variant: Variant,
    runner: &mut dyn ProcessRunner,
) -> Result<SwitchReport, SwitchError> {
    tracing::info!("building {}", variant);

    check_trees(config)?;

    if config.mapping() == OptimizationMapping::Legacy {
        tracing::warn!(
            "using legacy optimization mapping: debug tree gets `{}`, release tree gets `{}`; \
             set `build.optimization = \"conventional\"` in vswitch.toml to swap them",
            OptimizationMapping::Legacy.flags(Variant::Debug).join(" "),
            OptimizationMapping::Legacy.flags(Variant::Release).join(" "),
        );
    }

    let other = config.tree(variant.other());
    let deactivated_other = deactivate(other)?;

    let tree = config.tree(variant);
    let restored = reactivate(tree)?;
    let created = ensure_dir(tree.active_path())?;
    if created {
        tracing::debug!("created build directory {}", tree.active_path().display());
    }

    let configure = configure_command(config, variant);
    run_step(runner, Step::Configure, &configure)?;

    let build = ProcessBuilder::new(&config.tools().build).cwd(tree.active_path());
    run_step(runner, Step::Build, &build)?;

    Ok(SwitchReport {
        variant,
        active_path: tree.active_path().to_path_buf(),
        deactivated_other,
        restored,
        created,
    })
}

/// The configuration tool invocation for `variant`.
///
/// Arguments are the common and variant flags followed by the absolute
/// project root; the working directory is the variant's active tree.
pub fn configure_command(config: &SwitchConfig, variant: Variant) -> ProcessBuilder {
    ProcessBuilder::new(&config.tools().configure)
        .args(config.tool_arguments(variant))
        .arg(config.project_root())
        .cwd(config.tree(variant).active_path())
}

/// Refuse to touch anything unless both trees are in a state renames can handle.
fn check_trees(config: &SwitchConfig) -> Result<(), SwitchError> {
    for variant in Variant::ALL {
        let tree = config.tree(variant);
        let state = tree.inspect().with_context(|| {
            format!("failed to inspect build tree {}", tree.active_path().display())
        })?;

        match state {
            TreeState::Conflict => {
                return Err(SwitchError::TreeConflict {
                    variant,
                    active: tree.active_path().to_path_buf(),
                    hidden: tree.hidden_path().to_path_buf(),
                })
            }
            TreeState::Blocked(path) => return Err(SwitchError::TreeBlocked { variant, path }),
            TreeState::Absent | TreeState::Active | TreeState::Inactive => {}
        }
    }
    Ok(())
}

fn deactivate(tree: &BuildTree) -> Result<bool, SwitchError> {
    tracing::debug!("disabling build directory {}", tree.name());
    Ok(rename_if_exists(tree.active_path(), tree.hidden_path())?)
}

fn reactivate(tree: &BuildTree) -> Result<bool, SwitchError> {
    tracing::debug!("enabling build directory {}", tree.name());
    Ok(rename_if_exists(tree.hidden_path(), tree.active_path())?)
}

fn run_step(
    runner: &mut dyn ProcessRunner,
    step: Step,
    cmd: &ProcessBuilder,
) -> Result<(), SwitchError> {
    tracing::debug!("running {} step: {}", step, cmd.display_command());

    let status = runner.run(cmd)?;
    if !status.success() {
        return Err(SwitchError::ToolFailed {
            step,
            program: cmd.get_program().to_path_buf(),
            status,
        });
    }
    Ok(())
}

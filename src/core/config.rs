//! Resolved, immutable switcher configuration.

use std::path::{Path, PathBuf};

use crate::core::args::{tool_arguments, OptimizationMapping, Toolchain, VariantFlags};
use crate::core::tree::BuildTree;
use crate::core::variant::{Variant, VariantMap};

/// Default directory prefix marking a hidden tree.
pub const DEFAULT_HIDDEN_PREFIX: &str = ".";

/// External programs the switcher drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tools {
    /// Build-system generator (run once per activation)
    pub configure: PathBuf,
    /// Build runner (run after a successful configure)
    pub build: PathBuf,
}

impl Default for Tools {
    fn default() -> Self {
        Tools {
            configure: PathBuf::from("cmake"),
            build: PathBuf::from("ninja"),
        }
    }
}

/// Everything the switcher knows about one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub tree: BuildTree,
    pub flags: VariantFlags,
}

/// Configuration keyed by variant, built once at startup.
#[derive(Debug, Clone)]
pub struct SwitchConfig {
    project_root: PathBuf,
    tools: Tools,
    toolchain: Toolchain,
    mapping: OptimizationMapping,
    profiles: VariantMap<Profile>,
}

impl SwitchConfig {
    /// Default configuration for a project rooted at `project_root`.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let mapping = OptimizationMapping::default();
        let profiles = VariantMap::from_fn(|v| Profile {
            tree: BuildTree::new(&project_root, default_tree_name(v), DEFAULT_HIDDEN_PREFIX),
            flags: VariantFlags::new(v, mapping),
        });

        SwitchConfig {
            project_root,
            tools: Tools::default(),
            toolchain: Toolchain::default(),
            mapping,
            profiles,
        }
    }

    /// Assemble a configuration from already-validated parts.
    pub fn from_parts(
        project_root: PathBuf,
        tools: Tools,
        toolchain: Toolchain,
        mapping: OptimizationMapping,
        profiles: VariantMap<Profile>,
    ) -> Self {
        SwitchConfig {
            project_root,
            tools,
            toolchain,
            mapping,
            profiles,
        }
    }

    /// Absolute project root, passed as the configure tool's source directory.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn tools(&self) -> &Tools {
        &self.tools
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    pub fn mapping(&self) -> OptimizationMapping {
        self.mapping
    }

    pub fn profile(&self, variant: Variant) -> &Profile {
        self.profiles.get(variant)
    }

    pub fn tree(&self, variant: Variant) -> &BuildTree {
        &self.profiles.get(variant).tree
    }

    /// Configure arguments for `variant`, excluding the source directory.
    pub fn tool_arguments(&self, variant: Variant) -> Vec<String> {
        tool_arguments(&self.toolchain, &self.profiles.get(variant).flags)
    }
}

/// Default active directory name for a variant's tree.
pub fn default_tree_name(variant: Variant) -> String {
    format!("build-{}", variant.as_str())
}

//! Configuration file support for vswitch.
//!
//! A project may carry a `vswitch.toml` next to its top-level
//! `CMakeLists.txt`. Every key is optional; anything left out keeps the
//! built-in default. The file is parsed into [`Config`] and then resolved
//! into the immutable [`SwitchConfig`] the operations take.

use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::args::{OptimizationMapping, Toolchain, VariantFlags};
use crate::core::config::{default_tree_name, Profile, SwitchConfig, Tools, DEFAULT_HIDDEN_PREFIX};
use crate::core::tree::BuildTree;
use crate::core::variant::{Variant, VariantMap};
use crate::util::fs::read_to_string;

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "vswitch.toml";

/// Contents of `vswitch.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// External programs
    pub tools: ToolsConfig,

    /// Compilers and flags shared by both variants
    pub toolchain: ToolchainConfig,

    /// Build tree naming
    pub layout: LayoutConfig,

    /// Build settings
    pub build: BuildConfig,

    /// Debug variant overrides
    pub debug: VariantConfig,

    /// Release variant overrides
    pub release: VariantConfig,
}

/// External program overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Configuration tool (default: cmake)
    pub configure: Option<PathBuf>,

    /// Build tool (default: ninja)
    pub build: Option<PathBuf>,
}

/// Toolchain overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainConfig {
    pub generator: Option<String>,
    pub cc: Option<String>,
    pub cxx: Option<String>,
    pub linker: Option<String>,
    pub cxxflags: Option<Vec<String>>,
    pub ldflags: Option<Vec<String>>,
    pub compile_commands: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Prefix that marks a hidden tree (default: ".")
    pub hidden_prefix: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Optimization mapping: "legacy" or "conventional"
    pub optimization: Option<String>,
}

/// Per-variant overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VariantConfig {
    /// Active tree directory name
    pub dir: Option<String>,

    /// CMAKE_INSTALL_PREFIX
    pub install_prefix: Option<String>,

    /// Extra configure arguments
    #[serde(default)]
    pub args: Vec<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration, or use defaults if the file doesn't exist.
    ///
    /// Unlike a missing file, a malformed one is an error.
    pub fn load_if_exists(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn variant(&self, variant: Variant) -> &VariantConfig {
        match variant {
            Variant::Debug => &self.debug,
            Variant::Release => &self.release,
        }
    }

    /// Parse the optimization mapping.
    pub fn mapping(&self) -> Result<OptimizationMapping> {
        match self.build.optimization {
            Some(ref s) => s.parse().map_err(|e: String| anyhow::anyhow!(e)),
            None => Ok(OptimizationMapping::default()),
        }
    }

    /// Apply defaults and validate, producing the switcher configuration.
    pub fn resolve(self, project_root: &Path) -> Result<SwitchConfig> {
        let mapping = self.mapping()?;

        let hidden_prefix = self
            .layout
            .hidden_prefix
            .clone()
            .unwrap_or_else(|| DEFAULT_HIDDEN_PREFIX.to_string());
        if hidden_prefix.is_empty() {
            bail!("layout.hidden_prefix must not be empty");
        }

        let profile = |variant: Variant| -> Result<Profile> {
            let cfg = self.variant(variant);
            let dir = cfg.dir.clone().unwrap_or_else(|| default_tree_name(variant));
            validate_dir_name(&format!("{}.dir", variant), &dir)?;
            validate_dir_name("layout.hidden_prefix", &format!("{}{}", hidden_prefix, dir))?;

            let mut flags = VariantFlags::new(variant, mapping);
            if let Some(ref prefix) = cfg.install_prefix {
                flags.install_prefix = prefix.clone();
            }
            flags.extra_args = cfg.args.clone();

            Ok(Profile {
                tree: BuildTree::new(project_root, dir, &hidden_prefix),
                flags,
            })
        };
        let debug = profile(Variant::Debug)?;
        let release = profile(Variant::Release)?;

        check_distinct_paths(&debug.tree, &release.tree)?;

        let defaults = Tools::default();
        let tools = Tools {
            configure: resolve_tool(project_root, self.tools.configure, defaults.configure),
            build: resolve_tool(project_root, self.tools.build, defaults.build),
        };

        let toolchain = self.toolchain.resolve();

        Ok(SwitchConfig::from_parts(
            project_root.to_path_buf(),
            tools,
            toolchain,
            mapping,
            VariantMap::new(debug, release),
        ))
    }
}

impl ToolchainConfig {
    fn resolve(self) -> Toolchain {
        let defaults = Toolchain::default();
        Toolchain {
            generator: self.generator.unwrap_or(defaults.generator),
            cc: self.cc.unwrap_or(defaults.cc),
            cxx: self.cxx.unwrap_or(defaults.cxx),
            linker: self.linker.unwrap_or(defaults.linker),
            cxxflags: self.cxxflags.unwrap_or(defaults.cxxflags),
            ldflags: self.ldflags.unwrap_or(defaults.ldflags),
            compile_commands: self.compile_commands.unwrap_or(defaults.compile_commands),
        }
    }
}

/// Tree names, active and hidden, must be a single plain path component.
fn validate_dir_name(key: &str, name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => bail!("{} must give a plain directory name, got `{}`", key, name),
    }
}

/// No two of the four tree locations may coincide, or a rename would hand
/// one variant's tree to the other.
fn check_distinct_paths(debug: &BuildTree, release: &BuildTree) -> Result<()> {
    let paths = [
        ("debug tree", debug.active_path()),
        ("hidden debug tree", debug.hidden_path()),
        ("release tree", release.active_path()),
        ("hidden release tree", release.hidden_path()),
    ];

    for (i, (first, a)) in paths.iter().enumerate() {
        for (second, b) in &paths[i + 1..] {
            if a == b {
                bail!(
                    "debug and release trees must use different directories \
                     ({} and {} are both `{}`)",
                    first,
                    second,
                    a.display()
                );
            }
        }
    }
    Ok(())
}

/// Relative tool paths with a directory part are taken relative to the project.
/// Bare names are left for PATH lookup.
fn resolve_tool(project_root: &Path, configured: Option<PathBuf>, default: PathBuf) -> PathBuf {
    match configured {
        Some(path) if path.is_relative() && path.components().count() > 1 => {
            project_root.join(path)
        }
        Some(path) => path,
        None => default,
    }
}

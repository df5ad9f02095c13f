//! Core data structures for vswitch.
//!
//! - Variants and per-variant storage
//! - Build tree naming and state
//! - Configure argument construction
//! - The resolved, immutable switcher configuration

pub mod args;
pub mod config;
pub mod tree;
pub mod variant;

pub use args::{tool_arguments, OptimizationMapping, Toolchain, VariantFlags};
pub use config::{Profile, SwitchConfig, Tools};
pub use tree::{BuildTree, TreeState};
pub use variant::{Variant, VariantMap};

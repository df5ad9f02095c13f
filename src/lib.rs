//! vswitch - switch a CMake/Ninja project between debug and release build trees
//!
//! Only one variant's build tree is active at a time. Activating a variant
//! renames the other variant's tree aside (never deleting it), restores or
//! creates this variant's tree, then runs the configuration and build tools
//! inside it.

pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for vswitch unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides a process runner that records commands instead of running them.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{SwitchConfig, Variant};
pub use crate::ops::{activate, status, SwitchError};
pub use crate::util::context::GlobalContext;

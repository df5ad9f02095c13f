//! High-level operations.
//!
//! This module contains the implementation of vswitch commands.

pub mod errors;
pub mod status;
pub mod switch;

pub use errors::{Step, SwitchError};
pub use status::{format_report, status, StatusReport, TreeStatus};
pub use switch::{activate, configure_command, SwitchReport};

//! Command implementations

pub mod activate;
pub mod status;

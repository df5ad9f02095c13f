//! CLI definitions using clap.

use clap::{Parser, Subcommand};

/// vswitch - switch a CMake/Ninja project between debug and release build trees
#[derive(Parser)]
#[command(name = "vswitch")]
#[command(author, version, about)]
#[command(
    long_about = "Switch a CMake/Ninja project between debug and release build trees.\n\n\
                  The project root is the nearest directory at or above the current one \
                  that contains vswitch.toml. Without one, the current directory is used \
                  if it contains CMakeLists.txt."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Activate, configure and build the debug tree
    #[command(visible_alias = "d")]
    Debug,

    /// Activate, configure and build the release tree
    #[command(visible_alias = "r")]
    Release,

    /// Show which build tree is active
    #[command(visible_alias = "s")]
    Status,
}

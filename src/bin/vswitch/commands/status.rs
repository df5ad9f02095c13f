//! `vswitch status` command

use anyhow::{bail, Result};

use vswitch::ops::{format_report, status};
use vswitch::GlobalContext;

pub fn execute(ctx: &GlobalContext) -> Result<()> {
    let config = ctx.load_switch_config()?;
    let report = status(&config)?;

    print!("{}", format_report(&report));

    if !report.is_consistent() {
        bail!("build trees need manual cleanup before switching");
    }

    Ok(())
}

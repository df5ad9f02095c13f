//! `vswitch debug` / `vswitch release` commands

use anyhow::Result;

use vswitch::ops::activate;
use vswitch::util::SystemRunner;
use vswitch::{GlobalContext, Variant};

pub fn execute(ctx: &GlobalContext, variant: Variant) -> Result<()> {
    let config = ctx.load_switch_config()?;

    let report = activate(&config, variant, &mut SystemRunner)?;

    if report.deactivated_other {
        eprintln!(
            "      Hidden {}",
            config.tree(variant.other()).hidden_path().display()
        );
    }
    eprintln!(
        "    Finished `{}` -> {}",
        variant,
        report.active_path.display()
    );

    Ok(())
}

//! Name command implementation.

use anyhow::{Context, Result};
use console::style;

use crate::args::KeyArgs;

/// Execute the name command.
pub fn execute(args: &KeyArgs) -> Result<()> {
    let key = args.key();
    let id = key.identifier().context("Cannot name experiment")?;

    println!("{}", style(&id).cyan().bold());
    println!("  Steps:  {} (t = {:.1})", key.steps(), key.time());
    println!("  MSD:    {}", key.msd_file()?.display());
    println!("  Counts: {}", key.counts_file()?.display());

    Ok(())
}

//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - staggered quantum-walk circuit synthesis",
        style("dsgwalk").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  dsgwalk-ir           Circuit intermediate representation");
    println!("  dsgwalk-compile      Unrolling and basis translation passes");
    println!("  dsgwalk-synth        DSG tessellations and walk assembly");
    println!("  dsgwalk-adapter-sim  Statevector simulator");
    println!("  dsgwalk-cli          Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}

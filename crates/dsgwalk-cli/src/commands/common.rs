//! Shared helpers for CLI commands.

use console::style;

use dsgwalk_adapter_sim::Counts;
use dsgwalk_synth::NodeBasis;

const MAX_ROWS: usize = 16;

fn bar(prob: f64) -> String {
    "█".repeat((prob / 2.0).round() as usize)
}

/// Print a shot histogram, most frequent outcomes first.
pub fn print_counts(counts: &Counts) {
    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        counts.total()
    );

    let mut sorted: Vec<(&str, u64)> = counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    let total = counts.total() as f64;

    for (bitstring, count) in sorted.iter().take(MAX_ROWS) {
        let prob = *count as f64 / total * 100.0;
        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar(prob)).green()
        );
    }

    if sorted.len() > MAX_ROWS {
        println!("  ... and {} more outcomes", sorted.len() - MAX_ROWS);
    }
}

/// Print one row per node with its basis bitstring.
pub fn print_distribution(title: &str, basis: &NodeBasis, probs: &[f64]) {
    println!("\n{} {}:", style("✓").green().bold(), title);
    for (node, p) in probs.iter().enumerate() {
        let prob = p * 100.0;
        println!(
            "  node {:>2} {}: {:>6.2}% {}",
            node,
            style(basis.bitstring_of(node)).cyan(),
            prob,
            style(bar(prob)).green()
        );
    }
}

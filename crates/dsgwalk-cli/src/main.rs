//! dsgwalk command-line interface
//!
//! Builds staggered quantum-walk circuits on the Dual Sierpinski Gasket,
//! runs them on the bundled statevector simulator and names experiment data.
//!
//! ```text
//! dsgwalk build --encoding compact --time 0.3 --layers 2
//! dsgwalk run --model XY --shots 4000 --seed 7
//! dsgwalk name --source qpu --system hanoi --layers 5
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;

use args::{Format, KeyArgs, WalkArgs};
use commands::{build, name, run, version};

/// dsgwalk - staggered quantum walks on the Dual Sierpinski Gasket
#[derive(Parser)]
#[command(name = "dsgwalk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a walk circuit
    Build {
        #[command(flatten)]
        walk: WalkArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Write the circuit to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Simulate a walk circuit and show the node distribution
    Run {
        #[command(flatten)]
        walk: WalkArgs,

        /// Number of shots
        #[arg(short, long, default_value = "4000", env = "DSGWALK_SHOTS")]
        shots: u32,

        /// Seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the identifier and data files of an experiment
    Name {
        #[command(flatten)]
        key: KeyArgs,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Build {
            walk,
            format,
            output,
        } => build::execute(&walk, format, output.as_deref()),
        Commands::Run { walk, shots, seed } => run::execute(&walk, shots, seed),
        Commands::Name { key } => name::execute(&key),
        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

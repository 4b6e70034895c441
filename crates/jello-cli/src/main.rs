//! Jello CLI: simulation, benchmarking, and snapshot inspection.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "jello")]
#[command(version, about = "Jello cube: mass-spring soft body simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation.
    Simulate {
        /// Simulation config (TOML). Defaults are used when omitted.
        #[arg(short, long)]
        config: Option<String>,

        /// Physics preset to apply over the config (see `jello presets`).
        #[arg(short, long)]
        preset: Option<String>,

        /// Override the lattice resolution.
        #[arg(short, long)]
        resolution: Option<u32>,

        /// Override the integrator (euler, rk4).
        #[arg(short, long)]
        integrator: Option<String>,

        /// Number of ticks to run.
        #[arg(short, long, default_value_t = 600)]
        ticks: u64,

        /// Write the final state to this snapshot file.
        #[arg(long)]
        snapshot: Option<String>,

        /// Write every tick's vertex stream to this JSON file.
        #[arg(long)]
        export: Option<String>,
    },

    /// Run the benchmark suite.
    Benchmark {
        /// Which scenario to run (free_fall, stretch_release, squash, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Integrator (euler, rk4).
        #[arg(short, long, default_value = "rk4")]
        integrator: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Inspect a state snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: String,
    },

    /// Validate a simulation config.
    Validate {
        /// Path to config file (TOML).
        path: String,
    },

    /// List the built-in physics presets.
    Presets,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            config,
            preset,
            resolution,
            integrator,
            ticks,
            snapshot,
            export,
        } => commands::simulate(commands::SimulateArgs {
            config: config.as_deref(),
            preset: preset.as_deref(),
            resolution,
            integrator: integrator.as_deref(),
            ticks,
            snapshot: snapshot.as_deref(),
            export: export.as_deref(),
        }),
        Commands::Benchmark {
            scenario,
            integrator,
            output,
        } => commands::benchmark(&scenario, &integrator, output.as_deref()),
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Presets => commands::presets(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

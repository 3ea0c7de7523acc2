//! NEURITE - CLI Entry Point
//!
//! Drives the network simulation: seeds input values, steps the engine and
//! reports what it observes.

use clap::{Parser, Subcommand};
use neurite::stats::{Stats, StatsHistory};
use neurite::{benchmark, Config, Network};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "neurite")]
#[command(version)]
#[command(about = "Growable signal-propagation network simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Override the free-run step count from the config
        #[arg(short, long)]
        steps: Option<u64>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Where to write the stats history JSON
        #[arg(short, long, default_value = "stats_history.json")]
        output: PathBuf,

        /// Quiet mode (no per-step output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },

    /// Run performance benchmark
    Bench {
        /// Number of steps
        #[arg(short, long, default_value = "1000")]
        steps: u64,

        /// Grid side length (node count is its square)
        #[arg(short, long, default_value = "32")]
        grid_size: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            steps,
            seed,
            output,
            quiet,
        } => run_simulation(config, steps, seed, output, quiet),

        Commands::Init { output } => generate_config(output),

        Commands::Bench { steps, grid_size } => run_benchmark(steps, grid_size),
    }
}

fn run_simulation(
    config_path: PathBuf,
    steps_override: Option<u64>,
    seed: Option<u64>,
    output: PathBuf,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Load or create config
    let config = if config_path.exists() {
        log::info!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        log::info!("Using default configuration");
        Config::default()
    };

    let free_steps = steps_override.unwrap_or(config.run.steps);

    // Create network
    let mut network = match seed {
        Some(s) => Network::new_with_seed(s),
        None => Network::new(),
    };
    network.populate(config.network.grid_size);

    log::info!(
        "Network populated: {}x{} = {} nodes (seed {})",
        config.network.grid_size,
        config.network.grid_size,
        network.node_count(),
        network.seed()
    );

    // The driver's own random source: input injection and probe selection.
    // Offset from the network seed so the two streams stay independent.
    let mut driver_rng = ChaCha8Rng::seed_from_u64(network.seed().wrapping_add(1));
    let input_index = driver_rng.gen_range(0..network.node_count());
    let output_index = driver_rng.gen_range(0..network.node_count());
    log::info!("Probes: input node {}, output node {}", input_index, output_index);

    let mut stats = Stats::new();
    let mut history = StatsHistory::new(config.logging.stats_interval);
    let start = Instant::now();
    let mut step: u64 = 0;

    // Kickstart: flood the whole network with random values each step so
    // early growth has signal to propagate.
    for _ in 0..config.run.kickstart_steps {
        for node in &mut network.nodes {
            node.value = driver_rng.gen();
        }
        let new_connections = network.advance();
        step += 1;

        if !quiet {
            println!("{} | {}", network.nodes[output_index].value, new_connections);
        }
        if history.should_record(step) {
            stats.update(step, &network, new_connections);
            log::info!("{}", stats.summary());
            history.record(stats.clone());
        }
    }
    log::info!("Kickstart over ({} steps)", config.run.kickstart_steps);

    // Free run: the network feeds on its own state, optionally with one
    // driven input node.
    for _ in 0..free_steps {
        if config.run.drive_input {
            network.nodes[input_index].value = driver_rng.gen();
        }
        let new_connections = network.advance();
        step += 1;

        if !quiet {
            println!("{} | {}", network.nodes[output_index].value, new_connections);
        }
        if history.should_record(step) {
            stats.update(step, &network, new_connections);
            log::info!("{}", stats.summary());
            history.record(stats.clone());
        }
    }

    let elapsed = start.elapsed();
    let steps_per_sec = step as f64 / elapsed.as_secs_f64();

    log::info!("=== Simulation Complete ===");
    log::info!("Time: {:.2}s", elapsed.as_secs_f64());
    log::info!("Steps: {}", step);
    log::info!("Speed: {:.1} steps/s", steps_per_sec);
    log::info!("Connections: {}", network.connection_count());

    // Save stats history
    history.save(&output)?;
    log::info!("Stats history: {:?}", output);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}

fn run_benchmark(steps: u64, grid_size: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== NEURITE Benchmark ===");
    println!("Steps: {}", steps);
    println!("Grid: {}x{}", grid_size, grid_size);
    println!();

    let result = benchmark(steps, grid_size);
    println!("{}", result);

    Ok(())
}

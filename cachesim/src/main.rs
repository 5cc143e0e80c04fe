use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;
use clap::Parser;
use color_eyre::eyre::{self, WrapErr};
use cachelib::config::LayeredCacheConfig;
use cachelib::io::get_reader;
use cachelib::simulator::Simulator;

#[cfg(debug_assertions)]
const DEBUG_DEFAULT: bool = true;

#[cfg(not(debug_assertions))]
const DEBUG_DEFAULT: bool = false;

#[derive(Parser, Debug)]
#[command(about = String::from("Multi-level cache hierarchy simulator"))]
struct Args {
    /// JSON description of the cache levels, closest to the requester first
    config: PathBuf,
    /// Memory trace, one `<location> <hex address> <mode> <size>` record per line
    trace: PathBuf,

    #[arg(short, long)]
    performance: bool,

    #[arg(short, long, default_value_t = DEBUG_DEFAULT)]
    debug: bool,
}

fn main() -> eyre::Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let start = Instant::now();
    let args = Args::parse();
    let config = LayeredCacheConfig::from_path(&args.config)
        .wrap_err_with(|| format!("Couldn't load the config file at path {}", args.config.display()))?;
    let mut simulator = Simulator::new(&config).wrap_err("Invalid cache configuration")?;
    let trace_file = File::open(&args.trace)
        .wrap_err_with(|| format!("Couldn't open the trace file at path {}", args.trace.display()))?;
    let trace_reader = get_reader(trace_file).wrap_err("Couldn't memory map the trace file")?;
    let result = simulator
        .simulate(trace_reader)
        .wrap_err_with(|| format!("Couldn't simulate the trace at path {}", args.trace.display()))?;
    println!("{}", serde_json::to_string_pretty(result).wrap_err("Couldn't serialise the output")?);
    if args.performance {
        let simulation_time = simulator.get_execution_time();
        let total_time = start.elapsed();
        println!("Simulation time: {}s", simulation_time.as_nanos() as f64 / 1e9);
        println!("Total execution time (includes initial parsing, configuration, and output): {}s", total_time.as_nanos() as f64 / 1e9)
    }
    if args.debug {
        #[cfg(debug_assertions)]
        println!("Running the debug binary, debug mode is enabled by default. If benchmarking, do not use this binary, re-compile with the --release argument when using cargo run");
        println!("Parsed input configuration: {config:?}");
        let uninitialised_lines = simulator.get_uninitialised_line_counts();
        let formatted = config.caches
            .iter()
            .map(|c| c.name.clone())
            .zip(uninitialised_lines.iter())
            .map(|(name, count)| format!("{name}: {}", *count))
            .collect::<Vec<_>>()
            .join(", ");
        println!("Uninitialised cache lines by layer: ({formatted})");
        println!("Total uninitialised cache lines: {}", uninitialised_lines.iter().sum::<u64>())
    }
    Ok(())
}

//! Command-line runner for the cache benchmarks.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cachebench::cache::{self, CacheLevel, sysfs};
use cachebench::config::BenchConfig;
use cachebench::report;
use cachebench::sort::{self, DEFAULT_SEED, DEFAULT_SORT_SIZES};
use cachebench::worker::{SweepEvent, spawn_sweep};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

/// Cache-aware memory and CPU benchmarks
#[derive(Parser)]
#[command(name = "cachebench")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show detected cache sizes
    Cache(DeviceArgs),
    /// Time IJK vs IKJ matrix multiplication across cache-relative sizes
    Memory {
        #[command(flatten)]
        device: DeviceArgs,

        /// Cache level to size matrices against
        #[arg(short, long, value_enum, default_value = "auto")]
        level: Target,

        /// Base capacity in bytes, overriding detection
        #[arg(short, long)]
        capacity: Option<u64>,

        /// Trials per matrix size
        #[arg(short, long)]
        repetitions: Option<usize>,

        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare bubble sort and heap sort
    Sort {
        /// Number of integers to sort; repeat for several sizes (default: 1000..20000 sweep)
        #[arg(short = 'n', long)]
        len: Vec<usize>,

        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
struct DeviceArgs {
    /// Hardware name (defaults to the cpuinfo "Hardware" field)
    #[arg(long)]
    hardware: Option<String>,

    /// Board name, matched against the SoC database
    #[arg(long, default_value = "")]
    board: String,

    #[arg(long, default_value = sysfs::SYSFS_CPU_ROOT)]
    sysfs_root: PathBuf,
}

impl DeviceArgs {
    fn detect(&self) -> cache::CacheHierarchy {
        let hardware = self
            .hardware
            .clone()
            .or_else(|| sysfs::cpuinfo_hardware(Path::new(sysfs::CPUINFO_PATH)))
            .unwrap_or_default();
        cache::detect(&hardware, &self.board, &self.sysfs_root)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    L1,
    L2,
    L3,
    /// L3, else L2, else the fallback capacity
    Auto,
}

impl Target {
    fn level(self) -> Option<CacheLevel> {
        match self {
            Target::L1 => Some(CacheLevel::L1),
            Target::L2 => Some(CacheLevel::L2),
            Target::L3 => Some(CacheLevel::L3),
            Target::Auto => None,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Cache(device) => {
            print!("{}", report::cache_table(&device.detect()));
        }
        Commands::Memory {
            device,
            level,
            capacity,
            repetitions,
            config,
            json,
        } => {
            let mut cfg = match &config {
                Some(path) => BenchConfig::load(path)?,
                None => BenchConfig::default(),
            };
            if let Some(r) = repetitions {
                cfg.repetitions = r;
            }
            cfg.validate()?;

            let base = match capacity {
                Some(bytes) => bytes,
                None => device
                    .detect()
                    .target_for(level.level(), cfg.fallback_capacity_bytes),
            };
            run_memory(&cfg, base, json)?;
        }
        Commands::Sort { len, seed, json } => {
            let sizes = if len.is_empty() {
                DEFAULT_SORT_SIZES.to_vec()
            } else {
                len
            };
            let results = sort::compare_sorts_sweep_with(&sizes, seed, |index, total, len| {
                eprintln!("[{}/{}] Sorting {} integers...", index + 1, total, len);
            });
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print!("{}", report::sort_table(&results));
            }
        }
    }
    Ok(())
}

fn run_memory(cfg: &BenchConfig, base: u64, json: bool) -> Result<()> {
    let dims = cfg.plan()?.plan_with(base, cfg.footprint()?);
    info!(base, points = dims.len(), repetitions = cfg.repetitions, "starting sweep");

    let worker = spawn_sweep(dims, cfg.repetitions);
    for event in worker.events() {
        if let SweepEvent::DimensionStarted {
            index,
            total,
            dimension,
        } = event
        {
            eprintln!(
                "[{}/{}] Testing matrix {}x{} ({} KB usage)...",
                index + 1,
                total,
                dimension.n,
                dimension.n,
                dimension.target_bytes / 1024
            );
        }
    }

    let results = match worker.join() {
        Ok(results) => results,
        Err(e) => {
            // Show what finished before reporting the failure.
            if json || !e.completed.is_empty() {
                print!("{}", report::sweep_output(base, &e.completed, json)?);
            }
            return Err(e).context("memory benchmark failed");
        }
    };

    print!("{}", report::sweep_output(base, &results, json)?);
    Ok(())
}

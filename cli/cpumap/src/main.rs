//! cpumap CLI: synchronize libvirt x86 CPU models from QEMU's CPU definitions.

mod commands;
mod config;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::SyncConfig;

#[derive(Parser)]
#[command(name = "cpumap", version, about = "Synchronize libvirt CPU models from QEMU")]
struct Cli {
    /// Configuration file (default: cpumap.toml in the current directory or above)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, expand and publish the CPU models that are not published yet
    Sync {
        /// Path to the QEMU source tree
        qemu: PathBuf,
        /// Path to libvirt's src/cpu_map directory
        outdir: PathBuf,
        /// Report what would be written without touching anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the model records extracted from QEMU as JSON
    Parse {
        /// Path to the QEMU source tree
        qemu: PathBuf,
    },
    /// Print the CPU models expanded from QEMU's definitions
    Expand {
        /// Path to the QEMU source tree
        qemu: PathBuf,
        /// Corpus to look up published signatures in
        #[arg(long)]
        outdir: Option<PathBuf>,
        /// Print JSON instead of one line per model
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Sync {
            qemu,
            outdir,
            dry_run,
        } => commands::sync::run(&qemu, &outdir, &config, dry_run),

        Commands::Parse { qemu } => commands::inspect::parse(&qemu, &config),

        Commands::Expand { qemu, outdir, json } => {
            commands::inspect::expand(&qemu, outdir.as_deref(), &config, json)
        }
    }
}

/// Load the configuration named on the command line, or search for one from
/// the current directory upward. Falls back to the defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<SyncConfig> {
    if let Some(path) = explicit {
        return SyncConfig::load(path);
    }

    let cwd = std::env::current_dir()?;
    match SyncConfig::find_and_load(&cwd)? {
        Some((config, path)) => {
            debug!(path = %path.display(), "loaded configuration");
            Ok(config)
        }
        None => Ok(SyncConfig::default()),
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{BenchmarkArgs, OutputFormat};

#[derive(Parser)]
#[command(
    name = "nodebisect",
    about = "nodebisect — isolate faulty cluster nodes with NCCL tests",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Path to a nodebisect.toml configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every host of a hostfile as healthy or unhealthy.
    ///
    /// Hosts are probed in contiguous groups of the hostfile order; the
    /// unhealthy hosts are written to <unhealthy-node-list-dir>/hostfile.
    Locate {
        /// Input hostfile with `<hostname> slots=<N>` lines
        #[arg(long)]
        hostfile: PathBuf,
        /// Directory receiving the unhealthy node list
        #[arg(long)]
        unhealthy_node_list_dir: Option<PathBuf>,
        /// Output format: text or json
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        #[command(flatten)]
        benchmark: BenchmarkArgs,
    },
    /// Run a single NCCL test across every host of a hostfile.
    Probe {
        /// Input hostfile with `<hostname> slots=<N>` lines
        #[arg(long)]
        hostfile: PathBuf,
        #[command(flatten)]
        benchmark: BenchmarkArgs,
    },
}

fn init_tracing(verbose: u8, json: bool) -> anyhow::Result<()> {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::from_default_env().add_directive(format!("nodebisect={level}").parse()?);
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json)?;

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Locate {
            hostfile,
            unhealthy_node_list_dir,
            format,
            benchmark,
        } => commands::locate::locate(
            &config,
            &hostfile,
            unhealthy_node_list_dir,
            format,
            &benchmark,
        ),
        Commands::Probe { hostfile, benchmark } => {
            commands::probe::probe(&config, &hostfile, &benchmark)
        }
    }
}

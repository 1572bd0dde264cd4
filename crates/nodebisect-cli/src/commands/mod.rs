use std::path::Path;

use anyhow::Context;
use clap::{Args, ValueEnum};
use nodebisect_core::NodebisectConfig;
use nodebisect_core::config::BenchmarkConfig;

pub mod locate;
pub mod probe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Benchmark overrides shared by every command that runs NCCL tests.
#[derive(Debug, Default, Args)]
pub struct BenchmarkArgs {
    /// Path to nccl-tests' all_reduce_perf
    #[arg(long)]
    pub all_reduce_perf: Option<String>,
    /// MPI launcher (default: mpiexec)
    #[arg(long)]
    pub launcher: Option<String>,
}

impl BenchmarkArgs {
    /// Config file values with command-line overrides applied.
    pub fn resolve(&self, config: &NodebisectConfig) -> BenchmarkConfig {
        let mut benchmark = config.benchmark.clone();
        if let Some(binary) = &self.all_reduce_perf {
            benchmark.binary = binary.clone();
        }
        if let Some(launcher) = &self.launcher {
            benchmark.launcher = launcher.clone();
        }
        benchmark
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<NodebisectConfig> {
    match path {
        Some(path) => NodebisectConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(NodebisectConfig::default()),
    }
}

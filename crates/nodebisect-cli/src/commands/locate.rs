use std::path::{Path, PathBuf};

use anyhow::Context;
use nodebisect_core::report::{format_json, format_report, write_unhealthy};
use nodebisect_core::{Manifest, NodebisectConfig, Partition};
use nodebisect_locate::{FaultLocalizer, HealthOracle};
use nodebisect_nccl::NcclOracle;
use tracing::info;

use super::{BenchmarkArgs, OutputFormat};

/// Run the `nodebisect locate` command.
pub fn locate(
    config: &NodebisectConfig,
    hostfile: &Path,
    output_dir: Option<PathBuf>,
    format: OutputFormat,
    benchmark: &BenchmarkArgs,
) -> anyhow::Result<()> {
    let output_dir = output_dir.unwrap_or_else(|| config.unhealthy_node_list_dir());
    let mut oracle = NcclOracle::new(benchmark.resolve(config));

    info!(
        launcher = %oracle.config().launcher,
        benchmark = %oracle.config().binary,
        "using NCCL oracle"
    );

    run_locate(hostfile, &output_dir, format, &mut oracle)?;
    Ok(())
}

/// Load the hostfile, classify it with `oracle`, report, and persist the
/// unhealthy list. Nothing is written when the hostfile is invalid.
pub(crate) fn run_locate<O: HealthOracle>(
    hostfile: &Path,
    output_dir: &Path,
    format: OutputFormat,
    oracle: &mut O,
) -> anyhow::Result<Partition> {
    let manifest = Manifest::from_file(hostfile)
        .with_context(|| format!("invalid hostfile {}", hostfile.display()))?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let partition = FaultLocalizer::new(manifest.hosts, manifest.slots).run(oracle);

    match format {
        OutputFormat::Text => print!("{}", format_report(&partition)),
        OutputFormat::Json => println!("{}", format_json(&partition)?),
    }

    let path = write_unhealthy(output_dir, &partition)?;
    if format == OutputFormat::Text {
        println!("✓ Unhealthy node list written to {}", path.display());
    }

    Ok(partition)
}

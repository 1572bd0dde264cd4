use std::path::Path;

use anyhow::{Context, bail};
use nodebisect_core::{Manifest, NodebisectConfig};
use nodebisect_locate::MIN_GROUP_SIZE;
use nodebisect_nccl::{NcclOracle, ProbeResult};

use super::BenchmarkArgs;

/// Run the `nodebisect probe` command: one NCCL test over the whole hostfile.
pub fn probe(
    config: &NodebisectConfig,
    hostfile: &Path,
    benchmark: &BenchmarkArgs,
) -> anyhow::Result<()> {
    let manifest = Manifest::from_file(hostfile)
        .with_context(|| format!("invalid hostfile {}", hostfile.display()))?;

    if manifest.hosts.len() < MIN_GROUP_SIZE {
        bail!(
            "hostfile lists {} host(s); an NCCL test needs at least {MIN_GROUP_SIZE}",
            manifest.hosts.len()
        );
    }

    let oracle = NcclOracle::new(benchmark.resolve(config));
    match oracle.probe(&manifest.hosts, manifest.slots) {
        ProbeResult::Healthy => {
            println!("healthy ({} hosts)", manifest.hosts.len());
            Ok(())
        }
        ProbeResult::Unhealthy => bail!(
            "unhealthy: NCCL test failed across {} hosts",
            manifest.hosts.len()
        ),
        ProbeResult::Failed => bail!(
            "NCCL test could not be launched with {}",
            oracle.config().launcher
        ),
    }
}

//! `mpiexec` + `all_reduce_perf` invocation.

use std::path::Path;
use std::process::{Command, Stdio};

use nodebisect_core::config::BenchmarkConfig;
use nodebisect_core::manifest::render_hostfile;
use nodebisect_core::{Host, SlotCount};
use nodebisect_locate::HealthOracle;
use tracing::{debug, info, warn};

use crate::probe::ProbeResult;

/// Exports every probe passes to the benchmark processes.
const NCCL_ENV: [&str; 2] = ["NCCL_DEBUG=INFO", "NCCL_ASYNC_ERROR_HANDLING=1"];

const HOSTFILE_NAME: &str = "hostfile";

/// Health oracle backed by nccl-tests' `all_reduce_perf`.
#[derive(Debug, Clone)]
pub struct NcclOracle {
    config: BenchmarkConfig,
}

impl NcclOracle {
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Run the benchmark once across exactly `group`.
    pub fn probe(&self, group: &[Host], slots: SlotCount) -> ProbeResult {
        let names: Vec<&str> = group.iter().map(Host::name).collect();
        info!(hosts = ?names, "nccl-test");

        let tmpdir = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(e) => {
                warn!(error = %e, "failed to create hostfile directory");
                return ProbeResult::Failed;
            }
        };
        let hostfile = tmpdir.path().join(HOSTFILE_NAME);
        if let Err(e) = std::fs::write(&hostfile, render_hostfile(group, slots)) {
            warn!(error = %e, path = %hostfile.display(), "failed to write hostfile");
            return ProbeResult::Failed;
        }

        let mut cmd = self.command(&hostfile);
        debug!("Running: {:?}", cmd);

        // Output is inherited so the operator sees the benchmark log.
        let result = match cmd
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
        {
            Ok(status) => ProbeResult::from_status(status),
            Err(e) => {
                warn!(
                    error = %e,
                    launcher = %self.config.launcher,
                    "failed to execute launcher"
                );
                ProbeResult::Failed
            }
        };

        info!(hosts = group.len(), ?result, "nccl-test finished");
        result
    }

    /// Build the launcher command for a hostfile.
    pub fn command(&self, hostfile: &Path) -> Command {
        let cfg = &self.config;
        let mut cmd = Command::new(&cfg.launcher);
        cmd.arg("--bind-to").arg("none");
        for export in NCCL_ENV.iter().copied().chain(cfg.env.iter().map(String::as_str)) {
            cmd.arg("-x").arg(export);
        }
        cmd.args(&cfg.launcher_args)
            .arg("--hostfile")
            .arg(hostfile)
            .arg(&cfg.binary)
            .arg("-b")
            .arg(&cfg.min_bytes)
            .arg("-e")
            .arg(&cfg.max_bytes)
            .arg("-d")
            .arg(&cfg.datatype);
        cmd
    }
}

impl HealthOracle for NcclOracle {
    fn test(&mut self, group: &[Host], slots: SlotCount) -> bool {
        self.probe(group, slots).is_healthy()
    }
}

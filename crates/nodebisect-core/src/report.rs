//! Result reporting: console text, JSON, and the unhealthy hostfile.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ReportError, ReportResult};
use crate::types::Partition;

/// File name of the unhealthy node list inside the output directory.
pub const UNHEALTHY_FILE_NAME: &str = "hostfile";

pub fn format_report(partition: &Partition) -> String {
    let mut out = String::new();

    out.push_str("Result:\n");
    out.push_str(&format!("  Healthy node ({}):\n", partition.healthy.len()));
    for host in &partition.healthy {
        out.push_str(&format!("    {host}\n"));
    }
    out.push_str(&format!("  Unhealthy node ({}):\n", partition.unhealthy.len()));
    for host in &partition.unhealthy {
        out.push_str(&format!("    {host}\n"));
    }
    out.push_str(&format!(
        "\n{} hosts classified with {} NCCL tests ({} resolved individually)\n",
        partition.total(),
        partition.probes,
        partition.unknown.len()
    ));

    out
}

pub fn format_json(partition: &Partition) -> ReportResult<String> {
    Ok(serde_json::to_string_pretty(partition)?)
}

/// Write the unhealthy hosts, one per line, to `<dir>/hostfile`.
///
/// `dir` is created if it does not exist. Returns the written path.
pub fn write_unhealthy(dir: &Path, partition: &Partition) -> ReportResult<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|source| ReportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(UNHEALTHY_FILE_NAME);
    let mut content = String::new();
    for host in &partition.unhealthy {
        content.push_str(host.name());
        content.push('\n');
    }
    std::fs::write(&path, content).map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;

    info!(
        path = %path.display(),
        unhealthy = partition.unhealthy.len(),
        "wrote unhealthy node list"
    );
    Ok(path)
}

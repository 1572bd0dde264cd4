//! Outcome of a single NCCL probe.

use std::process::ExitStatus;

use tracing::debug;

/// Result of a single health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeResult {
    /// The benchmark exited successfully.
    Healthy,
    /// The benchmark exited with a non-zero code or was killed by a signal.
    Unhealthy,
    /// The probe could not be executed (launcher missing, hostfile not written).
    Failed,
}

impl ProbeResult {
    pub fn from_status(status: ExitStatus) -> Self {
        if status.success() {
            ProbeResult::Healthy
        } else {
            debug!(code = ?status.code(), "benchmark exited abnormally");
            ProbeResult::Unhealthy
        }
    }

    /// Only a clean run counts as healthy.
    pub fn is_healthy(self) -> bool {
        self == ProbeResult::Healthy
    }
}

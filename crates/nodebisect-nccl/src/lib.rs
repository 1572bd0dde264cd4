//! nodebisect-nccl — NCCL all-reduce over MPI as a group health oracle.
//!
//! Each probe writes a hostfile for exactly the probed group into a fresh
//! temporary directory and runs
//!
//! ```text
//! mpiexec --bind-to none -x NCCL_DEBUG=INFO -x NCCL_ASYNC_ERROR_HANDLING=1 \
//!     --hostfile <tmp>/hostfile all_reduce_perf -b 1k -e 512k -d half
//! ```
//!
//! A clean exit means the group is healthy. Any other outcome, including a
//! launcher that cannot be started, counts as unhealthy. The temporary
//! directory is removed when the probe returns.

pub mod launcher;
pub mod probe;

pub use launcher::NcclOracle;
pub use probe::ProbeResult;

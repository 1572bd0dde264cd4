//! nodebisect.toml configuration parser.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

pub const DEFAULT_LAUNCHER: &str = "mpiexec";
pub const DEFAULT_BENCHMARK: &str = "all_reduce_perf";
pub const DEFAULT_UNHEALTHY_NODE_LIST_DIR: &str = "unhealthy-node-list";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodebisectConfig {
    #[serde(default)]
    pub benchmark: BenchmarkConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Parameters of the collective benchmark used as the health oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// MPI launcher binary.
    pub launcher: String,
    /// Path to `all_reduce_perf` from nccl-tests.
    pub binary: String,
    /// Smallest message size of the sweep (`-b`).
    pub min_bytes: String,
    /// Largest message size of the sweep (`-e`).
    pub max_bytes: String,
    /// Data type (`-d`).
    pub datatype: String,
    /// Extra `NAME=value` exports passed with `-x`.
    pub env: Vec<String>,
    /// Extra launcher arguments, placed before `--hostfile`.
    pub launcher_args: Vec<String>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            launcher: DEFAULT_LAUNCHER.to_string(),
            binary: DEFAULT_BENCHMARK.to_string(),
            min_bytes: "1k".to_string(),
            max_bytes: "512k".to_string(),
            datatype: "half".to_string(),
            env: Vec::new(),
            launcher_args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory that receives the unhealthy `hostfile`.
    pub unhealthy_node_list_dir: Option<PathBuf>,
}

impl NodebisectConfig {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Output directory, falling back to the built-in default.
    pub fn unhealthy_node_list_dir(&self) -> PathBuf {
        self.output
            .unhealthy_node_list_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UNHEALTHY_NODE_LIST_DIR))
    }
}

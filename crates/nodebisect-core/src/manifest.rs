//! Hostfile manifests: `<hostname> slots=<N>`, one host per line.
//!
//! The same format is read as the run's input and written as the scoped
//! descriptor handed to `mpiexec --hostfile`.

use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::error::{ManifestError, ManifestResult};
use crate::types::{Host, SlotCount};

/// Ordered host list plus the slot count shared by every host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub hosts: Vec<Host>,
    pub slots: SlotCount,
}

impl Manifest {
    pub fn from_file(path: &Path) -> ManifestResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = parse_manifest(&content)?;
        debug!(
            path = %path.display(),
            hosts = manifest.hosts.len(),
            slots = %manifest.slots,
            "loaded host manifest"
        );
        Ok(manifest)
    }
}

/// Parse a hostfile manifest.
///
/// Blank lines and `#` comments are skipped. The slot count comes from the
/// first host line; every other line must carry the same value.
pub fn parse_manifest(content: &str) -> ManifestResult<Manifest> {
    let line_re = Regex::new(r"^(\S+)\s+slots=(\S+)$")?;

    let mut hosts = Vec::new();
    let mut slots: Option<SlotCount> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let caps = line_re
            .captures(text)
            .ok_or_else(|| ManifestError::MissingSlots {
                line: line_no,
                text: text.to_string(),
            })?;
        let value = &caps[2];
        let found = value
            .parse::<u32>()
            .ok()
            .and_then(SlotCount::new)
            .ok_or_else(|| ManifestError::InvalidSlots {
                line: line_no,
                value: value.to_string(),
            })?;

        match slots {
            None => slots = Some(found),
            Some(expected) if expected != found => {
                return Err(ManifestError::MismatchedSlots {
                    line: line_no,
                    expected: expected.get(),
                    found: found.get(),
                });
            }
            Some(_) => {}
        }

        hosts.push(Host::new(&caps[1]));
    }

    let slots = slots.ok_or(ManifestError::Empty)?;
    Ok(Manifest { hosts, slots })
}

/// Render `hosts` in hostfile format with a shared slot count.
pub fn render_hostfile(hosts: &[Host], slots: SlotCount) -> String {
    let mut out = String::new();
    for host in hosts {
        out.push_str(&format!("{host} slots={slots}\n"));
    }
    out
}

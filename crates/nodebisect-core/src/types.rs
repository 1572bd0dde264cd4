//! Shared types used across nodebisect crates.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// A compute host, identified by its hostname.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Host(String);

impl Host {
    pub fn new(name: impl Into<String>) -> Self {
        Host(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Host {
    fn from(name: &str) -> Self {
        Host::new(name)
    }
}

/// Accelerators per node. Shared by every host in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotCount(NonZeroU32);

impl SlotCount {
    /// Returns `None` for zero.
    pub fn new(slots: u32) -> Option<Self> {
        NonZeroU32::new(slots).map(SlotCount)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for SlotCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Final status of a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Healthy,
    Unhealthy,
    /// A failed two-host probe could not say which side was at fault.
    Unknown,
}

/// Half-open interval `[begin, end)` over the ordered host list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub begin: usize,
    pub end: usize,
}

impl Range {
    pub fn new(begin: usize, end: usize) -> Self {
        debug_assert!(begin <= end, "range begin {begin} past end {end}");
        Range { begin, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.begin, self.end)
    }
}

/// Outcome of a fault localization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub healthy: Vec<Host>,
    pub unhealthy: Vec<Host>,
    /// Hosts that needed the individual resolution pass, in the order they
    /// were collected. Each of them also appears in `healthy` or `unhealthy`.
    pub unknown: Vec<Host>,
    /// Number of oracle invocations spent.
    pub probes: usize,
}

impl Partition {
    /// Final classification of `host`, or `None` if it was never seen.
    pub fn classification_of(&self, host: &Host) -> Option<Classification> {
        if self.healthy.contains(host) {
            Some(Classification::Healthy)
        } else if self.unhealthy.contains(host) {
            Some(Classification::Unhealthy)
        } else if self.unknown.contains(host) {
            Some(Classification::Unknown)
        } else {
            None
        }
    }

    pub fn total(&self) -> usize {
        self.healthy.len() + self.unhealthy.len()
    }
}

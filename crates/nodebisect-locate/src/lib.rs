//! nodebisect-locate — fault localization over a group health oracle.
//!
//! The oracle answers one question: does a collective job over exactly this
//! group of hosts complete? Every answer is expensive, so hosts are
//! classified with a nested binary search instead of pairwise probing.
//!
//! # Architecture
//!
//! ```text
//! FaultLocalizer::run
//!   ├── outer loop over the unclassified range [begin, end)
//!   │   └── expand_prefix() → longest confirmed-healthy prefix
//!   │       └── HealthOracle::test([begin, mid))
//!   └── resolution pass: Healthy + [unknown] for each Unknown host
//! ```
//!
//! Hosts are only ever probed in contiguous ranges of the input order, and no
//! probe ever has fewer than [`MIN_GROUP_SIZE`] hosts.

pub mod expander;
pub mod localizer;
pub mod oracle;

pub use expander::expand_prefix;
pub use localizer::FaultLocalizer;
pub use oracle::{CountingOracle, HealthOracle, MIN_GROUP_SIZE};

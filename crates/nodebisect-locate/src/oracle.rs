//! The group health oracle consumed by the localizer.

use nodebisect_core::{Host, SlotCount};

/// Smallest group a connectivity test can meaningfully exercise.
pub const MIN_GROUP_SIZE: usize = 2;

/// A blocking, boolean health check over an ordered group of hosts.
///
/// `test` returns `true` only when a collective job across exactly `group`
/// completed cleanly. A failing job is an answer, not an error.
///
/// Callers must not pass fewer than [`MIN_GROUP_SIZE`] hosts.
pub trait HealthOracle {
    fn test(&mut self, group: &[Host], slots: SlotCount) -> bool;
}

impl<F> HealthOracle for F
where
    F: FnMut(&[Host], SlotCount) -> bool,
{
    fn test(&mut self, group: &[Host], slots: SlotCount) -> bool {
        self(group, slots)
    }
}

/// Wraps an oracle and counts how many times it was invoked.
#[derive(Debug)]
pub struct CountingOracle<O> {
    inner: O,
    calls: usize,
}

impl<O: HealthOracle> CountingOracle<O> {
    pub fn new(inner: O) -> Self {
        Self { inner, calls: 0 }
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl<O: HealthOracle> HealthOracle for CountingOracle<O> {
    fn test(&mut self, group: &[Host], slots: SlotCount) -> bool {
        self.calls += 1;
        self.inner.test(group, slots)
    }
}

//! Prefix expansion: binary search for the longest healthy prefix of a range.

use nodebisect_core::{Host, Range, SlotCount};
use tracing::debug;

use crate::oracle::{HealthOracle, MIN_GROUP_SIZE};

/// Find the largest `t` in `[range.begin, range.end]` such that the oracle
/// reports `hosts[range.begin..t]` healthy.
///
/// Returns `range.begin` when not even the two-host probe at the start of the
/// range passed (or the range is too short to probe). Any other return value
/// was confirmed by an oracle call. Costs `O(log(range.len()))` probes.
pub fn expand_prefix<O: HealthOracle + ?Sized>(
    oracle: &mut O,
    hosts: &[Host],
    slots: SlotCount,
    range: Range,
) -> usize {
    debug_assert!(range.end <= hosts.len());

    let begin = range.begin;
    // Invariant: [begin, lower) passed (or lower == begin), [begin, upper) did not.
    let mut lower = begin;
    let mut upper = range.end + 1;

    while upper - lower > 1 {
        let mid = (lower + upper) / 2;
        if mid - begin < MIN_GROUP_SIZE {
            break;
        }

        let group = &hosts[begin..mid];
        let healthy = oracle.test(group, slots);
        debug!(
            range = %Range::new(begin, mid),
            size = group.len(),
            healthy,
            "prefix probe"
        );

        if healthy {
            lower = mid;
        } else {
            upper = mid;
        }
    }

    lower
}

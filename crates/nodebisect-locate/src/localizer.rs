//! Fault localization: partition an ordered host list with prefix expansion,
//! then resolve ambiguous hosts one at a time against the healthy set.

use nodebisect_core::{Host, Partition, Range, SlotCount};
use tracing::{debug, info, warn};

use crate::expander::expand_prefix;
use crate::oracle::{CountingOracle, HealthOracle, MIN_GROUP_SIZE};

/// Classifies every host of one run.
///
/// All run state lives in this struct; nothing is shared between runs.
#[derive(Debug)]
pub struct FaultLocalizer {
    hosts: Vec<Host>,
    slots: SlotCount,
    healthy: Vec<Host>,
    unhealthy: Vec<Host>,
    unknown: Vec<Host>,
}

impl FaultLocalizer {
    pub fn new(hosts: Vec<Host>, slots: SlotCount) -> Self {
        Self {
            hosts,
            slots,
            healthy: Vec::new(),
            unhealthy: Vec::new(),
            unknown: Vec::new(),
        }
    }

    /// Run the outer partitioning loop and the resolution pass.
    ///
    /// Every input host ends up in exactly one of `healthy` / `unhealthy`.
    pub fn run<O: HealthOracle + ?Sized>(mut self, oracle: &mut O) -> Partition {
        let mut oracle =
            CountingOracle::new(|group: &[Host], slots: SlotCount| oracle.test(group, slots));

        info!(hosts = self.hosts.len(), slots = %self.slots, "starting fault localization");
        self.partition(&mut oracle);
        self.resolve_unknown(&mut oracle);

        let probes = oracle.calls();
        info!(
            healthy = self.healthy.len(),
            unhealthy = self.unhealthy.len(),
            resolved = self.unknown.len(),
            probes,
            "fault localization finished"
        );

        Partition {
            healthy: self.healthy,
            unhealthy: self.unhealthy,
            unknown: self.unknown,
            probes,
        }
    }

    /// Outer loop: repeatedly expand the healthy prefix of `[begin, end)`.
    fn partition<O: HealthOracle>(&mut self, oracle: &mut O) {
        let end = self.hosts.len();
        let mut begin = 0;

        while begin + 1 < end {
            let t = expand_prefix(oracle, &self.hosts, self.slots, Range::new(begin, end));

            if t == begin {
                // The pair at `begin` failed or could not be probed; either
                // side may be at fault.
                debug!(host = %self.hosts[begin], "ambiguous host deferred");
                self.unknown.push(self.hosts[begin].clone());
                begin += 1;
                continue;
            }

            self.healthy.extend_from_slice(&self.hosts[begin..t]);
            info!(range = %Range::new(begin, t), "confirmed healthy prefix");

            if t != end {
                info!(host = %self.hosts[t], "host blamed for failed probe");
                self.unhealthy.push(self.hosts[t].clone());
            }
            // Skip the blamed host; re-probing it would fail again.
            begin = t + 1;
        }

        // A lone trailing host is never covered by a range probe.
        if begin + 1 == end {
            debug!(host = %self.hosts[begin], "trailing host deferred");
            self.unknown.push(self.hosts[begin].clone());
        }
    }

    /// Test each unknown host together with every host confirmed healthy so far.
    fn resolve_unknown<O: HealthOracle>(&mut self, oracle: &mut O) {
        for host in &self.unknown {
            if self.healthy.len() + 1 < MIN_GROUP_SIZE {
                warn!(%host, "no healthy host to test against, marking unhealthy");
                self.unhealthy.push(host.clone());
                continue;
            }

            let mut group = self.healthy.clone();
            group.push(host.clone());

            if oracle.test(&group, self.slots) {
                info!(%host, "unknown host resolved healthy");
                self.healthy.push(host.clone());
            } else {
                info!(%host, "unknown host resolved unhealthy");
                self.unhealthy.push(host.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodebisect_core::Classification;

    fn hosts(n: usize) -> Vec<Host> {
        (0..n).map(|i| Host::new(format!("h{i}"))).collect()
    }

    fn slots() -> SlotCount {
        SlotCount::new(8).unwrap()
    }

    fn names(hosts: &[Host]) -> Vec<&str> {
        hosts.iter().map(Host::name).collect()
    }

    /// Oracle that fails any group containing a faulty host, and panics on
    /// groups below the minimum size.
    fn faulty(bad: &[&str]) -> impl FnMut(&[Host], SlotCount) -> bool {
        let bad: Vec<Host> = bad.iter().map(|name| Host::from(*name)).collect();
        move |group: &[Host], _: SlotCount| {
            assert!(group.len() >= MIN_GROUP_SIZE, "probe with {} hosts", group.len());
            !group.iter().any(|h| bad.contains(h))
        }
    }

    /// Every host lands in exactly one final set.
    fn assert_complete(partition: &Partition, input: &[Host]) {
        assert_eq!(partition.total(), input.len(), "{partition:?}");
        for host in input {
            let in_healthy = partition.healthy.contains(host);
            let in_unhealthy = partition.unhealthy.contains(host);
            assert!(in_healthy ^ in_unhealthy, "{host} in {partition:?}");
        }
    }

    #[test]
    fn all_healthy() {
        let input = hosts(4);
        let partition = FaultLocalizer::new(input.clone(), slots()).run(&mut faulty(&[]));

        assert_eq!(partition.healthy, input);
        assert!(partition.unhealthy.is_empty());
        assert!(partition.unknown.is_empty());
        assert_eq!(partition.probes, 3);
    }

    #[test]
    fn single_fault_in_middle() {
        let input = hosts(4);
        let mut probes: Vec<Vec<String>> = Vec::new();
        let mut inner = faulty(&["h2"]);
        let mut oracle = |group: &[Host], slots: SlotCount| {
            probes.push(group.iter().map(|h| h.name().to_string()).collect());
            inner(group, slots)
        };

        let partition = FaultLocalizer::new(input.clone(), slots()).run(&mut oracle);

        assert_eq!(names(&partition.healthy), ["h0", "h1", "h3"]);
        assert_eq!(names(&partition.unhealthy), ["h2"]);
        assert_eq!(names(&partition.unknown), ["h3"]);
        // h3 is resolved against {h0, h1}
        assert_eq!(
            probes.last().unwrap(),
            &["h0".to_string(), "h1".to_string(), "h3".to_string()]
        );
        assert_complete(&partition, &input);
    }

    #[test]
    fn two_hosts_failing_pair_are_unhealthy() {
        let input = hosts(2);
        let mut oracle = CountingOracle::new(|_: &[Host], _: SlotCount| false);
        let partition = FaultLocalizer::new(input.clone(), slots()).run(&mut oracle);

        assert!(partition.healthy.is_empty());
        assert_eq!(names(&partition.unhealthy), ["h0", "h1"]);
        assert_eq!(names(&partition.unknown), ["h0", "h1"]);
        assert_eq!(oracle.calls(), 0);
        assert_complete(&partition, &input);
    }

    #[test]
    fn single_host_is_unhealthy_without_probing() {
        let input = hosts(1);
        let mut oracle = CountingOracle::new(|_: &[Host], _: SlotCount| true);
        let partition = FaultLocalizer::new(input, slots()).run(&mut oracle);

        assert_eq!(names(&partition.unhealthy), ["h0"]);
        assert_eq!(oracle.calls(), 0);
    }

    #[test]
    fn empty_input() {
        let mut oracle = CountingOracle::new(|_: &[Host], _: SlotCount| true);
        let partition = FaultLocalizer::new(Vec::new(), slots()).run(&mut oracle);
        assert_eq!(partition, Partition::default());
        assert_eq!(oracle.calls(), 0);
    }

    #[test]
    fn faulty_first_host_is_resolved_later() {
        let input = hosts(6);
        let partition = FaultLocalizer::new(input.clone(), slots()).run(&mut faulty(&["h0"]));

        assert_eq!(names(&partition.healthy), ["h1", "h2", "h3", "h4", "h5"]);
        assert_eq!(names(&partition.unhealthy), ["h0"]);
        assert_eq!(partition.classification_of(&Host::from("h0")), Some(Classification::Unhealthy));
        assert_complete(&partition, &input);
    }

    #[test]
    fn adjacent_faults() {
        let input = hosts(8);
        let partition =
            FaultLocalizer::new(input.clone(), slots()).run(&mut faulty(&["h3", "h4"]));

        assert_eq!(names(&partition.healthy), ["h0", "h1", "h2", "h5", "h6", "h7"]);
        assert_eq!(names(&partition.unhealthy), ["h3", "h4"]);
        assert_complete(&partition, &input);
    }

    #[test]
    fn resolved_host_joins_later_resolution_groups() {
        // The failing pair probes defer both h0 and h1. h0 resolves healthy
        // first and is part of the group h1 is tested against.
        let input = hosts(6);
        let mut last_group: Vec<String> = Vec::new();
        let mut inner = faulty(&["h1"]);
        let mut oracle = |group: &[Host], slots: SlotCount| {
            last_group = group.iter().map(|h| h.name().to_string()).collect();
            inner(group, slots)
        };
        let partition = FaultLocalizer::new(input.clone(), slots()).run(&mut oracle);

        assert_eq!(names(&partition.unknown), ["h0", "h1"]);
        assert_eq!(names(&partition.healthy), ["h2", "h3", "h4", "h5", "h0"]);
        assert_eq!(names(&partition.unhealthy), ["h1"]);
        assert_eq!(last_group, ["h2", "h3", "h4", "h5", "h0", "h1"]);
        assert_complete(&partition, &input);
    }

    #[test]
    fn every_host_classified_for_every_fault_set() {
        for n in 0..=9usize {
            let input = hosts(n);
            for mask in 0u32..(1 << n) {
                let bad: Vec<String> = (0..n)
                    .filter(|i| mask & (1 << i) != 0)
                    .map(|i| format!("h{i}"))
                    .collect();
                let bad: Vec<&str> = bad.iter().map(String::as_str).collect();

                let partition =
                    FaultLocalizer::new(input.clone(), slots()).run(&mut faulty(&bad));
                assert_complete(&partition, &input);
                // Faulty hosts are never reported healthy.
                for name in &bad {
                    assert!(
                        !partition.healthy.contains(&Host::from(*name)),
                        "n={n} mask={mask:b}: {name} healthy"
                    );
                }
            }
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let input = hosts(9);
        let first = FaultLocalizer::new(input.clone(), slots()).run(&mut faulty(&["h2", "h7"]));
        let second = FaultLocalizer::new(input, slots()).run(&mut faulty(&["h2", "h7"]));
        assert_eq!(first, second);
    }

    #[test]
    fn more_permissive_oracle_never_shrinks_healthy() {
        let input = hosts(8);
        let strict = FaultLocalizer::new(input.clone(), slots()).run(&mut faulty(&["h1", "h5"]));
        let lenient = FaultLocalizer::new(input, slots()).run(&mut faulty(&["h5"]));

        for host in &strict.healthy {
            assert!(lenient.healthy.contains(host), "{host} lost");
        }
        assert!(lenient.healthy.len() > strict.healthy.len());
    }

    #[test]
    fn probe_count_is_logarithmic_for_healthy_cluster() {
        let input = hosts(512);
        let mut oracle = CountingOracle::new(faulty(&[]));
        let partition = FaultLocalizer::new(input, slots()).run(&mut oracle);
        assert_eq!(partition.healthy.len(), 512);
        assert!(oracle.calls() <= 10, "{} calls", oracle.calls());
    }
}

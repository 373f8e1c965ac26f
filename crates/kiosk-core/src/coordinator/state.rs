use crate::network::NetworkSnapshot;
use crate::targets::{Target, TargetList};

/// Mutable controller state. Only ever touched under the coordinator's lock.
#[derive(Debug)]
pub struct ControllerState {
    pub targets: TargetList,
    /// Result of the most recent connectivity probe.
    pub is_online: bool,
    /// `None` until the network watcher records its baseline.
    pub last_network_snapshot: Option<NetworkSnapshot>,
    /// Highest request ticket served by a refresh that has started.
    pub covered_ticket: u64,
    pub last_navigation: Option<Target>,
}

impl ControllerState {
    pub fn new(targets: TargetList) -> Self {
        Self {
            targets,
            is_online: false,
            last_network_snapshot: None,
            covered_ticket: 0,
            last_navigation: None,
        }
    }

    /// Record a network snapshot. Returns `true` when it differs from the
    /// previous one; the first snapshot only sets the baseline.
    pub fn observe_network(&mut self, snapshot: NetworkSnapshot) -> bool {
        match &self.last_network_snapshot {
            None => {
                self.last_network_snapshot = Some(snapshot);
                false
            }
            Some(previous) if *previous == snapshot => false,
            Some(_) => {
                self.last_network_snapshot = Some(snapshot);
                true
            }
        }
    }
}

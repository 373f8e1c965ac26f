use std::collections::BTreeMap;
use std::net::IpAddr;

use sysinfo::Networks;

/// Link-level facts about one interface that matter for connectivity.
///
/// Traffic counters are deliberately absent: they change on every poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceState {
    pub mac: String,
    /// `(address, prefix)` pairs, sorted.
    pub addresses: Vec<(IpAddr, u8)>,
    pub mtu: u64,
    /// Kernel operational state (`up`, `down`, `dormant`, ...) where available.
    pub oper_state: Option<String>,
}

/// Comparable summary of every interface on the host, keyed by interface name.
///
/// Two snapshots are compared as a whole; any difference in any field counts
/// as a network change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetworkSnapshot {
    interfaces: BTreeMap<String, InterfaceState>,
}

impl NetworkSnapshot {
    pub fn new(interfaces: BTreeMap<String, InterfaceState>) -> Self {
        Self { interfaces }
    }

    pub fn interfaces(&self) -> &BTreeMap<String, InterfaceState> {
        &self.interfaces
    }
}

/// Source of interface snapshots. Calls may block briefly on system I/O.
pub trait InterfaceSource: Send + Sync {
    fn snapshot(&self) -> NetworkSnapshot;
}

/// Reads interfaces from the operating system through `sysinfo`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    fn snapshot(&self) -> NetworkSnapshot {
        let networks = Networks::new_with_refreshed_list();

        let interfaces = networks
            .list()
            .iter()
            .map(|(name, data)| {
                let mut addresses: Vec<(IpAddr, u8)> = data
                    .ip_networks()
                    .iter()
                    .map(|net| (net.addr, net.prefix))
                    .collect();
                addresses.sort();

                let state = InterfaceState {
                    mac: data.mac_address().to_string(),
                    addresses,
                    mtu: data.mtu(),
                    oper_state: read_oper_state(name),
                };
                (name.clone(), state)
            })
            .collect();

        NetworkSnapshot::new(interfaces)
    }
}

#[cfg(target_os = "linux")]
fn read_oper_state(name: &str) -> Option<String> {
    std::fs::read_to_string(format!("/sys/class/net/{}/operstate", name))
        .ok()
        .map(|s| s.trim().to_string())
}

#[cfg(not(target_os = "linux"))]
fn read_oper_state(_name: &str) -> Option<String> {
    None
}

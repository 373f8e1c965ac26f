use std::net::{IpAddr, Ipv4Addr};

use crate::network::errors::NetworkError;
use crate::network::snapshot::NetworkSnapshot;

/// Pick the address the control socket binds to.
///
/// Interfaces are visited in name order. The first non-loopback IPv4 address
/// wins; a loopback address is used only when nothing else is assigned.
pub fn primary_ipv4(snapshot: &NetworkSnapshot) -> Result<Ipv4Addr, NetworkError> {
    let mut loopback = None;

    for state in snapshot.interfaces().values() {
        for (addr, _prefix) in &state.addresses {
            if let IpAddr::V4(v4) = addr {
                if !v4.is_loopback() && !v4.is_unspecified() {
                    return Ok(*v4);
                }
                if v4.is_loopback() && loopback.is_none() {
                    loopback = Some(*v4);
                }
            }
        }
    }

    loopback.ok_or(NetworkError::NoIpv4Interface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::snapshot::InterfaceState;
    use std::collections::BTreeMap;

    fn state(addrs: &[&str]) -> InterfaceState {
        InterfaceState {
            mac: "00:00:00:00:00:00".to_string(),
            addresses: addrs.iter().map(|a| (a.parse().unwrap(), 24)).collect(),
            mtu: 1500,
            oper_state: None,
        }
    }

    fn snapshot(entries: Vec<(&str, InterfaceState)>) -> NetworkSnapshot {
        NetworkSnapshot::new(
            entries
                .into_iter()
                .map(|(n, s)| (n.to_string(), s))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn test_prefers_non_loopback() {
        let snap = snapshot(vec![
            ("eth0", state(&["fe80::1", "192.168.0.20"])),
            ("lo", state(&["127.0.0.1"])),
        ]);
        assert_eq!(primary_ipv4(&snap).unwrap(), Ipv4Addr::new(192, 168, 0, 20));
    }

    #[test]
    fn test_name_order_decides_between_interfaces() {
        let snap = snapshot(vec![
            ("wlan0", state(&["10.0.0.5"])),
            ("eth0", state(&["192.168.0.20"])),
        ]);
        assert_eq!(primary_ipv4(&snap).unwrap(), Ipv4Addr::new(192, 168, 0, 20));
    }

    #[test]
    fn test_falls_back_to_loopback() {
        let snap = snapshot(vec![("lo", state(&["127.0.0.1", "::1"]))]);
        assert_eq!(primary_ipv4(&snap).unwrap(), Ipv4Addr::LOCALHOST);
    }

    #[test]
    fn test_no_ipv4_is_an_error() {
        let snap = snapshot(vec![("eth0", state(&["fe80::1"]))]);
        assert!(matches!(
            primary_ipv4(&snap),
            Err(NetworkError::NoIpv4Interface)
        ));
    }
}

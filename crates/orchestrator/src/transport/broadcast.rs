#![forbid(unsafe_code)]

use if_addrs::{IfAddr, get_if_addrs};
use std::net::Ipv4Addr;
use tracing::{debug, warn};

/// Directed broadcast address of the subnet `ip` lives in: every host bit
/// set.
pub fn subnet_broadcast(ip: Ipv4Addr, netmask: Ipv4Addr) -> Ipv4Addr {
    Ipv4Addr::from(u32::from(ip) | !u32::from(netmask))
}

/// Broadcast address of the first non-loopback IPv4 interface.
pub fn local_broadcast() -> Option<Ipv4Addr> {
    let interfaces = match get_if_addrs() {
        Ok(interfaces) => interfaces,
        Err(err) => {
            warn!(%err, "failed to enumerate network interfaces");
            return None;
        }
    };

    interfaces
        .into_iter()
        .filter(|iface| !iface.is_loopback())
        .find_map(|iface| match iface.addr {
            IfAddr::V4(v4) => {
                let broadcast = subnet_broadcast(v4.ip, v4.netmask);
                debug!(interface = %iface.name, ip = %v4.ip, %broadcast, "using interface");
                Some(broadcast)
            }
            IfAddr::V6(_) => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_bits_are_set() {
        let b = subnet_broadcast(Ipv4Addr::new(192, 168, 1, 23), Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(b, Ipv4Addr::new(192, 168, 1, 255));

        let b = subnet_broadcast(Ipv4Addr::new(10, 0, 0, 5), Ipv4Addr::new(255, 0, 0, 0));
        assert_eq!(b, Ipv4Addr::new(10, 255, 255, 255));
    }
}

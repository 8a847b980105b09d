//! Selection of the addresses to publish
//!
//! An [`AddressSource`](crate::AddressSource) reports every address bound to
//! an interface; this module picks the first global-unicast address of each
//! family.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Whether an address may be published as a host record
///
/// Excludes unspecified, loopback, multicast, link-local and the IPv4
/// limited broadcast address. Private and unique-local ranges are kept.
pub fn is_global_unicast(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            !(v4.is_unspecified()
                || v4.is_loopback()
                || v4.is_multicast()
                || v4.is_link_local()
                || v4.is_broadcast())
        }
        IpAddr::V6(v6) => {
            !(v6.is_unspecified()
                || v6.is_loopback()
                || v6.is_multicast()
                || v6.is_unicast_link_local())
        }
    }
}

/// Addresses discovered on the local interface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscoveredAddresses {
    pub ipv4: Option<Ipv4Addr>,
    pub ipv6: Option<Ipv6Addr>,
}

impl DiscoveredAddresses {
    pub fn new(ipv4: Option<Ipv4Addr>, ipv6: Option<Ipv6Addr>) -> Self {
        Self { ipv4, ipv6 }
    }

    /// Pick the first qualifying address of each family, in the given order
    pub fn select<I>(addresses: I) -> Self
    where
        I: IntoIterator<Item = IpAddr>,
    {
        let mut found = Self::default();

        for ip in addresses {
            if !is_global_unicast(&ip) {
                continue;
            }
            match ip {
                IpAddr::V4(v4) if found.ipv4.is_none() => found.ipv4 = Some(v4),
                IpAddr::V6(v6) if found.ipv6.is_none() => found.ipv6 = Some(v6),
                _ => {}
            }
            if found.ipv4.is_some() && found.ipv6.is_some() {
                break;
            }
        }

        found
    }

    /// Wire text of the IPv4 address; empty when none was found
    pub fn ipv4_text(&self) -> String {
        self.ipv4.map(|ip| ip.to_string()).unwrap_or_default()
    }

    /// Wire text of the IPv6 address; empty when none was found
    pub fn ipv6_text(&self) -> String {
        self.ipv6.map(|ip| ip.to_string()).unwrap_or_default()
    }
}

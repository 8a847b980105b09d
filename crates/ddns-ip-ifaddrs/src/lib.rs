// # Interface Address Source
//
// This crate provides an `AddressSource` that reads the addresses bound to a
// named local network interface.
//
// ## Implementation
//
// 1. Resolve the interface with `if_nametoindex` (missing → `InterfaceNotFound`)
// 2. List every address with `getifaddrs`
// 3. Keep entries for that interface, in the order the platform reports them.
//    Labelled IPv4 aliases (`eth0:1`) belong to their base interface.
// 4. Pick the first global-unicast IPv4 and IPv6 address
//
// ## Platform Support
//
// Unix only (Linux, BSDs, macOS). Elsewhere discovery fails with
// `AddressEnumerationFailed`.

use async_trait::async_trait;
use ddns_core::traits::AddressSource;
use ddns_core::{DiscoveredAddresses, Error, Result};
use std::net::IpAddr;
use tracing::debug;

/// Address source backed by a local network interface
#[derive(Debug, Clone)]
pub struct InterfaceAddressSource {
    interface: String,
}

impl InterfaceAddressSource {
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
        }
    }

}

#[async_trait]
impl AddressSource for InterfaceAddressSource {
    async fn discover(&self) -> Result<DiscoveredAddresses> {
        let addresses = interface_addresses(&self.interface)?;
        debug!(
            "Interface {} has {} address(es): {:?}",
            self.interface,
            addresses.len(),
            addresses
        );
        Ok(DiscoveredAddresses::select(addresses))
    }

    fn describe(&self) -> String {
        format!("interface {}", self.interface)
    }
}

/// Every IPv4/IPv6 address bound to `interface`, in platform order
#[cfg(unix)]
pub fn interface_addresses(interface: &str) -> Result<Vec<IpAddr>> {
    use std::ffi::{CStr, CString};

    // A name with an interior NUL cannot name any interface
    let c_name = CString::new(interface).map_err(|_| Error::interface_not_found(interface))?;

    // SAFETY: c_name is a valid NUL-terminated string for the duration of the call
    if unsafe { libc::if_nametoindex(c_name.as_ptr()) } == 0 {
        return Err(Error::interface_not_found(interface));
    }

    let list = IfAddrs::new().map_err(|e| Error::address_enumeration(interface, e))?;
    let mut addresses = Vec::new();

    let mut cursor = list.head;
    while !cursor.is_null() {
        // SAFETY: cursor is a live node of the list owned by `list`
        let entry = unsafe { &*cursor };
        cursor = entry.ifa_next;

        if entry.ifa_name.is_null() {
            continue;
        }
        // SAFETY: ifa_name is a NUL-terminated string owned by the list
        let name = unsafe { CStr::from_ptr(entry.ifa_name) };
        if !same_interface(name.to_bytes(), c_name.as_bytes()) {
            continue;
        }

        // SAFETY: ifa_addr is null or points at a sockaddr owned by the list
        if let Some(ip) = unsafe { sockaddr_to_ip(entry.ifa_addr) } {
            addresses.push(ip);
        }
    }

    Ok(addresses)
}

#[cfg(not(unix))]
pub fn interface_addresses(interface: &str) -> Result<Vec<IpAddr>> {
    Err(Error::address_enumeration(
        interface,
        std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "interface enumeration is only supported on Unix",
        ),
    ))
}

/// Whether a `getifaddrs` entry name refers to the requested interface
///
/// Linux reports labelled addresses under the label (`eth0:1`). Interface
/// names cannot contain `:`, so everything before it is the device name.
#[cfg_attr(not(unix), allow(dead_code))]
fn same_interface(entry: &[u8], requested: &[u8]) -> bool {
    device_name(entry) == device_name(requested)
}

#[cfg_attr(not(unix), allow(dead_code))]
fn device_name(name: &[u8]) -> &[u8] {
    name.split(|&b| b == b':').next().unwrap_or(name)
}

/// Owned `getifaddrs` list, freed on drop
#[cfg(unix)]
struct IfAddrs {
    head: *mut libc::ifaddrs,
}

#[cfg(unix)]
impl IfAddrs {
    fn new() -> std::io::Result<Self> {
        let mut head: *mut libc::ifaddrs = std::ptr::null_mut();
        // SAFETY: head is a valid out-pointer; on success the list is freed in Drop
        if unsafe { libc::getifaddrs(&mut head) } != 0 {
            return Err(std::io::Error::last_os_error());
        }
        Ok(Self { head })
    }
}

#[cfg(unix)]
impl Drop for IfAddrs {
    fn drop(&mut self) {
        if !self.head.is_null() {
            // SAFETY: head came from a successful getifaddrs and is freed once
            unsafe { libc::freeifaddrs(self.head) };
        }
    }
}

/// Convert an AF_INET/AF_INET6 sockaddr; other families yield `None`
///
/// # Safety
///
/// `addr` must be null or point at a valid sockaddr whose storage matches
/// its `sa_family`.
#[cfg(unix)]
unsafe fn sockaddr_to_ip(addr: *const libc::sockaddr) -> Option<IpAddr> {
    use std::net::{Ipv4Addr, Ipv6Addr};

    if addr.is_null() {
        return None;
    }

    // SAFETY: non-null and valid per the function contract
    let family = i32::from(unsafe { (*addr).sa_family });
    match family {
        libc::AF_INET => {
            // SAFETY: family AF_INET means the storage is a sockaddr_in
            let sin = unsafe { &*(addr as *const libc::sockaddr_in) };
            Some(IpAddr::V4(Ipv4Addr::from(u32::from_be(sin.sin_addr.s_addr))))
        }
        libc::AF_INET6 => {
            // SAFETY: family AF_INET6 means the storage is a sockaddr_in6
            let sin6 = unsafe { &*(addr as *const libc::sockaddr_in6) };
            Some(IpAddr::V6(Ipv6Addr::from(sin6.sin6_addr.s6_addr)))
        }
        _ => None,
    }
}

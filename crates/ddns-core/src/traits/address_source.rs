// # Address Source Trait
//
// Defines the interface for discovering the addresses to publish.
//
// ## Implementations
//
// - getifaddrs-based (Unix): `ddns-ip-ifaddrs` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::AddressSource;
//
// let source = /* AddressSource implementation */;
// let found = source.discover().await?;
// println!("IPv4: {:?}, IPv6: {:?}", found.ipv4, found.ipv6);
// ```

use async_trait::async_trait;

use crate::addresses::DiscoveredAddresses;

/// Trait for address source implementations
///
/// # Trust Level: Semi-Trusted
///
/// Address sources perform platform I/O (interface enumeration) and nothing
/// else. They do not talk to DNS providers and do not decide whether an
/// update is needed.
///
/// Implementations must apply [`DiscoveredAddresses::select`] (or an
/// equivalent filter) so that only global-unicast addresses are returned.
#[async_trait]
pub trait AddressSource: Send + Sync {
    /// Discover the current addresses
    ///
    /// # Returns
    ///
    /// - `Ok(DiscoveredAddresses)`: either family may be absent
    /// - `Err(Error::InterfaceNotFound)`: the interface does not exist
    /// - `Err(Error::AddressEnumerationFailed)`: the platform could not list addresses
    async fn discover(&self) -> Result<DiscoveredAddresses, crate::Error>;

    /// Short description of where addresses come from (for logging)
    fn describe(&self) -> String;
}

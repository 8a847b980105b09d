// # Record Provider Trait
//
// Defines the interface for reading and writing record sets via a DNS
// provider's HTTP API.
//
// ## Implementations
//
// - Gandi LiveDNS v5: `ddns-provider-gandi` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::{RecordProvider, RecordTarget};
//
// let provider = /* RecordProvider implementation */;
// let target = RecordTarget::new("example.com", "www");
//
// let records = provider.fetch_records(&target).await?;
// if records.is_empty() {
//     provider.create_record(&target, &HostRecord::new(RecordType::A, "203.0.113.7")).await?;
// }
// ```

use async_trait::async_trait;

use crate::records::HostRecord;

/// The record name being managed: `host` under `domain`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTarget {
    pub domain: String,
    pub host: String,
}

impl RecordTarget {
    pub fn new(domain: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            host: host.into(),
        }
    }
}

impl From<&crate::config::UpdaterConfig> for RecordTarget {
    fn from(config: &crate::config::UpdaterConfig) -> Self {
        Self::new(config.domain.clone(), config.host.clone())
    }
}

/// Trait for DNS record provider implementations
///
/// # Trust Level: Untrusted
///
/// ## Allowed Capabilities
/// - ✅ Perform HTTP/HTTPS API calls to their endpoints only
/// - ✅ Parse provider-specific responses
/// - ✅ Return success or failure
///
/// ## Forbidden Capabilities
/// - ❌ Retry or back off (a failed call ends the run)
/// - ❌ Decide whether an update is needed (owned by `Updater`)
/// - ❌ Cache records between calls
///
/// Each method performs exactly one HTTP exchange and reads the response
/// body to completion before returning.
#[async_trait]
pub trait RecordProvider: Send + Sync {
    /// Read every record set currently published for the target
    ///
    /// An empty vector means the name has no records yet.
    async fn fetch_records(&self, target: &RecordTarget) -> Result<Vec<HostRecord>, crate::Error>;

    /// Create one record set for the target
    async fn create_record(
        &self,
        target: &RecordTarget,
        record: &HostRecord,
    ) -> Result<(), crate::Error>;

    /// Replace the target's record sets with `records`
    async fn replace_records(
        &self,
        target: &RecordTarget,
        records: &[HostRecord],
    ) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

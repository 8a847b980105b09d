//! Test doubles and common utilities for updater contract tests
//!
//! These doubles record every call the updater makes so tests can assert on
//! the exact sequence of provider exchanges.

use ddns_core::error::{Error, Result};
use ddns_core::traits::{AddressSource, RecordProvider, RecordTarget};
use ddns_core::{DiscoveredAddresses, HostRecord, RecordType, UpdaterConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// An address source that returns fixed addresses
pub struct StaticAddressSource {
    addresses: DiscoveredAddresses,
}

impl StaticAddressSource {
    pub fn new(ipv4: Option<&str>, ipv6: Option<&str>) -> Self {
        Self {
            addresses: DiscoveredAddresses::new(
                ipv4.map(|s| s.parse().expect("valid IPv4")),
                ipv6.map(|s| s.parse().expect("valid IPv6")),
            ),
        }
    }
}

#[async_trait::async_trait]
impl AddressSource for StaticAddressSource {
    async fn discover(&self) -> Result<DiscoveredAddresses> {
        Ok(self.addresses)
    }

    fn describe(&self) -> String {
        "static test addresses".to_string()
    }
}

/// An address source whose interface does not exist
pub struct MissingInterfaceSource {
    pub interface: String,
}

#[async_trait::async_trait]
impl AddressSource for MissingInterfaceSource {
    async fn discover(&self) -> Result<DiscoveredAddresses> {
        Err(Error::interface_not_found(self.interface.clone()))
    }

    fn describe(&self) -> String {
        format!("missing interface {}", self.interface)
    }
}

/// One provider exchange, as observed by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    Fetch(RecordTarget),
    Create(HostRecord),
    Replace(Vec<HostRecord>),
}

/// Which exchange the mock should reject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    Fetch,
    /// Zero-based index among create calls
    Create(usize),
    Replace,
}

/// A mock RecordProvider that serves fixed records and logs calls
pub struct MockRecordProvider {
    published: Vec<HostRecord>,
    fail_at: Option<FailPoint>,
    calls: Arc<Mutex<Vec<ProviderCall>>>,
    create_count: Arc<AtomicUsize>,
}

impl MockRecordProvider {
    pub fn new(published: Vec<HostRecord>) -> Self {
        Self {
            published,
            fail_at: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            create_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Reject the given exchange with an unexpected status
    pub fn failing_at(mut self, point: FailPoint) -> Self {
        self.fail_at = Some(point);
        self
    }

    /// Create a new MockRecordProvider that shares its call log with an existing one
    pub fn sharing_calls_with(other: &Self) -> Self {
        Self {
            published: other.published.clone(),
            fail_at: other.fail_at,
            calls: Arc::clone(&other.calls),
            create_count: Arc::clone(&other.create_count),
        }
    }

    /// Every exchange so far, in order
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ProviderCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl RecordProvider for MockRecordProvider {
    async fn fetch_records(&self, target: &RecordTarget) -> Result<Vec<HostRecord>> {
        self.record(ProviderCall::Fetch(target.clone()));
        if self.fail_at == Some(FailPoint::Fetch) {
            return Err(Error::unexpected_status(
                "get domain records",
                200,
                403,
                r#"{"message":"Access was denied"}"#,
            ));
        }
        Ok(self.published.clone())
    }

    async fn create_record(&self, _target: &RecordTarget, record: &HostRecord) -> Result<()> {
        let index = self.create_count.fetch_add(1, Ordering::SeqCst);
        self.record(ProviderCall::Create(record.clone()));
        if self.fail_at == Some(FailPoint::Create(index)) {
            return Err(Error::unexpected_status(
                format!("create {} domain record", record.rrset_type),
                201,
                400,
                r#"{"status":"error"}"#,
            ));
        }
        Ok(())
    }

    async fn replace_records(&self, _target: &RecordTarget, records: &[HostRecord]) -> Result<()> {
        self.record(ProviderCall::Replace(records.to_vec()));
        if self.fail_at == Some(FailPoint::Replace) {
            return Err(Error::unexpected_status(
                "update domain records",
                201,
                500,
                "internal error",
            ));
        }
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Helper to create a minimal UpdaterConfig for testing
pub fn minimal_config() -> UpdaterConfig {
    UpdaterConfig::new("test-key", "example.com", "www", "eth0")
}

pub fn a(value: &str) -> HostRecord {
    HostRecord::new(RecordType::A, value)
}

pub fn aaaa(value: &str) -> HostRecord {
    HostRecord::new(RecordType::Aaaa, value)
}

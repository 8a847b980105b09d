//! Core DDNS updater
//!
//! The [`Updater`] runs one pass:
//! - Discover local addresses via an [`AddressSource`]
//! - Read the published record sets via a [`RecordProvider`]
//! - Decide a [`Disposition`]
//! - Create or replace the record sets if needed
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐   DiscoveredAddresses   ┌──────────────┐
//! │ AddressSource │ ──────────────────────▶ │   Updater    │
//! └───────────────┘                         └──────────────┘
//!                                              │        ▲
//!                      fetch / create / replace │        │ Vec<HostRecord>
//!                                              ▼        │
//!                                           ┌──────────────┐
//!                                           │RecordProvider│
//!                                           └──────────────┘
//! ```
//!
//! Every step's error ends the pass. Nothing is retried or rolled back: if
//! the A create succeeds and the AAAA create fails, the zone keeps the A
//! record.

use crate::addresses::DiscoveredAddresses;
use crate::config::UpdaterConfig;
use crate::error::Result;
use crate::records::{HostRecord, RecordType};
use crate::traits::{AddressSource, RecordProvider, RecordTarget};
use tracing::{debug, info};

/// Outcome of comparing discovered addresses with published records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// No records are published yet
    Create,
    /// A published A/AAAA first value differs from the discovered address
    Update,
    /// Published records already match
    NoOp,
}

/// Decide what to do with the published records
///
/// Only A and AAAA record sets are compared, and only their first value.
/// Other types never force an update, and a non-empty collection without
/// any A or AAAA set is left alone.
pub fn decide(addresses: &DiscoveredAddresses, records: &[HostRecord]) -> Disposition {
    if records.is_empty() {
        return Disposition::Create;
    }

    let ipv4 = addresses.ipv4_text();
    let ipv6 = addresses.ipv6_text();

    let diverged = records.iter().any(|record| match record.rrset_type {
        RecordType::A => record.first_value() != ipv4,
        RecordType::Aaaa => record.first_value() != ipv6,
        RecordType::Other(_) => false,
    });

    if diverged {
        Disposition::Update
    } else {
        Disposition::NoOp
    }
}

/// Record sets to create, in request order (A then AAAA)
///
/// An absent family is sent as an empty value.
pub fn create_payloads(addresses: &DiscoveredAddresses) -> [HostRecord; 2] {
    [
        HostRecord::new(RecordType::A, addresses.ipv4_text()),
        HostRecord::new(RecordType::Aaaa, addresses.ipv6_text()),
    ]
}

/// Record sets for a bulk replacement: always both A and AAAA
pub fn update_payload(addresses: &DiscoveredAddresses) -> Vec<HostRecord> {
    create_payloads(addresses).into()
}

/// What a completed pass did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Addresses found on the interface
    pub addresses: DiscoveredAddresses,
    /// Decision that was carried out
    pub disposition: Disposition,
}

/// One-shot DDNS updater
///
/// ## Lifecycle
///
/// 1. Create with [`Updater::new()`]
/// 2. Call [`Updater::run()`] once
/// 3. Map the result to an exit code
pub struct Updater {
    /// Source of local addresses
    source: Box<dyn AddressSource>,

    /// Provider holding the published records
    provider: Box<dyn RecordProvider>,

    /// Name being managed
    target: RecordTarget,

    /// For log lines
    fqdn: String,
}

impl Updater {
    /// Create a new updater
    ///
    /// # Returns
    ///
    /// - `Err(Error::ConfigurationMissing)` if a required value is empty
    pub fn new(
        source: Box<dyn AddressSource>,
        provider: Box<dyn RecordProvider>,
        config: &UpdaterConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            source,
            provider,
            target: RecordTarget::from(config),
            fqdn: config.fqdn(),
        })
    }

    /// Run the single pass
    ///
    /// Stops at the first error. On success the returned report carries the
    /// disposition that was applied.
    pub async fn run(&self) -> Result<RunReport> {
        debug!("Reading addresses from {}", self.source.describe());
        let addresses = self.source.discover().await?;

        info!(
            "Checking host records for {} are pointed at IPv4: {} and IPv6: {}",
            self.fqdn,
            addresses.ipv4_text(),
            addresses.ipv6_text()
        );

        let records = self.provider.fetch_records(&self.target).await?;
        let disposition = decide(&addresses, &records);

        match disposition {
            Disposition::Create => self.create(&addresses).await?,
            Disposition::Update => self.update(&addresses).await?,
            Disposition::NoOp => info!("No update required."),
        }

        Ok(RunReport {
            addresses,
            disposition,
        })
    }

    async fn create(&self, addresses: &DiscoveredAddresses) -> Result<()> {
        info!(
            "Attempting to create new host records via {}.",
            self.provider.provider_name()
        );

        for record in create_payloads(addresses) {
            self.provider.create_record(&self.target, &record).await?;
        }

        info!("Host records created.");
        Ok(())
    }

    async fn update(&self, addresses: &DiscoveredAddresses) -> Result<()> {
        info!("Host records appear out-of-date. Attempting to update.");

        let records = update_payload(addresses);
        self.provider.replace_records(&self.target, &records).await?;

        info!("Update complete.");
        Ok(())
    }
}

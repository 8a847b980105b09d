// # ddns-core
//
// Core library for the one-shot Gandi LiveDNS updater.
//
// ## Architecture Overview
//
// This library provides the provider-independent half of the updater:
// - **AddressSource**: Trait for discovering the addresses bound to an interface
// - **RecordProvider**: Trait for reading and writing record sets via a provider API
// - **Updater**: Runs the discover → fetch → decide → mutate pass
// - **decide**: Pure reconciliation of discovered addresses against published records
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from platform and HTTP code
// 2. **Single Pass**: No polling, no retries, no persisted state
// 3. **Errors as Values**: Every failure propagates to the caller, which picks the exit code
// 4. **Library-First**: The binary is a thin wrapper around this crate

pub mod addresses;
pub mod config;
pub mod engine;
pub mod error;
pub mod records;
pub mod traits;

// Re-export core types for convenience
pub use addresses::DiscoveredAddresses;
pub use config::{RunMode, UpdaterConfig};
pub use engine::{Disposition, RunReport, Updater, decide};
pub use error::{Error, Result};
pub use records::{HostRecord, RecordType, UpdateItems};
pub use traits::{AddressSource, RecordProvider, RecordTarget};

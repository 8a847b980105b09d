//! Core traits for the DDNS updater
//!
//! This module defines the abstract interfaces the updater is built from.
//!
//! - [`AddressSource`]: Report the addresses bound to a local interface
//! - [`RecordProvider`]: Read and write record sets via a provider API

pub mod address_source;
pub mod record_provider;

pub use address_source::AddressSource;
pub use record_provider::{RecordProvider, RecordTarget};

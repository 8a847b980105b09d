//! LiveDNS record-set wire types
//!
//! A read returns a bare JSON array of [`HostRecord`]; a bulk update sends
//! them wrapped in [`UpdateItems`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// DNS record type of an rrset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    /// IPv4 address record
    A,
    /// IPv6 address record
    Aaaa,
    /// Any other type (CNAME, MX, TXT, ...), kept verbatim
    Other(String),
}

impl RecordType {
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Other(name) => name,
        }
    }
}

impl From<String> for RecordType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "A" => RecordType::A,
            "AAAA" => RecordType::Aaaa,
            _ => RecordType::Other(value),
        }
    }
}

impl From<RecordType> for String {
    fn from(value: RecordType) -> Self {
        match value {
            RecordType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record set: every value published under one type for a name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    pub rrset_type: RecordType,
    pub rrset_values: Vec<String>,
}

impl HostRecord {
    /// Single-valued record set
    pub fn new(rrset_type: RecordType, value: impl Into<String>) -> Self {
        Self {
            rrset_type,
            rrset_values: vec![value.into()],
        }
    }

    /// First published value; an empty set reads as the empty string
    pub fn first_value(&self) -> &str {
        self.rrset_values.first().map(String::as_str).unwrap_or("")
    }
}

/// Body of a bulk record replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateItems {
    pub items: Vec<HostRecord>,
}

/// Parse a read response body (bare array)
pub fn parse_record_collection(body: &str) -> crate::Result<Vec<HostRecord>> {
    serde_json::from_str(body).map_err(crate::Error::MalformedResponseBody)
}

// # Gandi LiveDNS Provider
//
// This crate provides a Gandi LiveDNS v5 record provider for the DDNS updater.
//
// ## Behaviour
//
// - ✅ One HTTP request per trait call
// - ✅ Every response body is read in full before the status is judged
// - ✅ Status and body of every response are logged
// - ✅ Dry-run mode: reads are sent, mutations are only logged
// - ❌ NO retry logic (a failed call ends the run)
// - ❌ NO request timeout beyond the transport default
// - ❌ NO caching
//
// ## Security Requirements
//
// - API key NEVER appears in logs or Debug output
//
// ## API Reference
//
// - LiveDNS v5: https://api.gandi.net/docs/livedns/
// - Read record sets:    GET  `/v5/livedns/domains/:fqdn/records/:name`  → 200, bare array
// - Create a record set: POST `/v5/livedns/domains/:fqdn/records/:name`  → 201
// - Replace record sets: PUT  `/v5/livedns/domains/:fqdn/records/:name`  → 201, `{"items": [...]}`

use async_trait::async_trait;
use ddns_core::config::{DEFAULT_API_BASE, RunMode, UpdaterConfig};
use ddns_core::records::{HostRecord, UpdateItems, parse_record_collection};
use ddns_core::traits::{RecordProvider, RecordTarget};
use ddns_core::{Error, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Request, StatusCode};
use tracing::{debug, info};

const JSON: &str = "application/json";

/// Gandi LiveDNS provider
///
/// # Dry-Run Mode
///
/// When `mode` is [`RunMode::DryRun`], the provider will:
/// - Perform the GET request
/// - Log the intended POST/PUT payload
/// - **NOT** send the mutation
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API key.
pub struct GandiProvider {
    /// Gandi API key
    /// ⚠️ NEVER log this value
    api_key: String,

    /// API origin, e.g. `https://api.gandi.net`
    api_base: String,

    /// HTTP client for API requests
    client: reqwest::Client,

    mode: RunMode,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for GandiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GandiProvider")
            .field("api_key", &"<REDACTED>")
            .field("api_base", &self.api_base)
            .field("mode", &self.mode)
            .finish()
    }
}

/// A completed HTTP exchange: status plus the fully-read body
#[derive(Debug)]
struct Exchange {
    status: StatusCode,
    body: String,
}

impl GandiProvider {
    /// Create a new Gandi provider
    ///
    /// # Parameters
    ///
    /// - `api_key`: LiveDNS API key, sent as `Authorization: Apikey <key>`
    /// - `api_base`: API origin; trailing slashes are ignored
    /// - `mode`: live or dry-run
    pub fn new(api_key: impl Into<String>, api_base: impl Into<String>, mode: RunMode) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();

        Self {
            api_key: api_key.into(),
            api_base,
            client: reqwest::Client::new(),
            mode,
        }
    }

    /// Create a live provider against the public API
    pub fn new_live(api_key: impl Into<String>) -> Self {
        Self::new(api_key, DEFAULT_API_BASE, RunMode::Live)
    }

    /// Create a provider from the run configuration
    pub fn from_config(config: &UpdaterConfig) -> Self {
        if config.mode.is_dry_run() {
            tracing::warn!("Gandi provider running in DRY-RUN mode - no changes will be made");
        }
        Self::new(config.api_key.clone(), config.api_base.clone(), config.mode)
    }

    /// Record-set URL for a target
    ///
    /// ```text
    /// {api_base}/v5/livedns/domains/{domain}/records/{host}
    /// ```
    pub fn records_url(&self, target: &RecordTarget) -> String {
        format!(
            "{}/v5/livedns/domains/{}/records/{}",
            self.api_base, target.domain, target.host
        )
    }

    /// Build an authenticated request; `payload` is JSON text
    ///
    /// Fails with `RequestPreparationFailed` when the URL or a header value
    /// is invalid. Nothing has been sent at that point.
    fn build_request(
        &self,
        method: Method,
        target: &RecordTarget,
        payload: Option<Vec<u8>>,
        operation: &str,
    ) -> Result<Request> {
        let mut builder = self
            .client
            .request(method, self.records_url(target))
            .header(AUTHORIZATION, format!("Apikey {}", self.api_key))
            .header(ACCEPT, JSON);

        if let Some(payload) = payload {
            builder = builder.header(CONTENT_TYPE, JSON).body(payload);
        }

        builder
            .build()
            .map_err(|e| Error::request_preparation(operation, e))
    }

    /// GET request for the target's record sets
    pub fn fetch_request(&self, target: &RecordTarget) -> Result<Request> {
        self.build_request(Method::GET, target, None, "domain records")
    }

    /// POST request creating one record set
    pub fn create_request(&self, target: &RecordTarget, record: &HostRecord) -> Result<Request> {
        let what = format!("host record for {}", record.rrset_type);
        let payload = serde_json::to_vec(record).map_err(|e| Error::serialization(&what, e))?;

        self.build_request(
            Method::POST,
            target,
            Some(payload),
            &format!("{} domain record creation", record.rrset_type),
        )
    }

    /// PUT request replacing the target's record sets
    pub fn replace_request(&self, target: &RecordTarget, records: &[HostRecord]) -> Result<Request> {
        let items = UpdateItems {
            items: records.to_vec(),
        };
        let payload = serde_json::to_vec(&items)
            .map_err(|e| Error::serialization("host records for update", e))?;

        self.build_request(
            Method::PUT,
            target,
            Some(payload),
            "domain records update",
        )
    }

    /// Send a request and read the whole body
    ///
    /// The response is consumed here, so it is released on every path.
    async fn execute(&self, request: Request, operation: &str) -> Result<Exchange> {
        debug!("{} {}", request.method(), request.url());

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| Error::network(operation, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("read response body for {operation}"), e))?;

        Ok(Exchange { status, body })
    }

    /// Fail unless the exchange has the required status
    fn expect_status(exchange: Exchange, expected: StatusCode, operation: &str) -> Result<String> {
        if exchange.status != expected {
            return Err(Error::unexpected_status(
                operation,
                expected.as_u16(),
                exchange.status.as_u16(),
                exchange.body,
            ));
        }
        Ok(exchange.body)
    }

    /// Payload text of a request, for dry-run logging
    fn payload_text(request: &Request) -> String {
        request
            .body()
            .and_then(|body| body.as_bytes())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RecordProvider for GandiProvider {
    /// Read the current record sets
    ///
    /// ```http
    /// GET /v5/livedns/domains/example.com/records/www
    /// Authorization: Apikey <key>
    /// Accept: application/json
    /// ```
    async fn fetch_records(&self, target: &RecordTarget) -> Result<Vec<HostRecord>> {
        let request = self.fetch_request(target)?;
        let exchange = self.execute(request, "get domain records").await?;

        let body = Self::expect_status(exchange, StatusCode::OK, "get domain records")?;
        info!("Current host records: {}", body);

        parse_record_collection(&body)
    }

    /// Create one record set
    ///
    /// ```http
    /// POST /v5/livedns/domains/example.com/records/www
    /// Content-Type: application/json
    ///
    /// {"rrset_type":"A","rrset_values":["203.0.113.7"]}
    /// ```
    async fn create_record(&self, target: &RecordTarget, record: &HostRecord) -> Result<()> {
        let request = self.create_request(target, record)?;
        let operation = format!("create {} domain record", record.rrset_type);

        if self.mode.is_dry_run() {
            info!(
                "[DRY-RUN] Would send POST request to {} with payload: {}",
                request.url(),
                Self::payload_text(&request)
            );
            return Ok(());
        }

        let exchange = self.execute(request, &operation).await?;
        info!(
            "Create {} host record result: [{}] {}",
            record.rrset_type, exchange.status, exchange.body
        );

        Self::expect_status(exchange, StatusCode::CREATED, &operation)?;
        Ok(())
    }

    /// Replace the record sets
    ///
    /// ```http
    /// PUT /v5/livedns/domains/example.com/records/www
    /// Content-Type: application/json
    ///
    /// {"items":[{"rrset_type":"A",...},{"rrset_type":"AAAA",...}]}
    /// ```
    async fn replace_records(&self, target: &RecordTarget, records: &[HostRecord]) -> Result<()> {
        let request = self.replace_request(target, records)?;

        if self.mode.is_dry_run() {
            info!(
                "[DRY-RUN] Would send PUT request to {} with payload: {}",
                request.url(),
                Self::payload_text(&request)
            );
            return Ok(());
        }

        let exchange = self.execute(request, "update domain records").await?;
        info!(
            "Update host records result: [{}] {}",
            exchange.status, exchange.body
        );

        Self::expect_status(exchange, StatusCode::CREATED, "update domain records")?;
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "gandi"
    }
}

//! Configuration types for the DDNS updater
//!
//! A run is described by one immutable [`UpdaterConfig`], built once at
//! startup and passed by reference to everything that needs it.

/// Default Gandi API origin
pub const DEFAULT_API_BASE: &str = "https://api.gandi.net";

/// How mutations are carried out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Create/update calls are sent to the provider
    #[default]
    Live,
    /// Records are read and compared, mutations are only logged
    DryRun,
}

impl RunMode {
    /// Parse the `DDNS_MODE` style value; anything but `dry-run` is live
    pub fn from_mode_str(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("dry-run") {
            RunMode::DryRun
        } else {
            RunMode::Live
        }
    }

    pub fn is_dry_run(self) -> bool {
        self == RunMode::DryRun
    }
}

/// Configuration for a single updater run
///
/// Has no serde impls; the redacted `Debug` is its only rendering.
#[derive(Clone)]
pub struct UpdaterConfig {
    /// Gandi API key
    /// ⚠️ NEVER log this value
    pub api_key: String,

    /// Managed domain (e.g., "example.com")
    pub domain: String,

    /// Record name under the domain (e.g., "www")
    pub host: String,

    /// Local network interface to read addresses from (e.g., "eth0")
    pub interface: String,

    /// API origin, without trailing path
    pub api_base: String,

    /// Live or dry-run
    pub mode: RunMode,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for UpdaterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdaterConfig")
            .field("api_key", &"<REDACTED>")
            .field("domain", &self.domain)
            .field("host", &self.host)
            .field("interface", &self.interface)
            .field("api_base", &self.api_base)
            .field("mode", &self.mode)
            .finish()
    }
}

impl UpdaterConfig {
    /// Create a live-mode configuration against the public Gandi API
    pub fn new(
        api_key: impl Into<String>,
        domain: impl Into<String>,
        host: impl Into<String>,
        interface: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            domain: domain.into(),
            host: host.into(),
            interface: interface.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            mode: RunMode::Live,
        }
    }

    /// Override the API origin
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the run mode
    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    /// Fully-qualified name of the managed record, for log lines
    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.host, self.domain)
    }

    /// Validate the configuration
    ///
    /// Only presence is checked. The key and domain are passed through to
    /// the provider as given.
    pub fn validate(&self) -> Result<(), crate::Error> {
        let missing: Vec<&'static str> = [
            ("apiKey", &self.api_key),
            ("domain", &self.domain),
            ("host", &self.host),
            ("ifname", &self.interface),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(crate::Error::ConfigurationMissing(missing))
        }
    }
}

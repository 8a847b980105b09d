//! Command-line and environment configuration

use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, ValueEnum};
use ddns_core::config::DEFAULT_API_BASE;
use ddns_core::{RunMode, UpdaterConfig};
use std::ffi::OsString;
use tracing::Level;

/// Long options that may be written Go-style with a single dash
const LONG_FLAGS: &[&str] = &[
    "apiKey",
    "domain",
    "host",
    "ifname",
    "api-base",
    "log-level",
    "dry-run",
];

/// Point the DNS records for host.domain at the addresses of a local interface.
#[derive(Parser, Debug)]
#[command(name = "ddns-gandi")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// API key to access gandi account
    #[arg(
        long = "apiKey",
        env = "GANDI_API_KEY",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub api_key: String,

    /// The domain to update (e.g. example.com)
    #[arg(long, env = "DDNS_DOMAIN", value_parser = NonEmptyStringValueParser::new())]
    pub domain: String,

    /// The hostname to update (e.g. www)
    #[arg(long, env = "DDNS_HOST", value_parser = NonEmptyStringValueParser::new())]
    pub host: String,

    /// The network interface to update DNS from
    #[arg(long, env = "DDNS_IFNAME", value_parser = NonEmptyStringValueParser::new())]
    pub ifname: String,

    /// LiveDNS API origin
    #[arg(long = "api-base", env = "GANDI_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Log verbosity
    #[arg(
        long = "log-level",
        env = "DDNS_LOG_LEVEL",
        value_enum,
        ignore_case = true,
        default_value_t = LogLevel::Info
    )]
    pub log_level: LogLevel,

    /// Read and compare records, but only log the create/update calls
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Run mode from the environment; `dry-run` enables dry-run
    #[arg(long = "mode", env = "DDNS_MODE", hide = true)]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_level(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl Args {
    fn run_mode(&self) -> RunMode {
        if self.dry_run {
            return RunMode::DryRun;
        }
        self.mode
            .as_deref()
            .map(RunMode::from_mode_str)
            .unwrap_or_default()
    }

    /// Build the immutable run configuration
    pub fn into_config(self) -> UpdaterConfig {
        let mode = self.run_mode();
        UpdaterConfig::new(self.api_key, self.domain, self.host, self.ifname)
            .with_api_base(self.api_base)
            .with_mode(mode)
    }
}

/// Rewrite Go-style `-flag` / `-flag=value` to `--flag` so clap accepts them
///
/// Arguments after a bare `--` are left alone.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }

            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
                    if LONG_FLAGS.contains(&name) {
                        OsString::from(format!("-{text}"))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}

// # ddns-gandi - one-shot Gandi LiveDNS updater
//
// This binary is a THIN integration layer: it parses configuration, sets up
// logging and the runtime, wires the interface address source to the Gandi
// provider, and maps the outcome to an exit code. All DDNS logic lives in
// ddns-core.
//
// ## Configuration
//
// Flags may be given Go-style (`-apiKey`) or GNU-style (`--apiKey`), and fall
// back to environment variables:
//
// - `-apiKey` / `GANDI_API_KEY`: LiveDNS API key
// - `-domain` / `DDNS_DOMAIN`: managed domain (e.g. example.com)
// - `-host` / `DDNS_HOST`: record name to update (e.g. www)
// - `-ifname` / `DDNS_IFNAME`: interface to read addresses from
// - `--api-base` / `GANDI_API_BASE`: API origin (default https://api.gandi.net)
// - `--log-level` / `DDNS_LOG_LEVEL`: trace, debug, info, warn, error
// - `--dry-run` / `DDNS_MODE=dry-run`: read and compare only
//
// ## Example
//
// ```bash
// ddns-gandi -host myrouter -domain example.com -ifname eth0 -apiKey XXXXX
// ```

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Args;
use ddns_core::{RunReport, Updater, UpdaterConfig};
use ddns_ip_ifaddrs::InterfaceAddressSource;
use ddns_provider_gandi::GandiProvider;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for the two possible outcomes
///
/// Usage errors also exit with 2, via clap.
#[derive(Debug, Clone, Copy)]
enum DdnsExitCode {
    /// Records created, updated, or already current
    Success = 0,
    /// Any fatal condition
    Failure = 2,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let args = Args::parse_from(cli::normalize_args(std::env::args_os()));

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level.as_level())
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::Failure.into();
    }

    info!("DynamicDNS Updater");

    let config = args.into_config();

    let rt = match build_runtime() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("{:#}", e);
            return DdnsExitCode::Failure.into();
        }
    };

    match rt.block_on(run(&config)) {
        Ok(report) => {
            info!(
                "Finished: {:?} (A: {:?}, AAAA: {:?})",
                report.disposition,
                report.addresses.ipv4_text(),
                report.addresses.ipv6_text()
            );
            DdnsExitCode::Success.into()
        }
        Err(e) => {
            error!("{}", e);
            if e.is_pre_network() {
                debug!("No requests were sent to {}", config.api_base);
            }
            ExitCode::from(e.exit_code())
        }
    }
}

/// Single-threaded runtime: every exchange is awaited before the next starts
fn build_runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")
}

/// Wire the components together and run the single pass
async fn run(config: &UpdaterConfig) -> ddns_core::Result<RunReport> {
    let source = InterfaceAddressSource::new(config.interface.clone());
    let provider = GandiProvider::from_config(config);

    let updater = Updater::new(Box::new(source), Box::new(provider), config)?;
    updater.run().await
}

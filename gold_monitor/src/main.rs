//! Gold Price Monitor — polls the goldprice.org MYR rates endpoint, converts the gold
//! price to RM per gram, and raises a macOS desktop notification when it moves by more
//! than the configured threshold since the last stored reading.
//!
//! Usage example (CLI):
//! ```bash
//! gold_monitor                          # run with gold_monitor.toml or defaults
//! gold_monitor --config ~/gold.toml -v  # custom config, debug logging
//! gold_monitor --test                   # send a sample notification and exit
//! ```
//!
//! The loop runs until Ctrl+C. See `config` for the TOML keys and `monitor` for what a
//! single cycle does.
#![warn(missing_docs)]
mod args;
mod config;
mod fetcher;
mod monitor;
mod notifier;

use crate::args::Args;
use crate::config::MonitorConfig;
use crate::fetcher::HttpPriceSource;
use crate::monitor::Monitor;
use crate::notifier::{Notifier, OsaScriptNotifier};
use clap::Parser;
use crossbeam_channel::bounded;
use gold_common::alert::PriceChange;
use gold_common::{MonitorError, PriceStore, Result};
use log::{error, info};

fn main() -> Result<(), MonitorError> {
    let args = Args::parse();
    init_logger(args.verbose);

    if args.test {
        return send_test_notification();
    }

    let config = MonitorConfig::load(args.config.as_deref())?;
    let store = PriceStore::new(config.state_path());

    info!("Gold Price Monitor - Malaysia");
    info!("API: {}", config.api_url);
    info!("Alert threshold: {} RM/gram", config.threshold);
    info!("Check interval: {} seconds", config.interval_secs);
    info!("Price history: {}", store.path().display());
    info!("Press Ctrl+C to stop.");

    let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Stopping gold price monitor...");
        let _ = shutdown_tx.try_send(());
    })
    .map_err(|e| MonitorError::Signal(e.to_string()))?;

    let source = HttpPriceSource::new(&config.api_url, config.request_timeout())?;
    let mut monitor = Monitor::new(
        source,
        OsaScriptNotifier::new(),
        store,
        config.threshold,
        &config.notification_title,
    );
    monitor.run(config.interval(), &shutdown_rx);
    Ok(())
}

/// Send a fixed sample alert so the user can check notification permissions.
fn send_test_notification() -> Result<(), MonitorError> {
    let title = "💰 Gold Price Alert - TEST";
    let message = PriceChange::new(285.50, 283.25).message();
    info!("Sending test notification: {}", message);

    match OsaScriptNotifier::new().notify(title, &message) {
        Ok(()) => {
            info!("Test notification sent successfully.");
            info!("If nothing appeared, check System Settings -> Notifications for your terminal and Do Not Disturb.");
            Ok(())
        }
        Err(e) => {
            error!("Test notification failed: {}", e);
            Err(e)
        }
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format_timestamp_secs()
        .init();
}

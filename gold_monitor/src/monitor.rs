//! The poll-compare-notify loop.
//!
//! One cycle takes a reading, compares it with the stored baseline, alerts when the
//! move is larger than the threshold, and stores the reading as the new baseline.
//! Failures never stop the loop:
//! - a failed fetch or a bad payload skips the cycle and leaves the stored record alone;
//! - an unreadable state file counts as "no baseline";
//! - a failed write or notification is logged and the cycle still completes.
//!
//! `Monitor::cycles` exposes the loop as an unbounded iterator of `CycleReport`s, and
//! `Monitor::run` drives it with a sleep that a shutdown signal can cut short.
use crate::fetcher::PriceSource;
use crate::notifier::Notifier;
use chrono::{DateTime, Local};
use crossbeam_channel::{Receiver, select};
use gold_common::alert::PriceChange;
use gold_common::api::CURRENCY;
use gold_common::{PriceRecord, PriceStore};
use log::{error, info, warn};
use std::fmt;
use std::time::Duration;
use strum_macros::Display;

/// What happened in a single cycle. Prices and deltas are per gram.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum CycleOutcome {
    /// No usable reading; nothing was stored or sent.
    #[strum(to_string = "failed to fetch price")]
    FetchFailed,
    /// No baseline existed; the reading became the baseline.
    #[strum(to_string = "first reading")]
    FirstReading { price: f64 },
    /// The move stayed within the threshold.
    #[strum(to_string = "below threshold")]
    BelowThreshold { price: f64, delta: f64 },
    /// The move exceeded the threshold and an alert was dispatched.
    #[strum(to_string = "change detected")]
    Alerted {
        price: f64,
        delta: f64,
        message: String,
    },
}

impl CycleOutcome {
    /// Price read in this cycle, if any.
    pub fn price(&self) -> Option<f64> {
        match self {
            CycleOutcome::FetchFailed => None,
            CycleOutcome::FirstReading { price }
            | CycleOutcome::BelowThreshold { price, .. }
            | CycleOutcome::Alerted { price, .. } => Some(*price),
        }
    }
}

/// Result of one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// 1-based cycle counter.
    pub cycle: u64,
    /// When the cycle ran.
    pub timestamp: DateTime<Local>,
    /// What the cycle did.
    pub outcome: CycleOutcome,
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Check #{}: ", self.cycle)?;
        match &self.outcome {
            CycleOutcome::FetchFailed => write!(f, "{}", self.outcome),
            CycleOutcome::FirstReading { price } => {
                write!(f, "{:.2} {}/g ({})", price, CURRENCY, self.outcome)
            }
            CycleOutcome::BelowThreshold { price, delta }
            | CycleOutcome::Alerted { price, delta, .. } => write!(
                f,
                "{:.2} {cur}/g ({}: {:.2} {cur}/g)",
                price,
                self.outcome,
                delta.abs(),
                cur = CURRENCY
            ),
        }
    }
}

/// Gold price monitor. Owns its price source, notifier and state store.
pub struct Monitor<S, N> {
    source: S,
    pub(crate) notifier: N,
    store: PriceStore,
    threshold: f64,
    title: String,
    cycle: u64,
}

impl<S: PriceSource, N: Notifier> Monitor<S, N> {
    /// Create a monitor that alerts under `title` when a move exceeds `threshold`.
    pub fn new(source: S, notifier: N, store: PriceStore, threshold: f64, title: &str) -> Self {
        Self {
            source,
            notifier,
            store,
            threshold,
            title: title.to_string(),
            cycle: 0,
        }
    }

    /// Run one cycle now.
    pub fn run_cycle(&mut self) -> CycleReport {
        self.run_cycle_at(Local::now())
    }

    /// Run one cycle, stamping the report with `now`.
    pub fn run_cycle_at(&mut self, now: DateTime<Local>) -> CycleReport {
        self.cycle += 1;
        let report = CycleReport {
            cycle: self.cycle,
            timestamp: now,
            outcome: self.check(),
        };
        match report.outcome.price() {
            Some(_) => info!("{}", report),
            None => warn!("{}", report),
        }
        report
    }

    /// Unbounded sequence of cycles, run back to back without sleeping.
    pub fn cycles(&mut self) -> impl Iterator<Item = CycleReport> + '_ {
        std::iter::from_fn(move || Some(self.run_cycle()))
    }

    /// Run cycles every `interval` until a message arrives on `shutdown` or its
    /// sender is dropped.
    pub fn run(&mut self, interval: Duration, shutdown: &Receiver<()>) {
        for _ in self.cycles() {
            select! {
                recv(shutdown) -> _ => break,
                default(interval) => {},
            }
        }
        info!("Gold price monitor stopped.");
    }

    fn check(&self) -> CycleOutcome {
        let quote = match self.source.fetch() {
            Ok(quote) => quote,
            Err(e) => {
                error!("Error fetching gold price: {}", e);
                return CycleOutcome::FetchFailed;
            }
        };
        let price = quote.price_per_gram();

        let baseline = self.store.load().unwrap_or_else(|e| {
            warn!(
                "Error loading price history from {}: {}",
                self.store.path().display(),
                e
            );
            None
        });

        let outcome = match baseline {
            None => CycleOutcome::FirstReading { price },
            Some(record) => {
                let change = PriceChange::new(price, record.last_price);
                if change.exceeds(self.threshold) {
                    let message = change.message();
                    if let Err(e) = self.notifier.notify(&self.title, &message) {
                        error!("Error sending notification: {}", e);
                    }
                    CycleOutcome::Alerted {
                        price,
                        delta: change.delta(),
                        message,
                    }
                } else {
                    CycleOutcome::BelowThreshold {
                        price,
                        delta: change.delta(),
                    }
                }
            }
        };

        let record = PriceRecord {
            last_price: price,
            last_timestamp: quote.fetched_at.to_rfc3339(),
        };
        if let Err(e) = self.store.save(&record) {
            error!(
                "Error saving price history to {}: {}",
                self.store.path().display(),
                e
            );
        }
        outcome
    }
}

//! Price change detection and alert text.

use crate::api::CURRENCY;

/// Movement between the stored baseline and a fresh reading, both per gram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceChange {
    /// Price from the current poll.
    pub current: f64,
    /// Price from the stored record.
    pub previous: f64,
}

impl PriceChange {
    /// Pair a fresh reading with the stored baseline.
    pub fn new(current: f64, previous: f64) -> Self {
        Self { current, previous }
    }

    /// Signed change, positive when the price went up.
    pub fn delta(&self) -> f64 {
        self.current - self.previous
    }

    /// `true` only when the absolute change is strictly greater than `threshold`.
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.delta().abs() > threshold
    }

    /// Signed change with two decimals; rises carry an explicit `+`.
    pub fn signed_delta(&self) -> String {
        let delta = self.delta();
        if delta > 0.0 {
            format!("+{:.2}", delta)
        } else {
            format!("{:.2}", delta)
        }
    }

    /// Notification body, e.g. `NOW: 705.38 RM/g vs THEN: 703.37 RM/g (Change: +2.01 RM/g)`.
    pub fn message(&self) -> String {
        format!(
            "NOW: {:.2} {cur}/g vs THEN: {:.2} {cur}/g (Change: {} {cur}/g)",
            self.current,
            self.previous,
            self.signed_delta(),
            cur = CURRENCY
        )
    }
}

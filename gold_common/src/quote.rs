//! Upstream rates payload and unit conversion.
//!
//! The endpoint answers with a JSON document shaped like
//! `{"items":[{"curr":"MYR","xauPrice":13285.4,...}],...}`. Only the first item is
//! read, and only its gold price (`xauPrice`, currency per troy ounce) matters. A
//! `Quote` is created fresh on every poll and converted to a per-gram price.

use chrono::{DateTime, Local};
use serde::Deserialize;

use crate::error::MonitorError;

/// Grams in one troy ounce.
pub const TROY_OUNCE_GRAMS: f64 = 31.1035;

/// Convert a price per troy ounce to a price per gram.
pub fn ounce_to_gram(price_per_ounce: f64) -> f64 {
    price_per_ounce / TROY_OUNCE_GRAMS
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    items: Option<Vec<RateItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RateItem {
    xau_price: Option<f64>,
}

/// Gold price reading taken from a single poll.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Gold price in source currency per troy ounce.
    pub price_per_ounce: f64,
    /// Local time at which the reading was taken.
    pub fetched_at: DateTime<Local>,
}

impl Quote {
    /// Build a quote from a raw per-ounce price, rejecting values that cannot be a price.
    pub fn new(price_per_ounce: f64, fetched_at: DateTime<Local>) -> Result<Self, MonitorError> {
        if !price_per_ounce.is_finite() || price_per_ounce <= 0.0 {
            return Err(MonitorError::InvalidPrice(price_per_ounce));
        }
        Ok(Self {
            price_per_ounce,
            fetched_at,
        })
    }

    /// Decode the endpoint body and take the gold price of its first item.
    ///
    /// A body without `items`, with an empty `items` array, or whose first item has no
    /// `xauPrice` is reported as `MonitorError::MissingField`.
    pub fn from_json_bytes(body: &[u8], fetched_at: DateTime<Local>) -> Result<Self, MonitorError> {
        let response: RatesResponse = serde_json::from_slice(body)?;
        let items = response
            .items
            .ok_or_else(|| MonitorError::MissingField("items".to_string()))?;
        let item = items
            .first()
            .ok_or_else(|| MonitorError::MissingField("items[0]".to_string()))?;
        let price = item
            .xau_price
            .ok_or_else(|| MonitorError::MissingField("items[0].xauPrice".to_string()))?;
        Self::new(price, fetched_at)
    }

    /// Price in source currency per gram.
    pub fn price_per_gram(&self) -> f64 {
        ounce_to_gram(self.price_per_ounce)
    }
}

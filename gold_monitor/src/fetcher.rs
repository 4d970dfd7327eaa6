//! Fetching the gold price over HTTP.
//!
//! This module provides the `PriceSource` seam used by the monitor loop and its
//! production implementation backed by a blocking `reqwest` client.
use chrono::Local;
use gold_common::api::USER_AGENT;
use gold_common::{MonitorError, Quote};
use log::debug;
use reqwest::blocking::Client;
use std::time::Duration;

/// Anything that can produce a fresh gold quote.
pub trait PriceSource {
    /// Take one reading. Transport and payload problems are returned as errors.
    fn fetch(&self) -> Result<Quote, MonitorError>;
}

/// Reads quotes from the goldprice.org rates endpoint.
pub struct HttpPriceSource {
    client: Client,
    url: String,
}

impl HttpPriceSource {
    /// Build a client for `url` with the given request timeout.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, MonitorError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

impl PriceSource for HttpPriceSource {
    fn fetch(&self) -> Result<Quote, MonitorError> {
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        debug!("GET {} -> {}", self.url, status);
        if !status.is_success() {
            return Err(MonitorError::HttpStatus(status.as_u16()));
        }
        let body = response.bytes()?;
        Quote::from_json_bytes(&body, Local::now())
    }
}

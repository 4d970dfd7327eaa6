//! Upstream price endpoint constants.

/// Gold and silver rates quoted in Malaysian ringgit per troy ounce.
pub const DEFAULT_API_URL: &str = "https://data-asg.goldprice.org/dbXRates/MYR";

/// The endpoint rejects requests without a browser-like agent.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Seconds to wait for the endpoint before giving up on a cycle.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Currency label used in log lines and notifications.
pub const CURRENCY: &str = "RM";

//! Scenario configuration and logging setup.

use rust_decimal::Decimal;

/// Default storefront URL
pub const DEFAULT_BASE_URL: &str = "https://www.saucedemo.com";

/// Settings shared by every scenario against one storefront deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Storefront base URL
    pub base_url: String,
    /// Sales tax rate applied at checkout
    pub tax_rate: Decimal,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            tax_rate: Decimal::new(8, 2),
        }
    }
}

impl StoreConfig {
    /// Config for the default deployment
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Point at a different deployment
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the tax rate
    #[must_use]
    pub const fn with_tax_rate(mut self, tax_rate: Decimal) -> Self {
        self.tax_rate = tax_rate;
        self
    }
}

/// Install a fmt subscriber honoring `RUST_LOG`, defaulting to `info` for
/// this crate. Safe to call from several tests; later calls are no-ops.
pub fn init_test_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,cartwright=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::new();
        assert_eq!(config.base_url, "https://www.saucedemo.com");
        assert_eq!(config.tax_rate.to_string(), "0.08");
    }

    #[test]
    fn test_builders() {
        let config = StoreConfig::new()
            .with_base_url("http://localhost:3000")
            .with_tax_rate(Decimal::new(10, 2));
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.tax_rate.to_string(), "0.10");
    }

    #[test]
    fn test_logging_init_is_idempotent() {
        init_test_logging();
        init_test_logging();
    }
}

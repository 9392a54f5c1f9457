use std::env;

use crate::domain::money::DEFAULT_CURRENCY;

/// Pricing settings shared by the quote endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    /// Currency applied when a quote request does not name one.
    pub default_currency: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl PricingConfig {
    /// Read `DEFAULT_CURRENCY` from the environment, falling back to EUR.
    pub fn from_env() -> Self {
        let default_currency = env::var("DEFAULT_CURRENCY")
            .ok()
            .map(|value| value.trim().to_uppercase())
            .filter(|value| value.len() == 3 && value.chars().all(|c| c.is_ascii_alphabetic()))
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        Self { default_currency }
    }
}

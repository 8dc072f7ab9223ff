//! Companion configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SMARTCART_TAX_RATE` - Regional sales tax rate (default: 0.08875)
//! - `SMARTCART_SAVINGS` - Savings applied to every cart (default: 12.47)
//! - `SMARTCART_CURRENCY` - ISO 4217 currency code (default: USD)
//! - `SMARTCART_SCAN_DELAY_MS` - Simulated AR scan latency (default: 2000)
//! - `SMARTCART_VOICE_DELAY_MS` - Simulated voice recognition latency (default: 2000)
//! - `SMARTCART_PAYMENT_DELAY_MS` - Simulated payment processing time (default: 2000)
//! - `SMARTCART_EXIT_DELAY_MS` - Time the success screen stays up (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use smartcart_core::CurrencyCode;
use thiserror::Error;

const DEFAULT_TAX_RATE: &str = "0.08875";
const DEFAULT_SAVINGS: &str = "12.47";
const DEFAULT_SCAN_DELAY_MS: &str = "2000";
const DEFAULT_VOICE_DELAY_MS: &str = "2000";
const DEFAULT_PAYMENT_DELAY_MS: &str = "2000";
const DEFAULT_EXIT_DELAY_MS: &str = "3000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Companion application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionConfig {
    /// How cart totals are priced
    pub pricing: PricingConfig,
    /// Simulated latencies
    pub timing: TimingConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Pricing inputs shared by the cart and checkout screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingConfig {
    /// Regional sales tax rate, in `[0, 1)`
    pub tax_rate: Decimal,
    /// Flat savings from deals and coupons
    pub savings: Decimal,
    /// Currency all amounts are expressed in
    pub currency: CurrencyCode,
}

/// Delays for the timer-driven simulations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub scan_delay: Duration,
    pub voice_delay: Duration,
    pub payment_delay: Duration,
    pub exit_delay: Duration,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(8875, 5),
            savings: Decimal::new(1247, 2),
            currency: CurrencyCode::USD,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            scan_delay: Duration::from_millis(2000),
            voice_delay: Duration::from_millis(2000),
            payment_delay: Duration::from_millis(2000),
            exit_delay: Duration::from_millis(3000),
        }
    }
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            pricing: PricingConfig::default(),
            timing: TimingConfig::default(),
            sentry_dsn: None,
        }
    }
}

impl CompanionConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed, or if
    /// a pricing value is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`CompanionConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pricing = PricingConfig::from_lookup(&lookup)?;
        let timing = TimingConfig::from_lookup(&lookup)?;
        let sentry_dsn = lookup("SENTRY_DSN").filter(|dsn| !dsn.trim().is_empty());

        Ok(Self {
            pricing,
            timing,
            sentry_dsn,
        })
    }

    /// Same configuration with every delay set to `delay`.
    #[must_use]
    pub const fn with_uniform_delay(mut self, delay: Duration) -> Self {
        self.timing = TimingConfig {
            scan_delay: delay,
            voice_delay: delay,
            payment_delay: delay,
            exit_delay: delay,
        };
        self
    }
}

impl PricingConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tax_rate: Decimal = parse_or_default(lookup, "SMARTCART_TAX_RATE", DEFAULT_TAX_RATE)?;
        if tax_rate < Decimal::ZERO || tax_rate >= Decimal::ONE {
            return Err(ConfigError::InvalidEnvVar(
                "SMARTCART_TAX_RATE".to_string(),
                format!("must be in [0, 1) (got {tax_rate})"),
            ));
        }

        let savings: Decimal = parse_or_default(lookup, "SMARTCART_SAVINGS", DEFAULT_SAVINGS)?;
        if savings < Decimal::ZERO {
            return Err(ConfigError::InvalidEnvVar(
                "SMARTCART_SAVINGS".to_string(),
                format!("must not be negative (got {savings})"),
            ));
        }

        let currency: CurrencyCode = parse_or_default(lookup, "SMARTCART_CURRENCY", "USD")?;

        Ok(Self {
            tax_rate,
            savings,
            currency,
        })
    }
}

impl TimingConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            scan_delay: get_millis(lookup, "SMARTCART_SCAN_DELAY_MS", DEFAULT_SCAN_DELAY_MS)?,
            voice_delay: get_millis(lookup, "SMARTCART_VOICE_DELAY_MS", DEFAULT_VOICE_DELAY_MS)?,
            payment_delay: get_millis(
                lookup,
                "SMARTCART_PAYMENT_DELAY_MS",
                DEFAULT_PAYMENT_DELAY_MS,
            )?,
            exit_delay: get_millis(lookup, "SMARTCART_EXIT_DELAY_MS", DEFAULT_EXIT_DELAY_MS)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when unset.
fn parse_or_default<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Get a millisecond duration with a default value.
fn get_millis<F>(lookup: &F, key: &str, default: &str) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    parse_or_default::<F, u64>(lookup, key, default).map(Duration::from_millis)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = CompanionConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CompanionConfig::default());
        assert_eq!(config.pricing.tax_rate, Decimal::new(8875, 5));
        assert_eq!(config.timing.exit_delay, Duration::from_secs(3));
    }

    #[test]
    fn test_overrides() {
        let config = CompanionConfig::from_lookup(lookup_from(&[
            ("SMARTCART_TAX_RATE", "0.05"),
            ("SMARTCART_SAVINGS", "0"),
            ("SMARTCART_CURRENCY", "cad"),
            ("SMARTCART_PAYMENT_DELAY_MS", "10"),
            ("SENTRY_DSN", "https://key@sentry.example/1"),
        ]))
        .unwrap();

        assert_eq!(config.pricing.tax_rate, Decimal::new(5, 2));
        assert_eq!(config.pricing.savings, Decimal::ZERO);
        assert_eq!(config.pricing.currency, CurrencyCode::CAD);
        assert_eq!(config.timing.payment_delay, Duration::from_millis(10));
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_invalid_delay() {
        let err = CompanionConfig::from_lookup(lookup_from(&[("SMARTCART_SCAN_DELAY_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "SMARTCART_SCAN_DELAY_MS"));
    }

    #[test]
    fn test_tax_rate_out_of_range() {
        let result = CompanionConfig::from_lookup(lookup_from(&[("SMARTCART_TAX_RATE", "1.5")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_negative_savings_rejected() {
        let result = CompanionConfig::from_lookup(lookup_from(&[("SMARTCART_SAVINGS", "-1")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_sentry_dsn_is_none() {
        let config = CompanionConfig::from_lookup(lookup_from(&[("SENTRY_DSN", "  ")])).unwrap();
        assert_eq!(config.sentry_dsn, None);
    }

    #[test]
    fn test_uniform_delay() {
        let config = CompanionConfig::default().with_uniform_delay(Duration::from_millis(5));
        assert_eq!(config.timing.scan_delay, Duration::from_millis(5));
        assert_eq!(config.timing.exit_delay, Duration::from_millis(5));
    }
}

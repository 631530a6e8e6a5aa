//! Environment-driven system configuration.

use crate::clients::PaymentPolicy;
use crate::domain::Money;
use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;

pub const CHANNEL_BUFFER_ENV: &str = "STOREFRONT_CHANNEL_BUFFER";
pub const PAYMENT_POLICY_ENV: &str = "STOREFRONT_PAYMENT_POLICY";
pub const LOW_STOCK_THRESHOLD_ENV: &str = "STOREFRONT_LOW_STOCK_THRESHOLD";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("unknown payment policy {0:?} (expected approve, decline or decline-above:<cents>)")]
    InvalidPaymentPolicy(String),
}

/// Settings for [`StorefrontSystem`](super::StorefrontSystem).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Capacity of every actor's request channel.
    pub channel_buffer: usize,
    pub payment_policy: PaymentPolicy,
    /// Products with fewer units than this count as low on stock.
    pub low_stock_threshold: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            payment_policy: PaymentPolicy::default(),
            low_stock_threshold: 5,
        }
    }
}

impl SystemConfig {
    /// Reads `STOREFRONT_*` variables, falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) against any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(CHANNEL_BUFFER_ENV) {
            config.channel_buffer = parse_positive(CHANNEL_BUFFER_ENV, &value)?;
        }
        if let Some(value) = lookup(PAYMENT_POLICY_ENV) {
            config.payment_policy = value.parse()?;
        }
        if let Some(value) = lookup(LOW_STOCK_THRESHOLD_ENV) {
            config.low_stock_threshold = parse_positive(LOW_STOCK_THRESHOLD_ENV, &value)?;
        }
        Ok(config)
    }
}

fn parse_positive<N: FromStr + Default + PartialEq>(name: &'static str, value: &str) -> Result<N, ConfigError> {
    value
        .trim()
        .parse::<N>()
        .ok()
        .filter(|n| *n != N::default())
        .ok_or_else(|| ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        })
}

impl FromStr for PaymentPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidPaymentPolicy(s.to_string());
        match s.trim().to_ascii_lowercase().as_str() {
            "approve" | "approve-all" => Ok(PaymentPolicy::ApproveAll),
            "decline" | "decline-all" => Ok(PaymentPolicy::DeclineAll),
            other => {
                let cents = other.strip_prefix("decline-above:").ok_or_else(invalid)?;
                let cents = cents.trim().parse::<u64>().map_err(|_| invalid())?;
                Ok(PaymentPolicy::DeclineAbove(Money::from_cents(cents)))
            }
        }
    }
}

//! Storefront configuration.

use std::path::Path;
use std::time::Duration;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::checkout::DeliveryPolicy;
use crate::error::CommerceError;
use crate::money::{Currency, Money};

/// Top-level storefront configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Shop identity used in order messages.
    #[serde(default)]
    pub store: StoreProfile,

    /// Checkout hand-off settings.
    #[serde(default)]
    pub checkout: CheckoutSettings,

    /// Delivery fee rule.
    #[serde(default)]
    pub delivery: DeliverySettings,
}

impl StorefrontConfig {
    /// Load config from a TOML or JSON file (by extension).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the checkout cannot work with.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let number = &self.checkout.whatsapp_number;
        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(CommerceError::InvalidConfig(format!(
                "whatsapp_number must be digits only (international format, no '+'), got {:?}",
                number
            )));
        }
        let amounts = [self.delivery.free_threshold, self.delivery.flat_fee];
        if amounts.iter().any(|a| !a.is_finite() || *a < 0.0) {
            return Err(CommerceError::InvalidConfig(
                "delivery amounts must be finite and not negative".to_string(),
            ));
        }
        if self.store.timezone().is_none() {
            return Err(CommerceError::InvalidConfig(format!(
                "timezone_offset_minutes out of range: {}",
                self.store.timezone_offset_minutes
            )));
        }
        Ok(())
    }

    /// Check that every catalog price is quoted in the store currency.
    pub fn check_catalog(&self, catalog: &Catalog) -> Result<(), CommerceError> {
        let expected = self.store.currency;
        match catalog.products().iter().find(|p| p.price.currency != expected) {
            Some(product) => Err(CommerceError::CurrencyMismatch {
                expected: expected.code().to_string(),
                got: format!("{} (product {})", product.price.currency.code(), product.id),
            }),
            None => Ok(()),
        }
    }

    /// Delivery policy in the store currency.
    pub fn delivery_policy(&self) -> DeliveryPolicy {
        self.delivery.policy(self.store.currency)
    }
}

/// Shop identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreProfile {
    /// Name in the message header and sign-off.
    #[serde(default = "default_business_name")]
    pub business_name: String,

    /// Channel named in the message footer.
    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// Currency prices are quoted in.
    #[serde(default)]
    pub currency: Currency,

    /// Store time zone as minutes east of UTC (Accra is UTC+0).
    #[serde(default)]
    pub timezone_offset_minutes: i32,
}

fn default_business_name() -> String {
    "Jenny's Organic Spices".to_string()
}

fn default_site_name() -> String {
    "Jenny's Spices Website".to_string()
}

impl StoreProfile {
    /// Fixed offset for rendering order timestamps.
    pub fn timezone(&self) -> Option<FixedOffset> {
        self.timezone_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
    }
}

impl Default for StoreProfile {
    fn default() -> Self {
        Self {
            business_name: default_business_name(),
            site_name: default_site_name(),
            currency: Currency::default(),
            timezone_offset_minutes: 0,
        }
    }
}

/// Checkout hand-off settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// Destination WhatsApp number, digits only.
    #[serde(default = "default_whatsapp_number")]
    pub whatsapp_number: String,

    /// Seconds between a sent order and the automatic reset.
    #[serde(default = "default_reset_delay_secs")]
    pub reset_delay_secs: u64,

    /// Encoded link length above which a warning is logged.
    #[serde(default = "default_max_link_length")]
    pub max_link_length: usize,
}

fn default_whatsapp_number() -> String {
    "233553018172".to_string()
}

fn default_reset_delay_secs() -> u64 {
    3
}

fn default_max_link_length() -> usize {
    4096
}

impl CheckoutSettings {
    /// Reset delay as a duration.
    pub fn reset_delay(&self) -> Duration {
        Duration::from_secs(self.reset_delay_secs)
    }
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            whatsapp_number: default_whatsapp_number(),
            reset_delay_secs: default_reset_delay_secs(),
            max_link_length: default_max_link_length(),
        }
    }
}

/// Delivery fee rule, in major currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliverySettings {
    /// Orders strictly above this subtotal ship free.
    #[serde(default = "default_free_threshold")]
    pub free_threshold: f64,

    /// Fee charged otherwise.
    #[serde(default = "default_flat_fee")]
    pub flat_fee: f64,
}

fn default_free_threshold() -> f64 {
    100.0
}

fn default_flat_fee() -> f64 {
    15.0
}

impl DeliverySettings {
    /// Convert to an exact policy in the given currency.
    pub fn policy(&self, currency: Currency) -> DeliveryPolicy {
        DeliveryPolicy {
            free_threshold: Money::from_decimal(self.free_threshold, currency),
            flat_fee: Money::from_decimal(self.flat_fee, currency),
        }
    }
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            free_threshold: default_free_threshold(),
            flat_fee: default_flat_fee(),
        }
    }
}

/// Generate a default storefront.toml.
pub fn generate_default_config() -> String {
    r#"# Storefront configuration

[store]
business_name = "Jenny's Organic Spices"
site_name = "Jenny's Spices Website"
currency = "GHS"
timezone_offset_minutes = 0

[checkout]
whatsapp_number = "233553018172"
reset_delay_secs = 3
max_link_length = 4096

[delivery]
free_threshold = 100.0
flat_fee = 15.0
"#
    .to_string()
}

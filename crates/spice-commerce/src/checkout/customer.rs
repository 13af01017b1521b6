//! Customer details collected on the checkout form.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Customer details for one checkout attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Full name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// Delivery address.
    pub address: String,
    /// Optional delivery instructions.
    #[serde(default)]
    pub delivery_note: String,
}

impl CustomerInfo {
    /// Create customer info with the required fields.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
            delivery_note: String::new(),
        }
    }

    /// Set the delivery note.
    pub fn with_delivery_note(mut self, note: impl Into<String>) -> Self {
        self.delivery_note = note.into();
        self
    }

    /// Names of required fields that are blank after trimming.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        if self.address.trim().is_empty() {
            missing.push("address");
        }
        missing
    }

    /// Check that all required fields are present.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::MissingCustomerFields(missing.join(", ")))
        }
    }

    /// The delivery note, if it holds anything besides whitespace.
    pub fn delivery_note(&self) -> Option<&str> {
        let note = self.delivery_note.trim();
        (!note.is_empty()).then_some(note)
    }

    /// Clear every field back to an empty string.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//! Order summary: pricing a cart and rendering the order message.

use chrono::{DateTime, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::checkout::CustomerInfo;
use crate::config::StoreProfile;
use crate::error::CommerceError;
use crate::ids::{OrderNumber, ProductId};
use crate::money::{Currency, Money};

/// Flat delivery fee waived above a subtotal threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryPolicy {
    /// Subtotals strictly greater than this ship free.
    pub free_threshold: Money,
    /// Fee charged at or below the threshold.
    pub flat_fee: Money,
}

impl DeliveryPolicy {
    /// Fee owed for a subtotal.
    pub fn fee_for(&self, subtotal: &Money) -> Money {
        if subtotal.amount_cents > self.free_threshold.amount_cents {
            Money::zero(subtotal.currency)
        } else {
            Money::new(self.flat_fee.amount_cents, subtotal.currency)
        }
    }

    /// Currency the policy is expressed in.
    pub fn currency(&self) -> Currency {
        self.flat_fee.currency
    }
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self {
            free_threshold: Money::new(10_000, Currency::GHS),
            flat_fee: Money::new(1_500, Currency::GHS),
        }
    }
}

/// One priced line of the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub weight: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub line_subtotal: Money,
}

/// A priced order ready to be rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Display reference derived from `placed_at`.
    pub order_number: OrderNumber,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
    /// Customer details at submission time.
    pub customer: CustomerInfo,
    /// Priced lines in cart order.
    pub lines: Vec<SummaryLine>,
    /// Sum of line subtotals.
    pub subtotal: Money,
    /// Delivery fee (zero when free).
    pub delivery_fee: Money,
    /// Subtotal plus delivery.
    pub total: Money,
    /// Cart ids with no catalog product; excluded from every total.
    pub unresolved: Vec<ProductId>,
}

impl OrderSummary {
    /// Price a cart against the catalog.
    ///
    /// Cart ids missing from the catalog are dropped and listed in
    /// `unresolved`. Apart from `order_number`, the result depends only on
    /// the inputs.
    pub fn build(
        cart: &CartStore,
        catalog: &Catalog,
        customer: &CustomerInfo,
        policy: &DeliveryPolicy,
        placed_at: DateTime<Utc>,
    ) -> Result<Self, CommerceError> {
        let currency = policy.currency();
        let mut lines = Vec::with_capacity(cart.len());
        let mut unresolved = Vec::new();

        for entry in cart.entries() {
            let Some(product) = catalog.get(entry.product_id) else {
                tracing::warn!(product_id = %entry.product_id, "cart line not in catalog, dropped");
                unresolved.push(entry.product_id.clone());
                continue;
            };
            if product.price.currency != currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: product.price.currency.code().to_string(),
                });
            }
            let line_subtotal = product
                .price
                .try_multiply(i64::from(entry.quantity))
                .ok_or(CommerceError::Overflow)?;
            lines.push(SummaryLine {
                product_id: product.id.clone(),
                product_name: product.product_name.clone(),
                weight: product.weight.clone(),
                unit_price: product.price,
                quantity: entry.quantity,
                line_subtotal,
            });
        }

        let subtotal = Money::try_sum(lines.iter().map(|l| &l.line_subtotal), currency)
            .ok_or(CommerceError::Overflow)?;
        let delivery_fee = policy.fee_for(&subtotal);
        let total = subtotal
            .try_add(&delivery_fee)
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            order_number: OrderNumber::from_timestamp(placed_at),
            placed_at,
            customer: customer.clone(),
            lines,
            subtotal,
            delivery_fee,
            total,
            unresolved,
        })
    }

    /// Price a cart, stamped with the current time.
    pub fn format(
        cart: &CartStore,
        catalog: &Catalog,
        customer: &CustomerInfo,
        policy: &DeliveryPolicy,
    ) -> Result<Self, CommerceError> {
        Self::build(cart, catalog, customer, policy, Utc::now())
    }

    /// Check if delivery is free.
    pub fn has_free_delivery(&self) -> bool {
        self.delivery_fee.is_zero()
    }

    /// Total units across priced lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Check if no line could be priced.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Delivery fee as shown to the customer.
    pub fn delivery_fee_label(&self) -> String {
        if self.has_free_delivery() {
            "FREE".to_string()
        } else {
            self.delivery_fee.display()
        }
    }

    /// Order time in the store's time zone.
    pub fn timestamp_label(&self, profile: &StoreProfile) -> String {
        let tz = profile.timezone().unwrap_or_else(|| Utc.fix());
        self.placed_at
            .with_timezone(&tz)
            .format("%-d %B %Y at %H:%M")
            .to_string()
    }

    /// Render the WhatsApp order message.
    pub fn render(&self, profile: &StoreProfile) -> String {
        let business = &profile.business_name;
        let mut message = format!("🛒 *NEW ORDER - {}* 🛒\n\n", business);
        message.push_str(&format!("📋 *Order Number:* {}\n", self.order_number));
        message.push_str(&format!(
            "📅 *Date & Time:* {}\n\n",
            self.timestamp_label(profile)
        ));

        message.push_str("👤 *Customer Details:*\n");
        message.push_str(&format!("Name: {}\n", self.customer.name.trim()));
        message.push_str(&format!("Phone: {}\n", self.customer.phone.trim()));
        message.push_str(&format!("Address: {}\n", self.customer.address.trim()));
        if let Some(note) = self.customer.delivery_note() {
            message.push_str(&format!("Delivery Note: {}\n", note));
        }

        message.push_str("\n🛍️ *Order Items:*\n");
        for (index, line) in self.lines.iter().enumerate() {
            message.push_str(&format!("{}. *{}*\n", index + 1, line.product_name));
            message.push_str(&format!(
                "   Quantity: {}x ({})\n",
                line.quantity, line.weight
            ));
            message.push_str(&format!("   Price: {} each\n", line.unit_price.display()));
            message.push_str(&format!(
                "   Subtotal: {}\n\n",
                line.line_subtotal.display()
            ));
        }

        message.push_str("💰 *Order Summary:*\n");
        message.push_str(&format!("Subtotal: {}\n", self.subtotal.display()));
        message.push_str(&format!("Delivery Fee: {}\n", self.delivery_fee_label()));
        message.push_str(&format!("*TOTAL: {}*\n\n", self.total.display()));
        message.push_str(&format!("📱 *Order placed via {}*\n", profile.site_name));
        message.push_str(&format!("Thank you for choosing {}! 🌶️✨", business));

        message
    }
}

//! Checkout module.
//!
//! Customer details, order summary formatting, the WhatsApp deep link and
//! the dispatcher state machine that ties them together.

mod customer;
mod flow;
mod link;
mod reset;
mod summary;

pub use customer::CustomerInfo;
pub use flow::{CheckoutDispatcher, CheckoutState, ResetSignal, Submission};
pub use link::{DeepLink, LinkOpener, RecordingOpener, WHATSAPP_BASE_URL};
pub use reset::ResetTimer;
pub use summary::{DeliveryPolicy, OrderSummary, SummaryLine};

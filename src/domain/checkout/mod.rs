//! Checkout orchestration.
//!
//! Converts a cart snapshot into a batch of independent order-creation
//! calls and applies an all-or-nothing visible outcome: the cart is
//! cleared only when every line was placed. A partially successful batch
//! leaves the cart exactly as it was — the failure is surfaced per line
//! and the user re-attempts the whole batch.

pub mod orchestrator;
pub mod outcome;
pub mod payment;

pub use orchestrator::{CheckoutError, CheckoutOrchestrator, PrepaidCheckout};
pub use outcome::{CheckoutReport, LineDisposition, OrderOutcome};
pub use payment::{CustomerDetails, MockPaymentGateway, PaymentGateway, PaymentRequest, PaymentSession};

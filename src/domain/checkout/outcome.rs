//! Checkout batch outcomes.

use crate::domain::{cart::CartLine, orders::OrderRecord};

/// How one cart line fared in a checkout batch.
#[derive(Debug, Clone, PartialEq)]
pub enum LineDisposition {
    /// The backend created an order for this line.
    Placed(OrderRecord),

    /// The product key did not resolve against the catalog snapshot at
    /// submission time; no call was issued for this line.
    Unresolved,

    /// The order-creation call failed (transport error or non-2xx).
    Failed(String),
}

/// The settled result of one line's order-creation attempt. The batch of
/// outcomes is ephemeral — consumed immediately to decide the cart
/// mutation and user feedback.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderOutcome {
    /// The cart line this outcome belongs to.
    pub line: CartLine,
    /// What happened to it.
    pub disposition: LineDisposition,
}

impl OrderOutcome {
    /// Whether this line's order was created.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        matches!(self.disposition, LineDisposition::Placed(_))
    }
}

/// What a checkout attempt amounted to.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutReport {
    /// The cart was empty; nothing was sent. Not an error.
    EmptyCart,

    /// Every line was placed; the cart has been cleared.
    Completed {
        /// The created order records, one per former cart line.
        orders: Vec<OrderRecord>,
    },

    /// At least one line failed or did not resolve. The cart is left
    /// completely unmodified — including lines that were individually
    /// placed, whose backend orders exist nonetheless; `outcomes` retains
    /// them so callers can warn before a retry.
    Rejected {
        /// Per-line outcomes for the whole batch.
        outcomes: Vec<OrderOutcome>,
    },
}

impl CheckoutReport {
    /// Whether the batch succeeded in full.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Product keys of the lines that failed or did not resolve, in cart
    /// order. Empty for [`CheckoutReport::EmptyCart`] and
    /// [`CheckoutReport::Completed`].
    #[must_use]
    pub fn failed_product_keys(&self) -> Vec<&str> {
        match self {
            Self::EmptyCart | Self::Completed { .. } => Vec::new(),
            Self::Rejected { outcomes } => outcomes
                .iter()
                .filter(|outcome| !outcome.succeeded())
                .map(|outcome| outcome.line.product_key.as_str())
                .collect(),
        }
    }
}

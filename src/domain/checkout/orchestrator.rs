//! Checkout orchestrator.

use std::sync::Arc;

use futures_util::future::join_all;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    api::ApiError,
    domain::{
        cart::{CartLine, CartStore, CartStoreError, projection},
        catalog::CatalogSnapshot,
        checkout::{
            outcome::{CheckoutReport, LineDisposition, OrderOutcome},
            payment::{CustomerDetails, PaymentGateway, PaymentRequest, PaymentSession},
        },
        orders::{OrderRequest, OrdersClient},
    },
    session::Session,
};

/// Errors raised by checkout itself, as opposed to per-line outcomes.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart could not be cleared after a fully successful batch. The
    /// backend orders exist; the stored cart still shows the old lines.
    #[error("cart could not be updated after checkout")]
    Cart(#[from] CartStoreError),

    /// Payment initialization failed. No order-creation call was issued
    /// and the cart is untouched.
    #[error("payment initialization failed")]
    Payment(#[source] ApiError),
}

/// Result of a prepaid checkout: the batch report plus the hosted-payment
/// redirect, surfaced only when every order was created.
#[derive(Debug, Clone, PartialEq)]
pub struct PrepaidCheckout {
    /// The batch outcome, same semantics as a plain checkout.
    pub report: CheckoutReport,
    /// Where to send the user to pay; `None` unless the batch completed.
    pub redirect: Option<PaymentSession>,
}

/// Converts a cart snapshot into a batch of order-creation calls.
pub struct CheckoutOrchestrator {
    orders: Arc<dyn OrdersClient>,
}

impl std::fmt::Debug for CheckoutOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutOrchestrator").finish_non_exhaustive()
    }
}

impl CheckoutOrchestrator {
    /// Create an orchestrator over the given order collaborator.
    #[must_use]
    pub fn new(orders: Arc<dyn OrdersClient>) -> Self {
        Self { orders }
    }

    /// Check the cart out as one batch of orders.
    ///
    /// An empty cart short-circuits to [`CheckoutReport::EmptyCart`]
    /// without any network call. Otherwise every line is resolved against
    /// `catalog` at submission time (the snapshot may be older than the
    /// cart — resolution never reuses ids cached from an earlier
    /// checkout), the resolved lines are dispatched concurrently, and the
    /// cart is cleared only when every line was placed.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Cart`] when clearing the cart after a
    /// fully successful batch fails. Per-line failures are not errors;
    /// they settle into the report.
    pub async fn checkout(
        &self,
        cart: &CartStore,
        catalog: &CatalogSnapshot,
        session: &Session,
    ) -> Result<CheckoutReport, CheckoutError> {
        let lines = cart.snapshot();

        if lines.is_empty() {
            return Ok(CheckoutReport::EmptyCart);
        }

        self.run_batch(cart, lines, catalog, session).await
    }

    /// Check out with a prepaid (hosted payment) flow.
    ///
    /// Payment is initialized strictly first — a gateway failure means no
    /// order is created and the cart is untouched. The redirect leaves
    /// the page, so it is surfaced only once the whole batch has been
    /// placed; the amount handed to the gateway is
    /// [`projection::total`], the same function the cart display uses.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Payment`] when initialization fails and
    /// [`CheckoutError::Cart`] when clearing the cart after a fully
    /// successful batch fails.
    pub async fn checkout_prepaid(
        &self,
        gateway: &dyn PaymentGateway,
        cart: &CartStore,
        catalog: &CatalogSnapshot,
        session: &Session,
    ) -> Result<PrepaidCheckout, CheckoutError> {
        let lines = cart.snapshot();

        if lines.is_empty() {
            return Ok(PrepaidCheckout {
                report: CheckoutReport::EmptyCart,
                redirect: None,
            });
        }

        let request = PaymentRequest {
            amount: projection::total(&lines),
            customer: CustomerDetails::from(&session.user),
        };

        let payment = gateway
            .initialize(&request)
            .await
            .map_err(CheckoutError::Payment)?;

        let report = self.run_batch(cart, lines, catalog, session).await?;

        let redirect = report.is_complete().then_some(payment);

        Ok(PrepaidCheckout { report, redirect })
    }

    async fn run_batch(
        &self,
        cart: &CartStore,
        lines: Vec<CartLine>,
        catalog: &CatalogSnapshot,
        session: &Session,
    ) -> Result<CheckoutReport, CheckoutError> {
        // Resolve every line up front. A line whose product key is gone
        // from the catalog is settled as unresolved here — no call is
        // issued for it and its siblings proceed regardless.
        let planned: Vec<(CartLine, Option<OrderRequest>)> = lines
            .into_iter()
            .map(|line| {
                let request = catalog.resolve(&line.product_key).map(|item| OrderRequest {
                    user_id: session.user.id.clone(),
                    food_id: item.id.clone(),
                    hotel_id: item.hotel_id.clone(),
                    quantity: line.quantity,
                    price: item.price,
                });

                (line, request)
            })
            .collect();

        // Independent concurrent calls with a fan-in barrier: join_all
        // waits for every outcome, in whatever order they complete,
        // before any decision is made. No call is retried.
        let calls = planned.iter().enumerate().filter_map(|(index, (_, request))| {
            request
                .as_ref()
                .map(|request| async move { (index, self.orders.create_order(request).await) })
        });

        let mut settled: FxHashMap<usize, Result<_, ApiError>> =
            join_all(calls).await.into_iter().collect();

        let outcomes: Vec<OrderOutcome> = planned
            .into_iter()
            .enumerate()
            .map(|(index, (line, request))| {
                let disposition = if request.is_none() {
                    LineDisposition::Unresolved
                } else {
                    match settled.remove(&index) {
                        Some(Ok(record)) => LineDisposition::Placed(record),
                        Some(Err(error)) => LineDisposition::Failed(error.to_string()),
                        None => LineDisposition::Failed("outcome missing".to_string()),
                    }
                };

                OrderOutcome { line, disposition }
            })
            .collect();

        if outcomes.iter().all(OrderOutcome::succeeded) {
            // All-or-nothing, success side: the cart empties as one unit.
            cart.clear()?;

            let orders: Vec<_> = outcomes
                .into_iter()
                .filter_map(|outcome| match outcome.disposition {
                    LineDisposition::Placed(record) => Some(record),
                    LineDisposition::Unresolved | LineDisposition::Failed(_) => None,
                })
                .collect();

            info!(count = orders.len(), "checkout placed every order; cart cleared");

            Ok(CheckoutReport::Completed { orders })
        } else {
            // Failure side: even individually placed lines stay in the
            // cart. Removing them would strand the user with a
            // half-cleared cart and duplicate orders on retry.
            let failed: Vec<&str> = outcomes
                .iter()
                .filter(|outcome| !outcome.succeeded())
                .map(|outcome| outcome.line.product_key.as_str())
                .collect();

            warn!(?failed, "checkout batch failed; cart preserved");

            Ok(CheckoutReport::Rejected { outcomes })
        }
    }
}

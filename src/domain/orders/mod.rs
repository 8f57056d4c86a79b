//! Order lifecycle.
//!
//! Orders are owned by the backend; the client reads records, classifies
//! their status for display, and initiates exactly two transitions —
//! cancel (customer) and accept (delivery role). The backend is the sole
//! arbiter of both.

pub mod client;
pub mod lifecycle;
pub mod models;

pub use client::{MockOrdersClient, OrdersClient};
pub use lifecycle::{LifecycleError, OrderLifecycle, TransitionOutcome};
pub use models::{
    FoodRef, HotelRef, OrderId, OrderRecord, OrderRequest, OrderStatus, PartyRef,
};

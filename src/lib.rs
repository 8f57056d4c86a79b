//! Gursha client
//!
//! Cart and checkout orchestration for the Gursha food-delivery backend:
//! a locally persisted shopping cart, read-only projections over the live
//! catalog, a per-user rating ledger, an all-or-nothing checkout batch,
//! and the client side of the order lifecycle.

pub mod api;
pub mod domain;
pub mod session;
pub mod storage;

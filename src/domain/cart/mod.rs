//! Shopping cart.
//!
//! The cart is the one piece of client-owned durable state: a list of
//! product lines persisted locally and mutated only through
//! [`CartStore`]. Everything rendered from it is a derived projection.

pub mod models;
pub mod projection;
pub mod store;

pub use models::{CartLine, DisplayLine};
pub use store::{CartStore, CartStoreError};

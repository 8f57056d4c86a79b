//! Per-user food ratings.
//!
//! The ledger caches what the signed-in user last rated each food so
//! rating widgets can pre-fill. Averages are server-owned: a submit
//! returns the new authoritative average and the client applies it
//! verbatim — it is never in possession of the full rating population,
//! so it never recomputes one locally.

pub mod client;
pub mod ledger;
pub mod models;

pub use client::{MockRatingsClient, RatingsClient};
pub use ledger::{RatingLedger, RatingUpdate, RatingsError};
pub use models::{InvalidRating, Rating};

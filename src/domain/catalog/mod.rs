//! Food catalog.
//!
//! The catalog is an external, read-only collaborator: the client fetches a
//! snapshot of purchasable items and joins cart lines against it. Snapshots
//! can go stale between page load and checkout; consumers re-resolve
//! against the snapshot they hold and never cache resolved ids.

pub mod client;
pub mod models;
pub mod snapshot;

pub use client::{CatalogClient, MockCatalogClient};
pub use models::{CatalogItem, FoodId, Hotel, HotelId};
pub use snapshot::CatalogSnapshot;

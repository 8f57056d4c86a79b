//! Catalog source.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    api::ApiError,
    domain::catalog::{models::HotelId, snapshot::CatalogSnapshot},
};

/// Read-only source of catalog snapshots.
///
/// Fetch failures here are page-level load errors; they are never folded
/// into checkout failures, which resolve against an already-held snapshot.
#[automock]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch every purchasable item across hotels.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend call fails.
    async fn all_foods(&self) -> Result<CatalogSnapshot, ApiError>;

    /// Fetch the items offered by one hotel.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend call fails.
    async fn hotel_foods(&self, hotel: &HotelId) -> Result<CatalogSnapshot, ApiError>;
}

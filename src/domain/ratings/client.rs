//! Ratings collaborator.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::{
    api::ApiError,
    domain::{catalog::FoodId, ratings::models::Rating},
    session::UserId,
};

/// Backend rating endpoints.
#[automock]
#[async_trait]
pub trait RatingsClient: Send + Sync {
    /// Every rating the user has submitted, keyed by food.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend call fails.
    async fn ratings_for(&self, user: &UserId) -> Result<FxHashMap<FoodId, Rating>, ApiError>;

    /// Submit (or overwrite) the user's rating for a food.
    ///
    /// Returns the new server-computed average for that food.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend call fails; no state has been
    /// mutated in that case.
    async fn rate(
        &self,
        food: &FoodId,
        user: &UserId,
        rating: Rating,
    ) -> Result<Decimal, ApiError>;
}

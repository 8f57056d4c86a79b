//! Rating ledger.

use std::sync::Arc;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    api::ApiError,
    domain::{
        catalog::{CatalogSnapshot, FoodId},
        ratings::{client::RatingsClient, models::Rating},
    },
    session::UserId,
};

/// Errors raised by rating submission.
#[derive(Debug, Error)]
pub enum RatingsError {
    /// The submission call failed; neither the ledger entry nor the
    /// catalog average was touched. Retrying is simply submitting again.
    #[error("rating submission failed")]
    Submit(#[source] ApiError),
}

/// What a successful submission changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingUpdate {
    /// The user's rating as now recorded in the ledger.
    pub rating: Rating,
    /// The new server-computed average applied to the catalog.
    pub new_average: Decimal,
}

/// The signed-in user's last-submitted rating per food.
pub struct RatingLedger {
    client: Arc<dyn RatingsClient>,
    entries: FxHashMap<FoodId, Rating>,
}

impl std::fmt::Debug for RatingLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RatingLedger")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl RatingLedger {
    /// An empty ledger over the given collaborator.
    #[must_use]
    pub fn new(client: Arc<dyn RatingsClient>) -> Self {
        Self {
            client,
            entries: FxHashMap::default(),
        }
    }

    /// Load the user's ratings, once per view activation.
    ///
    /// A fetch failure is logged and yields an empty ledger — unknown
    /// ratings are never fatal to the page.
    pub async fn load(client: Arc<dyn RatingsClient>, user: &UserId) -> Self {
        let entries = match client.ratings_for(user).await {
            Ok(entries) => {
                debug!(count = entries.len(), "loaded user ratings");
                entries
            }
            Err(error) => {
                warn!(error = %error, "failed to load ratings; starting empty");
                FxHashMap::default()
            }
        };

        Self { client, entries }
    }

    /// The user's last-submitted rating for a food, to pre-fill widgets.
    #[must_use]
    pub fn rating_for(&self, food: &FoodId) -> Option<Rating> {
        self.entries.get(food).copied()
    }

    /// Number of foods the user has rated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the user has rated nothing yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Submit a rating and, on success, update both the ledger entry and
    /// the catalog item's average with the server-returned value.
    ///
    /// No optimistic mutation happens before the call returns, so a
    /// failure needs no rollback: ledger and average are exactly as they
    /// were.
    ///
    /// # Errors
    ///
    /// Returns [`RatingsError::Submit`] when the backend call fails.
    pub async fn submit(
        &mut self,
        catalog: &mut CatalogSnapshot,
        food: &FoodId,
        user: &UserId,
        rating: Rating,
    ) -> Result<RatingUpdate, RatingsError> {
        let new_average = self
            .client
            .rate(food, user, rating)
            .await
            .map_err(RatingsError::Submit)?;

        self.entries.insert(food.clone(), rating);

        if !catalog.set_average_rating(food, new_average) {
            debug!(food = %food, "rated food no longer in catalog snapshot");
        }

        Ok(RatingUpdate { rating, new_average })
    }
}

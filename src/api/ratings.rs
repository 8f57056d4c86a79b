//! Rating endpoints.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    api::{ApiClient, ApiError, ensure_success},
    domain::{
        catalog::FoodId,
        ratings::{Rating, RatingsClient},
    },
    session::UserId,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRatingDto {
    food_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    rating: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RatePayload<'a> {
    user_id: &'a UserId,
    #[serde(with = "rust_decimal::serde::float")]
    rating: Decimal,
}

#[derive(Debug, Deserialize)]
struct RateResponseDto {
    /// The new server-computed average for the food.
    #[serde(with = "rust_decimal::serde::float")]
    rating: Decimal,
}

#[async_trait]
impl RatingsClient for ApiClient {
    async fn ratings_for(&self, user: &UserId) -> Result<FxHashMap<FoodId, Rating>, ApiError> {
        let response = self
            .get(&format!("/api/foodRatings/ratings/{user}"))
            .send()
            .await?;

        let ratings: Vec<UserRatingDto> = ensure_success(response).await?.json().await?;

        let mut entries = FxHashMap::default();

        for dto in ratings {
            match Rating::new(dto.rating) {
                Ok(rating) => {
                    entries.insert(FoodId::new(dto.food_id), rating);
                }
                Err(error) => {
                    // Preload is best-effort; one bad value must not sink
                    // the rest of the map.
                    warn!(food = dto.food_id, error = %error, "skipping stored rating");
                }
            }
        }

        Ok(entries)
    }

    async fn rate(
        &self,
        food: &FoodId,
        user: &UserId,
        rating: Rating,
    ) -> Result<Decimal, ApiError> {
        let response = self
            .post(&format!("/api/foodRatings/{food}/rate"))
            .json(&RatePayload {
                user_id: user,
                rating: rating.value(),
            })
            .send()
            .await?;

        let body: RateResponseDto = ensure_success(response).await?.json().await?;

        Ok(body.rating)
    }
}

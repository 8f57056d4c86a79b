//! Catalog endpoints.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    api::{ApiClient, ApiError, ensure_success},
    domain::catalog::{CatalogClient, CatalogItem, CatalogSnapshot, FoodId, HotelId},
};

#[derive(Debug, Deserialize)]
struct FoodDto {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    #[serde(default)]
    pictures: Vec<String>,
    // Foods nobody rated yet come without a rating.
    #[serde(default, with = "rust_decimal::serde::float")]
    rating: Decimal,
    #[serde(rename = "hotelId")]
    hotel_id: String,
}

impl From<FoodDto> for CatalogItem {
    fn from(dto: FoodDto) -> Self {
        Self {
            id: FoodId::new(dto.id),
            name: dto.name,
            description: dto.description,
            price: dto.price,
            pictures: dto.pictures,
            average_rating: dto.rating,
            hotel_id: HotelId::new(dto.hotel_id),
        }
    }
}

async fn fetch_snapshot(client: &ApiClient, path: &str) -> Result<CatalogSnapshot, ApiError> {
    let response = client.get(path).send().await?;
    let foods: Vec<FoodDto> = ensure_success(response).await?.json().await?;

    Ok(CatalogSnapshot::from_items(
        foods.into_iter().map(Into::into).collect(),
    ))
}

#[async_trait]
impl CatalogClient for ApiClient {
    async fn all_foods(&self) -> Result<CatalogSnapshot, ApiError> {
        fetch_snapshot(self, "/api/foods/all").await
    }

    async fn hotel_foods(&self, hotel: &HotelId) -> Result<CatalogSnapshot, ApiError> {
        fetch_snapshot(self, &format!("/api/foods/{hotel}")).await
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn food_dto_reads_the_backend_shape() -> TestResult {
        let dto: FoodDto = serde_json::from_str(
            r#"{"_id":"f1","name":"Burger","description":"Good","price":5.5,
                "pictures":["a.png"],"rating":4.2,"hotelId":"h1"}"#,
        )?;

        let item = CatalogItem::from(dto);

        assert_eq!(item.id, FoodId::new("f1"));
        assert_eq!(item.price, Decimal::new(55, 1));
        assert_eq!(item.average_rating, Decimal::new(42, 1));

        Ok(())
    }

    #[test]
    fn unrated_foods_default_to_zero() -> TestResult {
        let dto: FoodDto =
            serde_json::from_str(r#"{"_id":"f1","name":"Burger","price":5,"hotelId":"h1"}"#)?;

        assert_eq!(dto.rating, Decimal::ZERO);
        assert!(dto.pictures.is_empty(), "pictures default to empty");

        Ok(())
    }
}

//! Catalog models.

use rust_decimal::Decimal;

use crate::domain::ids::TypedId;

/// Food identifier.
pub type FoodId = TypedId<CatalogItem>;

/// Marker for hotel identifiers; the client never materializes hotel
/// records, it only routes orders by hotel.
#[derive(Debug)]
pub enum Hotel {}

/// Hotel (restaurant) identifier.
pub type HotelId = TypedId<Hotel>;

/// One purchasable item as the catalog currently advertises it.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    /// Backend identifier.
    pub id: FoodId,
    /// Display name; also the key cart lines are joined on.
    pub name: String,
    /// Optional description text.
    pub description: Option<String>,
    /// Current price.
    pub price: Decimal,
    /// Picture URLs.
    pub pictures: Vec<String>,
    /// Server-computed average rating.
    pub average_rating: Decimal,
    /// The hotel offering this item.
    pub hotel_id: HotelId,
}

//! Cart projection.
//!
//! Read-only joins of cart lines with the catalog snapshot. Nothing here
//! is persisted; the projection is recomputed from a snapshot every time.

use rust_decimal::Decimal;

use crate::domain::{
    cart::models::{CartLine, DisplayLine},
    catalog::CatalogSnapshot,
};

/// Join each cart line with its catalog entry for display.
///
/// Lines whose product no longer appears in the catalog are still shown —
/// price and quantity come from the cart — but flagged stale. Staleness
/// never blocks checkout; the orchestrator re-resolves independently.
#[must_use]
pub fn project(lines: &[CartLine], catalog: &CatalogSnapshot) -> Vec<DisplayLine> {
    lines
        .iter()
        .map(|line| {
            let item = catalog.resolve(&line.product_key);

            DisplayLine {
                product_key: line.product_key.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
                line_total: line.line_total(),
                pictures: item.map_or_else(Vec::new, |i| i.pictures.clone()),
                stale: item.is_none(),
            }
        })
        .collect()
}

/// Sum of `unit_price × quantity` over all lines.
///
/// This is the one total function: both the displayed cart total and the
/// amount handed to payment initiation go through it, so they can never
/// disagree.
#[must_use]
pub fn total(lines: &[CartLine]) -> Decimal {
    lines
        .iter()
        .fold(Decimal::ZERO, |sum, line| sum + line.line_total())
}

#[cfg(test)]
mod tests {
    use crate::domain::catalog::{CatalogItem, FoodId, HotelId};

    use super::*;

    fn line(key: &str, price: i64, quantity: u32) -> CartLine {
        CartLine {
            product_key: key.to_string(),
            unit_price: Decimal::from(price),
            quantity,
        }
    }

    fn catalog_with_burger() -> CatalogSnapshot {
        CatalogSnapshot::from_items(vec![CatalogItem {
            id: FoodId::new("f1"),
            name: "Burger".to_string(),
            description: None,
            price: Decimal::from(5),
            pictures: vec!["burger.png".to_string()],
            average_rating: Decimal::ZERO,
            hotel_id: HotelId::new("h1"),
        }])
    }

    #[test]
    fn total_matches_the_worked_example() {
        // cart = [{Burger,$5,qty 2},{Soda,$2,qty 1}] → 12.00
        let lines = [line("Burger", 5, 2), line("Soda", 2, 1)];

        assert_eq!(total(&lines), Decimal::from(12));
    }

    #[test]
    fn total_is_independent_of_line_order() {
        let forward = [line("Burger", 5, 2), line("Soda", 2, 1)];
        let reversed = [line("Soda", 2, 1), line("Burger", 5, 2)];

        assert_eq!(total(&forward), total(&reversed));
    }

    #[test]
    fn total_of_empty_cart_is_zero() {
        assert_eq!(total(&[]), Decimal::ZERO);
    }

    #[test]
    fn project_joins_pictures_from_the_catalog() {
        let lines = [line("Burger", 5, 2)];

        let display = project(&lines, &catalog_with_burger());

        let first = display.first();
        assert_eq!(
            first.map(|d| d.pictures.clone()),
            Some(vec!["burger.png".to_string()])
        );
        assert_eq!(first.map(|d| d.line_total), Some(Decimal::from(10)));
        assert_eq!(first.map(|d| d.stale), Some(false));
    }

    #[test]
    fn lines_missing_from_the_catalog_are_flagged_stale() {
        let lines = [line("Discontinued", 3, 1)];

        let display = project(&lines, &catalog_with_burger());

        let first = display.first();
        assert_eq!(first.map(|d| d.stale), Some(true));
        assert_eq!(first.map(|d| d.unit_price), Some(Decimal::from(3)));
        assert!(
            first.is_some_and(|d| d.pictures.is_empty()),
            "stale lines carry no catalog pictures"
        );
    }
}

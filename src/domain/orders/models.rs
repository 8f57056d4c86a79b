//! Order models.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        catalog::{FoodId, HotelId},
        ids::TypedId,
    },
    session::UserId,
};

/// Order identifier.
pub type OrderId = TypedId<OrderRecord>;

/// Backend-owned order lifecycle states.
///
/// `pending → {accepted, rejected}`, `accepted → completed`; `rejected`
/// and `completed` are terminal. The client never computes a status, it
/// only reads one and asks for transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, not yet picked up by a delivery user or cancelled.
    Pending,
    /// A delivery user claimed the order.
    Accepted,
    /// Delivered.
    Completed,
    /// Cancelled by the customer or declined.
    Rejected,
}

impl OrderStatus {
    /// Whether no further transition can occur.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }

    /// Whether the backend state machine permits `self → next`.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Accepted | Self::Rejected)
                | (Self::Accepted, Self::Completed)
        )
    }

    /// A customer may cancel only while the order is still pending.
    #[must_use]
    pub fn cancellable(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// A delivery user may accept only while the order is still pending.
    #[must_use]
    pub fn acceptable(self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// The payload for one order-creation call.
///
/// Built transiently per cart line at checkout from the catalog entry
/// resolved at submission time; never persisted client-side, sent once.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// The ordering user.
    pub user_id: UserId,
    /// The resolved catalog item.
    pub food_id: FoodId,
    /// The hotel offering the item.
    pub hotel_id: HotelId,
    /// Units ordered.
    pub quantity: u32,
    /// Unit price from the catalog at submission time.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Contact summary for a user referenced by an order. The backend may send
/// a bare id or a populated document; fields beyond the id are optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyRef {
    /// User identifier.
    pub id: UserId,
    /// Display name, when populated.
    pub username: Option<String>,
    /// Contact number, when populated.
    pub phone_number: Option<String>,
}

/// Food summary on an order record.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodRef {
    /// Food identifier.
    pub id: FoodId,
    /// Name, when populated.
    pub name: Option<String>,
    /// Picture URLs, when populated.
    pub pictures: Vec<String>,
}

/// Hotel summary on an order record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelRef {
    /// Hotel identifier.
    pub id: HotelId,
    /// Name, when populated.
    pub name: Option<String>,
}

/// One authoritative backend order record, read-only on the client.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    /// Order identifier.
    pub id: OrderId,
    /// The ordering customer.
    pub customer: PartyRef,
    /// The ordered item.
    pub food: FoodRef,
    /// The hotel fulfilling the order.
    pub hotel: HotelRef,
    /// Units ordered.
    pub quantity: u32,
    /// Unit price at order time.
    pub price: Decimal,
    /// Backend-computed order total, when present.
    pub total_amount: Option<Decimal>,
    /// Current lifecycle state.
    pub status: OrderStatus,
    /// Delivery contact, present once a delivery user accepted.
    pub delivery: Option<PartyRef>,
    /// Creation time, when the backend sent one.
    pub created_at: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_reach_accepted_and_rejected_only() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Accepted));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Rejected));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Completed));
    }

    #[test]
    fn accepted_can_only_complete() {
        assert!(OrderStatus::Accepted.can_transition_to(OrderStatus::Completed));
        assert!(!OrderStatus::Accepted.can_transition_to(OrderStatus::Rejected));
        assert!(!OrderStatus::Accepted.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn terminal_states_permit_nothing() {
        for terminal in [OrderStatus::Completed, OrderStatus::Rejected] {
            assert!(terminal.is_terminal(), "{terminal:?} should be terminal");

            for next in [
                OrderStatus::Pending,
                OrderStatus::Accepted,
                OrderStatus::Completed,
                OrderStatus::Rejected,
            ] {
                assert!(
                    !terminal.can_transition_to(next),
                    "{terminal:?} must not reach {next:?}"
                );
            }
        }
    }

    #[test]
    fn only_pending_orders_are_actionable() {
        assert!(OrderStatus::Pending.cancellable());
        assert!(OrderStatus::Pending.acceptable());
        assert!(!OrderStatus::Accepted.cancellable());
        assert!(!OrderStatus::Completed.acceptable());
    }

    #[test]
    fn order_request_serializes_in_the_backend_shape() {
        let request = OrderRequest {
            user_id: UserId::new("u1"),
            food_id: FoodId::new("f1"),
            hotel_id: HotelId::new("h1"),
            quantity: 2,
            price: Decimal::new(55, 1),
        };

        let value = serde_json::to_value(&request).expect("serialize should succeed");

        assert_eq!(
            value,
            serde_json::json!({
                "userId": "u1",
                "foodId": "f1",
                "hotelId": "h1",
                "quantity": 2,
                "price": 5.5,
            })
        );
    }
}

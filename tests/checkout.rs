//! End-to-end checkout orchestration over a real cart store and scripted
//! collaborators.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use testresult::TestResult;
use tokio::sync::Notify;

use gursha_client::{
    api::ApiError,
    domain::{
        cart::{CartStore, projection},
        catalog::{CatalogItem, CatalogSnapshot, FoodId, HotelId},
        checkout::{CheckoutOrchestrator, CheckoutReport},
        orders::{
            FoodRef, HotelRef, OrderId, OrderRecord, OrderRequest, OrderStatus, OrdersClient,
            PartyRef,
        },
    },
    session::{Role, Session, UserId, UserProfile},
    storage::MemoryStorage,
};

/// Order collaborator scripted per food id: records every create call,
/// fails the configured ids, and can park one call on a gate until the
/// test releases it.
struct ScriptedOrders {
    created: Mutex<Vec<OrderRequest>>,
    failing: FxHashSet<String>,
    gate: Option<(String, Arc<Notify>)>,
}

impl ScriptedOrders {
    fn new() -> Self {
        Self {
            created: Mutex::new(Vec::new()),
            failing: FxHashSet::default(),
            gate: None,
        }
    }

    fn failing_food(mut self, food_id: &str) -> Self {
        self.failing.insert(food_id.to_string());
        self
    }

    fn gated_food(mut self, food_id: &str, gate: Arc<Notify>) -> Self {
        self.gate = Some((food_id.to_string(), gate));
        self
    }

    fn created_count(&self) -> usize {
        self.created
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl OrdersClient for ScriptedOrders {
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderRecord, ApiError> {
        self.created
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        if let Some((gated, gate)) = &self.gate {
            if request.food_id.as_str() == gated {
                gate.notified().await;
            }
        }

        if self.failing.contains(request.food_id.as_str()) {
            return Err(ApiError::Status {
                status: 500,
                message: "order creation failed".to_string(),
            });
        }

        Ok(OrderRecord {
            id: OrderId::new(format!("order-for-{}", request.food_id)),
            customer: PartyRef {
                id: request.user_id.clone(),
                username: None,
                phone_number: None,
            },
            food: FoodRef {
                id: request.food_id.clone(),
                name: None,
                pictures: Vec::new(),
            },
            hotel: HotelRef {
                id: request.hotel_id.clone(),
                name: None,
            },
            quantity: request.quantity,
            price: request.price,
            total_amount: None,
            status: OrderStatus::Pending,
            delivery: None,
            created_at: None,
        })
    }

    async fn orders_for_user(&self, _user: &UserId) -> Result<Vec<OrderRecord>, ApiError> {
        Ok(Vec::new())
    }

    async fn pending_orders(&self) -> Result<Vec<OrderRecord>, ApiError> {
        Ok(Vec::new())
    }

    async fn accepted_orders(&self, _delivery: &UserId) -> Result<Vec<OrderRecord>, ApiError> {
        Ok(Vec::new())
    }

    async fn accept(&self, _order: &OrderId, _delivery: &UserId) -> Result<(), ApiError> {
        Ok(())
    }

    async fn reject(&self, _order: &OrderId) -> Result<(), ApiError> {
        Ok(())
    }
}

fn session() -> Session {
    Session {
        user: UserProfile {
            id: UserId::new("u1"),
            username: "abebe".to_string(),
            phone_number: None,
            role: Role::Customer,
        },
        token: "tok".to_string(),
    }
}

fn catalog_item(id: &str, name: &str, price: i64) -> CatalogItem {
    CatalogItem {
        id: FoodId::new(id),
        name: name.to_string(),
        description: None,
        price: Decimal::from(price),
        pictures: Vec::new(),
        average_rating: Decimal::ZERO,
        hotel_id: HotelId::new("h1"),
    }
}

fn full_catalog() -> CatalogSnapshot {
    CatalogSnapshot::from_items(vec![
        catalog_item("f1", "Burger", 5),
        catalog_item("f2", "Soda", 2),
    ])
}

/// cart = [{Burger,$5,qty 2},{Soda,$2,qty 1}]
fn burger_and_soda_cart() -> TestResult<CartStore> {
    let cart = CartStore::open(Arc::new(MemoryStorage::new()))?;
    cart.add_or_increment("Burger", Decimal::from(5))?;
    cart.set_quantity("Burger", 2)?;
    cart.add_or_increment("Soda", Decimal::from(2))?;

    Ok(cart)
}

#[tokio::test]
async fn full_success_clears_the_cart() -> TestResult {
    let cart = burger_and_soda_cart()?;
    let orchestrator = CheckoutOrchestrator::new(Arc::new(ScriptedOrders::new()));

    let report = orchestrator
        .checkout(&cart, &full_catalog(), &session())
        .await?;

    assert!(report.is_complete(), "expected Completed, got {report:?}");
    assert!(cart.snapshot().is_empty(), "cart empties on full success");

    Ok(())
}

#[tokio::test]
async fn any_failed_line_preserves_the_whole_cart() -> TestResult {
    let cart = burger_and_soda_cart()?;
    let before = cart.snapshot();

    let orders = ScriptedOrders::new().failing_food("f2");
    let orchestrator = CheckoutOrchestrator::new(Arc::new(orders));

    let report = orchestrator
        .checkout(&cart, &full_catalog(), &session())
        .await?;

    assert_eq!(report.failed_product_keys(), vec!["Soda"]);
    assert_eq!(
        cart.snapshot(),
        before,
        "cart unchanged, including the line whose order succeeded"
    );

    Ok(())
}

#[tokio::test]
async fn worked_example_total_and_failure_report() -> TestResult {
    // checkout where the Burger order succeeds and Soda's catalog lookup
    // returns none → cart unchanged, failures = ["Soda"].
    let cart = burger_and_soda_cart()?;

    assert_eq!(projection::total(&cart.snapshot()), Decimal::from(12));

    let orders = Arc::new(ScriptedOrders::new());
    let orchestrator = CheckoutOrchestrator::new(Arc::clone(&orders) as Arc<dyn OrdersClient>);
    let catalog = CatalogSnapshot::from_items(vec![catalog_item("f1", "Burger", 5)]);

    let report = orchestrator.checkout(&cart, &catalog, &session()).await?;

    assert_eq!(report.failed_product_keys(), vec!["Soda"]);
    assert_eq!(cart.snapshot().len(), 2, "both lines still in the cart");
    assert_eq!(
        orders.created_count(),
        1,
        "no call is issued for an unresolved line"
    );

    Ok(())
}

#[tokio::test]
async fn empty_cart_is_a_distinct_non_error() -> TestResult {
    let cart = CartStore::open(Arc::new(MemoryStorage::new()))?;
    let orders = Arc::new(ScriptedOrders::new());
    let orchestrator = CheckoutOrchestrator::new(Arc::clone(&orders) as Arc<dyn OrdersClient>);

    let report = orchestrator
        .checkout(&cart, &full_catalog(), &session())
        .await?;

    assert_eq!(report, CheckoutReport::EmptyCart);
    assert_eq!(orders.created_count(), 0, "no network calls for an empty cart");

    Ok(())
}

#[tokio::test]
async fn fan_out_waits_for_the_slowest_outcome_before_touching_the_cart() -> TestResult {
    let gate = Arc::new(Notify::new());
    let orders = Arc::new(ScriptedOrders::new().gated_food("f2", Arc::clone(&gate)));

    let cart = Arc::new(burger_and_soda_cart()?);
    let catalog = full_catalog();
    let orchestrator = CheckoutOrchestrator::new(Arc::clone(&orders) as Arc<dyn OrdersClient>);

    let checkout = tokio::spawn({
        let cart = Arc::clone(&cart);
        async move { orchestrator.checkout(&cart, &catalog, &session()).await }
    });

    // Both calls must be issued concurrently: the Burger call settles
    // immediately while Soda is parked on the gate.
    while orders.created_count() < 2 {
        tokio::task::yield_now().await;
    }

    assert_eq!(
        cart.snapshot().len(),
        2,
        "cart untouched while any outcome is outstanding"
    );

    gate.notify_one();

    let report = checkout.await??;

    assert!(report.is_complete(), "expected Completed, got {report:?}");
    assert_eq!(orders.created_count(), 2, "exactly one call per line");
    assert!(cart.snapshot().is_empty(), "cart cleared only after the barrier");

    Ok(())
}

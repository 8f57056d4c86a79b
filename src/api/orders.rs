//! Order endpoints.

use async_trait::async_trait;
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    api::{ApiClient, ApiError, ensure_success},
    domain::{
        catalog::{FoodId, HotelId},
        orders::{
            FoodRef, HotelRef, OrderId, OrderRecord, OrderRequest, OrderStatus, OrdersClient,
            PartyRef,
        },
    },
    session::UserId,
};

/// The backend sometimes populates referenced documents and sometimes
/// sends the bare id, depending on the endpoint.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PartyDto {
    Id(String),
    Doc {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        username: Option<String>,
        #[serde(default, rename = "phoneNumber")]
        phone_number: Option<String>,
    },
}

impl From<PartyDto> for PartyRef {
    fn from(dto: PartyDto) -> Self {
        match dto {
            PartyDto::Id(id) => Self {
                id: UserId::new(id),
                username: None,
                phone_number: None,
            },
            PartyDto::Doc {
                id,
                username,
                phone_number,
            } => Self {
                id: UserId::new(id),
                username,
                phone_number,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FoodRefDto {
    Id(String),
    Doc {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        pictures: Vec<String>,
    },
}

impl From<FoodRefDto> for FoodRef {
    fn from(dto: FoodRefDto) -> Self {
        match dto {
            FoodRefDto::Id(id) => Self {
                id: FoodId::new(id),
                name: None,
                pictures: Vec::new(),
            },
            FoodRefDto::Doc { id, name, pictures } => Self {
                id: FoodId::new(id),
                name,
                pictures,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HotelRefDto {
    Id(String),
    Doc {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<HotelRefDto> for HotelRef {
    fn from(dto: HotelRefDto) -> Self {
        match dto {
            HotelRefDto::Id(id) => Self {
                id: HotelId::new(id),
                name: None,
            },
            HotelRefDto::Doc { id, name } => Self {
                id: HotelId::new(id),
                name,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderDto {
    #[serde(rename = "_id")]
    id: String,
    user_id: PartyDto,
    food_id: FoodRefDto,
    hotel_id: HotelRefDto,
    quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    total_amount: Option<Decimal>,
    status: OrderStatus,
    #[serde(default)]
    delivery_id: Option<PartyDto>,
    #[serde(default)]
    created_at: Option<Timestamp>,
}

impl From<OrderDto> for OrderRecord {
    fn from(dto: OrderDto) -> Self {
        Self {
            id: OrderId::new(dto.id),
            customer: dto.user_id.into(),
            food: dto.food_id.into(),
            hotel: dto.hotel_id.into(),
            quantity: dto.quantity,
            price: dto.price,
            total_amount: dto.total_amount,
            status: dto.status,
            delivery: dto.delivery_id.map(Into::into),
            created_at: dto.created_at,
        }
    }
}

/// List endpoints wrap their payload in `{"success": ..., "data": [...]}`;
/// create answers with the record either bare or wrapped.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListEnvelope {
    Wrapped { data: Vec<OrderDto> },
    Bare(Vec<OrderDto>),
}

impl ListEnvelope {
    fn into_records(self) -> Vec<OrderRecord> {
        let orders = match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        };

        orders.into_iter().map(Into::into).collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordEnvelope {
    Wrapped { data: OrderDto },
    Bare(OrderDto),
}

impl From<RecordEnvelope> for OrderRecord {
    fn from(envelope: RecordEnvelope) -> Self {
        match envelope {
            RecordEnvelope::Wrapped { data } | RecordEnvelope::Bare(data) => data.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TransitionDto {
    #[serde(default = "transition_success_default")]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

fn transition_success_default() -> bool {
    true
}

/// A 2xx transition response still carries a `success` flag: `false`
/// means the backend declined the specific transition (e.g. the order
/// already left `pending`), which is not a transport failure.
fn check_transition(body: &str) -> Result<(), ApiError> {
    let transition: TransitionDto = if body.trim().is_empty() {
        TransitionDto {
            success: true,
            message: None,
        }
    } else {
        serde_json::from_str(body).map_err(|error| {
            ApiError::UnexpectedResponse(format!("unreadable transition response: {error}"))
        })?
    };

    if transition.success {
        Ok(())
    } else {
        Err(ApiError::TransitionRefused(
            transition
                .message
                .unwrap_or_else(|| "transition refused".to_string()),
        ))
    }
}

async fn fetch_records(client: &ApiClient, path: &str) -> Result<Vec<OrderRecord>, ApiError> {
    let response = client.get(path).send().await?;
    let envelope: ListEnvelope = ensure_success(response).await?.json().await?;

    Ok(envelope.into_records())
}

#[async_trait]
impl OrdersClient for ApiClient {
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderRecord, ApiError> {
        let response = self.post("/api/orders/create").json(request).send().await?;
        let envelope: RecordEnvelope = ensure_success(response).await?.json().await?;

        Ok(envelope.into())
    }

    async fn orders_for_user(&self, user: &UserId) -> Result<Vec<OrderRecord>, ApiError> {
        fetch_records(self, &format!("/api/orders/user/{user}")).await
    }

    async fn pending_orders(&self) -> Result<Vec<OrderRecord>, ApiError> {
        fetch_records(self, "/api/orders/pending-orders").await
    }

    async fn accepted_orders(&self, delivery: &UserId) -> Result<Vec<OrderRecord>, ApiError> {
        fetch_records(self, &format!("/api/orders/user/{delivery}/accepted-orders")).await
    }

    async fn accept(&self, order: &OrderId, delivery: &UserId) -> Result<(), ApiError> {
        let response = self
            .put(&format!("/api/orders/accept/{order}"))
            .json(&serde_json::json!({ "deliveryId": delivery }))
            .send()
            .await?;

        let body = ensure_success(response).await?.text().await?;

        check_transition(&body)
    }

    async fn reject(&self, order: &OrderId) -> Result<(), ApiError> {
        let response = self
            .put(&format!("/api/orders/reject/{order}"))
            .send()
            .await?;

        let body = ensure_success(response).await?.text().await?;

        check_transition(&body)
    }
}

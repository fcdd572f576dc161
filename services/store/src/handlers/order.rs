use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use furniture_core::extract::{IdPath, QueryParams, ValidatedJson};
use furniture_domain::order::{
    ConsultationDetails, Customer, OrderStatus, OrderType, PaymentMethod, PaymentStatus,
    StatusHistoryEntry,
};
use furniture_domain::pagination::PageRequest;

use crate::domain::types::{
    NewOrderItem, Order, OrderFilter, OrderItem, ProductSummary, UserSummary,
};
use crate::error::StoreServiceError;
use crate::handlers::validation;
use crate::state::AppState;
use crate::usecase::order::{
    CreateOrderInput, CreateOrderUseCase, DeleteOrderUseCase, GetOrderUseCase, ListOrdersUseCase,
    UpdateOrderInput, UpdateOrderUseCase,
};

// ── Request / response types ─────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct OrderItemRequest {
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(custom(function = "validation::non_negative"))]
    pub price: Decimal,
}

impl From<OrderItemRequest> for NewOrderItem {
    fn from(item: OrderItemRequest) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub order_type: OrderType,
    #[validate(nested)]
    pub customer: Customer,
    #[validate(nested)]
    pub consultation_details: Option<ConsultationDetails>,
    #[validate(custom(function = "validation::non_negative"))]
    pub total_amount: Option<Decimal>,
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
    pub staff_notes: Option<String>,
    #[validate(range(min = 1))]
    pub assigned_staff_id: Option<i32>,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateOrderRequest {
    pub order_type: Option<OrderType>,
    #[validate(nested)]
    pub customer: Option<Customer>,
    #[validate(nested)]
    pub consultation_details: Option<ConsultationDetails>,
    #[validate(custom(function = "validation::non_negative"))]
    pub total_amount: Option<Decimal>,
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
    pub staff_notes: Option<String>,
    #[validate(range(min = 1))]
    pub assigned_staff_id: Option<i32>,
    /// Replaces every line item of the order when present.
    #[validate(nested)]
    pub items: Option<Vec<OrderItemRequest>>,
}

#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    pub id: i32,
    pub product_id: i32,
    pub product: Option<ItemProductResponse>,
    pub quantity: i32,
    pub price: Decimal,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            product: item.product.map(Into::into),
            quantity: item.quantity,
            price: item.price,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemProductResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl From<ProductSummary> for ItemProductResponse {
    fn from(product: ProductSummary) -> Self {
        Self {
            id: product.id,
            name: product.name,
            slug: product.slug,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StaffResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl From<UserSummary> for StaffResponse {
    fn from(staff: UserSummary) -> Self {
        Self {
            id: staff.id,
            first_name: staff.first_name,
            last_name: staff.last_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: i32,
    pub order_type: OrderType,
    pub customer: Customer,
    pub consultation_details: Option<ConsultationDetails>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    pub staff_notes: Option<String>,
    pub assigned_staff_id: Option<i32>,
    pub assigned_staff: Option<StaffResponse>,
    pub status_history: Vec<StatusHistoryEntry>,
    pub items: Vec<OrderItemResponse>,
    #[serde(serialize_with = "furniture_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "furniture_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            order_type: order.order_type,
            customer: order.customer,
            consultation_details: order.consultation_details,
            total_amount: order.total_amount,
            status: order.status,
            payment_status: order.payment_status,
            payment_method: order.payment_method,
            notes: order.notes,
            staff_notes: order.staff_notes,
            assigned_staff_id: order.assigned_staff_id,
            assigned_staff: order.assigned_staff.map(Into::into),
            status_history: order.status_history,
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrderListQuery {
    pub per_page: Option<i64>,
    pub page: Option<i64>,
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub order_type: Option<OrderType>,
    pub assigned_staff_id: Option<i32>,
}

// ── GET /orders ──────────────────────────────────────────────────────────────

pub async fn list_orders(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<OrderListQuery>,
) -> Result<Json<Vec<OrderResponse>>, StoreServiceError> {
    let uc = ListOrdersUseCase {
        repo: state.order_repo(),
    };
    let filter = OrderFilter {
        status: query.status,
        payment_status: query.payment_status,
        order_type: query.order_type,
        assigned_staff_id: query.assigned_staff_id,
    };
    let orders = uc
        .execute(filter, PageRequest::from_query(query.per_page, query.page))
        .await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

// ── GET /orders/{id} ─────────────────────────────────────────────────────────

pub async fn get_order(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<OrderResponse>, StoreServiceError> {
    let uc = GetOrderUseCase {
        repo: state.order_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

// ── POST /orders ─────────────────────────────────────────────────────────────

pub async fn create_order(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), StoreServiceError> {
    let uc = CreateOrderUseCase {
        repo: state.order_repo(),
    };
    let order = uc
        .execute(CreateOrderInput {
            order_type: body.order_type,
            customer: body.customer,
            consultation_details: body.consultation_details,
            total_amount: body.total_amount,
            status: body.status,
            payment_status: body.payment_status,
            payment_method: body.payment_method,
            notes: body.notes,
            staff_notes: body.staff_notes,
            assigned_staff_id: body.assigned_staff_id,
            items: body.items.into_iter().map(Into::into).collect(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

// ── PATCH /orders/{id} ───────────────────────────────────────────────────────

pub async fn update_order(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<UpdateOrderRequest>,
) -> Result<Json<OrderResponse>, StoreServiceError> {
    let uc = UpdateOrderUseCase {
        repo: state.order_repo(),
    };
    let order = uc
        .execute(
            id,
            UpdateOrderInput {
                order_type: body.order_type,
                customer: body.customer,
                consultation_details: body.consultation_details,
                total_amount: body.total_amount,
                status: body.status,
                payment_status: body.payment_status,
                payment_method: body.payment_method,
                notes: body.notes,
                staff_notes: body.staff_notes,
                assigned_staff_id: body.assigned_staff_id,
                items: body
                    .items
                    .map(|items| items.into_iter().map(Into::into).collect()),
            },
        )
        .await?;
    Ok(Json(order.into()))
}

// ── DELETE /orders/{id} ──────────────────────────────────────────────────────

pub async fn delete_order(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, StoreServiceError> {
    let uc = DeleteOrderUseCase {
        repo: state.order_repo(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

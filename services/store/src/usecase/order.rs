use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;

use furniture_domain::order::{
    ConsultationDetails, Customer, OrderStatus, OrderType, PaymentMethod, PaymentStatus, actor,
    initial_history, record_status_change,
};
use furniture_domain::pagination::PageRequest;

use crate::domain::repository::OrderRepository;
use crate::domain::types::{NewOrder, NewOrderItem, Order, OrderFilter, items_total};
use crate::error::StoreServiceError;

// ── GetOrder ─────────────────────────────────────────────────────────────────

pub struct GetOrderUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> GetOrderUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Order, StoreServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(StoreServiceError::OrderNotFound)
    }
}

// ── ListOrders ───────────────────────────────────────────────────────────────

pub struct ListOrdersUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> ListOrdersUseCase<R> {
    pub async fn execute(
        &self,
        filter: OrderFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Order>, StoreServiceError> {
        self.repo.list(&filter, page.map(PageRequest::clamped)).await
    }
}

// ── CreateOrder ──────────────────────────────────────────────────────────────

pub struct CreateOrderInput {
    pub order_type: OrderType,
    pub customer: Customer,
    pub consultation_details: Option<ConsultationDetails>,
    /// Defaults to the sum of the item line totals.
    pub total_amount: Option<Decimal>,
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
    pub staff_notes: Option<String>,
    pub assigned_staff_id: Option<i32>,
    pub items: Vec<NewOrderItem>,
}

impl CreateOrderInput {
    fn into_new_order(self, at: DateTime<Utc>) -> NewOrder {
        let status = self.status.unwrap_or_default();
        let total_amount = self
            .total_amount
            .unwrap_or_else(|| items_total(&self.items));
        NewOrder {
            status_history: initial_history(status, actor(self.customer.user_id), at),
            order_type: self.order_type,
            customer: self.customer,
            consultation_details: self.consultation_details,
            total_amount,
            status,
            payment_status: self.payment_status.unwrap_or_default(),
            payment_method: self.payment_method.unwrap_or_default(),
            notes: self.notes,
            staff_notes: self.staff_notes,
            assigned_staff_id: self.assigned_staff_id,
            items: self.items,
        }
    }
}

pub struct CreateOrderUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> CreateOrderUseCase<R> {
    pub async fn execute(&self, input: CreateOrderInput) -> Result<Order, StoreServiceError> {
        let order = input.into_new_order(Utc::now());
        let created = self.repo.create(&order).await?;
        info!(
            order_id = created.id,
            items = created.items.len(),
            "order created"
        );
        Ok(created)
    }
}

// ── UpdateOrder ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateOrderInput {
    pub order_type: Option<OrderType>,
    pub customer: Option<Customer>,
    pub consultation_details: Option<ConsultationDetails>,
    pub total_amount: Option<Decimal>,
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
    pub staff_notes: Option<String>,
    pub assigned_staff_id: Option<i32>,
    /// Replaces the whole item set when present.
    pub items: Option<Vec<NewOrderItem>>,
}

impl UpdateOrderInput {
    /// Merge the present fields into `order`, appending a history entry on a
    /// status change. Returns the replacement item set, if any.
    pub fn apply_to(self, order: &mut Order, at: DateTime<Utc>) -> Option<Vec<NewOrderItem>> {
        if let Some(order_type) = self.order_type {
            order.order_type = order_type;
        }
        if let Some(customer) = self.customer {
            order.customer = customer;
        }
        if self.consultation_details.is_some() {
            order.consultation_details = self.consultation_details;
        }
        if let Some(payment_status) = self.payment_status {
            order.payment_status = payment_status;
        }
        if let Some(payment_method) = self.payment_method {
            order.payment_method = payment_method;
        }
        if self.notes.is_some() {
            order.notes = self.notes;
        }
        if self.staff_notes.is_some() {
            order.staff_notes = self.staff_notes;
        }
        if self.assigned_staff_id.is_some() {
            order.assigned_staff_id = self.assigned_staff_id;
        }
        if let Some(next) = self.status {
            // Only staff named in this request count as the actor.
            record_status_change(
                &mut order.status_history,
                order.status,
                next,
                actor(self.assigned_staff_id),
                at,
            );
            order.status = next;
        }
        match (self.total_amount, &self.items) {
            (Some(total), _) => order.total_amount = total,
            (None, Some(items)) => order.total_amount = items_total(items),
            (None, None) => {}
        }
        self.items
    }
}

pub struct UpdateOrderUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> UpdateOrderUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        input: UpdateOrderInput,
    ) -> Result<Order, StoreServiceError> {
        let mut order = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(StoreServiceError::OrderNotFound)?;
        let previous = order.status;
        let items = input.apply_to(&mut order, Utc::now());

        let updated = self.repo.update(&order, items.as_deref()).await?;
        if previous != updated.status {
            info!(order_id = id, from = %previous, to = %updated.status, "order status changed");
        }
        info!(order_id = id, "order updated");
        Ok(updated)
    }
}

// ── DeleteOrder ──────────────────────────────────────────────────────────────

pub struct DeleteOrderUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> DeleteOrderUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), StoreServiceError> {
        if !self.repo.delete(id).await? {
            return Err(StoreServiceError::OrderNotFound);
        }
        info!(order_id = id, "order deleted");
        Ok(())
    }
}

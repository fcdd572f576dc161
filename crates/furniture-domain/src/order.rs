//! Order domain types and the status-history rule.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::address::Address;

wire_enum! {
    /// What the customer asked for: goods, or a design consultation.
    pub enum OrderType("order type") {
        Purchase => "purchase",
        Consultation => "consultation",
    }
}

wire_enum! {
    /// Fulfilment status. Any value may follow any other.
    #[derive(Default)]
    pub enum OrderStatus("order status") {
        #[default]
        Pending => "pending",
        Confirmed => "confirmed",
        Processing => "processing",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

wire_enum! {
    #[derive(Default)]
    pub enum PaymentStatus("payment status") {
        #[default]
        Unpaid => "unpaid",
        Paid => "paid",
        Refunded => "refunded",
    }
}

wire_enum! {
    #[derive(Default)]
    pub enum PaymentMethod("payment method") {
        #[default]
        Cod => "cod",
        BankTransfer => "bank_transfer",
        CreditCard => "credit_card",
    }
}

/// Contact details captured with the order. `user_id` links a registered
/// customer when there is one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Customer {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 20))]
    pub phone: String,
    #[serde(default)]
    #[validate(nested)]
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i32>,
}

/// Extra detail attached to consultation orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ConsultationDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_contact_time: Option<DateTime<Utc>>,
}

/// One line of the `status_history` sidecar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub status: OrderStatus,
    pub timestamp: DateTime<Utc>,
    pub note: String,
    pub updated_by: String,
}

/// Actor recorded when no user is known.
pub const SYSTEM_ACTOR: &str = "system";

/// Name an actor for the history: a user id, or `"system"`.
pub fn actor(user_id: Option<i32>) -> String {
    user_id.map_or_else(|| SYSTEM_ACTOR.to_owned(), |id| id.to_string())
}

/// History for a freshly created order: exactly one entry.
pub fn initial_history(
    status: OrderStatus,
    updated_by: String,
    at: DateTime<Utc>,
) -> Vec<StatusHistoryEntry> {
    vec![StatusHistoryEntry {
        status,
        timestamp: at,
        note: "order created".to_owned(),
        updated_by,
    }]
}

/// Append one entry when `next` differs from `current`.
///
/// Returns `true` if an entry was appended. No transition is refused.
pub fn record_status_change(
    history: &mut Vec<StatusHistoryEntry>,
    current: OrderStatus,
    next: OrderStatus,
    updated_by: String,
    at: DateTime<Utc>,
) -> bool {
    if current == next {
        return false;
    }
    history.push(StatusHistoryEntry {
        status: next,
        timestamp: at,
        note: format!("status changed from {current} to {next}"),
        updated_by,
    });
    true
}

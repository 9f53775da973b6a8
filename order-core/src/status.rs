//! Order status transition controller
//!
//! One transition table shared by every screen. `AdminMode` and `AnyMode`
//! are override states layered over the normal lifecycle, so every status,
//! including `Invoiced` and `Cancelled`, can still reach them.
//!
//! ```text
//! Draft ─▶ Confirmed ─▶ Shipped ─▶ Delivered ─▶ Invoiced
//!   │          │           │
//!   └──────────┴───────────┴──▶ Cancelled
//!
//! any ─▶ AdminMode ─▶ Draft
//! any ─▶ AnyMode   ─▶ any
//! ```
//!
//! This only gates client-side actions; the remote API must re-validate.

use crate::error::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum OrderStatus {
    #[default]
    Draft,
    Confirmed,
    Shipped,
    Delivered,
    Invoiced,
    Cancelled,
    AdminMode,
    AnyMode,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::Draft,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Invoiced,
        OrderStatus::Cancelled,
        OrderStatus::AdminMode,
        OrderStatus::AnyMode,
    ];

    /// Wire name, as exchanged with the order API
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "DRAFT",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Invoiced => "INVOICED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::AdminMode => "ADMIN_MODE",
            OrderStatus::AnyMode => "ANY_MODE",
        }
    }

    /// Administrative override states, not lifecycle stops
    pub const fn is_override(&self) -> bool {
        matches!(self, OrderStatus::AdminMode | OrderStatus::AnyMode)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised status name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    /// Accepts `DRAFT`, `Draft`, `admin_mode`, `AdminMode`, `admin-mode` ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "draft" => Ok(OrderStatus::Draft),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "invoiced" => Ok(OrderStatus::Invoiced),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            "adminmode" => Ok(OrderStatus::AdminMode),
            "anymode" => Ok(OrderStatus::AnyMode),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OrderStatus> for &'static str {
    fn from(status: OrderStatus) -> Self {
        status.as_str()
    }
}

/// Rejected status change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
}

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::InvalidTransition { from, to } => {
                AppError::with_message(ErrorCode::InvalidTransition, err.to_string())
                    .with_detail("from", from.as_str())
                    .with_detail("to", to.as_str())
            }
        }
    }
}

/// Statuses reachable from `current`, in lifecycle order
pub fn allowed_transitions(current: OrderStatus) -> &'static [OrderStatus] {
    use OrderStatus::*;
    match current {
        Draft => &[Confirmed, Cancelled, AdminMode, AnyMode],
        Confirmed => &[Shipped, Cancelled, AdminMode, AnyMode],
        Shipped => &[Delivered, Cancelled, AdminMode, AnyMode],
        Delivered => &[Invoiced, AdminMode, AnyMode],
        Invoiced => &[AdminMode, AnyMode],
        Cancelled => &[AdminMode, AnyMode],
        AdminMode => &[Draft, AnyMode],
        AnyMode => &[Draft, Confirmed, Shipped, Delivered, Invoiced, Cancelled, AdminMode],
    }
}

/// Whether `current → target` is listed; self-transitions never are
pub fn is_transition_allowed(current: OrderStatus, target: OrderStatus) -> bool {
    allowed_transitions(current).contains(&target)
}

/// Validate a status change, returning the new status
pub fn apply_transition(
    current: OrderStatus,
    target: OrderStatus,
) -> Result<OrderStatus, TransitionError> {
    if !is_transition_allowed(current, target) {
        tracing::warn!(from = %current, to = %target, "Rejected order status transition");
        return Err(TransitionError::InvalidTransition {
            from: current,
            to: target,
        });
    }
    tracing::debug!(from = %current, to = %target, "Order status transition");
    Ok(target)
}

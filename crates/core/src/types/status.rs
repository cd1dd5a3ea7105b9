//! Status enums for orders, payments, and users.

use serde::{Deserialize, Serialize};

/// Fulfillment status of a placed order.
///
/// Orders start `Pending`; only admin flows move them forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "order_status", rename_all = "snake_case")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

/// Status of a gateway order mirrored locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "gateway_order_status", rename_all = "snake_case")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayOrderStatus {
    #[default]
    Created,
    Paid,
    Failed,
}

/// Status of a gateway payment mirrored locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "payment_status", rename_all = "snake_case")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Success,
    Failed,
}

/// Account role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "user_role", rename_all = "snake_case")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Regular customer account.
    #[default]
    User,
    /// Full access to the admin dashboard API.
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Shipped => write!(f, "shipped"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_order_status_wire_format() {
        // The gateway mirror rows use SCREAMING_SNAKE_CASE on the wire
        assert_eq!(
            serde_json::to_string(&GatewayOrderStatus::Created).unwrap(),
            "\"CREATED\""
        );
        assert_eq!(
            serde_json::from_str::<GatewayOrderStatus>("\"PAID\"").unwrap(),
            GatewayOrderStatus::Paid
        );
    }

    #[test]
    fn test_payment_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Success).unwrap(),
            "\"SUCCESS\""
        );
    }

    #[test]
    fn test_order_status_roundtrip() {
        let status: OrderStatus = "delivered".parse().unwrap();
        assert_eq!(status, OrderStatus::Delivered);
        assert_eq!(status.to_string(), "delivered");
        assert!("unknown".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_user_role_roundtrip() {
        let role: UserRole = "admin".parse().unwrap();
        assert_eq!(role, UserRole::Admin);
        assert_eq!(role.to_string(), "admin");
    }
}

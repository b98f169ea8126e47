// ==========================================
// Voltway Industrial OS - Domain enums
// ==========================================
// Stored lowercase in the database, same as the external store
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Customer type
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerType {
    Fleet,  // B2B fleet operator
    Retail, // individual buyer
}

impl CustomerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerType::Fleet => "fleet",
            CustomerType::Retail => "retail",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fleet" => Some(CustomerType::Fleet),
            "retail" => Some(CustomerType::Retail),
            _ => None,
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// Stock movement direction
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    Inbound,
    Outbound,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Inbound => "inbound",
            MovementType::Outbound => "outbound",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inbound" => Some(MovementType::Inbound),
            "outbound" => Some(MovementType::Outbound),
            _ => None,
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// Purchase order status
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseOrderStatus {
    Ordered,   // placed, not yet received
    Delivered, // received at the warehouse
}

impl PurchaseOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseOrderStatus::Ordered => "ordered",
            PurchaseOrderStatus::Delivered => "delivered",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ordered" => Some(PurchaseOrderStatus::Ordered),
            "delivered" => Some(PurchaseOrderStatus::Delivered),
            _ => None,
        }
    }
}

impl fmt::Display for PurchaseOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(CustomerType::parse(" Fleet "), Some(CustomerType::Fleet));
        assert_eq!(MovementType::parse("OUTBOUND"), Some(MovementType::Outbound));
        assert_eq!(PurchaseOrderStatus::parse("delivered"), Some(PurchaseOrderStatus::Delivered));
        assert_eq!(PurchaseOrderStatus::parse("lost"), None);
    }

    #[test]
    fn test_serde_uses_lowercase() {
        let json = serde_json::to_string(&PurchaseOrderStatus::Ordered).unwrap();
        assert_eq!(json, "\"ordered\"");
        let parsed: CustomerType = serde_json::from_str("\"retail\"").unwrap();
        assert_eq!(parsed, CustomerType::Retail);
    }
}

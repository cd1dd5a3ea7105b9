//! Product catalog categories.

use serde::{Deserialize, Serialize};

/// Catalog category for electrical-supply products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "product_category", rename_all = "snake_case")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    Accessories,
    Pipes,
    Switches,
    Wires,
    Lighting,
}

impl ProductCategory {
    /// All categories, in catalog display order.
    pub const ALL: [Self; 5] = [
        Self::Accessories,
        Self::Pipes,
        Self::Switches,
        Self::Wires,
        Self::Lighting,
    ];
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accessories => write!(f, "accessories"),
            Self::Pipes => write!(f, "pipes"),
            Self::Switches => write!(f, "switches"),
            Self::Wires => write!(f, "wires"),
            Self::Lighting => write!(f, "lighting"),
        }
    }
}

impl std::str::FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "accessories" => Ok(Self::Accessories),
            "pipes" => Ok(Self::Pipes),
            "switches" => Ok(Self::Switches),
            "wires" => Ok(Self::Wires),
            "lighting" => Ok(Self::Lighting),
            _ => Err(format!("invalid product category: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_matches_catalog() {
        assert_eq!(
            serde_json::to_string(&ProductCategory::Wires).unwrap(),
            "\"WIRES\""
        );
        assert_eq!(
            serde_json::from_str::<ProductCategory>("\"LIGHTING\"").unwrap(),
            ProductCategory::Lighting
        );
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(
            "Switches".parse::<ProductCategory>().unwrap(),
            ProductCategory::Switches
        );
        assert!("cables".parse::<ProductCategory>().is_err());
    }

    #[test]
    fn test_all_covers_every_category() {
        assert_eq!(ProductCategory::ALL.len(), 5);
    }
}

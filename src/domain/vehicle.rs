//! Vehicle categories and toll exemption membership

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Vehicle category recognized by the toll system.
///
/// Vehicles carry no behavior, only a classification; category membership
/// alone decides toll exemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleCategory {
    Car,
    Motorcycle,
    Bus,
    Emergency,
    Diplomat,
    Foreign,
    Military,
}

/// Categories exempt from the congestion tax regardless of time or date.
pub const TOLL_FREE_CATEGORIES: &[VehicleCategory] = &[
    VehicleCategory::Motorcycle,
    VehicleCategory::Bus,
    VehicleCategory::Emergency,
    VehicleCategory::Diplomat,
    VehicleCategory::Foreign,
    VehicleCategory::Military,
];

impl VehicleCategory {
    /// Whether this category is exempt from all fees.
    pub fn is_toll_free(self) -> bool {
        TOLL_FREE_CATEGORIES.contains(&self)
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Car => write!(f, "car"),
            Self::Motorcycle => write!(f, "motorcycle"),
            Self::Bus => write!(f, "bus"),
            Self::Emergency => write!(f, "emergency"),
            Self::Diplomat => write!(f, "diplomat"),
            Self::Foreign => write!(f, "foreign"),
            Self::Military => write!(f, "military"),
        }
    }
}

impl FromStr for VehicleCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" => Ok(Self::Car),
            "motorcycle" | "motorbike" => Ok(Self::Motorcycle),
            "bus" => Ok(Self::Bus),
            "emergency" => Ok(Self::Emergency),
            "diplomat" => Ok(Self::Diplomat),
            "foreign" => Ok(Self::Foreign),
            "military" => Ok(Self::Military),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Error for category tokens the toll system does not recognize.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vehicle category: {0}")]
pub struct UnknownCategory(pub String);

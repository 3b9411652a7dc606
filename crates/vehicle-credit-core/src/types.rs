use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.06 = 6%). Never as percentages.
pub type Rate = Decimal;

/// Percent points (20 = 20%). Only used for down-payment percentages.
pub type Percent = Decimal;

/// Vehicle category as used by the interest-rate schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleCategory {
    #[default]
    Passenger,
    Commercial,
}

/// Body type of a commercial unit. Ignored for passenger vehicles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubCategory {
    #[default]
    Passenger,
    Truck,
    Bus,
}

/// Payment-type code. ADDM collects the first installment at signing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentType {
    #[default]
    Addb,
    Addm,
}

/// Category key of the insurance-rate schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsuranceCategory {
    Passenger,
    CommercialUsed,
    CommercialLoading,
    CommercialUsedTruck,
    CommercialLoadingTruck,
    CommercialUsedBus,
    CommercialLoadingBus,
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleCategory::Passenger => write!(f, "PASSENGER"),
            VehicleCategory::Commercial => write!(f, "COMMERCIAL"),
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentType::Addb => write!(f, "ADDB"),
            PaymentType::Addm => write!(f, "ADDM"),
        }
    }
}

impl fmt::Display for InsuranceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            InsuranceCategory::Passenger => "PASSENGER",
            InsuranceCategory::CommercialUsed => "COMMERCIAL_USED",
            InsuranceCategory::CommercialLoading => "COMMERCIAL_LOADING",
            InsuranceCategory::CommercialUsedTruck => "COMMERCIAL_USED_TRUCK",
            InsuranceCategory::CommercialLoadingTruck => "COMMERCIAL_LOADING_TRUCK",
            InsuranceCategory::CommercialUsedBus => "COMMERCIAL_USED_BUS",
            InsuranceCategory::CommercialLoadingBus => "COMMERCIAL_LOADING_BUS",
        };
        write!(f, "{code}")
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CreditSimError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error(
        "No insurance rate covers category {category} for a {tenor_months}-month tenor at price {vehicle_price}"
    )]
    NoInsuranceCandidates {
        category: String,
        tenor_months: u32,
        vehicle_price: Decimal,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CreditSimError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        CreditSimError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn overflow(field: &str) -> Self {
        Self::invalid(field, "Amount exceeds the supported decimal range")
    }
}

impl From<serde_json::Error> for CreditSimError {
    fn from(e: serde_json::Error) -> Self {
        CreditSimError::SerializationError(e.to_string())
    }
}

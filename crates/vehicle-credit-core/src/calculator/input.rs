use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CreditSimError;
use crate::types::*;
use crate::CreditSimResult;

/// Highest down-payment percentage accepted, also the solver's upper bound.
pub const MAX_DOWN_PAYMENT_PERCENT: Percent = dec!(99);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// On-the-road price.
    pub vehicle_price: Money,
    /// Percent points, 0 to 99. Ignored by the budget solver.
    #[serde(default)]
    pub down_payment_percent: Percent,
    pub tenor_months: u32,
    #[serde(default)]
    pub category: VehicleCategory,
    #[serde(default)]
    pub sub_category: SubCategory,
    #[serde(default)]
    pub is_loading_unit: bool,
    #[serde(default)]
    pub payment_type: PaymentType,
    #[serde(default)]
    pub admin_fee: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_insurance_label: Option<String>,
}

impl SimulationInput {
    /// Range checks only; nothing here consults the rate tables.
    pub fn validate(&self) -> CreditSimResult<()> {
        if self.vehicle_price <= Decimal::ZERO {
            return Err(CreditSimError::invalid(
                "vehicle_price",
                "Vehicle price must be positive",
            ));
        }
        if self.down_payment_percent < Decimal::ZERO
            || self.down_payment_percent > MAX_DOWN_PAYMENT_PERCENT
        {
            return Err(CreditSimError::invalid(
                "down_payment_percent",
                format!(
                    "Down payment must be between 0 and {MAX_DOWN_PAYMENT_PERCENT} percent, got {}",
                    self.down_payment_percent
                ),
            ));
        }
        if self.tenor_months == 0 {
            return Err(CreditSimError::invalid(
                "tenor_months",
                "Tenor must be at least one month",
            ));
        }
        if self.admin_fee < Decimal::ZERO {
            return Err(CreditSimError::invalid(
                "admin_fee",
                "Admin fee cannot be negative",
            ));
        }
        Ok(())
    }

    /// Same request at another down-payment percentage.
    pub fn with_down_payment(&self, down_payment_percent: Percent) -> Self {
        Self {
            down_payment_percent,
            ..self.clone()
        }
    }
}

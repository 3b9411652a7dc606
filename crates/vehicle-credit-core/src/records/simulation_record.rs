//! Mapping from a finished simulation to the flat record the persistence
//! layer stores, plus the follow-up status values used on that record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::calculator::financials::CalculationResult;
use crate::calculator::input::SimulationInput;
use crate::calculator::simulation::{run_simulation, CreditSimulationRequest};
use crate::{types::*, CreditSimError, CreditSimResult};

/// Follow-up state of a saved simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SimulationStatus {
    #[default]
    Todo,
    Progres,
    Done,
    Reject,
}

impl fmt::Display for SimulationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SimulationStatus::Todo => "TODO",
            SimulationStatus::Progres => "PROGRES",
            SimulationStatus::Done => "DONE",
            SimulationStatus::Reject => "REJECT",
        };
        write!(f, "{s}")
    }
}

impl FromStr for SimulationStatus {
    type Err = CreditSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TODO" => Ok(SimulationStatus::Todo),
            "PROGRES" => Ok(SimulationStatus::Progres),
            "DONE" => Ok(SimulationStatus::Done),
            "REJECT" => Ok(SimulationStatus::Reject),
            other => Err(CreditSimError::invalid(
                "status",
                format!("Unknown status '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub borrower_name: String,
    #[serde(default)]
    pub co_borrower_name: String,
    #[serde(default)]
    pub sales_name: String,
    #[serde(default)]
    pub unit_name: String,
    /// Registration plate number.
    #[serde(default)]
    pub nopol: String,
    #[serde(default)]
    pub status: SimulationStatus,
}

/// Row handed to the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub borrower_name: String,
    pub co_borrower_name: String,
    pub sales_name: String,
    pub status: SimulationStatus,

    pub unit_name: String,
    pub nopol: String,
    pub category: VehicleCategory,
    pub sub_category: SubCategory,
    pub is_loading_unit: bool,
    pub vehicle_price: Money,

    pub dp_percent: Percent,
    pub tenor_months: u32,
    pub payment_type: PaymentType,
    pub admin_fee: Money,
    pub insurance_label: Option<String>,

    pub dp_amount: Money,
    pub monthly_payment: Money,
    pub total_first_pay: Money,
    pub interest_rate: Rate,
    pub insurance_rate: Rate,
    pub insurance_amount: Money,
    pub principal_pure: Money,
    pub policy_fee: Money,
    pub total_ar: Money,
    pub total_interest: Money,
    pub total_loan: Money,
    pub policy_fee_tdp: Money,
    pub first_installment: Money,
    pub nilai_ap: Money,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SimulationRecord {
    /// Flatten a result into a record. The stored down-payment percentage is
    /// the one the result was computed at, which differs from the request
    /// in budget mode.
    pub fn from_simulation(
        customer: &CustomerDetails,
        input: &SimulationInput,
        result: &CalculationResult,
        created_at: Option<DateTime<Utc>>,
    ) -> CreditSimResult<Self> {
        if customer.borrower_name.trim().is_empty() {
            return Err(CreditSimError::invalid(
                "borrower_name",
                "Borrower name is required before saving",
            ));
        }

        Ok(Self {
            borrower_name: customer.borrower_name.trim().to_string(),
            co_borrower_name: customer.co_borrower_name.clone(),
            sales_name: customer.sales_name.clone(),
            status: customer.status,
            unit_name: customer.unit_name.clone(),
            nopol: customer.nopol.clone(),
            category: input.category,
            sub_category: input.sub_category,
            is_loading_unit: input.is_loading_unit,
            vehicle_price: result.vehicle_price,
            dp_percent: result.down_payment_percent_actual,
            tenor_months: result.tenor_months,
            payment_type: result.payment_type,
            admin_fee: result.admin_fee,
            insurance_label: result.insurance_label.clone(),
            dp_amount: result.down_payment_amount,
            monthly_payment: result.monthly_installment,
            total_first_pay: result.total_first_payment,
            interest_rate: result.interest_rate,
            insurance_rate: result.insurance_rate,
            insurance_amount: result.insurance_amount,
            principal_pure: result.pure_loan_principal,
            policy_fee: result.policy_fee,
            total_ar: result.total_financed_amount,
            total_interest: result.total_interest,
            total_loan: result.total_loan_amount,
            policy_fee_tdp: result.policy_fee_at_first_payment,
            first_installment: result.first_installment_due_now,
            nilai_ap: result.residual_asset_value,
            created_at,
        })
    }

    /// Copy with a new follow-up status.
    pub fn with_status(&self, status: SimulationStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRecordRequest {
    pub customer: CustomerDetails,
    #[serde(flatten)]
    pub simulation: CreditSimulationRequest,
}

/// Simulate and map the outcome into a storable record.
pub fn build_simulation_record(
    request: &SimulationRecordRequest,
) -> CreditSimResult<ComputationOutput<SimulationRecord>> {
    let start = Instant::now();
    let sim = &request.simulation;
    sim.policy.validate()?;

    let (result, warnings) = run_simulation(&sim.input, &sim.rate_tables, &sim.policy)?;
    let record =
        SimulationRecord::from_simulation(&request.customer, &sim.input, &result, Some(Utc::now()))?;

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "status": record.status,
        "dp_percent_source": "computed result",
    });

    Ok(with_metadata(
        "Simulation record mapping",
        &assumptions,
        warnings,
        elapsed,
        record,
    ))
}

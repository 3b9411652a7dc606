use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_credit(input_json: String) -> NapiResult<String> {
    let input: vehicle_credit_core::calculator::simulation::CreditSimulationRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = vehicle_credit_core::calculator::simulation::simulate_credit(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn solve_budget(input_json: String) -> NapiResult<String> {
    let input: vehicle_credit_core::solver::budget::BudgetSolveRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        vehicle_credit_core::solver::budget::solve_budget(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Rates
// ---------------------------------------------------------------------------

#[napi]
pub fn insurance_options(input_json: String) -> NapiResult<String> {
    let input: vehicle_credit_core::rates::resolver::InsuranceOptionsRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = vehicle_credit_core::rates::resolver::list_insurance_options(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn offered_tenors(category_json: String) -> NapiResult<String> {
    let category: vehicle_credit_core::VehicleCategory =
        serde_json::from_str(&category_json).map_err(to_napi_error)?;
    let tenors = vehicle_credit_core::rates::selection::offered_tenors(category);
    serde_json::to_string(tenors).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[napi]
pub fn build_simulation_record(input_json: String) -> NapiResult<String> {
    let input: vehicle_credit_core::records::simulation_record::SimulationRecordRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = vehicle_credit_core::records::simulation_record::build_simulation_record(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn update_record_status(record_json: String, status: String) -> NapiResult<String> {
    use vehicle_credit_core::records::simulation_record::{SimulationRecord, SimulationStatus};

    let record: SimulationRecord = serde_json::from_str(&record_json).map_err(to_napi_error)?;
    let status: SimulationStatus = status.parse().map_err(to_napi_error)?;
    serde_json::to_string(&record.with_status(status)).map_err(to_napi_error)
}

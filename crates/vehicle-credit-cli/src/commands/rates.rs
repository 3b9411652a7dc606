use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use vehicle_credit_core::rates::resolver::{self, InsuranceOptionsRequest};
use vehicle_credit_core::rates::selection::offered_tenors;
use vehicle_credit_core::VehicleCategory;

use super::{read_request, CategoryArg, VehicleArgs};

/// Arguments for listing insurance products
#[derive(Args)]
pub struct InsuranceOptionsArgs {
    /// Path to a full request file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub vehicle: VehicleArgs,
}

/// Arguments for listing offered tenors
#[derive(Args)]
pub struct TenorsArgs {
    /// Vehicle category
    #[arg(long, value_enum, default_value = "passenger")]
    pub category: CategoryArg,
}

pub fn run_insurance_options(args: InsuranceOptionsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: InsuranceOptionsRequest = match read_request(args.input.as_deref())? {
        Some(request) => request,
        None => InsuranceOptionsRequest {
            input: args.vehicle.to_input(Decimal::ZERO)?,
            rate_tables: args.vehicle.rate_tables()?,
        },
    };

    let result = resolver::list_insurance_options(&request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_tenors(args: TenorsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let category: VehicleCategory = args.category.into();
    Ok(json!({
        "result": {
            "category": category,
            "tenors": offered_tenors(category),
        }
    }))
}

use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use vehicle_credit_core::calculator::simulation::{self, CreditSimulationRequest};

use super::{read_request, VehicleArgs};

/// Arguments for a forward credit simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to a full request file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Down payment in percent points (0 to 99)
    #[arg(long, alias = "dp", default_value = "20")]
    pub down_payment: Decimal,

    #[command(flatten)]
    pub vehicle: VehicleArgs,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: CreditSimulationRequest = match read_request(args.input.as_deref())? {
        Some(request) => request,
        None => CreditSimulationRequest {
            input: args.vehicle.to_input(args.down_payment)?,
            rate_tables: args.vehicle.rate_tables()?,
            policy: args.vehicle.pricing_policy()?,
        },
    };

    let result = simulation::simulate_credit(&request)?;
    Ok(serde_json::to_value(result)?)
}

use clap::Args;
use serde_json::Value;

use vehicle_credit_core::records::simulation_record::{self, SimulationRecordRequest};

use super::read_request;

/// Arguments for building a storable simulation record
#[derive(Args)]
pub struct RecordArgs {
    /// Path to the record request (customer details plus simulation request)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_record(args: RecordArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: SimulationRecordRequest = read_request(args.input.as_deref())?
        .ok_or("--input file is required for building a record")?;

    let result = simulation_record::build_simulation_record(&request)?;
    Ok(serde_json::to_value(result)?)
}

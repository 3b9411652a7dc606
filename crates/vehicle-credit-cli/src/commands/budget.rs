use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use vehicle_credit_core::solver::budget::{self, BudgetSolveRequest};
use vehicle_credit_core::TargetKind;

use super::{read_request, VehicleArgs};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TargetKindArg {
    /// Total first payment
    Tdp,
    /// Monthly installment
    Installment,
}

impl From<TargetKindArg> for TargetKind {
    fn from(arg: TargetKindArg) -> Self {
        match arg {
            TargetKindArg::Tdp => TargetKind::TotalFirstPayment,
            TargetKindArg::Installment => TargetKind::MonthlyInstallment,
        }
    }
}

/// Arguments for the budget solver
#[derive(Args)]
pub struct SolveArgs {
    /// Path to a full request file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Metric to drive to the target
    #[arg(long, value_enum, default_value = "tdp")]
    pub target_kind: TargetKindArg,

    /// Target value for the chosen metric
    #[arg(long)]
    pub target: Option<Decimal>,

    #[command(flatten)]
    pub vehicle: VehicleArgs,
}

pub fn run_solve(args: SolveArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: BudgetSolveRequest = match read_request(args.input.as_deref())? {
        Some(request) => request,
        None => BudgetSolveRequest {
            input: args.vehicle.to_input(Decimal::ZERO)?,
            target_kind: args.target_kind.into(),
            target_value: args.target.ok_or("--target is required (or provide --input)")?,
            rate_tables: args.vehicle.rate_tables()?,
            policy: args.vehicle.pricing_policy()?,
        },
    };

    let result = budget::solve_budget(&request)?;
    Ok(serde_json::to_value(result)?)
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, trace};

use crate::calculator::financials::{calculate, CalculationResult};
use crate::calculator::input::{SimulationInput, MAX_DOWN_PAYMENT_PERCENT};
use crate::calculator::simulation::assumptions;
use crate::policy::PricingPolicy;
use crate::rates::resolver::{apply_default_insurance, resolve_rates};
use crate::rates::tables::RateTables;
use crate::{types::*, CreditSimError, CreditSimResult};

/// Fixed bisection budget. The loop never exits early.
pub const SOLVER_ITERATIONS: u32 = 50;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Output metric the solver drives to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetKind {
    /// TDP, non-decreasing in the down-payment percentage.
    TotalFirstPayment,
    /// Non-increasing in the down-payment percentage.
    MonthlyInstallment,
}

impl TargetKind {
    fn read(self, result: &CalculationResult) -> Money {
        match self {
            TargetKind::TotalFirstPayment => result.total_first_payment,
            TargetKind::MonthlyInstallment => result.monthly_installment,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetSolveRequest {
    /// `down_payment_percent` is ignored.
    pub input: SimulationInput,
    pub target_kind: TargetKind,
    pub target_value: Money,
    pub rate_tables: RateTables,
    #[serde(default)]
    pub policy: PricingPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetSolution {
    pub target_kind: TargetKind,
    pub target_value: Money,
    pub achieved_value: Money,
    pub absolute_error: Money,
    pub iterations: u32,
    /// Trial with the smallest absolute error, the earliest one on ties.
    pub best: CalculationResult,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Find the down-payment percentage in [0, 99] whose result brings the chosen
/// metric closest to `target_value`.
///
/// Every trial resolves its own tier against the same borrowed `tables`, so
/// a run always sees one consistent snapshot.
///
/// A trial that fails to compute aborts the whole run with that error, even
/// when other trials would reach the target. Under the interest-suppressed
/// scenario a tenor no longer than the waived installment count fails every
/// tier-1 trial this way.
pub fn solve_for_target(
    input: &SimulationInput,
    target_kind: TargetKind,
    target_value: Money,
    tables: &RateTables,
    policy: &PricingPolicy,
) -> CreditSimResult<BudgetSolution> {
    if target_value <= Decimal::ZERO {
        return Err(CreditSimError::invalid(
            "target_value",
            "Target value must be positive",
        ));
    }
    if input.vehicle_price <= Decimal::ZERO {
        return Err(CreditSimError::invalid(
            "vehicle_price",
            "Vehicle price must be positive",
        ));
    }
    policy.validate()?;

    // Candidates do not depend on the down payment: settle the label once.
    let base = apply_default_insurance(input, tables);

    let mut low = Decimal::ZERO;
    let mut high = MAX_DOWN_PAYMENT_PERCENT;
    let mut best: Option<(Money, CalculationResult)> = None;

    for i in 0..SOLVER_ITERATIONS {
        let mid = (low + high) / dec!(2);
        let trial = base.with_down_payment(mid);
        let rates = resolve_rates(&trial, tables, policy)?;
        let result = calculate(&trial, &rates, policy)?;

        let current = target_kind.read(&result);
        let diff = (current - target_value).abs();
        trace!(iteration = i, %mid, %current, %diff, "budget trial");

        let moves_up = match target_kind {
            TargetKind::TotalFirstPayment => current < target_value,
            TargetKind::MonthlyInstallment => current > target_value,
        };
        if moves_up {
            low = mid;
        } else {
            high = mid;
        }

        if best.as_ref().map_or(true, |(d, _)| diff < *d) {
            best = Some((diff, result));
        }
    }

    let (absolute_error, best) = best.ok_or_else(|| {
        CreditSimError::invalid("target_value", "Solver produced no trial")
    })?;
    debug!(
        target = %target_value,
        dp_percent = %best.down_payment_percent_actual,
        %absolute_error,
        "budget solver finished"
    );

    Ok(BudgetSolution {
        target_kind,
        target_value,
        achieved_value: target_kind.read(&best),
        absolute_error,
        iterations: SOLVER_ITERATIONS,
        best,
    })
}

/// Envelope wrapper around [`solve_for_target`].
pub fn solve_budget(
    request: &BudgetSolveRequest,
) -> CreditSimResult<ComputationOutput<BudgetSolution>> {
    let start = Instant::now();

    let solution = solve_for_target(
        &request.input,
        request.target_kind,
        request.target_value,
        &request.rate_tables,
        &request.policy,
    )?;

    let mut warnings = Vec::new();
    let solved_input = apply_default_insurance(
        &request.input.with_down_payment(solution.best.down_payment_percent_actual),
        &request.rate_tables,
    );
    if let Ok(rates) = resolve_rates(&solved_input, &request.rate_tables, &request.policy) {
        warnings.extend(rates.warnings(&solved_input));
    }
    if solution.absolute_error >= rounding_granularity(request.target_kind) {
        warnings.push(format!(
            "Target {} not reachable within [0, {MAX_DOWN_PAYMENT_PERCENT}]% down payment; closest is {}",
            request.target_value, solution.achieved_value
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let mut assumptions = assumptions(&request.policy);
    assumptions["iterations"] = serde_json::json!(SOLVER_ITERATIONS);
    assumptions["search_domain"] = serde_json::json!(["0", MAX_DOWN_PAYMENT_PERCENT.to_string()]);

    Ok(with_metadata(
        "Budget solver (fixed-iteration bisection on down-payment %)",
        &assumptions,
        warnings,
        elapsed,
        solution,
    ))
}

/// Largest step the metric can take between neighbouring grid values.
fn rounding_granularity(kind: TargetKind) -> Money {
    match kind {
        TargetKind::TotalFirstPayment => Decimal::ONE,
        TargetKind::MonthlyInstallment => crate::rounding::INSTALLMENT_ROUNDING,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use vehicle_credit_core::calculator::simulation::run_simulation;
use vehicle_credit_core::rates::tables::{InsuranceRateEntry, InterestRateEntry};
use vehicle_credit_core::solver::budget::{solve_budget, BudgetSolveRequest, SOLVER_ITERATIONS};
use vehicle_credit_core::{
    solve_for_target, types::*, PricingPolicy, RateTables, SimulationInput, TargetKind,
};

fn tables() -> RateTables {
    let rates = [
        dec!(0.09),
        dec!(0.085),
        dec!(0.08),
        dec!(0.075),
        dec!(0.07),
        dec!(0.065),
        dec!(0.06),
    ];
    RateTables {
        interest_rates: rates
            .iter()
            .enumerate()
            .map(|(i, rate)| InterestRateEntry {
                category: VehicleCategory::Passenger,
                payment_type: PaymentType::Addb,
                star_level: i as u8 + 1,
                tenor_months: 12,
                rate: *rate,
            })
            .collect(),
        insurance_rates: vec![InsuranceRateEntry {
            category: InsuranceCategory::Passenger,
            tenor_years: 1,
            label: "TLO".into(),
            min_price: dec!(0),
            max_price: dec!(1_000_000_000),
            rate: dec!(0.009),
        }],
        regional_insurance: None,
    }
}

fn base_input() -> SimulationInput {
    SimulationInput {
        vehicle_price: dec!(100_000_000),
        down_payment_percent: Decimal::ZERO,
        tenor_months: 12,
        category: VehicleCategory::Passenger,
        sub_category: SubCategory::Passenger,
        is_loading_unit: false,
        payment_type: PaymentType::Addb,
        admin_fee: dec!(3_000_000),
        selected_insurance_label: None,
    }
}

fn at(dp: Percent) -> vehicle_credit_core::CalculationResult {
    run_simulation(&base_input().with_down_payment(dp), &tables(), &PricingPolicy::default())
        .unwrap()
        .0
}

#[test]
fn test_tdp_target_recovers_twenty_percent() {
    let target = at(dec!(20)).total_first_payment;
    assert_eq!(target, dec!(23_050_000));

    let solution = solve_for_target(
        &base_input(),
        TargetKind::TotalFirstPayment,
        target,
        &tables(),
        &PricingPolicy::default(),
    )
    .unwrap();

    assert!((solution.best.down_payment_percent_actual - dec!(20)).abs() < dec!(0.01));
    assert!((solution.best.total_first_payment - target).abs() < dec!(1));
    assert_eq!(solution.iterations, SOLVER_ITERATIONS);
}

#[test]
fn test_installment_target_hits_plateau() {
    let target = at(dec!(20)).monthly_installment;
    // 81M * 1.07 / 12 = 7_222_500 -> 7_230_000
    assert_eq!(target, dec!(7_230_000));

    let solution = solve_for_target(
        &base_input(),
        TargetKind::MonthlyInstallment,
        target,
        &tables(),
        &PricingPolicy::default(),
    )
    .unwrap();

    assert_eq!(solution.achieved_value, target);
    assert_eq!(solution.absolute_error, Decimal::ZERO);
    assert!((solution.best.down_payment_percent_actual - dec!(20)).abs() < dec!(0.05));
    assert_eq!(solution.best.star_level, 5);
}

#[test]
fn test_solver_is_deterministic() {
    let run = || {
        solve_for_target(
            &base_input(),
            TargetKind::TotalFirstPayment,
            dec!(41_777_777),
            &tables(),
            &PricingPolicy::default(),
        )
        .unwrap()
    };
    let first = run();
    let second = run();
    assert_eq!(first.best, second.best);
    assert_eq!(first.absolute_error, second.absolute_error);
}

#[test]
fn test_reported_error_matches_best_trial() {
    let solution = solve_for_target(
        &base_input(),
        TargetKind::MonthlyInstallment,
        dec!(6_000_005),
        &tables(),
        &PricingPolicy::default(),
    )
    .unwrap();
    assert_eq!(
        solution.absolute_error,
        (solution.best.monthly_installment - dec!(6_000_005)).abs()
    );
    // Installments sit on a 10,000 grid, so the closest is at most 5 away
    assert!(solution.absolute_error <= dec!(5));
}

#[test]
fn test_non_positive_price_rejected() {
    let mut input = base_input();
    input.vehicle_price = Decimal::ZERO;
    assert!(solve_for_target(
        &input,
        TargetKind::TotalFirstPayment,
        dec!(10_000_000),
        &tables(),
        &PricingPolicy::default(),
    )
    .is_err());
}

#[test]
fn test_solve_budget_from_json() {
    let json = serde_json::json!({
        "input": { "vehicle_price": "100000000", "tenor_months": 12, "admin_fee": "3000000" },
        "target_kind": "TOTAL_FIRST_PAYMENT",
        "target_value": "23050000",
        "rate_tables": serde_json::to_value(tables()).unwrap()
    });
    let request: BudgetSolveRequest = serde_json::from_value(json).unwrap();
    let out = solve_budget(&request).unwrap();
    assert!((out.result.best.down_payment_percent_actual - dec!(20)).abs() < dec!(0.01));
    assert_eq!(out.result.best.insurance_label.as_deref(), Some("TLO"));
    assert!(out.warnings.iter().all(|w| !w.contains("not reachable")));
    assert_eq!(out.assumptions["iterations"], serde_json::json!(50));
}

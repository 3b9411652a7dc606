pub mod calculator;
pub mod error;
pub mod policy;
pub mod rates;
pub mod rounding;
pub mod types;

#[cfg(feature = "solver")]
pub mod solver;

#[cfg(feature = "records")]
pub mod records;

pub use calculator::financials::{calculate, CalculationResult};
pub use calculator::input::SimulationInput;
pub use error::CreditSimError;
pub use policy::PricingPolicy;
pub use rates::resolver::{resolve_rates, ResolvedRates};
pub use rates::tables::RateTables;
#[cfg(feature = "solver")]
pub use solver::budget::{solve_for_target, TargetKind};
pub use types::*;

/// Standard result type for all vehicle-credit operations
pub type CreditSimResult<T> = Result<T, CreditSimError>;

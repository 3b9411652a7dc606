pub mod financials;
pub mod input;
pub mod simulation;

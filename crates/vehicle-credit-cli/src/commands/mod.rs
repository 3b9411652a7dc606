pub mod budget;
pub mod rates;
pub mod records;
pub mod simulation;

use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use vehicle_credit_core::{
    PaymentType, PricingPolicy, RateTables, SimulationInput, SubCategory, VehicleCategory,
};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Passenger,
    Commercial,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SubCategoryArg {
    Passenger,
    Truck,
    Bus,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PaymentTypeArg {
    Addb,
    Addm,
}

impl From<CategoryArg> for VehicleCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Passenger => VehicleCategory::Passenger,
            CategoryArg::Commercial => VehicleCategory::Commercial,
        }
    }
}

impl From<SubCategoryArg> for SubCategory {
    fn from(arg: SubCategoryArg) -> Self {
        match arg {
            SubCategoryArg::Passenger => SubCategory::Passenger,
            SubCategoryArg::Truck => SubCategory::Truck,
            SubCategoryArg::Bus => SubCategory::Bus,
        }
    }
}

impl From<PaymentTypeArg> for PaymentType {
    fn from(arg: PaymentTypeArg) -> Self {
        match arg {
            PaymentTypeArg::Addb => PaymentType::Addb,
            PaymentTypeArg::Addm => PaymentType::Addm,
        }
    }
}

/// Vehicle and credit flags shared by the calculation commands
#[derive(Args)]
pub struct VehicleArgs {
    /// Path to the rate tables (JSON or YAML)
    #[arg(long)]
    pub rates: Option<String>,

    /// Path to a pricing policy (JSON or YAML); baseline policy if omitted
    #[arg(long)]
    pub policy: Option<String>,

    /// On-the-road vehicle price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Tenor in months
    #[arg(long)]
    pub tenor: Option<u32>,

    /// Vehicle category
    #[arg(long, value_enum, default_value = "passenger")]
    pub category: CategoryArg,

    /// Commercial body type
    #[arg(long, value_enum, default_value = "passenger")]
    pub sub_category: SubCategoryArg,

    /// Unit carries a loading body
    #[arg(long)]
    pub loading: bool,

    /// Payment type
    #[arg(long, value_enum, default_value = "addb")]
    pub payment_type: PaymentTypeArg,

    /// Admin fee collected at signing
    #[arg(long)]
    pub admin_fee: Option<Decimal>,

    /// Insurance product label (lowest-rate product if omitted)
    #[arg(long)]
    pub insurance: Option<String>,
}

const DEFAULT_ADMIN_FEE: Decimal = dec!(3_000_000);

impl VehicleArgs {
    pub fn to_input(&self, down_payment_percent: Decimal) -> Result<SimulationInput, Box<dyn std::error::Error>> {
        Ok(SimulationInput {
            vehicle_price: self.price.ok_or("--price is required (or provide --input)")?,
            down_payment_percent,
            tenor_months: self.tenor.ok_or("--tenor is required (or provide --input)")?,
            category: self.category.into(),
            sub_category: self.sub_category.into(),
            is_loading_unit: self.loading,
            payment_type: self.payment_type.into(),
            admin_fee: self.admin_fee.unwrap_or(DEFAULT_ADMIN_FEE),
            selected_insurance_label: self.insurance.clone(),
        })
    }

    pub fn rate_tables(&self) -> Result<RateTables, Box<dyn std::error::Error>> {
        let path = self
            .rates
            .as_deref()
            .ok_or("--rates is required (or provide --input)")?;
        input::file::read_document(path)
    }

    pub fn pricing_policy(&self) -> Result<PricingPolicy, Box<dyn std::error::Error>> {
        match self.policy.as_deref() {
            Some(path) => input::file::read_document(path),
            None => Ok(PricingPolicy::default()),
        }
    }
}

/// Load a whole request from `--input`, then piped stdin; `None` when neither
/// is present so the caller can fall back to flags.
pub fn read_request<T: serde::de::DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(input::file::read_document(path)?));
    }
    input::stdin::read_stdin()
}

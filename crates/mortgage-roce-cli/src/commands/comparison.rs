use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_roce_core::comparison::offers::{self, ComparisonInput};

use crate::input;

/// Arguments for ranking loan offers
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON/YAML file with `offers` and income
    #[arg(long)]
    pub input: Option<String>,

    /// Annual income, replacing any income in the input
    #[arg(long, conflicts_with = "monthly_income")]
    pub income: Option<Decimal>,

    /// Monthly rental income, replacing any income in the input
    #[arg(long)]
    pub monthly_income: Option<Decimal>,

    /// Property price, for loan-to-value and gross yield
    #[arg(long)]
    pub property_price: Option<Decimal>,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut cmp_input: ComparisonInput = input::read_input(args.input.as_deref())?
        .ok_or("--input <file> or stdin required for offer comparison")?;

    if let Some(income) = args.income {
        cmp_input.annual_income = Some(income);
        cmp_input.monthly_rental_income = None;
    }
    if let Some(monthly) = args.monthly_income {
        cmp_input.monthly_rental_income = Some(monthly);
        cmp_input.annual_income = None;
    }
    if let Some(price) = args.property_price {
        cmp_input.property_price = Some(price);
    }

    let result = offers::compare_offers(&cmp_input)?;
    Ok(serde_json::to_value(result)?)
}

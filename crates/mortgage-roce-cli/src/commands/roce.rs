use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_roce_core::roce::metric::{self, RoceInput};

use crate::input;

/// Arguments for a stand-alone ROCE calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RoceArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Annual income (e.g. rent x 12)
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Annual interest cost
    #[arg(long)]
    pub interest: Option<Decimal>,

    /// Annual fees
    #[arg(long, default_value = "0")]
    pub fees: Decimal,

    /// Capital contributed (down payment)
    #[arg(long, alias = "down-payment")]
    pub capital: Option<Decimal>,
}

pub fn run_roce(args: RoceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let roce_input: RoceInput = match input::read_input(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => RoceInput {
            annual_income: args.income.ok_or("--income is required (or provide --input)")?,
            annual_interest_cost: args
                .interest
                .ok_or("--interest is required (or provide --input)")?,
            annual_fees: args.fees,
            capital_contributed: args
                .capital
                .ok_or("--capital is required (or provide --input)")?,
        },
    };
    let result = metric::calculate_roce(&roce_input)?;
    Ok(serde_json::to_value(result)?)
}

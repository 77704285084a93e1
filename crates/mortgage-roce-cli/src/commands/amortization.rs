use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_roce_core::amortization::interest;
use mortgage_roce_core::amortization::payment::{self, PaymentInput};

use crate::input;

/// Loan parameters shared by `payment` and `interest`
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long, alias = "loan")]
    pub principal: Option<Decimal>,

    /// Nominal annual interest rate in percent (3.5 = 3.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in whole years
    #[arg(long, alias = "term")]
    pub years: Option<u32>,
}

impl LoanArgs {
    fn into_input(self) -> Result<PaymentInput, Box<dyn std::error::Error>> {
        if let Some(loaded) = input::read_input(self.input.as_deref())? {
            return Ok(loaded);
        }
        Ok(PaymentInput {
            principal: self
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: self.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: self.years.ok_or("--years is required (or provide --input)")?,
        })
    }
}

pub fn run_payment(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = args.into_input()?;
    let result = payment::calculate_payment(&loan)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_interest(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = args.into_input()?;
    let result = interest::analyze_interest(&loan)?;
    Ok(serde_json::to_value(result)?)
}

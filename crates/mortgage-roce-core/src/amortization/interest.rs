//! Interest profile of a single loan: payment, per-year interest and its
//! summary statistics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::payment::{compute_payment, PaymentInput};
use super::schedule::{simulate, AnnualInterestSeries};
use super::statistics::{summarize, InterestStatistics};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::MortgageResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestAnalysisOutput {
    pub periodic_payment: Money,
    pub number_of_periods: u32,
    pub annual_interest: AnnualInterestSeries,
    pub first_year_interest: Money,
    pub statistics: InterestStatistics,
    pub final_balance: Money,
}

/// Amortise one loan and summarise its yearly interest cost.
pub fn analyze_interest(
    input: &PaymentInput,
) -> MortgageResult<ComputationOutput<InterestAnalysisOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let terms = compute_payment(input.principal, input.annual_rate, input.term_years)?;
    let amortization = simulate(
        input.principal,
        terms.periodic_payment,
        terms.number_of_periods,
        terms.periodic_rate,
    );
    if amortization.prorated_final_year {
        warnings.push("Final partial year prorated to a 12-month equivalent".into());
    }

    let statistics = summarize(&amortization.annual_interest, amortization.total_interest)?;
    let final_balance = amortization.final_balance().unwrap_or(input.principal);
    let first_year_interest = amortization
        .annual_interest
        .first()
        .copied()
        .unwrap_or(Decimal::ZERO);

    let output = InterestAnalysisOutput {
        periodic_payment: terms.periodic_payment,
        number_of_periods: terms.number_of_periods,
        annual_interest: amortization.annual_interest,
        first_year_interest,
        statistics,
        final_balance,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Amortisation (monthly, per-year interest buckets)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

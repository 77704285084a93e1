//! Fixed periodic payment of a fully amortising (French-style) loan.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate, PERIODS_PER_YEAR};
use crate::MortgageResult;

/// Input for a stand-alone payment calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInput {
    pub principal: Money,
    /// Nominal annual rate in percent (3.5 = 3.5%).
    pub annual_rate: Percent,
    pub term_years: u32,
}

/// Payment terms derived from principal, rate and term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentTerms {
    pub periodic_payment: Money,
    pub number_of_periods: u32,
    pub periodic_rate: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutput {
    pub periodic_payment: Money,
    pub number_of_periods: u32,
    pub periodic_rate: Rate,
    pub total_of_payments: Money,
}

/// Highest nominal annual rate accepted, in percent.
pub const MAX_ANNUAL_RATE: Percent = dec!(20);

/// Longest term accepted, in years.
pub const MAX_TERM_YEARS: u32 = 50;

/// Convert a nominal annual percentage into the monthly decimal rate.
pub fn periodic_rate(annual_rate: Percent) -> Rate {
    annual_rate / dec!(100) / Decimal::from(PERIODS_PER_YEAR)
}

/// Fixed monthly payment and number of periods for a loan.
///
/// `payment = P * r * (1+r)^n / ((1+r)^n - 1)`, or `P / n` when the rate is
/// zero. Negative principal, a rate outside `0..=MAX_ANNUAL_RATE` and a term
/// outside `1..=MAX_TERM_YEARS` are rejected, as is any loan whose payments
/// cannot be represented.
pub fn compute_payment(
    principal: Money,
    annual_rate: Percent,
    term_years: u32,
) -> MortgageResult<PaymentTerms> {
    if principal < Decimal::ZERO {
        return Err(MortgageError::invalid(
            "principal",
            "Principal cannot be negative",
        ));
    }
    if annual_rate < Decimal::ZERO {
        return Err(MortgageError::invalid(
            "annual_rate",
            "Annual rate cannot be negative",
        ));
    }
    if annual_rate > MAX_ANNUAL_RATE {
        return Err(MortgageError::invalid(
            "annual_rate",
            format!("Annual rate cannot exceed {MAX_ANNUAL_RATE}%"),
        ));
    }
    if term_years == 0 {
        return Err(MortgageError::invalid(
            "term_years",
            "Term must be at least 1 year",
        ));
    }
    if term_years > MAX_TERM_YEARS {
        return Err(MortgageError::invalid(
            "term_years",
            format!("Term cannot exceed {MAX_TERM_YEARS} years"),
        ));
    }

    let number_of_periods = term_years * PERIODS_PER_YEAR;
    let rate = periodic_rate(annual_rate);
    let n = Decimal::from(number_of_periods);

    let periodic_payment = if rate.is_zero() {
        principal / n
    } else {
        let growth = compound_factor(rate, number_of_periods)?;
        let denom = growth - Decimal::ONE;
        if denom.is_zero() {
            // Rate too small to move the factor at 28 digits: straight-line.
            principal / n
        } else {
            principal
                .checked_mul(rate)
                .and_then(|v| v.checked_mul(growth))
                .and_then(|v| v.checked_div(denom))
                .ok_or_else(|| {
                    MortgageError::invalid("annual_rate", "Payment overflows for this loan")
                })?
        }
    };

    // Every later sum (yearly payments, lifetime interest) is bounded by this.
    periodic_payment
        .checked_mul(n)
        .ok_or_else(|| MortgageError::invalid("principal", "Total of payments overflows"))?;

    Ok(PaymentTerms {
        periodic_payment,
        number_of_periods,
        periodic_rate: rate,
    })
}

/// Calculate the payment for one loan, wrapped in the standard envelope.
pub fn calculate_payment(input: &PaymentInput) -> MortgageResult<ComputationOutput<PaymentOutput>> {
    let start = Instant::now();

    let terms = compute_payment(input.principal, input.annual_rate, input.term_years)?;
    let output = PaymentOutput {
        periodic_payment: terms.periodic_payment,
        number_of_periods: terms.number_of_periods,
        periodic_rate: terms.periodic_rate,
        total_of_payments: terms.periodic_payment * Decimal::from(terms.number_of_periods),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Annuity Payment",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}

/// (1 + rate)^n via iterative multiplication, failing on overflow.
fn compound_factor(rate: Rate, n: u32) -> MortgageResult<Decimal> {
    let base = Decimal::ONE + rate;
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result.checked_mul(base).ok_or_else(|| {
            MortgageError::invalid("annual_rate", "Compound factor overflows for this rate and term")
        })?;
    }
    Ok(result)
}

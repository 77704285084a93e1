//! Return on Capital Employed for a leveraged rental.
//!
//! Only interest and fees are costs. Principal repayment moves value from
//! debt to equity and is left out of the numerator.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::error::MortgageError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

/// ROCE in percent, with signed infinity when no capital was contributed.
///
/// Ordered `NegativeInfinity < Finite(_) < PositiveInfinity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Roce {
    Finite(Percent),
    PositiveInfinity,
    NegativeInfinity,
}

impl Roce {
    pub fn is_finite(&self) -> bool {
        matches!(self, Roce::Finite(_))
    }

    pub fn finite(&self) -> Option<Percent> {
        match self {
            Roce::Finite(v) => Some(*v),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Roce::NegativeInfinity => 0,
            Roce::Finite(_) => 1,
            Roce::PositiveInfinity => 2,
        }
    }
}

impl Ord for Roce {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Roce::Finite(a), Roce::Finite(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Roce {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Roce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Roce::Finite(v) => write!(f, "{v}"),
            Roce::PositiveInfinity => f.write_str("Infinity"),
            Roce::NegativeInfinity => f.write_str("-Infinity"),
        }
    }
}

impl FromStr for Roce {
    type Err = MortgageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Infinity" | "inf" | "+Infinity" => Ok(Roce::PositiveInfinity),
            "-Infinity" | "-inf" => Ok(Roce::NegativeInfinity),
            other => Decimal::from_str(other).map(Roce::Finite).map_err(|e| {
                MortgageError::SerializationError(format!("invalid ROCE value '{other}': {e}"))
            }),
        }
    }
}

impl Serialize for Roce {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Roce {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Ratio and the net income behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoceOutcome {
    pub ratio: Roce,
    pub net_income: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoceInput {
    pub annual_income: Money,
    pub annual_interest_cost: Money,
    #[serde(default)]
    pub annual_fees: Money,
    pub capital_contributed: Money,
}

/// `(income - interest - fees) / capital * 100`.
///
/// With zero capital the result is `PositiveInfinity` for positive net income
/// and `NegativeInfinity` otherwise. A ratio too large for `Decimal` saturates
/// to the infinity of the same sign.
pub fn roce(
    annual_income: Money,
    annual_interest_cost: Money,
    annual_fees: Money,
    capital_contributed: Money,
) -> RoceOutcome {
    let net_income = annual_income - annual_interest_cost - annual_fees;
    let ratio = if capital_contributed.is_zero() {
        if net_income > Decimal::ZERO {
            Roce::PositiveInfinity
        } else {
            Roce::NegativeInfinity
        }
    } else {
        match net_income
            .checked_div(capital_contributed)
            .and_then(|q| q.checked_mul(dec!(100)))
        {
            Some(ratio) => Roce::Finite(ratio),
            None if net_income.is_sign_positive() == capital_contributed.is_sign_positive() => {
                Roce::PositiveInfinity
            }
            None => Roce::NegativeInfinity,
        }
    };
    RoceOutcome { ratio, net_income }
}

/// Stand-alone ROCE calculation wrapped in the standard envelope.
pub fn calculate_roce(input: &RoceInput) -> MortgageResult<ComputationOutput<RoceOutcome>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.capital_contributed < Decimal::ZERO {
        return Err(MortgageError::invalid(
            "capital_contributed",
            "Capital contributed cannot be negative",
        ));
    }
    if input.annual_fees < Decimal::ZERO {
        return Err(MortgageError::invalid("annual_fees", "Fees cannot be negative"));
    }
    let net_income = input
        .annual_income
        .checked_sub(input.annual_interest_cost)
        .and_then(|v| v.checked_sub(input.annual_fees));
    if net_income.is_none() {
        return Err(MortgageError::invalid("annual_income", "Net income overflows"));
    }

    let outcome = roce(
        input.annual_income,
        input.annual_interest_cost,
        input.annual_fees,
        input.capital_contributed,
    );
    if !outcome.ratio.is_finite() {
        warnings.push("No or negligible capital contributed: ROCE is unbounded".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "ROCE = (Income - Interest - Fees) / Capital Contributed x 100",
        input,
        warnings,
        elapsed,
        outcome,
    ))
}

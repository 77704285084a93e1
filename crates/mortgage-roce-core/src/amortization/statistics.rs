use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::types::Money;
use crate::MortgageResult;

/// Summary of an annual interest series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestStatistics {
    pub minimum: Money,
    pub average: Money,
    pub maximum: Money,
    /// Cumulative interest from the simulator; not the sum of the series,
    /// whose last entry may be prorated.
    pub lifetime_total: Money,
}

/// Reduce a per-year interest series to min / average / max.
pub fn summarize(series: &[Money], lifetime_total: Money) -> MortgageResult<InterestStatistics> {
    let (first, rest) = series.split_first().ok_or(MortgageError::EmptySeries)?;

    let mut minimum = *first;
    let mut maximum = *first;
    let mut sum = *first;
    for value in rest {
        minimum = minimum.min(*value);
        maximum = maximum.max(*value);
        sum += *value;
    }

    Ok(InterestStatistics {
        minimum,
        average: sum / Decimal::from(series.len()),
        maximum,
        lifetime_total,
    })
}

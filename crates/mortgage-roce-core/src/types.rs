use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Periodic rates expressed as decimals (0.0029 = 0.29% per month).
pub type Rate = Decimal;

/// Rates and ratios expressed as percentages (3.5 = 3.5%).
pub type Percent = Decimal;

/// Months in a year; every loan in this crate is repaid monthly.
pub const PERIODS_PER_YEAR: u32 = 12;

/// A fixed-rate installment loan offer as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanOffer {
    /// Identifier, unique within one comparison run (usually the bank name)
    pub name: String,
    pub principal: Money,
    /// Nominal annual rate in percent
    pub annual_rate: Percent,
    pub term_years: u32,
    /// Recurring costs per month (insurance, cleaning, taxes)
    #[serde(default)]
    pub periodic_fees: Money,
    /// Down payment put into the purchase
    #[serde(default)]
    pub capital_contributed: Money,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

impl LoanOffer {
    /// Checks the fields the payment calculation does not cover.
    pub fn validate(&self) -> crate::MortgageResult<()> {
        if self.name.trim().is_empty() {
            return Err(crate::MortgageError::invalid("name", "Offer name is required"));
        }
        if self.periodic_fees < Decimal::ZERO {
            return Err(crate::MortgageError::invalid(
                "periodic_fees",
                "Monthly fees cannot be negative",
            ));
        }
        if self.capital_contributed < Decimal::ZERO {
            return Err(crate::MortgageError::invalid(
                "capital_contributed",
                "Down payment cannot be negative",
            ));
        }
        Ok(())
    }
}

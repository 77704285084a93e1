pub mod error;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "roce")]
pub mod roce;

#[cfg(feature = "comparison")]
pub mod comparison;

pub use error::MortgageError;
pub use types::*;

/// Standard result type for all mortgage-roce operations
pub type MortgageResult<T> = Result<T, MortgageError>;

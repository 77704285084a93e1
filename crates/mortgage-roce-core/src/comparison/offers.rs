//! Ranking of competing loan offers by return on capital employed.
//!
//! Each offer is amortised, its yearly interest summarised, and ROCE taken
//! under three interest scenarios: the highest yearly interest (worst case),
//! the average (expected) and the lowest (best case). Offers are ranked by
//! the expected scenario, descending.

use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

use crate::amortization::payment::compute_payment;
use crate::amortization::schedule::simulate;
use crate::amortization::statistics::{summarize, InterestStatistics};
use crate::error::MortgageError;
use crate::roce::metric::{roce, RoceOutcome};
use crate::types::{with_metadata, ComputationOutput, LoanOffer, Money, Percent, PERIODS_PER_YEAR};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Offers to compare and the income they are measured against.
///
/// Exactly one of `annual_income` and `monthly_rental_income` must be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInput {
    pub offers: Vec<LoanOffer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_income: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_rental_income: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_price: Option<Money>,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// ROCE under the three interest scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReturns {
    /// Highest yearly interest, lowest ROCE.
    pub worst: RoceOutcome,
    /// Average yearly interest.
    pub expected: RoceOutcome,
    /// Lowest yearly interest, highest ROCE.
    pub best: RoceOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    #[serde(flatten)]
    pub offer: LoanOffer,
    pub periodic_payment: Money,
    pub number_of_periods: u32,
    pub interest: InterestStatistics,
    pub first_year_interest: Money,
    pub annual_fees: Money,
    /// Yearly payments less average yearly interest.
    pub annual_principal_equivalent: Money,
    pub roce: ScenarioReturns,
    pub lifetime_interest: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_to_value: Option<Percent>,
}

/// An offer left out of the ranking and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedOffer {
    pub name: String,
    pub reason: String,
}

/// Ranked results of one comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub results: Vec<ComparisonResult>,
    pub excluded: Vec<ExcludedOffer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub annual_income: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_rental_income: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_price: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_rental_yield: Option<Percent>,
    /// Name of the top-ranked offer.
    pub best_offer: Option<String>,
    pub results: Vec<ComparisonResult>,
    pub excluded: Vec<ExcludedOffer>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate a single offer against a yearly income.
pub fn evaluate_offer(offer: &LoanOffer, annual_income: Money) -> MortgageResult<ComparisonResult> {
    offer.validate()?;

    let terms = compute_payment(offer.principal, offer.annual_rate, offer.term_years)?;
    let amortization = simulate(
        offer.principal,
        terms.periodic_payment,
        terms.number_of_periods,
        terms.periodic_rate,
    );
    let interest = summarize(&amortization.annual_interest, amortization.total_interest)?;
    let first_year_interest = amortization
        .annual_interest
        .first()
        .copied()
        .unwrap_or(Decimal::ZERO);

    let periods_per_year = Decimal::from(PERIODS_PER_YEAR);
    let annual_fees = offer
        .periodic_fees
        .checked_mul(periods_per_year)
        .ok_or_else(|| MortgageError::invalid("periodic_fees", "Yearly fees overflow"))?;
    let capital = offer.capital_contributed;

    // Higher interest means lower ROCE: max interest is the worst case.
    let scenarios = ScenarioReturns {
        worst: roce(annual_income, interest.maximum, annual_fees, capital),
        expected: roce(annual_income, interest.average, annual_fees, capital),
        best: roce(annual_income, interest.minimum, annual_fees, capital),
    };

    debug!(
        "offer '{}': payment {}, average interest {}, expected ROCE {}",
        offer.name, terms.periodic_payment, interest.average, scenarios.expected.ratio
    );

    Ok(ComparisonResult {
        offer: offer.clone(),
        periodic_payment: terms.periodic_payment,
        number_of_periods: terms.number_of_periods,
        annual_principal_equivalent: terms.periodic_payment * periods_per_year - interest.average,
        first_year_interest,
        annual_fees,
        roce: scenarios,
        lifetime_interest: interest.lifetime_total,
        interest,
        loan_to_value: None,
    })
}

/// Rank offers by expected-scenario ROCE, highest first.
///
/// Ties keep input order. An offer that fails to evaluate, or repeats the name
/// of an earlier ranked offer, is excluded without aborting the run.
pub fn compare(offers: &[LoanOffer], annual_income: Money) -> Comparison {
    let mut results = Vec::with_capacity(offers.len());
    let mut excluded = Vec::new();
    let mut seen: HashSet<&str> = HashSet::with_capacity(offers.len());

    for offer in offers {
        if seen.contains(offer.name.as_str()) {
            warn!("offer '{}' excluded: duplicate name", offer.name);
            excluded.push(ExcludedOffer {
                name: offer.name.clone(),
                reason: "Duplicate offer name".into(),
            });
            continue;
        }
        match evaluate_offer(offer, annual_income) {
            Ok(result) => {
                seen.insert(offer.name.as_str());
                results.push(result);
            }
            Err(e) => {
                warn!("offer '{}' excluded: {}", offer.name, e);
                excluded.push(ExcludedOffer {
                    name: offer.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    // sort_by is stable, so equal ROCE keeps input order.
    results.sort_by(|a, b| b.roce.expected.ratio.cmp(&a.roce.expected.ratio));

    Comparison { results, excluded }
}

/// Full comparison run with income resolution and property context.
pub fn compare_offers(
    input: &ComparisonInput,
) -> MortgageResult<ComputationOutput<ComparisonReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.offers.is_empty() {
        return Err(MortgageError::InsufficientData(
            "At least one loan offer is required".into(),
        ));
    }
    let annual_income = resolve_annual_income(input)?;
    if let Some(price) = input.property_price {
        if price < Decimal::ZERO {
            return Err(MortgageError::invalid(
                "property_price",
                "Property price cannot be negative",
            ));
        }
    }

    let Comparison {
        mut results,
        excluded,
    } = compare(&input.offers, annual_income);

    let property_price = input.property_price.filter(|p| *p > Decimal::ZERO);
    if let Some(price) = property_price {
        for result in &mut results {
            result.loan_to_value = result
                .offer
                .principal
                .checked_div(price)
                .and_then(|v| v.checked_mul(dec!(100)));
            if result.loan_to_value.is_none() {
                warnings.push(format!(
                    "Offer '{}': loan-to-value is out of range for this property price",
                    result.offer.name
                ));
            }
        }
    }

    for ex in &excluded {
        warnings.push(format!("Offer '{}' excluded: {}", ex.name, ex.reason));
    }
    for result in &results {
        if !result.roce.expected.ratio.is_finite() {
            warnings.push(format!(
                "Offer '{}' has no or negligible capital contributed: ROCE is unbounded",
                result.offer.name
            ));
        }
    }
    if results.is_empty() {
        warnings.push("No offer could be evaluated".into());
    }

    let report = ComparisonReport {
        annual_income,
        monthly_rental_income: input.monthly_rental_income,
        property_price: input.property_price,
        gross_rental_yield: property_price
            .and_then(|p| annual_income.checked_div(p))
            .and_then(|v| v.checked_mul(dec!(100))),
        best_offer: results.first().map(|r| r.offer.name.clone()),
        results,
        excluded,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Mortgage Offer Comparison (ROCE under max / average / min yearly interest)",
        input,
        warnings,
        elapsed,
        report,
    ))
}

fn resolve_annual_income(input: &ComparisonInput) -> MortgageResult<Money> {
    let income = match (input.annual_income, input.monthly_rental_income) {
        (Some(annual), None) => annual,
        (None, Some(monthly)) => monthly
            .checked_mul(Decimal::from(PERIODS_PER_YEAR))
            .ok_or_else(|| {
                MortgageError::invalid("monthly_rental_income", "Yearly income overflows")
            })?,
        (Some(_), Some(_)) => {
            return Err(MortgageError::InsufficientData(
                "Provide either annual_income or monthly_rental_income, not both".into(),
            ))
        }
        (None, None) => {
            return Err(MortgageError::InsufficientData(
                "annual_income or monthly_rental_income is required".into(),
            ))
        }
    };
    if income < Decimal::ZERO {
        return Err(MortgageError::invalid("annual_income", "Income cannot be negative"));
    }
    Ok(income)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roce::metric::Roce;
    use rust_decimal_macros::dec;

    fn offer(name: &str, rate: Decimal, fees: Decimal) -> LoanOffer {
        LoanOffer {
            name: name.into(),
            principal: dec!(74200),
            annual_rate: rate,
            term_years: 25,
            periodic_fees: fees,
            capital_contributed: dec!(32450),
        }
    }

    fn finite(r: Roce) -> Decimal {
        r.finite().expect("finite ROCE")
    }

    #[test]
    fn test_scenarios_not_swapped() {
        let result = evaluate_offer(&offer("A", dec!(3.5), dec!(150)), dec!(8100)).unwrap();
        let worst = finite(result.roce.worst.ratio);
        let expected = finite(result.roce.expected.ratio);
        let best = finite(result.roce.best.ratio);
        assert!(worst < expected && expected < best);
        assert!((worst - dec!(11.5043)).abs() < dec!(0.001));
        assert!((expected - dec!(14.8242)).abs() < dec!(0.001));
        assert!((best - dec!(19.1576)).abs() < dec!(0.001));
    }

    #[test]
    fn test_annual_figures() {
        let result = evaluate_offer(&offer("A", dec!(3.5), dec!(150)), dec!(8100)).unwrap();
        assert_eq!(result.annual_fees, dec!(1800));
        // Whole-year term: average principal per year is principal / term.
        assert!((result.annual_principal_equivalent - dec!(2968)).abs() < dec!(0.000001));
        assert_eq!(result.lifetime_interest, result.interest.lifetime_total);
        assert_eq!(result.first_year_interest, result.interest.maximum);
    }

    #[test]
    fn test_lower_fees_outrank_slightly_lower_rate() {
        let offers = vec![
            offer("A", dec!(3.5), dec!(150)),
            offer("B", dec!(3.55), dec!(90)),
        ];
        let cmp = compare(&offers, dec!(8100));
        assert_eq!(cmp.results[0].offer.name, "B");
        assert_eq!(cmp.results[1].offer.name, "A");
        assert!(cmp.excluded.is_empty());
    }

    #[test]
    fn test_ties_keep_input_order() {
        let offers = vec![
            offer("first", dec!(3), dec!(100)),
            offer("second", dec!(3), dec!(100)),
        ];
        let cmp = compare(&offers, dec!(8100));
        assert_eq!(cmp.results[0].offer.name, "first");
        assert_eq!(cmp.results[1].offer.name, "second");
    }

    #[test]
    fn test_failing_offer_excluded() {
        let mut bad = offer("bad", dec!(3), dec!(100));
        bad.term_years = 0;
        let offers = vec![bad, offer("good", dec!(3), dec!(100))];
        let cmp = compare(&offers, dec!(8100));
        assert_eq!(cmp.results.len(), 1);
        assert_eq!(cmp.results[0].offer.name, "good");
        assert_eq!(cmp.excluded.len(), 1);
        assert_eq!(cmp.excluded[0].name, "bad");
        assert!(cmp.excluded[0].reason.contains("term_years"));
    }

    #[test]
    fn test_duplicate_name_excluded() {
        let offers = vec![
            offer("A", dec!(3), dec!(100)),
            offer("A", dec!(2), dec!(10)),
        ];
        let cmp = compare(&offers, dec!(8100));
        assert_eq!(cmp.results.len(), 1);
        assert_eq!(cmp.results[0].offer.annual_rate, dec!(3));
        assert_eq!(cmp.excluded[0].reason, "Duplicate offer name");
    }

    #[test]
    fn test_invalid_offer_does_not_claim_its_name() {
        let mut bad = offer("A", dec!(3), dec!(100));
        bad.term_years = 0;
        let offers = vec![bad, offer("A", dec!(2), dec!(10))];
        let cmp = compare(&offers, dec!(8100));
        assert_eq!(cmp.results.len(), 1);
        assert_eq!(cmp.results[0].offer.annual_rate, dec!(2));
        assert_eq!(cmp.excluded.len(), 1);
        assert!(cmp.excluded[0].reason.contains("term_years"));
    }

    #[test]
    fn test_overflowing_offer_excluded() {
        let mut steep = offer("steep", dec!(20), dec!(100));
        steep.principal = dec!(7_000_000_000_000_000_000_000_000_000);
        steep.term_years = 50;
        let mut long = offer("long", dec!(3), dec!(100));
        long.term_years = 300_000_000;
        let mut huge_fees = offer("fees", dec!(3), dec!(70_000_000_000_000_000_000_000_000_000));
        huge_fees.principal = dec!(1000);
        let offers = vec![steep, long, huge_fees, offer("good", dec!(3.5), dec!(150))];
        let cmp = compare(&offers, dec!(8100));
        assert_eq!(cmp.results.len(), 1);
        assert_eq!(cmp.results[0].offer.name, "good");
        let names: Vec<&str> = cmp.excluded.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["steep", "long", "fees"]);
        assert!(cmp.excluded[1].reason.contains("term_years"));
        assert!(cmp.excluded[2].reason.contains("periodic_fees"));
    }

    #[test]
    fn test_negative_fees_excluded() {
        let offers = vec![offer("A", dec!(3), dec!(-1))];
        let cmp = compare(&offers, dec!(8100));
        assert!(cmp.results.is_empty());
        assert!(cmp.excluded[0].reason.contains("periodic_fees"));
    }

    #[test]
    fn test_monthly_income_resolved() {
        let input = ComparisonInput {
            offers: vec![offer("A", dec!(3.5), dec!(150))],
            annual_income: None,
            monthly_rental_income: Some(dec!(675)),
            property_price: Some(dec!(106650)),
        };
        let report = compare_offers(&input).unwrap().result;
        assert_eq!(report.annual_income, dec!(8100));
        assert_eq!(report.best_offer.as_deref(), Some("A"));
        let yield_pct = report.gross_rental_yield.unwrap();
        assert!((yield_pct - dec!(7.5949)).abs() < dec!(0.001));
        let ltv = report.results[0].loan_to_value.unwrap();
        assert!((ltv - dec!(69.5734)).abs() < dec!(0.001));
    }

    #[test]
    fn test_income_must_be_unambiguous() {
        let mut input = ComparisonInput {
            offers: vec![offer("A", dec!(3.5), dec!(150))],
            annual_income: Some(dec!(8100)),
            monthly_rental_income: Some(dec!(675)),
            property_price: None,
        };
        assert!(matches!(
            compare_offers(&input),
            Err(MortgageError::InsufficientData(_))
        ));
        input.annual_income = None;
        input.monthly_rental_income = None;
        assert!(compare_offers(&input).is_err());
    }

    #[test]
    fn test_tiny_property_price_does_not_panic() {
        let input = ComparisonInput {
            offers: vec![offer("A", dec!(3.5), dec!(150))],
            annual_income: Some(dec!(8100)),
            monthly_rental_income: None,
            property_price: Some(dec!(0.0000000000000000000000000001)),
        };
        let out = compare_offers(&input).unwrap();
        assert!(out.result.results[0].loan_to_value.is_none());
        assert!(out.result.gross_rental_yield.is_none());
        assert!(out.warnings.iter().any(|w| w.contains("loan-to-value")));
    }

    #[test]
    fn test_empty_offer_list_rejected() {
        let input = ComparisonInput {
            offers: vec![],
            annual_income: Some(dec!(8100)),
            monthly_rental_income: None,
            property_price: None,
        };
        assert!(matches!(
            compare_offers(&input),
            Err(MortgageError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_report_warns_for_excluded_and_unbounded() {
        let mut free = offer("free", dec!(3), dec!(0));
        free.capital_contributed = Decimal::ZERO;
        let mut broken = offer("broken", dec!(3), dec!(0));
        broken.principal = dec!(-5);
        let input = ComparisonInput {
            offers: vec![broken, free],
            annual_income: Some(dec!(8100)),
            monthly_rental_income: None,
            property_price: None,
        };
        let out = compare_offers(&input).unwrap();
        assert_eq!(out.warnings.len(), 2);
        assert!(out.warnings[0].contains("broken"));
        assert!(out.warnings[1].contains("unbounded"));
        assert_eq!(out.result.best_offer.as_deref(), Some("free"));
        assert!(out.result.gross_rental_yield.is_none());
    }
}

use mortgage_roce_core::amortization::{interest, payment, schedule, statistics};
use mortgage_roce_core::MortgageError;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Payment calculator
// ===========================================================================

#[test]
fn test_zero_rate_payment_is_exact() {
    let terms = payment::compute_payment(dec!(12000), dec!(0), 10).unwrap();
    assert_eq!(terms.periodic_payment, dec!(100));
    assert_eq!(terms.number_of_periods, 120);
}

#[test]
fn test_reference_mortgage() {
    // 74,200 at 3.5% over 25 years
    let terms = payment::compute_payment(dec!(74200), dec!(3.5), 25).unwrap();
    assert!((terms.periodic_rate - dec!(0.0029167)).abs() < dec!(0.0000001));
    assert!((terms.periodic_payment - dec!(371.40)).abs() < dec!(0.5));

    let am = schedule::simulate(
        dec!(74200),
        terms.periodic_payment,
        terms.number_of_periods,
        terms.periodic_rate,
    );
    assert_eq!(am.points.len(), 300);
    assert!(am.final_balance().unwrap().abs() < dec!(0.000001));
    // First-year interest on the declining balance
    assert!((am.annual_interest[0] - dec!(2566.86)).abs() < dec!(0.01));
}

#[test]
fn test_invalid_parameters_are_typed() {
    for (principal, rate, years) in [
        (dec!(-100), dec!(3), 10),
        (dec!(100), dec!(-3), 10),
        (dec!(100), dec!(3), 0),
    ] {
        let err = payment::compute_payment(principal, rate, years).unwrap_err();
        assert!(
            matches!(err, MortgageError::InvalidLoanParameters { .. }),
            "unexpected error {err:?}"
        );
    }
}

// ===========================================================================
// Simulator and aggregator
// ===========================================================================

#[test]
fn test_series_feeds_statistics() {
    let terms = payment::compute_payment(dec!(200000), dec!(4.2), 30).unwrap();
    let am = schedule::simulate(
        dec!(200000),
        terms.periodic_payment,
        terms.number_of_periods,
        terms.periodic_rate,
    );
    let stats = statistics::summarize(&am.annual_interest, am.total_interest).unwrap();

    assert_eq!(am.annual_interest.len(), 30);
    assert_eq!(stats.maximum, am.annual_interest[0]);
    assert_eq!(stats.minimum, am.annual_interest[29]);
    assert_eq!(stats.lifetime_total, am.total_interest);
    // Lifetime interest = total payments - principal
    let paid = terms.periodic_payment * Decimal::from(terms.number_of_periods);
    assert!((am.total_interest - (paid - dec!(200000))).abs() < dec!(0.0001));
}

#[test]
fn test_prorated_series_keeps_true_lifetime_total() {
    let am = schedule::simulate(dec!(10000), dec!(582.3173052968904), 18, dec!(0.005));
    let stats = statistics::summarize(&am.annual_interest, am.total_interest).unwrap();
    let series_sum: Decimal = am.annual_interest.iter().copied().sum();
    assert!(series_sum > stats.lifetime_total);
    assert!((stats.lifetime_total - dec!(481.71)).abs() < dec!(0.01));
}

#[test]
fn test_interest_analysis_envelope() {
    let input = payment::PaymentInput {
        principal: dec!(74200),
        annual_rate: dec!(3.5),
        term_years: 25,
    };
    let out = interest::analyze_interest(&input).unwrap();
    assert_eq!(out.result.annual_interest.len(), 25);
    assert_eq!(out.result.number_of_periods, 300);
    assert!(out.methodology.contains("Amortisation"));
}

#[test]
fn test_limits_reject_instead_of_panicking() {
    let too_long = payment::PaymentInput {
        principal: dec!(74200),
        annual_rate: dec!(3.5),
        term_years: 300_000_000,
    };
    assert!(matches!(
        interest::analyze_interest(&too_long),
        Err(MortgageError::InvalidLoanParameters { .. })
    ));

    let too_steep = payment::PaymentInput {
        principal: dec!(74200),
        annual_rate: dec!(20.01),
        term_years: 25,
    };
    assert!(payment::calculate_payment(&too_steep).is_err());

    let at_limits = payment::PaymentInput {
        principal: dec!(74200),
        annual_rate: payment::MAX_ANNUAL_RATE,
        term_years: payment::MAX_TERM_YEARS,
    };
    let out = interest::analyze_interest(&at_limits).unwrap();
    assert_eq!(out.result.annual_interest.len(), 50);
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #[test]
    fn prop_full_amortization(
        principal in 1_000u32..2_000_000,
        rate_bp in 0u32..1_500,
        years in 1u32..=40,
    ) {
        let principal = Decimal::from(principal);
        let rate = Decimal::new(rate_bp as i64, 2);
        let terms = payment::compute_payment(principal, rate, years).unwrap();
        let am = schedule::simulate(
            principal,
            terms.periodic_payment,
            terms.number_of_periods,
            terms.periodic_rate,
        );
        let final_balance = am.final_balance().unwrap();
        prop_assert!(final_balance.abs() < dec!(0.0001), "final balance {}", final_balance);
        prop_assert_eq!(am.annual_interest.len() as u32, years);
    }

    #[test]
    fn prop_payment_splits_exactly(
        principal in 1_000u32..500_000,
        rate_bp in 1u32..1_200,
        years in 1u32..=30,
    ) {
        let principal = Decimal::from(principal);
        let terms = payment::compute_payment(principal, Decimal::new(rate_bp as i64, 2), years).unwrap();
        let am = schedule::simulate(
            principal,
            terms.periodic_payment,
            terms.number_of_periods,
            terms.periodic_rate,
        );
        let mut previous = principal;
        for p in &am.points {
            prop_assert!((p.interest + p.principal - terms.periodic_payment).abs() < dec!(0.0000001));
            prop_assert!(p.remaining_balance <= previous);
            previous = p.remaining_balance;
        }
    }
}

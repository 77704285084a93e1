//! Period-by-period amortisation of a fixed-payment loan, bucketed into
//! per-year interest totals.

use log::debug;
use rust_decimal::Decimal;

use crate::types::{Money, Rate, PERIODS_PER_YEAR};

/// One month of the payment schedule. Recomputed on every run, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulePoint {
    pub period: u32,
    pub interest: Money,
    pub principal: Money,
    pub remaining_balance: Money,
}

/// Interest paid in each year of the loan, in order.
pub type AnnualInterestSeries = Vec<Money>;

/// Result of walking the full schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct Amortization {
    pub points: Vec<SchedulePoint>,
    pub annual_interest: AnnualInterestSeries,
    pub total_interest: Money,
    /// True when the last entry of `annual_interest` was scaled up from a
    /// partial year.
    pub prorated_final_year: bool,
}

impl Amortization {
    pub fn final_balance(&self) -> Option<Money> {
        self.points.last().map(|p| p.remaining_balance)
    }
}

/// Walk `number_of_periods` payments and aggregate interest per year.
///
/// A trailing partial year is prorated to its 12-month equivalent. When no
/// full year completes, the series holds a single entry equal to the total
/// interest paid.
pub fn simulate(
    principal: Money,
    periodic_payment: Money,
    number_of_periods: u32,
    periodic_rate: Rate,
) -> Amortization {
    let mut points = Vec::with_capacity(number_of_periods as usize);
    let mut annual_interest = Vec::with_capacity(
        (number_of_periods / PERIODS_PER_YEAR + 1) as usize,
    );
    let mut balance = principal;
    let mut total_interest = Decimal::ZERO;
    let mut bucket = Decimal::ZERO;
    let mut months_in_bucket: u32 = 0;

    for period in 1..=number_of_periods {
        let interest = balance * periodic_rate;
        let principal_paid = periodic_payment - interest;
        balance -= principal_paid;

        total_interest += interest;
        bucket += interest;
        months_in_bucket += 1;

        points.push(SchedulePoint {
            period,
            interest,
            principal: principal_paid,
            remaining_balance: balance,
        });

        if months_in_bucket == PERIODS_PER_YEAR {
            annual_interest.push(bucket);
            bucket = Decimal::ZERO;
            months_in_bucket = 0;
        }
    }

    let mut prorated_final_year = false;
    if annual_interest.is_empty() {
        annual_interest.push(total_interest);
    } else if months_in_bucket > 0 {
        annual_interest.push(
            bucket / Decimal::from(months_in_bucket) * Decimal::from(PERIODS_PER_YEAR),
        );
        prorated_final_year = true;
    }

    debug!(
        "amortised {} periods: total interest {}, final balance {}",
        number_of_periods, total_interest, balance
    );

    Amortization {
        points,
        annual_interest,
        total_interest,
        prorated_final_year,
    }
}

/// Per-year interest totals for the schedule.
pub fn run(
    principal: Money,
    periodic_payment: Money,
    number_of_periods: u32,
    periodic_rate: Rate,
) -> AnnualInterestSeries {
    simulate(principal, periodic_payment, number_of_periods, periodic_rate).annual_interest
}

/// Lifetime interest paid over the schedule.
pub fn total_interest(
    principal: Money,
    periodic_payment: Money,
    number_of_periods: u32,
    periodic_rate: Rate,
) -> Money {
    simulate(principal, periodic_payment, number_of_periods, periodic_rate).total_interest
}

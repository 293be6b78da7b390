// 📅 Amortization Schedule - Month-by-month payment breakdown
// Splits each payment into interest and principal until the balance clears

use crate::money::round_cents;
use crate::mortgage::{self, MortgageInputs};
use crate::validate::ValidationResult;
use anyhow::{Context, Result};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// SCHEDULE ROW
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Payment number, 1-based
    pub period: u32,

    /// Due date of this payment
    pub date: NaiveDate,

    /// Amount paid this period
    pub payment: f64,

    /// Interest portion of the payment
    pub interest: f64,

    /// Principal portion of the payment
    pub principal: f64,

    /// Remaining balance after this payment
    pub balance: f64,
}

// ============================================================================
// BUILDING
// ============================================================================

/// Expand a mortgage into its full payment schedule.
///
/// Each period accrues one month of interest on the outstanding balance; the
/// final payment is adjusted by the accumulated rounding so the balance lands
/// at exactly 0.00.
pub fn build(
    inputs: &MortgageInputs,
    first_payment: NaiveDate,
) -> ValidationResult<Vec<ScheduleRow>> {
    let quote = mortgage::calculate(inputs)?;

    let monthly_rate = inputs.interest_rate / 100.0 / 12.0;
    let payments = quote.number_of_payments;

    let mut rows = Vec::with_capacity(payments as usize);
    let mut balance = round_cents(quote.principal);

    for period in 1..=payments {
        let date = first_payment
            .checked_add_months(Months::new(period - 1))
            .unwrap_or(first_payment);

        let interest = round_cents(balance * monthly_rate);

        let (payment, principal) = if period == payments {
            // Final payment clears whatever is left
            (round_cents(balance + interest), balance)
        } else {
            let principal = round_cents(quote.monthly_payment - interest);
            (quote.monthly_payment, principal)
        };

        balance = round_cents(balance - principal);

        rows.push(ScheduleRow {
            period,
            date,
            payment,
            interest,
            principal,
            balance,
        });
    }

    Ok(rows)
}

// ============================================================================
// CSV EXPORT
// ============================================================================

/// Write a schedule as CSV with one row per payment
pub fn write_csv<W: std::io::Write>(rows: &[ScheduleRow], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for row in rows {
        wtr.serialize(row)
            .with_context(|| format!("Failed to write schedule row {}", row.period))?;
    }

    wtr.flush().context("Failed to flush schedule CSV")?;
    Ok(())
}

/// Write a schedule to a CSV file at the given path
pub fn write_csv_file<P: AsRef<Path>>(rows: &[ScheduleRow], path: P) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())
        .with_context(|| format!("Failed to create schedule file: {:?}", path.as_ref()))?;
    write_csv(rows, file)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(price: f64, down: f64, rate: f64, years: u32) -> MortgageInputs {
        MortgageInputs {
            home_price: price,
            down_payment: down,
            interest_rate: rate,
            loan_term_years: years,
        }
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_schedule_length_matches_term() {
        let rows = build(&inputs(500000.0, 100000.0, 5.0, 25), start()).unwrap();
        assert_eq!(rows.len(), 300);
        assert_eq!(rows[0].period, 1);
        assert_eq!(rows[299].period, 300);
    }

    #[test]
    fn test_balance_clears_at_the_end() {
        for rate in [0.0, 3.5, 5.0, 9.9] {
            let rows = build(&inputs(500000.0, 100000.0, rate, 25), start()).unwrap();
            assert_eq!(rows.last().unwrap().balance, 0.0, "rate {}", rate);
        }
    }

    #[test]
    fn test_principal_portions_sum_to_principal() {
        let rows = build(&inputs(500000.0, 100000.0, 5.0, 25), start()).unwrap();
        let total: f64 = rows.iter().map(|r| r.principal).sum();
        assert!((total - 400000.0).abs() < 0.01);
    }

    #[test]
    fn test_interest_declines_over_time() {
        let rows = build(&inputs(500000.0, 100000.0, 5.0, 25), start()).unwrap();
        assert!(rows[0].interest > rows[150].interest);
        assert!(rows[150].interest > rows[298].interest);
    }

    #[test]
    fn test_zero_rate_has_no_interest() {
        let rows = build(&inputs(300000.0, 60000.0, 0.0, 30), start()).unwrap();
        assert!(rows.iter().all(|r| r.interest == 0.0));
    }

    #[test]
    fn test_dates_advance_monthly() {
        let rows = build(&inputs(300000.0, 60000.0, 5.0, 5), start()).unwrap();
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(rows[1].date, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(rows[12].date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[test]
    fn test_invalid_inputs_propagate() {
        assert!(build(&inputs(300000.0, 350000.0, 5.0, 25), start()).is_err());
    }

    #[test]
    fn test_csv_export() {
        let rows = build(&inputs(300000.0, 60000.0, 5.0, 5), start()).unwrap();
        let mut buf = Vec::new();
        write_csv(&rows, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "period,date,payment,interest,principal,balance"
        );
        assert_eq!(text.lines().count(), 61); // header + 60 payments
    }
}

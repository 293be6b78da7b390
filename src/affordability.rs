// 🧮 Affordability Calculator - Maximum home price under debt-service caps
// (income, debts, down payment, rate, term) → maximum affordable price

use crate::money::round_dollars;
use crate::validate::{
    check_amount, check_rate, check_term, ValidationError, ValidationResult,
};
use serde::{Deserialize, Serialize};

/// Gross Debt Service cap: housing costs at most 32% of gross income
pub const GDS_CAP: f64 = 0.32;

/// Total Debt Service cap: all debt obligations at most 40% of gross income
pub const TDS_CAP: f64 = 0.40;

// ============================================================================
// POLICY
// ============================================================================

/// Which debt-service rule limits the monthly payment.
///
/// The two variants observed in production disagreed: one applied only the
/// 32% GDS cap (net of existing debts), an earlier revision intersected it
/// with the 40% TDS cap. Both are kept as named, selectable policies until
/// product settles on one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtServicePolicy {
    /// payment cap = monthly income × 32% − monthly debts
    GdsOnly,

    /// payment cap = min(income × 32%, income × 40% − monthly debts)
    GdsAndTds,
}

impl DebtServicePolicy {
    pub fn name(&self) -> &str {
        match self {
            DebtServicePolicy::GdsOnly => "GDS 32%",
            DebtServicePolicy::GdsAndTds => "GDS 32% + TDS 40%",
        }
    }

    /// Maximum supportable monthly housing payment under this policy.
    /// May be negative when debts exhaust the allowance.
    pub fn payment_cap(&self, monthly_income: f64, monthly_debts: f64) -> f64 {
        match self {
            DebtServicePolicy::GdsOnly => monthly_income * GDS_CAP - monthly_debts,
            DebtServicePolicy::GdsAndTds => {
                let gds = monthly_income * GDS_CAP;
                let tds = monthly_income * TDS_CAP - monthly_debts;
                gds.min(tds)
            }
        }
    }
}

// ============================================================================
// INPUTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityInputs {
    /// Gross annual income
    pub annual_income: f64,

    /// Existing monthly debt payments (car loans, student loans, minimums)
    pub monthly_debts: f64,

    /// Cash available up front; added on top of the supportable mortgage
    pub down_payment: f64,

    /// Annual nominal rate as a percent
    pub interest_rate: f64,

    /// Amortization period in years
    pub loan_term_years: u32,
}

impl AffordabilityInputs {
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        check_amount(&mut errors, "annual_income", self.annual_income);
        check_amount(&mut errors, "monthly_debts", self.monthly_debts);
        check_amount(&mut errors, "down_payment", self.down_payment);
        check_rate(&mut errors, "interest_rate", self.interest_rate);
        check_term(&mut errors, "loan_term_years", self.loan_term_years);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// ============================================================================
// ESTIMATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityEstimate {
    /// Maximum home price, rounded to the whole dollar
    pub max_price: f64,

    /// Principal supportable by the payment cap (present value of annuity)
    pub affordable_mortgage: f64,

    /// Monthly payment cap under the selected policy
    pub max_monthly_payment: f64,

    pub policy: DebtServicePolicy,
}

/// Compute the maximum affordable home price under the given policy.
///
/// Reverses the amortization formula: the payment cap is discounted back to
/// a principal with the present value of an annuity, then the down payment
/// is added on top. A cap of zero or less is a reported error, not a
/// negative price.
pub fn calculate(
    inputs: &AffordabilityInputs,
    policy: DebtServicePolicy,
) -> ValidationResult<AffordabilityEstimate> {
    inputs.validate()?;

    let monthly_income = inputs.annual_income / 12.0;
    let payment_cap = policy.payment_cap(monthly_income, inputs.monthly_debts);

    if payment_cap <= 0.0 {
        return Err(vec![ValidationError::negative_affordability(
            "monthly_debts",
            format!(
                "Monthly debts of {:.2} leave no room under the {} cap",
                inputs.monthly_debts,
                policy.name()
            ),
        )]);
    }

    let monthly_rate = inputs.interest_rate / 100.0 / 12.0;
    let number_of_payments = inputs.loan_term_years * 12;

    let affordable_mortgage = if monthly_rate == 0.0 {
        payment_cap * number_of_payments as f64
    } else {
        payment_cap * (1.0 - (1.0 + monthly_rate).powi(-(number_of_payments as i32)))
            / monthly_rate
    };

    Ok(AffordabilityEstimate {
        max_price: round_dollars(affordable_mortgage + inputs.down_payment),
        affordable_mortgage,
        max_monthly_payment: payment_cap,
        policy,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ErrorKind;

    fn inputs(income: f64, debts: f64, down: f64, rate: f64, years: u32) -> AffordabilityInputs {
        AffordabilityInputs {
            annual_income: income,
            monthly_debts: debts,
            down_payment: down,
            interest_rate: rate,
            loan_term_years: years,
        }
    }

    #[test]
    fn test_zero_rate_known_value() {
        // 60k income → 5000/month → GDS cap 1600 − 500 debts = 1100/month
        // 1100 × 300 payments + 20000 down = 350000
        let est = calculate(
            &inputs(60000.0, 500.0, 20000.0, 0.0, 25),
            DebtServicePolicy::GdsOnly,
        )
        .unwrap();
        assert_eq!(est.max_monthly_payment, 1100.0);
        assert_eq!(est.max_price, 350000.0);
    }

    #[test]
    fn test_positive_rate_supports_less_than_zero_rate() {
        let flat = calculate(
            &inputs(100000.0, 500.0, 50000.0, 0.0, 25),
            DebtServicePolicy::GdsAndTds,
        )
        .unwrap();
        let priced = calculate(
            &inputs(100000.0, 500.0, 50000.0, 5.0, 25),
            DebtServicePolicy::GdsAndTds,
        )
        .unwrap();
        assert!(priced.max_price < flat.max_price);
        assert!(priced.max_price > 0.0);
    }

    #[test]
    fn test_monotone_in_income() {
        let mut last = 0.0;
        for income in [50000.0, 75000.0, 100000.0, 150000.0, 250000.0] {
            let est = calculate(
                &inputs(income, 500.0, 50000.0, 5.0, 25),
                DebtServicePolicy::GdsAndTds,
            )
            .unwrap();
            assert!(
                est.max_price >= last,
                "income {} lowered max price to {}",
                income,
                est.max_price
            );
            last = est.max_price;
        }
    }

    #[test]
    fn test_monotone_in_debts() {
        let mut last = f64::MAX;
        for debts in [0.0, 200.0, 500.0, 1000.0, 2000.0] {
            let est = calculate(
                &inputs(100000.0, debts, 50000.0, 5.0, 25),
                DebtServicePolicy::GdsOnly,
            )
            .unwrap();
            assert!(
                est.max_price <= last,
                "debts {} raised max price to {}",
                debts,
                est.max_price
            );
            last = est.max_price;
        }
    }

    #[test]
    fn test_policies_differ_with_low_debts() {
        // With debts below 8% of monthly income the TDS branch is slack, so
        // GdsAndTds allows the full 32% while GdsOnly subtracts the debts.
        let i = inputs(120000.0, 300.0, 0.0, 5.0, 25);
        let gds_only = calculate(&i, DebtServicePolicy::GdsOnly).unwrap();
        let both = calculate(&i, DebtServicePolicy::GdsAndTds).unwrap();
        assert!(both.max_monthly_payment > gds_only.max_monthly_payment);
        assert_eq!(both.max_monthly_payment, 120000.0 / 12.0 * GDS_CAP);
    }

    #[test]
    fn test_tds_binds_with_heavy_debts() {
        // 10000/month income, 2500 debts: TDS cap 4000−2500=1500 < GDS 3200
        let i = inputs(120000.0, 2500.0, 0.0, 5.0, 25);
        let both = calculate(&i, DebtServicePolicy::GdsAndTds).unwrap();
        assert_eq!(both.max_monthly_payment, 1500.0);
    }

    #[test]
    fn test_negative_affordability_is_an_error() {
        // 1000/month income, GDS cap 320, debts 500 → capacity −180
        let result = calculate(
            &inputs(12000.0, 500.0, 10000.0, 5.0, 25),
            DebtServicePolicy::GdsOnly,
        );
        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::NegativeAffordability);
    }

    #[test]
    fn test_zero_income_is_negative_affordability() {
        let result = calculate(
            &inputs(0.0, 0.0, 50000.0, 5.0, 25),
            DebtServicePolicy::GdsAndTds,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_inputs_rejected_before_policy() {
        let errors = calculate(
            &inputs(-100.0, 500.0, 50000.0, 5.0, 0),
            DebtServicePolicy::GdsOnly,
        )
        .unwrap_err();
        assert!(errors.iter().all(|e| e.kind == ErrorKind::InvalidInput));
        assert!(errors.len() >= 2);
    }

    #[test]
    fn test_idempotent() {
        let i = inputs(100000.0, 500.0, 50000.0, 5.0, 25);
        let a = calculate(&i, DebtServicePolicy::GdsAndTds).unwrap();
        let b = calculate(&i, DebtServicePolicy::GdsAndTds).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_down_payment_adds_directly() {
        let without = calculate(
            &inputs(100000.0, 500.0, 0.0, 5.0, 25),
            DebtServicePolicy::GdsAndTds,
        )
        .unwrap();
        let with = calculate(
            &inputs(100000.0, 500.0, 75000.0, 5.0, 25),
            DebtServicePolicy::GdsAndTds,
        )
        .unwrap();
        assert!((with.max_price - without.max_price - 75000.0).abs() <= 1.0);
    }
}

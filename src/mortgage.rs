// 🏠 Mortgage Calculator - Fixed-rate amortization
// (home price, down payment, rate, term) → monthly payment + breakdown

use crate::money::round_cents;
use crate::validate::{
    check_amount, check_rate, check_term, ValidationError, ValidationResult,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// INPUTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortgageInputs {
    /// Purchase price of the home
    pub home_price: f64,

    /// Cash paid up front; must not exceed home_price
    pub down_payment: f64,

    /// Annual nominal rate as a percent (5.0 means 5%)
    pub interest_rate: f64,

    /// Amortization period in years
    pub loan_term_years: u32,
}

impl MortgageInputs {
    /// Check all structural constraints, collecting every violation
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        check_amount(&mut errors, "home_price", self.home_price);
        check_amount(&mut errors, "down_payment", self.down_payment);
        check_rate(&mut errors, "interest_rate", self.interest_rate);
        check_term(&mut errors, "loan_term_years", self.loan_term_years);

        if self.down_payment.is_finite()
            && self.home_price.is_finite()
            && self.down_payment > self.home_price
        {
            errors.push(ValidationError::invalid(
                "down_payment",
                format!(
                    "Must not exceed home price ({} > {})",
                    self.down_payment, self.home_price
                ),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Loan principal after the down payment
    pub fn principal(&self) -> f64 {
        self.home_price - self.down_payment
    }
}

// ============================================================================
// QUOTE
// ============================================================================

/// Derived payment figures for one set of inputs. Pure value, recomputed on
/// every input change, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortgageQuote {
    /// Fixed monthly payment, rounded to the cent
    pub monthly_payment: f64,

    /// Amount financed (home_price - down_payment)
    pub principal: f64,

    /// monthly_payment × number of payments
    pub total_paid: f64,

    /// total_paid - principal
    pub total_interest: f64,

    /// Down payment as a percent of home price (0 when price is 0)
    pub down_payment_pct: f64,

    pub number_of_payments: u32,
}

/// Compute the fixed monthly payment for a fully amortizing loan.
///
/// Zero rate falls back to straight-line principal / payments; otherwise the
/// standard amortization formula P·r·(1+r)^n / ((1+r)^n − 1).
pub fn calculate(inputs: &MortgageInputs) -> ValidationResult<MortgageQuote> {
    inputs.validate()?;

    let principal = inputs.principal();
    let monthly_rate = inputs.interest_rate / 100.0 / 12.0;
    let number_of_payments = inputs.loan_term_years * 12;

    let raw_payment = monthly_payment(principal, monthly_rate, number_of_payments);
    let payment = round_cents(raw_payment);

    let total_paid = round_cents(payment * number_of_payments as f64);
    let down_payment_pct = if inputs.home_price > 0.0 {
        inputs.down_payment / inputs.home_price * 100.0
    } else {
        0.0
    };

    Ok(MortgageQuote {
        monthly_payment: payment,
        principal,
        total_paid,
        total_interest: round_cents(total_paid - principal),
        down_payment_pct,
        number_of_payments,
    })
}

/// Unrounded payment for a principal at a monthly rate over n payments
pub(crate) fn monthly_payment(principal: f64, monthly_rate: f64, payments: u32) -> f64 {
    if payments == 0 {
        return 0.0;
    }

    if monthly_rate == 0.0 {
        return principal / payments as f64;
    }

    let growth = (1.0 + monthly_rate).powi(payments as i32);
    principal * monthly_rate * growth / (growth - 1.0)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ErrorKind;

    fn inputs(price: f64, down: f64, rate: f64, years: u32) -> MortgageInputs {
        MortgageInputs {
            home_price: price,
            down_payment: down,
            interest_rate: rate,
            loan_term_years: years,
        }
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        // 240000 over 360 payments = 666.67/month
        let quote = calculate(&inputs(300000.0, 60000.0, 0.0, 30)).unwrap();
        assert_eq!(quote.monthly_payment, 666.67);
        assert_eq!(quote.principal, 240000.0);
    }

    #[test]
    fn test_known_value_regression() {
        // 400k principal at 5% over 25 years
        let quote = calculate(&inputs(500000.0, 100000.0, 5.0, 25)).unwrap();
        assert_eq!(quote.principal, 400000.0);
        assert_eq!(quote.number_of_payments, 300);
        assert!((quote.monthly_payment - 2338.36).abs() < 0.05);
    }

    #[test]
    fn test_interest_is_paid_when_rate_positive() {
        for rate in [0.5, 2.0, 5.0, 9.9] {
            let quote = calculate(&inputs(500000.0, 100000.0, rate, 25)).unwrap();
            assert!(
                quote.total_paid > quote.principal,
                "total paid {} should exceed principal at rate {}",
                quote.total_paid,
                rate
            );
            assert!(quote.total_interest > 0.0);
        }
    }

    #[test]
    fn test_converges_to_straight_line_as_rate_vanishes() {
        let flat = calculate(&inputs(300000.0, 60000.0, 0.0, 30)).unwrap();
        let tiny = calculate(&inputs(300000.0, 60000.0, 0.0001, 30)).unwrap();
        assert!((tiny.monthly_payment - flat.monthly_payment).abs() < 0.05);
    }

    #[test]
    fn test_term_bounds_produce_finite_payments() {
        // UI slider bounds: 5 and 30 years
        for years in [5, 30] {
            for rate in [0.0, 1.0, 10.0] {
                let quote = calculate(&inputs(500000.0, 100000.0, rate, years)).unwrap();
                assert!(quote.monthly_payment.is_finite());
                assert!(quote.monthly_payment > 0.0);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let a = calculate(&inputs(875000.0, 131250.0, 4.3, 25)).unwrap();
        let b = calculate(&inputs(875000.0, 131250.0, 4.3, 25)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_down_payment_exceeding_price_rejected() {
        let result = calculate(&inputs(300000.0, 350000.0, 5.0, 25));
        let errors = result.unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.field == "down_payment" && e.kind == ErrorKind::InvalidInput));
    }

    #[test]
    fn test_zero_term_rejected() {
        let errors = calculate(&inputs(300000.0, 60000.0, 5.0, 0)).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "loan_term_years"));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let errors = calculate(&inputs(300000.0, 60000.0, -1.0, 25)).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "interest_rate"));
    }

    #[test]
    fn test_non_finite_inputs_collected_together() {
        let errors = calculate(&inputs(f64::NAN, -5.0, f64::INFINITY, 0)).unwrap_err();
        // One error per bad field, reported in a single pass
        assert!(errors.len() >= 4);
    }

    #[test]
    fn test_full_price_down_payment_is_zero_payment() {
        let quote = calculate(&inputs(300000.0, 300000.0, 5.0, 25)).unwrap();
        assert_eq!(quote.monthly_payment, 0.0);
    }

    #[test]
    fn test_down_payment_percentage() {
        let quote = calculate(&inputs(500000.0, 100000.0, 5.0, 25)).unwrap();
        assert!((quote.down_payment_pct - 20.0).abs() < 1e-9);
    }
}

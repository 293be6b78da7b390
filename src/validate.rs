// 📐 Input Validation - Error taxonomy for the calculators
// Bad inputs become reported errors, never NaN or negative output

// ============================================================================
// ERROR KINDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input fails a structural constraint (down payment > home price,
    /// non-positive term, negative or non-finite rate, non-finite amount)
    InvalidInput,

    /// Debt-service-adjusted payment capacity is zero or negative
    NegativeAffordability,
}

impl ErrorKind {
    pub fn name(&self) -> &str {
        match self {
            ErrorKind::InvalidInput => "InvalidInput",
            ErrorKind::NegativeAffordability => "NegativeAffordability",
        }
    }
}

// ============================================================================
// VALIDATION RESULT
// ============================================================================

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub kind: ErrorKind,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError {
            kind: ErrorKind::InvalidInput,
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn negative_affordability(field: &str, message: impl Into<String>) -> Self {
        ValidationError {
            kind: ErrorKind::NegativeAffordability,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.kind.name(), self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// All errors for one computation are collected and returned together so a
/// UI can show every problem at once.
pub type ValidationResult<T> = Result<T, Vec<ValidationError>>;

// ============================================================================
// SHARED FIELD CHECKS
// ============================================================================

/// Require a finite, non-negative currency amount
pub fn check_amount(errors: &mut Vec<ValidationError>, field: &str, value: f64) {
    if !value.is_finite() {
        errors.push(ValidationError::invalid(field, "Must be a finite number"));
    } else if value < 0.0 {
        errors.push(ValidationError::invalid(
            field,
            format!("Must not be negative, got {}", value),
        ));
    }
}

/// Require a finite, non-negative annual percent rate
pub fn check_rate(errors: &mut Vec<ValidationError>, field: &str, rate: f64) {
    if !rate.is_finite() {
        errors.push(ValidationError::invalid(field, "Must be a finite number"));
    } else if rate < 0.0 {
        errors.push(ValidationError::invalid(
            field,
            format!("Must not be negative, got {}", rate),
        ));
    }
}

/// Require a positive loan term in years
pub fn check_term(errors: &mut Vec<ValidationError>, field: &str, years: u32) {
    if years == 0 {
        errors.push(ValidationError::invalid(field, "Must be at least 1 year"));
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_amount_accepts_valid() {
        let mut errors = Vec::new();
        check_amount(&mut errors, "home_price", 500000.0);
        check_amount(&mut errors, "down_payment", 0.0);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_check_amount_rejects_negative() {
        let mut errors = Vec::new();
        check_amount(&mut errors, "home_price", -1.0);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::InvalidInput);
        assert_eq!(errors[0].field, "home_price");
    }

    #[test]
    fn test_check_amount_rejects_non_finite() {
        let mut errors = Vec::new();
        check_amount(&mut errors, "home_price", f64::NAN);
        check_amount(&mut errors, "down_payment", f64::INFINITY);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_check_term_rejects_zero() {
        let mut errors = Vec::new();
        check_term(&mut errors, "loan_term_years", 0);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_display_format() {
        let err = ValidationError::invalid("down_payment", "Must not exceed home price");
        assert_eq!(
            err.to_string(),
            "[InvalidInput] down_payment: Must not exceed home price"
        );
    }
}

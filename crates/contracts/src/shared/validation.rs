//! Validation rules for form fields

/// Validation rules for a field
/// Copy trait for efficient passing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl ValidationRules {
    /// Create empty validation rules (all optional, no constraints)
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Create validation rules for required field
    pub const fn required() -> Self {
        Self {
            required: true,
            ..Self::none()
        }
    }

    /// Numeric value must be `>= 0`
    pub const fn non_negative() -> Self {
        Self {
            min: Some(0.0),
            ..Self::none()
        }
    }

    /// Numeric value must lie in `min..=max`
    pub const fn range(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Self::none()
        }
    }

    pub const fn with_min_length(self, min: usize) -> Self {
        Self {
            min_length: Some(min),
            ..self
        }
    }

    /// Check if field is required
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Only the emptiness check
    pub fn validate_required(&self, value: &str, field_label: &str) -> Result<(), String> {
        if self.required && value.trim().is_empty() {
            return Err(format!("{} is required", field_label));
        }
        Ok(())
    }

    /// Length constraints (empty optional values are not checked)
    pub fn validate_length(&self, value: &str, field_label: &str) -> Result<(), String> {
        if value.is_empty() && !self.required {
            return Ok(());
        }
        let len = value.chars().count();

        if let Some(min) = self.min_length {
            if len < min {
                return Err(format!(
                    "{} must be at least {} characters",
                    field_label, min
                ));
            }
        }

        if let Some(max) = self.max_length {
            if len > max {
                return Err(format!("{} must not exceed {} characters", field_label, max));
            }
        }

        Ok(())
    }

    /// Validate a string value against the rules
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        self.validate_required(value, field_label)?;
        self.validate_length(value, field_label)
    }

    /// Validate a numeric value against min/max rules
    pub fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if !value.is_finite() {
            return Err(format!("{} must be a number", field_label));
        }

        match (self.min, self.max) {
            (Some(min), Some(max)) if value < min || value > max => {
                return Err(format!(
                    "{} must be between {} and {}",
                    field_label, min, max
                ));
            }
            (Some(min), None) if value < min => {
                return Err(format!("{} must be at least {}", field_label, min));
            }
            (None, Some(max)) if value > max => {
                return Err(format!("{} must be at most {}", field_label, max));
            }
            _ => {}
        }

        Ok(())
    }
}

/// Value of a single form field under validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

/// One declared field of a form together with its rules
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCheck<'a> {
    pub label: String,
    pub value: FieldValue<'a>,
    pub rules: ValidationRules,
}

impl<'a> FieldCheck<'a> {
    pub fn text(label: impl Into<String>, value: &'a str, rules: ValidationRules) -> Self {
        Self {
            label: label.into(),
            value: FieldValue::Text(value),
            rules,
        }
    }

    pub fn number(label: impl Into<String>, value: f64, rules: ValidationRules) -> Self {
        Self {
            label: label.into(),
            value: FieldValue::Number(value),
            rules,
        }
    }
}

/// Runs the checks in two passes and returns the first failure.
///
/// Pass one: required fields, in declaration order.
/// Pass two: length and numeric range constraints, in declaration order.
pub fn validate_fields(checks: &[FieldCheck<'_>]) -> Result<(), String> {
    for check in checks {
        if let FieldValue::Text(value) = check.value {
            check.rules.validate_required(value, &check.label)?;
        }
    }

    for check in checks {
        match check.value {
            FieldValue::Text(value) => check.rules.validate_length(value, &check.label)?,
            FieldValue::Number(value) => check.rules.validate_number(value, &check.label)?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        let rules = ValidationRules::required();
        assert!(rules.validate_string("  ", "Name").is_err());
        assert!(rules.validate_string("Dr. A", "Name").is_ok());
        assert!(ValidationRules::none().validate_string("", "Email").is_ok());
    }

    #[test]
    fn test_number_range_is_inclusive() {
        let rules = ValidationRules::range(0.0, 100.0);
        assert!(rules.validate_number(0.0, "Commission").is_ok());
        assert!(rules.validate_number(100.0, "Commission").is_ok());
        assert_eq!(
            rules.validate_number(100.5, "Commission"),
            Err("Commission must be between 0 and 100".to_string())
        );
        assert!(rules.validate_number(f64::NAN, "Commission").is_err());
    }

    #[test]
    fn test_required_pass_runs_before_ranges() {
        let checks = [
            FieldCheck::number("Price", -1.0, ValidationRules::non_negative()),
            FieldCheck::text("Name", "", ValidationRules::required()),
            FieldCheck::text("Code", "", ValidationRules::required()),
        ];
        assert_eq!(validate_fields(&checks), Err("Name is required".to_string()));
    }

    #[test]
    fn test_ranges_in_declaration_order() {
        let checks = [
            FieldCheck::text("Username", "ab", ValidationRules::required().with_min_length(3)),
            FieldCheck::number("Price", -1.0, ValidationRules::non_negative()),
        ];
        assert_eq!(
            validate_fields(&checks),
            Err("Username must be at least 3 characters".to_string())
        );
    }
}

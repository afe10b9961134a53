//! Declarative field validation for create/update parameters.
//!
//! Each parameter type declares a static table of [`FieldRule`]s. [`Validate::validate`] runs
//! the whole table plus any cross-field checks and reports every violation at once.

use crate::server::error::validation::{FieldViolation, ValidationError};

/// A check applied to one field, reading the field through an accessor.
pub enum Rule<T> {
    /// String must contain a non-whitespace character.
    NonEmpty(fn(&T) -> &str),
    /// Accessor reports whether the value is present.
    Required(fn(&T) -> bool),
    /// Number must be greater than zero.
    Positive(fn(&T) -> i64),
    /// Number must lie within `min..=max`.
    Range {
        value: fn(&T) -> f64,
        min: f64,
        max: f64,
    },
    /// String must be one of `allowed`.
    OneOf {
        value: fn(&T) -> &str,
        allowed: &'static [&'static str],
    },
    /// Optional string must look like an e-mail address when present.
    Email(fn(&T) -> Option<&str>),
}

/// A rule bound to the JSON name of the field it checks.
pub struct FieldRule<T> {
    pub field: &'static str,
    pub rule: Rule<T>,
}

impl<T> FieldRule<T> {
    /// Returns the violation message if `value` breaks the rule.
    pub fn check(&self, value: &T) -> Option<FieldViolation> {
        let message = match &self.rule {
            Rule::NonEmpty(get) => get(value)
                .trim()
                .is_empty()
                .then(|| "must not be empty".to_string()),
            Rule::Required(is_present) => (!is_present(value)).then(|| "is required".to_string()),
            Rule::Positive(get) => (get(value) <= 0).then(|| "must be positive".to_string()),
            Rule::Range { value: get, min, max } => {
                let number = get(value);
                (number.is_nan() || number < *min || number > *max)
                    .then(|| format!("must be between {} and {}", min, max))
            }
            Rule::OneOf { value: get, allowed } => {
                let actual = get(value);
                (!allowed.iter().any(|candidate| *candidate == actual))
                    .then(|| format!("must be one of [{}]", allowed.join(", ")))
            }
            Rule::Email(get) => get(value)
                .filter(|email| !is_email(email))
                .map(|_| "must be a valid e-mail address".to_string()),
        }?;

        Some(FieldViolation::new(self.field, message))
    }
}

pub trait Validate: Sized + 'static {
    /// Per-field constraints, checked in order.
    const RULES: &'static [FieldRule<Self>];

    /// Checks spanning several fields or nested values.
    fn check_nested(&self, _violations: &mut Vec<FieldViolation>) {}

    fn validate(&self) -> Result<(), ValidationError> {
        let mut violations: Vec<FieldViolation> = Self::RULES
            .iter()
            .filter_map(|rule| rule.check(self))
            .collect();
        self.check_nested(&mut violations);

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }
}

/// Unwraps a value whose presence validation already guaranteed.
pub fn present<T>(field: &str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::single(field, "is required"))
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

//! Reusable field rules
//!
//! Rules are declared on schema fields and evaluated against the JSON form
//! of the working copy. A rule only judges values of the shape it
//! understands: `Min` ignores strings, `MaxLength` ignores numbers, and every
//! rule except `Required` lets a missing value through.

use regex::Regex;
use serde_json::Value;
use std::fmt;

use super::FieldViolation;

/// A single declarative constraint on a field
#[derive(Clone)]
pub enum Rule {
    /// Value must be present: not null, not an empty string, not an empty list
    Required,
    /// Value must be a number or a string that parses as one
    Numeric,
    /// Value must be an integral number
    Integer,
    /// Numeric lower bound (inclusive)
    Min(f64),
    /// Numeric upper bound (inclusive)
    Max(f64),
    /// Minimum string length in characters
    MinLength(usize),
    /// Maximum string length in characters
    MaxLength(usize),
    /// String must match the pattern
    Pattern(Regex),
    /// String must be one of the listed values
    OneOf(Vec<String>),
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Pattern(re) => write!(f, "Pattern({})", re.as_str()),
            other => write!(f, "{}", other.name()),
        }
    }
}

impl Rule {
    /// Build a `Pattern` rule, failing on an invalid expression
    pub fn pattern(expr: &str) -> Result<Self, regex::Error> {
        Regex::new(expr).map(Rule::Pattern)
    }

    /// Stable rule name, used as the key of a violation
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Numeric => "numeric",
            Rule::Integer => "integer",
            Rule::Min(_) => "min",
            Rule::Max(_) => "max",
            Rule::MinLength(_) => "minLength",
            Rule::MaxLength(_) => "maxLength",
            Rule::Pattern(_) => "pattern",
            Rule::OneOf(_) => "oneOf",
        }
    }

    /// Evaluate the rule for `field`
    pub fn check(&self, field: &str, value: &Value) -> Result<(), FieldViolation> {
        if is_missing(value) {
            return match self {
                Rule::Required => Err(self.violation(field, "This field is required.".into())),
                _ => Ok(()),
            };
        }

        match self {
            Rule::Required => Ok(()),

            Rule::Numeric => match as_number(value) {
                Some(_) => Ok(()),
                None => Err(self.violation(field, "This field should be a number.".into())),
            },

            Rule::Integer => match as_number(value) {
                Some(n) if n.fract() == 0.0 => Ok(()),
                Some(_) => Err(self.violation(field, "This field should be an integer.".into())),
                None => Ok(()),
            },

            Rule::Min(min) => match as_number(value) {
                Some(n) if n < *min => Err(self.violation(
                    field,
                    format!("This field should be at least {min}."),
                )),
                _ => Ok(()),
            },

            Rule::Max(max) => match as_number(value) {
                Some(n) if n > *max => Err(self.violation(
                    field,
                    format!("This field cannot be more than {max}."),
                )),
                _ => Ok(()),
            },

            Rule::MinLength(min) => match value.as_str() {
                Some(s) if s.chars().count() < *min => Err(self.violation(
                    field,
                    format!("This field is required to be at least {min} characters."),
                )),
                _ => Ok(()),
            },

            Rule::MaxLength(max) => match value.as_str() {
                Some(s) if s.chars().count() > *max => Err(self.violation(
                    field,
                    format!("This field cannot be longer than {max} characters."),
                )),
                _ => Ok(()),
            },

            Rule::Pattern(re) => match value.as_str() {
                Some(s) if !re.is_match(s) => Err(self.violation(
                    field,
                    format!("This field should follow pattern {}.", re.as_str()),
                )),
                _ => Ok(()),
            },

            Rule::OneOf(allowed) => match value.as_str() {
                Some(s) if !allowed.iter().any(|a| a == s) => Err(self.violation(
                    field,
                    format!("This field should be one of: {}.", allowed.join(", ")),
                )),
                _ => Ok(()),
            },
        }
    }

    fn violation(&self, field: &str, message: String) -> FieldViolation {
        FieldViolation {
            field: field.to_string(),
            rule: self.name(),
            message,
        }
    }
}

fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

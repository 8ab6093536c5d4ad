//! Declarative validation of working copies
//!
//! Each schema field carries a list of [`Rule`]s. The whole working copy is
//! serialised to JSON and every rule is evaluated; the outcome is a
//! [`ValidationReport`] that the update controller keeps next to the form.

pub mod rules;

pub use rules::Rule;

use serde::Serialize;

/// One failed rule on one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule: &'static str,
    pub message: String,
}

/// Result of validating a record against its schema
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    violations: Vec<FieldViolation>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: FieldViolation) {
        self.violations.push(violation);
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Violations for a single field, in rule declaration order
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldViolation> {
        self.violations.iter().filter(move |v| v.field == field)
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.for_field(field).next().is_some()
    }

    /// `field: message; field: message`
    pub fn summary(&self) -> String {
        self.violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

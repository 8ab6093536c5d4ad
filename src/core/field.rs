//! Field and relationship descriptors

use crate::core::validation::Rule;
use serde_json::Value;

/// Wire/editing kind of a scalar field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Boolean,
    /// Calendar date, `YYYY-MM-DD` on the wire
    Date,
    /// Point in time, RFC 3339 on the wire
    Instant,
    Uuid,
    /// String restricted to the listed constants
    Enum(Vec<String>),
}

/// A scalar attribute of an entity
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// JSON property name (camelCase)
    pub name: String,
    pub kind: FieldKind,
    pub rules: Vec<Rule>,
    /// Server-managed; form binding refuses to set it
    pub read_only: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            rules: Vec::new(),
            read_only: false,
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn required(self) -> Self {
        self.rule(Rule::Required)
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn is_required(&self) -> bool {
        self.rules.iter().any(|r| matches!(r, Rule::Required))
    }
}

/// How many targets a relationship holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Single nested object (`many-to-one`, `one-to-one`)
    One,
    /// List of nested objects (`many-to-many`)
    Many,
}

/// A reference from one entity to another, edited through a select input
#[derive(Debug, Clone)]
pub struct RelationshipDescriptor {
    /// JSON property holding the nested object(s)
    pub name: String,
    /// Target entity name (snake_case)
    pub target: String,
    pub cardinality: Cardinality,
    /// Key property of the target, used to match options
    pub key_field: String,
    /// Property shown in select inputs
    pub display_field: String,
    pub required: bool,
}

impl RelationshipDescriptor {
    pub fn one(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(name, target, Cardinality::One)
    }

    pub fn many(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(name, target, Cardinality::Many)
    }

    fn new(name: impl Into<String>, target: impl Into<String>, cardinality: Cardinality) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            cardinality,
            key_field: "id".to_string(),
            display_field: "id".to_string(),
            required: false,
        }
    }

    pub fn key_field(mut self, field: impl Into<String>) -> Self {
        self.key_field = field.into();
        self
    }

    pub fn display(mut self, field: impl Into<String>) -> Self {
        self.display_field = field.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Key of an option or reference object, rendered as a string
    pub fn key_of(&self, object: &Value) -> Option<String> {
        match object.get(&self.key_field)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

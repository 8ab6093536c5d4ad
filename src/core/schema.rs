//! Entity schemas: the metadata that drives the generic CRUD engine

use crate::core::field::{Cardinality, FieldDescriptor, FieldKind, RelationshipDescriptor};
use crate::core::pluralize::{resource_path, to_camel_case, to_kebab_case, to_snake_case};
use crate::core::validation::{FieldViolation, ValidationReport};
use serde_json::Value;

/// Authority required by default to reach an entity's screens
pub const DEFAULT_AUTHORITY: &str = "ROLE_USER";

/// Describes one entity type: its fields, rules and relationships
#[derive(Debug, Clone)]
pub struct EntitySchema {
    name: String,
    plural: String,
    id_field: String,
    fields: Vec<FieldDescriptor>,
    relationships: Vec<RelationshipDescriptor>,
    searchable: bool,
    authority: String,
}

impl EntitySchema {
    /// Start a schema for a snake_case entity name
    pub fn builder(name: &str) -> EntitySchemaBuilder {
        let name = to_snake_case(name);
        EntitySchemaBuilder {
            schema: EntitySchema {
                plural: resource_path(&name),
                name,
                id_field: "id".to_string(),
                fields: Vec::new(),
                relationships: Vec::new(),
                searchable: false,
                authority: DEFAULT_AUTHORITY.to_string(),
            },
        }
    }

    /// snake_case singular name, e.g. `working_unit`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// REST collection segment, e.g. `working-units`
    pub fn plural(&self) -> &str {
        &self.plural
    }

    /// Route segment, e.g. `working-unit`
    pub fn route_segment(&self) -> String {
        to_kebab_case(&self.name)
    }

    /// Translation key segment, e.g. `workingUnit`
    pub fn i18n_key(&self) -> String {
        to_camel_case(&self.name)
    }

    /// JSON property holding the identifier
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn relationships(&self) -> &[RelationshipDescriptor] {
        &self.relationships
    }

    pub fn relationship(&self, name: &str) -> Option<&RelationshipDescriptor> {
        self.relationships.iter().find(|r| r.name == name)
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Names of the `Instant` fields, the ones edited through date-time inputs
    pub fn instant_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.kind == FieldKind::Instant)
            .map(|f| f.name.as_str())
    }

    /// Evaluate every field rule and required relationship against `record`
    ///
    /// Absent properties are treated as null.
    pub fn validate(&self, record: &Value) -> ValidationReport {
        let mut report = ValidationReport::new();

        for field in &self.fields {
            let value = record.get(&field.name).unwrap_or(&Value::Null);
            for rule in &field.rules {
                if let Err(violation) = rule.check(&field.name, value) {
                    report.push(violation);
                }
            }
        }

        for rel in self.relationships.iter().filter(|r| r.required) {
            let present = match (rel.cardinality, record.get(&rel.name)) {
                (Cardinality::One, Some(v)) => v.is_object(),
                (Cardinality::Many, Some(Value::Array(items))) => !items.is_empty(),
                _ => false,
            };
            if !present {
                report.push(FieldViolation {
                    field: rel.name.clone(),
                    rule: "required",
                    message: "This field is required.".to_string(),
                });
            }
        }

        report
    }
}

/// Fluent builder for [`EntitySchema`]
pub struct EntitySchemaBuilder {
    schema: EntitySchema,
}

impl EntitySchemaBuilder {
    /// Override the derived REST collection segment
    pub fn plural(mut self, plural: impl Into<String>) -> Self {
        self.schema.plural = plural.into();
        self
    }

    /// Use a business key instead of `id`
    pub fn id_field(mut self, field: impl Into<String>) -> Self {
        self.schema.id_field = field.into();
        self
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.schema.fields.push(field);
        self
    }

    pub fn relationship(mut self, relationship: RelationshipDescriptor) -> Self {
        self.schema.relationships.push(relationship);
        self
    }

    /// The backend exposes `/_search` for this entity
    pub fn searchable(mut self) -> Self {
        self.schema.searchable = true;
        self
    }

    pub fn authority(mut self, authority: impl Into<String>) -> Self {
        self.schema.authority = authority.into();
        self
    }

    pub fn build(self) -> EntitySchema {
        self.schema
    }
}

//! Entities and the document value model
//!
//! An [`Entity`] is a named document: an entity type name plus an ordered
//! set of field values. Construction never fails; validation is a separate,
//! explicit step (see [`crate::schema::SchemaValidator`]).
//!
//! Field order is insertion order. The validator reports unknown fields in
//! this order, so documents keep it rather than sorting keys.

use std::fmt;

use serde_json::Value;

use crate::schema::{ConstraintResult, SchemaRegistry, SchemaValidator};

/// A value stored in a document field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Unset value. Treated the same as a missing field by the validator.
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<FieldValue>),
    /// Plain, untyped sub-document.
    Object(Document),
    /// Schema-bound nested entity.
    Entity(Entity),
}

impl FieldValue {
    /// Returns true for values the validator treats as absent.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            FieldValue::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    pub fn as_entity_mut(&mut self) -> Option<&mut Entity> {
        match self {
            FieldValue::Entity(entity) => Some(entity),
            _ => None,
        }
    }
}

/// Renders values the way they appear inside a choice list.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write_number(f, *n),
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            FieldValue::Object(_) => write!(f, "[object Object]"),
            FieldValue::Entity(entity) => write!(f, "{}", entity.entity_type()),
        }
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    // Integral values print without a fractional part: 2, not 2.0
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{}", n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Number(f64::from(n))
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<Entity> for FieldValue {
    fn from(entity: Entity) -> Self {
        FieldValue::Entity(entity)
    }
}

impl From<Document> for FieldValue {
    fn from(document: Document) -> Self {
        FieldValue::Object(document)
    }
}

/// JSON objects become plain [`FieldValue::Object`] sub-documents. JSON
/// carries no entity type information, so nested entities must be attached
/// with [`Entity::set`].
impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            // as_f64 only fails for arbitrary-precision numbers, which
            // serde_json is not built with here
            Value::Number(n) => FieldValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => FieldValue::String(s),
            Value::Array(items) => FieldValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => FieldValue::Object(Document::from_json_map(map)),
        }
    }
}

/// Ordered field-name → value mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: Vec<(String, FieldValue)>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a document from a JSON value.
    ///
    /// Anything other than a JSON object yields an empty document.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::from_json_map(map),
            _ => Self::new(),
        }
    }

    fn from_json_map(map: serde_json::Map<String, Value>) -> Self {
        map.into_iter()
            .map(|(key, value)| (key, FieldValue::from(value)))
            .collect()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(name, _)| name == field).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut FieldValue> {
        self.fields
            .iter_mut()
            .find(|(name, _)| name == field)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == field)
    }

    /// Sets a field. An existing field keeps its position.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        let field = field.into();
        let value = value.into();
        match self.get_mut(&field) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((field, value));
                None
            }
        }
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        let idx = self.fields.iter().position(|(name, _)| name == field)?;
        Some(self.fields.remove(idx).1)
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut document = Document::new();
        for (key, value) in iter {
            document.insert(key, value);
        }
        document
    }
}

/// A named, schema-bound document.
///
/// Entities hold exactly the fields they were built with and stay mutable
/// afterwards. Nothing about a previous validation is cached; every
/// validation reads the current field values, including those of nested
/// entities.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    entity_type: String,
    document: Document,
}

impl Entity {
    /// Creates an entity. Never fails and never validates.
    pub fn new(entity_type: impl Into<String>, document: Document) -> Self {
        Self {
            entity_type: entity_type.into(),
            document,
        }
    }

    /// Creates an entity with no fields.
    pub fn empty(entity_type: impl Into<String>) -> Self {
        Self::new(entity_type, Document::new())
    }

    /// Creates an entity from a JSON object.
    pub fn from_json(entity_type: impl Into<String>, value: Value) -> Self {
        Self::new(entity_type, Document::from_json(value))
    }

    /// Returns the entity type name used in error messages.
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.document.get(field)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut FieldValue> {
        self.document.get_mut(field)
    }

    /// Reassigns a field, returning the previous value.
    pub fn set(
        &mut self,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.document.insert(field, value)
    }

    /// Removes a field entirely.
    pub fn unset(&mut self, field: &str) -> Option<FieldValue> {
        self.document.remove(field)
    }

    /// Field names in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.document.keys()
    }

    /// Validates this entity against the schemas bound in `registry`.
    pub fn validate(&self, registry: &SchemaRegistry) -> ConstraintResult<()> {
        SchemaValidator::new(registry).validate(self)
    }
}

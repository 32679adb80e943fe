//! Schema type definitions
//!
//! A [`Schema`] is an ordered table of field name → [`FieldConstraint`].
//! Declaration order matters: declared-field checks run and report in it.
//!
//! Supported kinds:
//! - string, number, boolean, array (primitive runtime kinds)
//! - a reference to another entity type, validated recursively

use crate::entity::FieldValue;

/// Primitive runtime kinds a field may be declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    Array,
}

impl PrimitiveKind {
    /// Returns the kind name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Array => "array",
        }
    }

    /// Returns true if `value` has this runtime kind.
    pub fn matches(&self, value: &FieldValue) -> bool {
        matches!(
            (self, value),
            (PrimitiveKind::String, FieldValue::String(_))
                | (PrimitiveKind::Number, FieldValue::Number(_))
                | (PrimitiveKind::Boolean, FieldValue::Bool(_))
                | (PrimitiveKind::Array, FieldValue::Array(_))
        )
    }
}

/// Declared type of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Primitive(PrimitiveKind),
    /// Nested entity of the named type, checked against that type's own schema
    Entity(String),
}

impl FieldKind {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &str {
        match self {
            FieldKind::Primitive(kind) => kind.type_name(),
            FieldKind::Entity(name) => name,
        }
    }
}

/// Per-field rule set.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConstraint {
    /// Expected kind; `None` accepts any value
    pub kind: Option<FieldKind>,
    /// Whether field must be present
    pub required: bool,
    /// Whether an empty string is acceptable (string fields only)
    pub blank: bool,
    /// Allowed values in declaration order; empty means unrestricted
    pub choice: Vec<FieldValue>,
}

impl Default for FieldConstraint {
    fn default() -> Self {
        Self {
            kind: None,
            required: false,
            blank: true,
            choice: Vec::new(),
        }
    }
}

impl FieldConstraint {
    /// Create an untyped, optional field
    pub fn any() -> Self {
        Self::default()
    }

    fn primitive(kind: PrimitiveKind) -> Self {
        Self {
            kind: Some(FieldKind::Primitive(kind)),
            ..Self::default()
        }
    }

    /// Create an optional string field
    pub fn string() -> Self {
        Self::primitive(PrimitiveKind::String)
    }

    /// Create an optional number field
    pub fn number() -> Self {
        Self::primitive(PrimitiveKind::Number)
    }

    /// Create an optional boolean field
    pub fn boolean() -> Self {
        Self::primitive(PrimitiveKind::Boolean)
    }

    /// Create an optional array field
    pub fn array() -> Self {
        Self::primitive(PrimitiveKind::Array)
    }

    /// Create an optional nested-entity field of the given entity type
    pub fn entity(entity_type: impl Into<String>) -> Self {
        Self {
            kind: Some(FieldKind::Entity(entity_type.into())),
            ..Self::default()
        }
    }

    /// Marks the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Rejects empty strings
    pub fn not_blank(mut self) -> Self {
        self.blank = false;
        self
    }

    /// Restricts the value to one of `values`
    pub fn choice<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        self.choice = values.into_iter().map(Into::into).collect();
        self
    }
}

/// Ordered constraint table for one entity type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<(String, FieldConstraint)>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Schema::declare`]
    pub fn field(mut self, name: impl Into<String>, constraint: FieldConstraint) -> Self {
        self.declare(name, constraint);
        self
    }

    /// Declares a field. Redeclaring replaces the constraint but keeps the
    /// field's original position.
    pub fn declare(&mut self, name: impl Into<String>, constraint: FieldConstraint) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = constraint,
            None => self.fields.push((name, constraint)),
        }
    }

    /// Gets the constraint for a field
    pub fn get(&self, name: &str) -> Option<&FieldConstraint> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    /// Checks if a field is declared
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Declared fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldConstraint)> {
        self.fields.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

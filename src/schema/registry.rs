//! Schema registry binding schemas to entity type names
//!
//! The registry is an ordinary value owned by the caller, not process-wide
//! state. Lifecycle is overwrite-on-rebind: binding a schema to a type name
//! that already has one replaces it, and later validations see the new
//! schema.

use std::collections::HashMap;

use tracing::debug;

use super::errors::{ConstraintError, ConstraintResult};
use super::types::Schema;
use super::validator::SchemaValidator;
use crate::entity::{Document, Entity};
use crate::observability::Event;

/// In-memory registry of schemas indexed by entity type name.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `schema` to `entity_type`, returning the schema it replaced.
    pub fn bind_schema(
        &mut self,
        entity_type: impl Into<String>,
        schema: Schema,
    ) -> Option<Schema> {
        let entity_type = entity_type.into();
        let field_count = schema.len();
        let previous = self.schemas.insert(entity_type.clone(), schema);

        let event = if previous.is_some() {
            Event::SchemaRebound
        } else {
            Event::SchemaBound
        };
        debug!(
            event = event.as_str(),
            entity_type = %entity_type,
            fields = field_count,
            "schema bound",
        );

        previous
    }

    /// Builder form of [`SchemaRegistry::bind_schema`].
    pub fn with_schema(mut self, entity_type: impl Into<String>, schema: Schema) -> Self {
        self.bind_schema(entity_type, schema);
        self
    }

    /// Removes the schema bound to `entity_type`.
    pub fn unbind(&mut self, entity_type: &str) -> Option<Schema> {
        self.schemas.remove(entity_type)
    }

    /// Gets the schema bound to an entity type.
    pub fn schema(&self, entity_type: &str) -> Option<&Schema> {
        self.schemas.get(entity_type)
    }

    /// Gets the schema bound to an entity type or fails with
    /// [`ConstraintError::SchemaMissing`].
    pub fn require(&self, entity_type: &str) -> ConstraintResult<&Schema> {
        self.schema(entity_type)
            .ok_or_else(|| ConstraintError::schema_missing(entity_type))
    }

    /// Checks if a schema is bound to the entity type.
    pub fn is_bound(&self, entity_type: &str) -> bool {
        self.schemas.contains_key(entity_type)
    }

    /// Returns bound entity type names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of bound schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Constructs an entity and validates it in one step.
    ///
    /// The entity is only returned if it passes.
    pub fn instantiate(
        &self,
        entity_type: impl Into<String>,
        document: Document,
    ) -> ConstraintResult<Entity> {
        let entity = Entity::new(entity_type, document);
        SchemaValidator::new(self).validate(&entity)?;
        Ok(entity)
    }
}

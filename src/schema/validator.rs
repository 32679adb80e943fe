//! Schema validator for entities
//!
//! Validation runs two passes over one entity:
//! - Pass A: every document field not declared in the schema is reported
//!   as undefined, in document order. Such fields get no other checks.
//! - Pass B: every declared field is checked in declaration order for
//!   presence, kind, blankness and choice membership.
//!
//! Nested entities are re-validated from scratch against their own schema
//! on every pass; what happens to the parent when one fails is decided by
//! [`propagate`].
//!
//! Validation never mutates the entity and is deterministic: the same
//! entity and registry always yield the same outcome.

use tracing::{debug, trace, warn};

use super::errors::{ConstraintError, ConstraintResult, ValidationFailure, Violation};
use super::propagation::propagate;
use super::registry::SchemaRegistry;
use super::types::{FieldConstraint, FieldKind, PrimitiveKind};
use crate::config::ValidatorConfig;
use crate::entity::{Entity, FieldValue};
use crate::observability::Event;

/// Validator that checks entities against the schemas in a registry.
pub struct SchemaValidator<'a> {
    registry: &'a SchemaRegistry,
    config: ValidatorConfig,
}

impl<'a> SchemaValidator<'a> {
    /// Creates a validator with the default configuration.
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self::with_config(registry, ValidatorConfig::default())
    }

    /// Creates a validator with an explicit configuration.
    pub fn with_config(registry: &'a SchemaRegistry, config: ValidatorConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates an entity and every nested entity it holds.
    ///
    /// # Errors
    ///
    /// - `SchemaMissing` if the entity's type (or a nested entity's type)
    ///   has no bound schema
    /// - `Validation` with the aggregated violations of this entity, or the
    ///   failure of a nested entity under the configured nested policy
    /// - `DepthExceeded` if nesting goes past a configured `max_depth`
    pub fn validate(&self, entity: &Entity) -> ConstraintResult<()> {
        self.validate_at(entity, 0)
    }

    /// Returns this entity's violations without aggregating them.
    ///
    /// Nested entities are still handled by the nested policy, so a nested
    /// failure under fail-fast comes back as `Err`.
    pub fn check(&self, entity: &Entity) -> ConstraintResult<Vec<Violation>> {
        self.collect_violations(entity, 0)
    }

    fn validate_at(&self, entity: &Entity, depth: usize) -> ConstraintResult<()> {
        let violations = self.collect_violations(entity, depth)?;

        match ValidationFailure::from_violations(entity.entity_type(), violations) {
            None => {
                if self.config.log_violations {
                    trace!(
                        event = Event::ValidationPassed.as_str(),
                        entity_type = entity.entity_type(),
                        depth,
                    );
                }
                Ok(())
            }
            Some(failure) => {
                if self.config.log_violations {
                    debug!(
                        event = Event::ValidationFailed.as_str(),
                        entity_type = failure.entity_type(),
                        violations = failure.violations().len(),
                        depth,
                        "{}",
                        failure,
                    );
                }
                Err(failure.into())
            }
        }
    }

    fn collect_violations(
        &self,
        entity: &Entity,
        depth: usize,
    ) -> ConstraintResult<Vec<Violation>> {
        if let Some(max_depth) = self.config.max_depth {
            if depth > max_depth {
                warn!(
                    event = Event::DepthExceeded.as_str(),
                    entity_type = entity.entity_type(),
                    max_depth,
                );
                return Err(ConstraintError::DepthExceeded {
                    entity_type: entity.entity_type().to_string(),
                    max_depth,
                });
            }
        }

        let schema = self.registry.require(entity.entity_type()).inspect_err(|_| {
            warn!(
                event = Event::SchemaMissing.as_str(),
                entity_type = entity.entity_type(),
            );
        })?;

        trace!(
            event = Event::ValidationStart.as_str(),
            entity_type = entity.entity_type(),
            depth,
        );

        let mut violations = Vec::new();

        // Undeclared fields
        for field in entity.fields() {
            if !schema.contains(field) {
                violations.push(Violation::undefined_in_schema(field));
            }
        }

        // Declared fields
        for (field, constraint) in schema.fields() {
            match entity.get(field) {
                Some(value) if !value.is_null() => {
                    self.check_value(field, constraint, value, depth, &mut violations)?;
                }
                _ => {
                    if constraint.required {
                        violations.push(Violation::required(field));
                    }
                }
            }
        }

        Ok(violations)
    }

    /// Applies kind, blank and choice rules to a present value.
    fn check_value(
        &self,
        field: &str,
        constraint: &FieldConstraint,
        value: &FieldValue,
        depth: usize,
        violations: &mut Vec<Violation>,
    ) -> ConstraintResult<()> {
        let Some(kind) = &constraint.kind else {
            return self.check_choice(field, constraint, value, violations);
        };

        match kind {
            FieldKind::Primitive(primitive) => {
                if !primitive.matches(value) {
                    violations.push(Violation::type_mismatch(field, kind.type_name()));
                }
                if *primitive == PrimitiveKind::String
                    && !constraint.blank
                    && value.as_str() == Some("")
                {
                    violations.push(Violation::blank(field));
                }
            }
            FieldKind::Entity(entity_type) => match value.as_entity() {
                Some(nested) if nested.entity_type() == entity_type => {
                    trace!(
                        event = Event::NestedDescend.as_str(),
                        field,
                        entity_type = nested.entity_type(),
                        depth = depth + 1,
                    );
                    let outcome = self.validate_at(nested, depth + 1);
                    propagate(self.config.nested_policy, field, outcome, violations)?;
                }
                _ => violations.push(Violation::type_mismatch(field, kind.type_name())),
            },
        }

        self.check_choice(field, constraint, value, violations)
    }

    fn check_choice(
        &self,
        field: &str,
        constraint: &FieldConstraint,
        value: &FieldValue,
        violations: &mut Vec<Violation>,
    ) -> ConstraintResult<()> {
        if !constraint.choice.is_empty() && !constraint.choice.contains(value) {
            violations.push(Violation::not_in_choice_list(field, &constraint.choice));
        }

        Ok(())
    }
}

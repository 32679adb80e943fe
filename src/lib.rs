//! constraint-model - schema-bound entities with deterministic constraint validation
//!
//! ```
//! use constraint_model::{Entity, FieldConstraint, Schema, SchemaRegistry};
//! use serde_json::json;
//!
//! let mut registry = SchemaRegistry::new();
//! registry.bind_schema(
//!     "TestModel",
//!     Schema::new()
//!         .field("name", FieldConstraint::string().required().not_blank())
//!         .field("gender", FieldConstraint::string().required().choice(["M", "F"])),
//! );
//!
//! let entity = Entity::from_json("TestModel", json!({"name": "Joe"}));
//! let err = entity.validate(&registry).unwrap_err();
//! assert_eq!(err.to_string(), "TestModel constraint error=[gender: required]");
//! ```

pub mod config;
pub mod entity;
pub mod observability;
pub mod schema;

pub use config::{ConfigError, ValidatorConfig};
pub use entity::{Document, Entity, FieldValue};
pub use schema::{
    ConstraintError, ConstraintResult, FieldConstraint, FieldKind, NestedPolicy, PrimitiveKind,
    Schema, SchemaRegistry, SchemaValidator, ValidationFailure, Violation, ViolationKind,
};

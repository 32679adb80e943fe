//! Schema subsystem
//!
//! Schemas are declarative constraint tables bound to entity type names.
//! Validation is explicit, synchronous and deterministic.
//!
//! # Design Principles
//!
//! - Construction never validates; `validate()` is called explicitly
//! - Unknown fields are reported before declared-field violations
//! - Declared-field violations follow schema declaration order
//! - Nested entities are re-validated on every pass, never cached
//! - Nested failure handling lives in one place (`propagation`)

mod errors;
mod propagation;
mod registry;
mod types;
mod validator;

pub use errors::{
    ConstraintError, ConstraintErrorCode, ConstraintResult, Severity, ValidationFailure, Violation,
    ViolationKind,
};
pub use propagation::{propagate, NestedPolicy};
pub use registry::SchemaRegistry;
pub use types::{FieldConstraint, FieldKind, PrimitiveKind, Schema};
pub use validator::SchemaValidator;

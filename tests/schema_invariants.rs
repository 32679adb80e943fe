//! Schema Invariant Tests
//!
//! Tests for constraint validation invariants:
//! - Validation is deterministic and idempotent
//! - Unknown fields are reported before declared-field violations
//! - Declared-field violations follow declaration order
//! - Singular/plural message wording
//! - Missing schemas are reported as a distinct error

use constraint_model::{
    ConstraintError, Entity, FieldConstraint, Schema, SchemaRegistry, SchemaValidator,
};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn test_model_schema() -> Schema {
    Schema::new()
        .field("name", FieldConstraint::string().required().not_blank())
        .field("gender", FieldConstraint::string().required().choice(["M", "F"]))
        .field("phoneList", FieldConstraint::array())
        .field("flag", FieldConstraint::boolean())
}

fn setup_registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    registry.bind_schema("TestModel", test_model_schema());
    registry
}

fn error_message(registry: &SchemaRegistry, entity: &Entity) -> String {
    match SchemaValidator::new(registry).validate(entity) {
        Ok(()) => String::new(),
        Err(e) => e.to_string(),
    }
}

// =============================================================================
// Determinism Tests
// =============================================================================

/// Same entity validates the same way every time.
#[test]
fn test_validation_is_idempotent() {
    let registry = setup_registry();
    let entity = Entity::from_json("TestModel", json!({"name": "", "gender": []}));

    let first = error_message(&registry, &entity);
    for _ in 0..100 {
        assert_eq!(error_message(&registry, &entity), first);
    }
}

/// Valid entity passes consistently.
#[test]
fn test_valid_entity_passes_consistently() {
    let registry = setup_registry();
    let entity = Entity::from_json("TestModel", json!({"name": "Joe", "gender": "M"}));

    for _ in 0..100 {
        assert!(entity.validate(&registry).is_ok());
    }
}

/// Mutation after construction is seen by the next validation.
#[test]
fn test_mutation_is_revalidated() {
    let registry = setup_registry();
    let mut entity = Entity::from_json("TestModel", json!({"name": "Joe", "gender": "M"}));
    assert!(entity.validate(&registry).is_ok());

    entity.set("gender", "X");
    assert_eq!(
        error_message(&registry, &entity),
        "TestModel constraint error=[gender: not in list [M,F]]"
    );

    entity.set("gender", "F");
    assert!(entity.validate(&registry).is_ok());
}

// =============================================================================
// Reference Scenarios
// =============================================================================

#[test]
fn test_empty_document() {
    let registry = setup_registry();
    let entity = Entity::from_json("TestModel", json!({}));
    assert_eq!(
        error_message(&registry, &entity),
        "TestModel constraint errors=[name: required, gender: required]"
    );
}

#[test]
fn test_blank_values() {
    let registry = setup_registry();
    let entity = Entity::from_json("TestModel", json!({"name": "", "gender": []}));
    assert_eq!(
        error_message(&registry, &entity),
        "TestModel constraint errors=[name: blank, gender: not of type string, \
         gender: not in list [M,F]]"
    );
}

#[test]
fn test_all_constraints_satisfied() {
    let registry = setup_registry();
    let entity = Entity::from_json(
        "TestModel",
        json!({"name": "Joe", "gender": "M", "phoneList": [], "flag": true}),
    );
    assert_eq!(error_message(&registry, &entity), "");
}

#[test]
fn test_typed_fields_with_wrong_types() {
    let registry = setup_registry();
    let entity = Entity::from_json(
        "TestModel",
        json!({"name": "Joe", "gender": "M", "phoneList": "1234567890", "flag": "true"}),
    );
    assert_eq!(
        error_message(&registry, &entity),
        "TestModel constraint errors=[phoneList: not of type array, flag: not of type boolean]"
    );
}

#[test]
fn test_numeric_string_is_not_a_number() {
    let mut registry = SchemaRegistry::new();
    registry.bind_schema("TestModel", Schema::new().field("size", FieldConstraint::number()));

    let entity = Entity::from_json("TestModel", json!({"size": "3"}));
    assert_eq!(
        error_message(&registry, &entity),
        "TestModel constraint error=[size: not of type number]"
    );
}

#[test]
fn test_field_not_in_constraints() {
    let mut registry = setup_registry();
    registry.bind_schema(
        "ChildModel",
        Schema::new().field("name", FieldConstraint::string().required()),
    );

    let mut entity = Entity::from_json(
        "TestModel",
        json!({"name": "Joe", "gender": "M", "phoneList": [], "flag": true}),
    );
    entity.set("child", Entity::from_json("ChildModel", json!({"name": "Ann"})));

    assert_eq!(
        error_message(&registry, &entity),
        "TestModel constraint error=[child: undefined in constraints]"
    );
}

// =============================================================================
// Ordering Tests
// =============================================================================

/// Unknown fields come first, in document order, then declared fields in
/// declaration order regardless of document order.
#[test]
fn test_violation_order() {
    let registry = setup_registry();
    let entity = Entity::from_json(
        "TestModel",
        json!({"flag": 1, "zzz": true, "phoneList": {}, "aaa": 0}),
    );
    assert_eq!(
        error_message(&registry, &entity),
        "TestModel constraint errors=[zzz: undefined in constraints, \
         aaa: undefined in constraints, name: required, gender: required, \
         phoneList: not of type array, flag: not of type boolean]"
    );
}

/// Unknown fields get no type checks of their own.
#[test]
fn test_unknown_fields_only_reported_once() {
    let registry = setup_registry();
    let entity = Entity::from_json(
        "TestModel",
        json!({"name": "Joe", "gender": "M", "nickname": ""}),
    );

    let err = entity.validate(&registry).unwrap_err();
    let failure = err.failure().unwrap();
    assert_eq!(failure.violations().len(), 1);
    assert!(!failure.is_plural());
}

// =============================================================================
// Schema Binding Tests
// =============================================================================

#[test]
fn test_missing_schema() {
    let registry = SchemaRegistry::new();
    let entity = Entity::from_json("TestModel", json!({}));

    let err = entity.validate(&registry).unwrap_err();
    assert!(matches!(err, ConstraintError::SchemaMissing { .. }));
    assert_eq!(err.to_string(), "Constraints not defined");
    assert_eq!(err.code().code(), "CONSTRAINTS_NOT_DEFINED");
}

#[test]
fn test_rebinding_changes_outcome() {
    let mut registry = setup_registry();
    let entity = Entity::from_json("TestModel", json!({"name": "Joe"}));
    assert!(entity.validate(&registry).is_err());

    registry.bind_schema(
        "TestModel",
        Schema::new().field("name", FieldConstraint::string().required()),
    );
    assert!(entity.validate(&registry).is_ok());
}

#[test]
fn test_instantiate_validates() {
    let registry = setup_registry();

    let document = Entity::from_json("TestModel", json!({"name": "Joe", "gender": "F"}))
        .document()
        .clone();
    let entity = registry.instantiate("TestModel", document).unwrap();
    assert_eq!(entity.get("gender").and_then(|v| v.as_str()), Some("F"));

    let err = registry
        .instantiate("TestModel", Default::default())
        .unwrap_err();
    assert_eq!(err.code().code(), "CONSTRAINT_VIOLATION");
    assert!(!err.is_fatal());
}

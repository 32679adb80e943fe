//! Constraint error types
//!
//! Error codes:
//! - CONSTRAINTS_NOT_DEFINED (FATAL) - no schema bound to the entity type
//! - CONSTRAINT_VIOLATION (REJECT) - the document breaks its schema
//! - CONSTRAINT_NESTING_TOO_DEEP (FATAL) - nested entities exceed the configured depth

use std::fmt;

use thiserror::Error;

use crate::entity::FieldValue;

/// Severity levels for constraint errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Bad input data; reject the document
    Reject,
    /// Programming or configuration mistake
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Constraint error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintErrorCode {
    ConstraintsNotDefined,
    ConstraintViolation,
    NestingTooDeep,
}

impl ConstraintErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ConstraintErrorCode::ConstraintsNotDefined => "CONSTRAINTS_NOT_DEFINED",
            ConstraintErrorCode::ConstraintViolation => "CONSTRAINT_VIOLATION",
            ConstraintErrorCode::NestingTooDeep => "CONSTRAINT_NESTING_TOO_DEEP",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            ConstraintErrorCode::ConstraintViolation => Severity::Reject,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for ConstraintErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// What rule a field broke.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// Required field absent
    Required,
    /// Empty string where `blank` is disallowed
    Blank,
    /// Value is not of the declared kind or entity type
    TypeMismatch { expected: String },
    /// Value is not one of the allowed choices
    NotInChoiceList { choices: Vec<FieldValue> },
    /// Field present in the document but not declared in the schema
    UndefinedInSchema,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Required => write!(f, "required"),
            ViolationKind::Blank => write!(f, "blank"),
            ViolationKind::TypeMismatch { expected } => write!(f, "not of type {}", expected),
            ViolationKind::NotInChoiceList { choices } => {
                write!(f, "not in list [")?;
                for (i, choice) in choices.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", choice)?;
                }
                write!(f, "]")
            }
            ViolationKind::UndefinedInSchema => write!(f, "undefined in constraints"),
        }
    }
}

/// One detected rule breach.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Field name, or a dotted path when merged from a nested entity
    pub field: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, ViolationKind::Required)
    }

    pub fn blank(field: impl Into<String>) -> Self {
        Self::new(field, ViolationKind::Blank)
    }

    pub fn type_mismatch(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::new(
            field,
            ViolationKind::TypeMismatch {
                expected: expected.into(),
            },
        )
    }

    pub fn not_in_choice_list(field: impl Into<String>, choices: &[FieldValue]) -> Self {
        Self::new(
            field,
            ViolationKind::NotInChoiceList {
                choices: choices.to_vec(),
            },
        )
    }

    pub fn undefined_in_schema(field: impl Into<String>) -> Self {
        Self::new(field, ViolationKind::UndefinedInSchema)
    }

    /// Re-roots the violation under `parent`, e.g. `name` → `child.name`.
    pub fn nested_under(mut self, parent: &str) -> Self {
        self.field = format!("{}.{}", parent, self.field);
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// Aggregated violations for one entity.
///
/// Always holds at least one violation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    entity_type: String,
    violations: Vec<Violation>,
}

impl ValidationFailure {
    /// Returns `None` when there is nothing to report.
    pub fn from_violations(
        entity_type: impl Into<String>,
        violations: Vec<Violation>,
    ) -> Option<Self> {
        if violations.is_empty() {
            return None;
        }
        Some(Self {
            entity_type: entity_type.into(),
            violations,
        })
    }

    /// Entity type the report is attributed to
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// Whether the message uses the plural `errors=` wording
    pub fn is_plural(&self) -> bool {
        self.violations.len() > 1
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.is_plural() { "errors" } else { "error" };
        write!(f, "{} constraint {}=[", self.entity_type, label)?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", violation)?;
        }
        write!(f, "]")
    }
}

/// Error returned by a validation pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintError {
    /// No schema bound to the entity type; nothing was validated
    #[error("Constraints not defined")]
    SchemaMissing { entity_type: String },

    /// The document (or the first failing nested entity) broke its schema
    #[error("{0}")]
    Validation(ValidationFailure),

    /// Nested entities go deeper than the configured limit
    #[error("Nesting depth exceeded at {entity_type} (max {max_depth})")]
    DepthExceeded { entity_type: String, max_depth: usize },
}

impl ConstraintError {
    pub fn schema_missing(entity_type: impl Into<String>) -> Self {
        ConstraintError::SchemaMissing {
            entity_type: entity_type.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ConstraintErrorCode {
        match self {
            ConstraintError::SchemaMissing { .. } => ConstraintErrorCode::ConstraintsNotDefined,
            ConstraintError::Validation(_) => ConstraintErrorCode::ConstraintViolation,
            ConstraintError::DepthExceeded { .. } => ConstraintErrorCode::NestingTooDeep,
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code().severity()
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    /// Entity type the error is attributed to
    pub fn entity_type(&self) -> &str {
        match self {
            ConstraintError::SchemaMissing { entity_type } => entity_type,
            ConstraintError::Validation(failure) => failure.entity_type(),
            ConstraintError::DepthExceeded { entity_type, .. } => entity_type,
        }
    }

    /// Returns the validation failure, if this is one
    pub fn failure(&self) -> Option<&ValidationFailure> {
        match self {
            ConstraintError::Validation(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<ValidationFailure> for ConstraintError {
    fn from(failure: ValidationFailure) -> Self {
        ConstraintError::Validation(failure)
    }
}

/// Result type for constraint operations
pub type ConstraintResult<T> = Result<T, ConstraintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ConstraintErrorCode::ConstraintsNotDefined.code(), "CONSTRAINTS_NOT_DEFINED");
        assert_eq!(ConstraintErrorCode::ConstraintViolation.code(), "CONSTRAINT_VIOLATION");
        assert_eq!(ConstraintErrorCode::NestingTooDeep.code(), "CONSTRAINT_NESTING_TOO_DEEP");
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(ConstraintErrorCode::ConstraintViolation.severity(), Severity::Reject);
        assert_eq!(ConstraintErrorCode::ConstraintsNotDefined.severity(), Severity::Fatal);
        assert!(ConstraintError::schema_missing("TestModel").is_fatal());
    }

    #[test]
    fn test_schema_missing_message() {
        let err = ConstraintError::schema_missing("TestModel");
        assert_eq!(err.to_string(), "Constraints not defined");
        assert_eq!(err.entity_type(), "TestModel");
    }

    #[test]
    fn test_singular_wording() {
        let violations = vec![Violation::required("name")];
        let failure = ValidationFailure::from_violations("TestModel", violations).unwrap();
        assert!(!failure.is_plural());
        assert_eq!(failure.to_string(), "TestModel constraint error=[name: required]");
    }

    #[test]
    fn test_plural_wording() {
        let failure = ValidationFailure::from_violations(
            "TestModel",
            vec![Violation::blank("name"), Violation::type_mismatch("gender", "string")],
        )
        .unwrap();
        assert!(failure.is_plural());
        assert_eq!(
            ConstraintError::from(failure).to_string(),
            "TestModel constraint errors=[name: blank, gender: not of type string]"
        );
    }

    #[test]
    fn test_empty_violations_is_not_a_failure() {
        assert!(ValidationFailure::from_violations("TestModel", Vec::new()).is_none());
    }

    #[test]
    fn test_reason_texts() {
        let choices = vec![FieldValue::from("M"), FieldValue::from("F")];
        assert_eq!(
            Violation::not_in_choice_list("gender", &choices).to_string(),
            "gender: not in list [M,F]"
        );
        assert_eq!(
            Violation::undefined_in_schema("child").to_string(),
            "child: undefined in constraints"
        );
        assert_eq!(
            Violation::type_mismatch("child", "ChildModel").to_string(),
            "child: not of type ChildModel"
        );
    }

    #[test]
    fn test_nested_under() {
        let v = Violation::required("name").nested_under("child");
        assert_eq!(v.to_string(), "child.name: required");
    }
}

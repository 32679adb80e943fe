//! Nested failure propagation
//!
//! Decides what a parent validation pass does with the outcome of a nested
//! entity's own validation. [`propagate`] is the only place this decision
//! is made.

use serde::{Deserialize, Serialize};

use super::errors::{ConstraintError, ConstraintResult, Violation};

/// Policy applied when a nested entity fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NestedPolicy {
    /// The first failing nested entity ends the parent's pass. Its own
    /// failure is returned unchanged and the parent's violations are dropped.
    #[default]
    FailFast,
    /// Nested violations are merged into the parent's list under a dotted
    /// field path and the parent's pass continues.
    CollectAll,
}

/// Folds a nested entity's outcome into the parent's pass.
///
/// Returns `Err` when the parent must stop and report that error instead of
/// its own violations. Errors other than violations (missing schema, depth
/// limit) always stop the parent.
pub fn propagate(
    policy: NestedPolicy,
    field: &str,
    nested: ConstraintResult<()>,
    violations: &mut Vec<Violation>,
) -> ConstraintResult<()> {
    let failure = match nested {
        Ok(()) => return Ok(()),
        Err(ConstraintError::Validation(failure)) => failure,
        Err(other) => return Err(other),
    };

    match policy {
        NestedPolicy::FailFast => Err(ConstraintError::Validation(failure)),
        NestedPolicy::CollectAll => {
            violations.extend(
                failure
                    .into_violations()
                    .into_iter()
                    .map(|v| v.nested_under(field)),
            );
            Ok(())
        }
    }
}

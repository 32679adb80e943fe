//! Validation lifecycle events
//!
//! Events are emitted through `tracing` with a stable `event` field so log
//! pipelines can filter on it. The library never installs a subscriber.

/// Validation lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A schema was bound to an entity type
    SchemaBound,
    /// A schema replaced an earlier binding
    SchemaRebound,
    /// Validation was attempted on a type with no schema
    SchemaMissing,
    /// A validation pass started
    ValidationStart,
    /// A validation pass found no violations
    ValidationPassed,
    /// A validation pass reported violations
    ValidationFailed,
    /// Validation descended into a nested entity
    NestedDescend,
    /// Nesting went past the configured depth
    DepthExceeded,
}

impl Event {
    /// Returns the event name
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SchemaBound => "SCHEMA_BOUND",
            Event::SchemaRebound => "SCHEMA_REBOUND",
            Event::SchemaMissing => "SCHEMA_MISSING",
            Event::ValidationStart => "VALIDATION_START",
            Event::ValidationPassed => "VALIDATION_PASSED",
            Event::ValidationFailed => "VALIDATION_FAILED",
            Event::NestedDescend => "NESTED_DESCEND",
            Event::DepthExceeded => "DEPTH_EXCEEDED",
        }
    }
}

//! Error types for the Flurry particle simulation framework.
//!
//! Organized by subsystem: attribute lookup, schema construction,
//! stepping, and host-facing queries. Invariant violations inside the
//! solver are not represented here; they panic.

use std::error::Error;
use std::fmt;

use crate::attribute::AttributeKind;

/// A buffer was requested for an attribute name the schema does not contain.
///
/// The solver treats this as fatal: the schema is computed from the same
/// emitters that query it, so a miss indicates a programming error. Hosts
/// probing optional attributes use the `try_*` accessors, which return
/// this error instead of panicking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeNotFound {
    /// The requested attribute name.
    pub name: String,
    /// Whether a scalar or a vector buffer was requested.
    pub kind: AttributeKind,
}

impl fmt::Display for AttributeNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} attribute '{}' not found in schema", self.kind, self.name)
    }
}

impl Error for AttributeNotFound {}

/// Errors from [`AttributeSchemaBuilder::build()`](crate::AttributeSchemaBuilder::build).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// An attribute name was empty.
    EmptyName {
        /// The kind the empty name was registered as.
        kind: AttributeKind,
    },
    /// The same name was registered both as a scalar and as a vector.
    KindConflict {
        /// The contested attribute name.
        name: String,
    },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName { kind } => write!(f, "empty {kind} attribute name"),
            Self::KindConflict { name } => {
                write!(f, "attribute '{name}' declared as both scalar and vector")
            }
        }
    }
}

impl Error for SchemaError {}

/// Errors returned from a simulation step.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// The elapsed time is NaN, infinite, or negative.
    InvalidElapsed {
        /// The rejected value.
        value: f32,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidElapsed { value } => {
                write!(f, "elapsed seconds must be finite and >= 0, got {value}")
            }
        }
    }
}

impl Error for StepError {}

/// Errors from host-facing read queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryError {
    /// The caller's output buffer cannot hold every active particle.
    BufferTooSmall {
        /// Number of elements the query needs to write.
        required: usize,
        /// Number of elements the caller provided.
        provided: usize,
    },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "output buffer too small: need {required} elements, got {provided}"
                )
            }
        }
    }
}

impl Error for QueryError {}

//! Core types for the Flurry particle simulation framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the attribute schema shared by every particle block, block
//! identifiers, and the error types used throughout the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod attribute;
pub mod error;
pub mod id;

pub use attribute::{
    AttributeKind, AttributeSchema, AttributeSchemaBuilder, BIRTH_TIME, POSITION, VELOCITY,
};
pub use error::{AttributeNotFound, QueryError, SchemaError, StepError};
pub use id::BlockId;

/// Three-component vector used for every vector attribute.
pub use glam::Vec3;

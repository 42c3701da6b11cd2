//! Schema discovery and the precomputed [`EmissionPlan`].

use std::error::Error;
use std::fmt;

use flurry_core::{AttributeSchema, SchemaError};

use crate::emitter::Emitter;

/// Errors detected while validating a simulation description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DescriptionError {
    /// An emitter's declared attributes could not join the schema.
    Schema {
        /// Name of the emitter whose declaration failed.
        emitter: String,
        /// Underlying schema error.
        source: SchemaError,
    },
}

impl fmt::Display for DescriptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema { emitter, source } => {
                write!(f, "emitter '{emitter}' declares an invalid attribute: {source}")
            }
        }
    }
}

impl Error for DescriptionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Schema { source, .. } => Some(source),
        }
    }
}

/// Attribute indices the solver default-fills after one emitter runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmitterPlan {
    /// Scalar indices the emitter does not initialize. Filled with the
    /// current simulation time.
    pub default_scalars: Vec<usize>,
    /// Vector indices the emitter does not initialize. Filled with zero.
    pub default_vectors: Vec<usize>,
}

/// One [`EmitterPlan`] per registered emitter, in registration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmissionPlan {
    emitters: Vec<EmitterPlan>,
}

impl EmissionPlan {
    /// Plan for the emitter at `index`.
    pub fn get(&self, index: usize) -> Option<&EmitterPlan> {
        self.emitters.get(index)
    }

    /// Number of emitters covered.
    pub fn len(&self) -> usize {
        self.emitters.len()
    }

    /// Whether the plan covers no emitters.
    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty()
    }

    /// Per-emitter plans in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, EmitterPlan> {
        self.emitters.iter()
    }
}

/// Discover the attribute schema and build the emission plan.
///
/// The schema is the built-ins plus the union of every emitter's declared
/// attributes, in first-declaration order. Each emitter's attribute lists
/// are queried exactly once.
///
/// # Errors
///
/// Returns [`DescriptionError::Schema`] naming the first emitter whose
/// declarations produce an empty name or a scalar/vector name clash.
pub fn build_schema(
    emitters: &[Box<dyn Emitter>],
) -> Result<(AttributeSchema, EmissionPlan), DescriptionError> {
    let mut builder = AttributeSchema::builder();
    let mut declared: Vec<(Vec<String>, Vec<String>)> = Vec::with_capacity(emitters.len());
    let mut culprit: Option<&str> = None;

    for emitter in emitters {
        let scalars: Vec<String> = emitter
            .used_scalar_attributes()
            .into_iter()
            .map(str::to_string)
            .collect();
        let vectors: Vec<String> = emitter
            .used_vector_attributes()
            .into_iter()
            .map(str::to_string)
            .collect();
        for name in &scalars {
            builder.add_scalar(name.as_str());
        }
        for name in &vectors {
            builder.add_vector(name.as_str());
        }
        if culprit.is_none() && builder.check().is_err() {
            culprit = Some(emitter.name());
        }
        declared.push((scalars, vectors));
    }

    let schema = builder
        .build()
        .map_err(|source| DescriptionError::Schema {
            emitter: culprit.unwrap_or_default().to_string(),
            source,
        })?;

    let emitters = declared
        .iter()
        .map(|(scalars, vectors)| EmitterPlan {
            default_scalars: undeclared(schema.scalar_names(), scalars),
            default_vectors: undeclared(schema.vector_names(), vectors),
        })
        .collect();

    Ok((schema, EmissionPlan { emitters }))
}

fn undeclared<'a>(names: impl Iterator<Item = &'a str>, declared: &[String]) -> Vec<usize> {
    names
        .enumerate()
        .filter(|(_, name)| !declared.iter().any(|d| d.as_str() == *name))
        .map(|(i, _)| i)
        .collect()
}

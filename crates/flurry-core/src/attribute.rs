//! Attribute names and the [`AttributeSchema`].
//!
//! Every particle block allocates one array per attribute in the schema.
//! The schema is discovered once at initialization by unioning the
//! built-in attributes with whatever the registered emitters declare,
//! then frozen and shared by `Arc` across every block of a container.

use std::fmt;

use indexmap::IndexSet;

use crate::error::{AttributeNotFound, SchemaError};

/// Built-in scalar attribute: simulation time at which a particle was emitted.
pub const BIRTH_TIME: &str = "Birth Time";

/// Built-in vector attribute: particle position.
pub const POSITION: &str = "Position";

/// Built-in vector attribute: particle velocity.
pub const VELOCITY: &str = "Velocity";

/// Classification of an attribute's storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// One `f32` per particle.
    Scalar,
    /// One [`Vec3`](crate::Vec3) per particle.
    Vector,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Vector => write!(f, "vector"),
        }
    }
}

/// The fixed set of named attributes every block of a container allocates.
///
/// Two insertion-ordered sets of unique names. Built-ins always come
/// first, so [`BIRTH_TIME`] is scalar index 0 and [`POSITION`] /
/// [`VELOCITY`] are vector indices 0 and 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeSchema {
    scalars: IndexSet<String>,
    vectors: IndexSet<String>,
}

impl AttributeSchema {
    /// Scalar index of [`BIRTH_TIME`].
    pub const BIRTH_TIME_INDEX: usize = 0;
    /// Vector index of [`POSITION`].
    pub const POSITION_INDEX: usize = 0;
    /// Vector index of [`VELOCITY`].
    pub const VELOCITY_INDEX: usize = 1;

    /// Start a builder seeded with the built-in attributes.
    pub fn builder() -> AttributeSchemaBuilder {
        AttributeSchemaBuilder::new()
    }

    /// Schema containing only the built-in attributes.
    pub fn builtin() -> Self {
        let mut scalars = IndexSet::new();
        scalars.insert(BIRTH_TIME.to_string());
        let mut vectors = IndexSet::new();
        vectors.insert(POSITION.to_string());
        vectors.insert(VELOCITY.to_string());
        Self { scalars, vectors }
    }

    /// Scalar attribute names in storage order.
    pub fn scalar_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.scalars.iter().map(String::as_str)
    }

    /// Vector attribute names in storage order.
    pub fn vector_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.vectors.iter().map(String::as_str)
    }

    /// Storage index of a scalar attribute.
    pub fn scalar_index(&self, name: &str) -> Result<usize, AttributeNotFound> {
        self.scalars
            .get_index_of(name)
            .ok_or_else(|| AttributeNotFound {
                name: name.to_string(),
                kind: AttributeKind::Scalar,
            })
    }

    /// Storage index of a vector attribute.
    pub fn vector_index(&self, name: &str) -> Result<usize, AttributeNotFound> {
        self.vectors
            .get_index_of(name)
            .ok_or_else(|| AttributeNotFound {
                name: name.to_string(),
                kind: AttributeKind::Vector,
            })
    }

    /// Scalar attribute name at a storage index.
    pub fn scalar_name(&self, index: usize) -> Option<&str> {
        self.scalars.get_index(index).map(String::as_str)
    }

    /// Vector attribute name at a storage index.
    pub fn vector_name(&self, index: usize) -> Option<&str> {
        self.vectors.get_index(index).map(String::as_str)
    }

    /// Whether `name` is a registered scalar attribute.
    pub fn contains_scalar(&self, name: &str) -> bool {
        self.scalars.contains(name)
    }

    /// Whether `name` is a registered vector attribute.
    pub fn contains_vector(&self, name: &str) -> bool {
        self.vectors.contains(name)
    }

    /// Number of scalar attributes.
    pub fn scalar_count(&self) -> usize {
        self.scalars.len()
    }

    /// Number of vector attributes.
    pub fn vector_count(&self) -> usize {
        self.vectors.len()
    }

    /// Bytes of attribute storage one particle slot occupies.
    pub fn bytes_per_particle(&self) -> usize {
        self.scalars.len() * std::mem::size_of::<f32>()
            + self.vectors.len() * std::mem::size_of::<crate::Vec3>()
    }
}

impl Default for AttributeSchema {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Builder for [`AttributeSchema`].
///
/// Seeded with the built-ins. Re-adding a name of the same kind is a
/// no-op, so emitters may freely redeclare built-ins they initialize.
#[derive(Clone, Debug)]
pub struct AttributeSchemaBuilder {
    schema: AttributeSchema,
    error: Option<SchemaError>,
}

impl AttributeSchemaBuilder {
    fn new() -> Self {
        Self {
            schema: AttributeSchema::builtin(),
            error: None,
        }
    }

    /// Register a scalar attribute.
    pub fn scalar(mut self, name: impl Into<String>) -> Self {
        self.add_scalar(name);
        self
    }

    /// Register a vector attribute.
    pub fn vector(mut self, name: impl Into<String>) -> Self {
        self.add_vector(name);
        self
    }

    /// Register a scalar attribute in place.
    pub fn add_scalar(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        if self.error.is_none() {
            if name.is_empty() {
                self.error = Some(SchemaError::EmptyName {
                    kind: AttributeKind::Scalar,
                });
            } else if self.schema.vectors.contains(&name) {
                self.error = Some(SchemaError::KindConflict { name });
            } else {
                self.schema.scalars.insert(name);
            }
        }
        self
    }

    /// Register a vector attribute in place.
    pub fn add_vector(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        if self.error.is_none() {
            if name.is_empty() {
                self.error = Some(SchemaError::EmptyName {
                    kind: AttributeKind::Vector,
                });
            } else if self.schema.scalars.contains(&name) {
                self.error = Some(SchemaError::KindConflict { name });
            } else {
                self.schema.vectors.insert(name);
            }
        }
        self
    }

    /// First registration error so far, if any.
    pub fn check(&self) -> Result<(), SchemaError> {
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    /// Finish the schema, reporting the first registration error.
    pub fn build(self) -> Result<AttributeSchema, SchemaError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.schema),
        }
    }
}

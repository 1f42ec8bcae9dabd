//! Schema definition and inheritance resolution engine for ddags.
//!
//! The engine is built from four components, leaves first:
//!
//! - [`ModelRegistry`] - Registered model definitions keyed by id.
//! - [`InheritanceGraph`] - Parent/child edges with cycle detection.
//! - [`AttributeValidator`] - Structural and referential attribute checks.
//! - [`InheritanceResolver`] - Merges attributes along the ancestor chain.
//!
//! Everything is synchronous and free of I/O. Registry and graph are plain
//! values owned by the caller.
//!
//! # Example
//!
//! ```
//! use ddags_core::{
//!     attribute::{AttributeDefinition, PrimitiveKind},
//!     identifier::ModelId,
//!     model::{InheritanceDefinition, ModelDefinition},
//! };
//! use ddags_schema::{InheritanceGraph, InheritanceResolver, ModelRegistry};
//!
//! let mut registry = ModelRegistry::new();
//! registry.register(ModelDefinition::new(
//!     "animal",
//!     "Animal",
//!     vec![AttributeDefinition::primitive("name", PrimitiveKind::String, false)],
//! ))?;
//! registry.register(ModelDefinition::new(
//!     "dog",
//!     "Dog",
//!     vec![AttributeDefinition::primitive("breed", PrimitiveKind::String, true)],
//! ))?;
//!
//! let graph = InheritanceGraph::from_definitions(&[InheritanceDefinition::new("animal", "dog")])?;
//! graph.detect_cycle()?;
//!
//! let dog = InheritanceResolver::resolve(ModelId::new("dog"), &registry, &graph)?;
//! let names: Vec<_> = dog.attributes().iter().map(|a| a.name()).collect();
//! assert_eq!(names, ["name", "breed"]);
//! # Ok::<(), ddags_schema::error::SchemaError>(())
//! ```

pub mod error;
pub mod graph;
pub mod registry;
pub mod resolver;
pub mod snapshot;
pub mod validator;

pub use error::{ErrorCode, SchemaError};
pub use graph::InheritanceGraph;
pub use registry::ModelRegistry;
pub use resolver::InheritanceResolver;
pub use validator::AttributeValidator;

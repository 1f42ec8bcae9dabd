//! Effective attribute sets along the inheritance chain.
//!
//! [`InheritanceResolver`] collects the ancestor chain of a model from the
//! [`InheritanceGraph`], looks every link up in the [`ModelRegistry`], and
//! merges attributes from the most distant ancestor down to the model itself.
//!
//! # Merge rules
//!
//! - A descendant's attribute replaces an ancestor's attribute with the same
//!   name as a whole; individual fields are never merged.
//! - A replaced attribute keeps the position where its name first appeared.
//!
//! # Preconditions
//!
//! [`InheritanceGraph::detect_cycle`] must have succeeded on the graph. The
//! resolver does not re-check it.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{Level, debug, log_enabled, trace};

use ddags_core::{
    attribute::AttributeDefinition,
    identifier::ModelId,
    model::{ModelDefinition, ResolvedModel},
};

use crate::{error::Result, graph::InheritanceGraph, registry::ModelRegistry};

/// Work item of the chain walk.
enum Frame {
    /// Visit the parents of a model, then emit it.
    Enter(ModelId),
    /// All parents are emitted; emit the model.
    Exit(ModelId),
}

/// Resolves models against a registry and graph.
pub struct InheritanceResolver;

impl InheritanceResolver {
    /// Computes the effective attributes of `model_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ModelNotFound`](crate::error::SchemaError::ModelNotFound)
    /// if `model_id` or any of its ancestors is not registered.
    pub fn resolve(
        model_id: ModelId,
        registry: &ModelRegistry,
        graph: &InheritanceGraph,
    ) -> Result<ResolvedModel> {
        let chain = Self::chain(model_id, registry, graph)?;
        let attributes = Self::merge_attributes(&chain);

        debug!(
            model_id:% = model_id,
            chain_length = chain.len(),
            attributes_count = attributes.len();
            "Resolved model"
        );
        Ok(ResolvedModel::new(model_id, attributes))
    }

    /// Resolves every registered model, in registration order.
    ///
    /// # Errors
    ///
    /// Returns the first error [`resolve`](Self::resolve) reports.
    pub fn resolve_all(
        registry: &ModelRegistry,
        graph: &InheritanceGraph,
    ) -> Result<Vec<ResolvedModel>> {
        registry
            .ids()
            .map(|model_id| Self::resolve(model_id, registry, graph))
            .collect()
    }

    /// Returns the definitions along the chain, most distant ancestor first
    /// and `model_id` last.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ModelNotFound`](crate::error::SchemaError::ModelNotFound)
    /// for the first unregistered link, in chain order.
    pub fn chain<'r>(
        model_id: ModelId,
        registry: &'r ModelRegistry,
        graph: &InheritanceGraph,
    ) -> Result<Vec<&'r ModelDefinition>> {
        Self::collect_chain(model_id, graph)
            .into_iter()
            .map(|id| registry.get(id))
            .collect()
    }

    /// Depth-first walk that emits parents before the model itself.
    ///
    /// A visited set keeps every id to a single appearance.
    fn collect_chain(model_id: ModelId, graph: &InheritanceGraph) -> Vec<ModelId> {
        let mut ordered = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![Frame::Enter(model_id)];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(id) => {
                    if !visited.insert(id) {
                        continue;
                    }
                    stack.push(Frame::Exit(id));
                    // Reversed so that the first parent is visited first.
                    for parent in graph.parents(id).into_iter().rev() {
                        stack.push(Frame::Enter(parent));
                    }
                }
                Frame::Exit(id) => ordered.push(id),
            }
        }

        if log_enabled!(Level::Trace) {
            let chain = chain_names(&ordered);
            trace!(model_id:% = model_id, chain = chain; "Collected inheritance chain");
        }
        ordered
    }

    fn merge_attributes(chain: &[&ModelDefinition]) -> Vec<AttributeDefinition> {
        let mut by_name: IndexMap<&str, &AttributeDefinition> = IndexMap::new();
        for model in chain {
            for attribute in model.attributes() {
                by_name.insert(attribute.name(), attribute);
            }
        }
        by_name.into_values().cloned().collect()
    }
}

/// Renders a chain as `root -> ... -> model` using the model names.
fn chain_names(chain: &[ModelId]) -> String {
    chain
        .iter()
        .map(ModelId::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

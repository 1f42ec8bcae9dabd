//! Parent/child bookkeeping between model identifiers.
//!
//! [`InheritanceGraph`] is built from [`InheritanceDefinition`]s and is
//! independent of the [`ModelRegistry`](crate::registry::ModelRegistry):
//! identifiers mentioned by an edge do not have to be registered. Existence
//! is checked later, when a model is resolved or validated.
//!
//! # Invariants
//!
//! - No edge connects a model to itself.
//! - A child has at most one parent, so the graph is a forest unless it
//!   contains a cycle.
//! - Every cycle has length two or more and is reported by
//!   [`InheritanceGraph::detect_cycle`].

use std::collections::{HashMap, HashSet};

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};

use ddags_core::{identifier::ModelId, model::InheritanceDefinition};

use crate::error::{InheritanceIssue, Result, SchemaError};

/// Traversal state of a node during cycle detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

/// Inheritance edges of one session.
///
/// All maps preserve first insertion order so that traversals, and therefore
/// reported errors, are reproducible.
#[derive(Debug, Default, Clone)]
pub struct InheritanceGraph {
    parent_by_child: IndexMap<ModelId, ModelId>,
    children_by_parent: IndexMap<ModelId, IndexSet<ModelId>>,
    /// Every id mentioned by an edge, child before parent, in first-seen order.
    model_ids: IndexSet<ModelId>,
}

impl InheritanceGraph {
    /// Creates a graph without edges.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from an ordered list of definitions.
    ///
    /// # Errors
    ///
    /// Returns the first error [`add`](Self::add) reports.
    pub fn from_definitions(definitions: &[InheritanceDefinition]) -> Result<Self> {
        let mut graph = Self::new();
        for definition in definitions {
            graph.add(definition)?;
        }
        debug!(
            edges_count = graph.edge_count(),
            models_count = graph.model_ids.len();
            "Built inheritance graph"
        );
        Ok(graph)
    }

    /// Inserts one edge.
    ///
    /// Adding an edge that already exists is a no-op. On error the graph is
    /// left unchanged.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::InvalidInheritance`] if either id is empty or both are
    ///   the same model.
    /// - [`SchemaError::MultipleParent`] if the child already has a different
    ///   parent.
    pub fn add(&mut self, definition: &InheritanceDefinition) -> Result<()> {
        let parent = definition.parent_model_id();
        let child = definition.child_model_id();

        if parent.is_empty() || child.is_empty() {
            return Err(SchemaError::InvalidInheritance {
                parent,
                child,
                issue: InheritanceIssue::MissingModelId,
            });
        }
        if parent == child {
            return Err(SchemaError::InvalidInheritance {
                parent,
                child,
                issue: InheritanceIssue::SelfInheritance,
            });
        }

        match self.parent_by_child.get(&child) {
            Some(&existing) if existing != parent => {
                return Err(SchemaError::MultipleParent {
                    child,
                    existing,
                    rejected: parent,
                });
            }
            Some(_) => {
                trace!(parent:% = parent, child:% = child; "Ignoring repeated inheritance");
                return Ok(());
            }
            None => {}
        }

        self.parent_by_child.insert(child, parent);
        self.children_by_parent
            .entry(parent)
            .or_default()
            .insert(child);
        self.model_ids.insert(child);
        self.model_ids.insert(parent);

        trace!(parent:% = parent, child:% = child; "Added inheritance");
        Ok(())
    }

    /// Returns the parent of `model_id`, if it has one.
    pub fn parent(&self, model_id: ModelId) -> Option<ModelId> {
        self.parent_by_child.get(&model_id).copied()
    }

    /// Returns the parents of `model_id`: empty, or exactly one id.
    ///
    /// Unknown ids yield an empty list.
    pub fn parents(&self, model_id: ModelId) -> Vec<ModelId> {
        self.parent(model_id).into_iter().collect()
    }

    /// Returns the direct children of `model_id` in insertion order.
    ///
    /// Unknown ids yield an empty list.
    pub fn children(&self, model_id: ModelId) -> Vec<ModelId> {
        self.children_by_parent
            .get(&model_id)
            .map(|children| children.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Returns the ancestors of `model_id`, nearest first.
    ///
    /// The walk stops before any id it has already produced, so it terminates
    /// even on a graph that still contains a cycle.
    pub fn ancestors(&self, model_id: ModelId) -> Vec<ModelId> {
        let mut seen = HashSet::from([model_id]);
        let mut ancestors = Vec::new();
        let mut current = model_id;

        while let Some(parent) = self.parent(current) {
            if !seen.insert(parent) {
                break;
            }
            ancestors.push(parent);
            current = parent;
        }
        ancestors
    }

    /// Returns tracked ids that have no parent, in first-seen order.
    pub fn roots(&self) -> impl Iterator<Item = ModelId> + '_ {
        self.model_ids
            .iter()
            .copied()
            .filter(|id| !self.parent_by_child.contains_key(id))
    }

    /// Returns every id mentioned by an edge, in first-seen order.
    pub fn model_ids(&self) -> impl Iterator<Item = ModelId> + '_ {
        self.model_ids.iter().copied()
    }

    /// Returns the number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.parent_by_child.len()
    }

    /// Returns one definition per distinct edge, in insertion order.
    pub fn definitions(&self) -> impl Iterator<Item = InheritanceDefinition> + '_ {
        self.parent_by_child
            .iter()
            .map(|(&child, &parent)| InheritanceDefinition::new(parent, child))
    }

    /// Checks that following parent edges never leads back to a model.
    ///
    /// Starting points are visited in first-seen order and each walk follows
    /// parents, using three-state coloring. Re-entering a model whose walk is
    /// still in progress reports that model.
    ///
    /// Must be called after the edge set is complete and before any model is
    /// resolved: resolution does not check for cycles itself.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::CycleDetected`] naming the model where the
    /// cycle was closed.
    pub fn detect_cycle(&self) -> Result<()> {
        let mut states: HashMap<ModelId, VisitState> = HashMap::new();
        let mut path = Vec::new();

        for start in self.model_ids() {
            let mut current = Some(start);

            while let Some(model_id) = current {
                match states.get(&model_id) {
                    Some(VisitState::Done) => break,
                    Some(VisitState::InProgress) => {
                        debug!(model_id:% = model_id; "Inheritance cycle detected");
                        return Err(SchemaError::CycleDetected { model_id });
                    }
                    None => {}
                }
                states.insert(model_id, VisitState::InProgress);
                path.push(model_id);
                current = self.parent(model_id);
            }

            for model_id in path.drain(..) {
                states.insert(model_id, VisitState::Done);
            }
        }

        Ok(())
    }
}

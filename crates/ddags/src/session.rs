//! Loaded schema state: registry plus acyclic inheritance graph.

use log::{debug, info};

use ddags_core::{
    identifier::ModelId,
    model::{InheritanceDefinition, ModelDefinition, ModelSnapshot, ResolvedModel},
};
use ddags_schema::{
    AttributeValidator, InheritanceGraph, InheritanceResolver, ModelRegistry, error::Result,
};

use crate::config::ValidationConfig;

/// A registry and graph that passed loading checks.
///
/// Sessions are produced by [`SchemaBuilder`](crate::SchemaBuilder). The
/// graph of a session is always acyclic; mutating methods keep it that way
/// and leave the session unchanged when they fail.
#[derive(Debug, Clone)]
pub struct SchemaSession {
    registry: ModelRegistry,
    graph: InheritanceGraph,
    validation: ValidationConfig,
}

impl SchemaSession {
    pub(crate) fn new(
        registry: ModelRegistry,
        graph: InheritanceGraph,
        validation: ValidationConfig,
    ) -> Self {
        Self {
            registry,
            graph,
            validation,
        }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn graph(&self) -> &InheritanceGraph {
        &self.graph
    }

    /// Resolves the effective attributes of a single model.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ModelNotFound` if the model or one of its
    /// ancestors is not registered.
    pub fn resolve(&self, model_id: ModelId) -> Result<ResolvedModel> {
        InheritanceResolver::resolve(model_id, &self.registry, &self.graph)
    }

    /// Resolves the given models in order.
    pub fn resolve_many(
        &self,
        model_ids: impl IntoIterator<Item = ModelId>,
    ) -> Result<Vec<ResolvedModel>> {
        model_ids
            .into_iter()
            .map(|model_id| self.resolve(model_id))
            .collect()
    }

    /// Resolves every registered model in registration order.
    pub fn resolve_all(&self) -> Result<Vec<ResolvedModel>> {
        InheritanceResolver::resolve_all(&self.registry, &self.graph)
    }

    /// Validates and registers a new model.
    ///
    /// Validation follows the session's configuration, so references to the
    /// model itself are rejected when `reject_self_references` is set.
    pub fn add_model(&mut self, model: ModelDefinition) -> Result<()> {
        if self.validation.validate_on_load() {
            let owner = self
                .validation
                .reject_self_references()
                .then(|| model.model_id());
            AttributeValidator::validate(model.attributes(), &self.registry, owner)?;
        }

        let model_id = model.model_id();
        self.registry.register(model)?;
        info!(model_id:% = model_id; "Model added");
        Ok(())
    }

    /// Adds an inheritance edge if the graph stays a forest.
    ///
    /// # Errors
    ///
    /// Returns the graph's construction errors, or
    /// `SchemaError::CycleDetected` if the edge closes a cycle.
    pub fn add_inheritance(&mut self, definition: &InheritanceDefinition) -> Result<()> {
        let mut graph = self.graph.clone();
        graph.add(definition)?;
        graph.detect_cycle()?;

        self.graph = graph;
        info!(
            parent:% = definition.parent_model_id(),
            child:% = definition.child_model_id();
            "Inheritance added"
        );
        Ok(())
    }

    /// Removes a model from the registry.
    ///
    /// Edges that mention the model are kept; resolving a descendant then
    /// reports the missing ancestor.
    pub fn remove_model(&mut self, model_id: ModelId) -> Result<ModelDefinition> {
        let removed = self.registry.remove(model_id)?;
        debug!(model_id:% = model_id; "Model removed");
        Ok(removed)
    }

    /// Returns the models and edges of this session as a snapshot.
    pub fn to_snapshot(&self) -> ModelSnapshot {
        ModelSnapshot::new(
            self.registry.list().cloned().collect(),
            self.graph.definitions().collect(),
        )
    }
}

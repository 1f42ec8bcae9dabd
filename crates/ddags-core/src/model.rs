//! Model-level records exchanged with editors and transports.
//!
//! - [`ModelDefinition`] - A named schema with its own attributes.
//! - [`InheritanceDefinition`] - A parent/child edge between two models.
//! - [`ModelSnapshot`] - Every model and edge of a design, as loaded or saved.
//! - [`ResolvedModel`] - The effective attribute set of a model after
//!   inheritance has been applied.
//!
//! Field names follow the camelCase JSON contract (`modelId`,
//! `parentModelId`, `childModelId`).

use serde::{Deserialize, Serialize};

use crate::{attribute::AttributeDefinition, identifier::ModelId};

/// A named schema with an identifier and an ordered list of attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDefinition {
    model_id: ModelId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    attributes: Vec<AttributeDefinition>,
}

impl ModelDefinition {
    /// Creates a new model definition without a description.
    ///
    /// # Arguments
    ///
    /// * `model_id` - Identifier, unique across a registry.
    /// * `name` - Human-readable name.
    /// * `attributes` - The model's own attributes, in declaration order.
    pub fn new(
        model_id: impl Into<ModelId>,
        name: impl Into<String>,
        attributes: Vec<AttributeDefinition>,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            name: name.into(),
            description: None,
            attributes,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn model_id(&self) -> ModelId {
        self.model_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The model's own attributes, excluding anything inherited.
    pub fn attributes(&self) -> &[AttributeDefinition] {
        &self.attributes
    }
}

/// A parent/child relationship between two model identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InheritanceDefinition {
    parent_model_id: ModelId,
    child_model_id: ModelId,
}

impl InheritanceDefinition {
    /// Creates an edge stating that `child` inherits from `parent`.
    pub fn new(parent: impl Into<ModelId>, child: impl Into<ModelId>) -> Self {
        Self {
            parent_model_id: parent.into(),
            child_model_id: child.into(),
        }
    }

    pub fn parent_model_id(&self) -> ModelId {
        self.parent_model_id
    }

    pub fn child_model_id(&self) -> ModelId {
        self.child_model_id
    }
}

/// Every model and inheritance edge of one design.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    #[serde(default)]
    models: Vec<ModelDefinition>,
    #[serde(default)]
    inheritances: Vec<InheritanceDefinition>,
}

impl ModelSnapshot {
    pub fn new(models: Vec<ModelDefinition>, inheritances: Vec<InheritanceDefinition>) -> Self {
        Self {
            models,
            inheritances,
        }
    }

    pub fn models(&self) -> &[ModelDefinition] {
        &self.models
    }

    pub fn inheritances(&self) -> &[InheritanceDefinition] {
        &self.inheritances
    }

    /// Consumes the snapshot, returning its models and edges.
    pub fn into_parts(self) -> (Vec<ModelDefinition>, Vec<InheritanceDefinition>) {
        (self.models, self.inheritances)
    }
}

/// The effective schema of a model after inheritance is applied.
///
/// Attributes are unique by name. Their order is deterministic: an attribute
/// keeps the position where its name first appeared along the ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedModel {
    model_id: ModelId,
    attributes: Vec<AttributeDefinition>,
}

impl ResolvedModel {
    pub fn new(model_id: ModelId, attributes: Vec<AttributeDefinition>) -> Self {
        Self {
            model_id,
            attributes,
        }
    }

    pub fn model_id(&self) -> ModelId {
        self.model_id
    }

    pub fn attributes(&self) -> &[AttributeDefinition] {
        &self.attributes
    }

    /// Looks up an effective attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|attr| attr.name() == name)
    }
}

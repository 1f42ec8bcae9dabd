//! The authoritative store of model definitions.
//!
//! [`ModelRegistry`] owns every registered [`ModelDefinition`] keyed by its
//! [`ModelId`]. Registration enforces identity (non-empty, unique ids) and
//! attribute-name uniqueness within one model. No attribute merging happens
//! here; see [`InheritanceResolver`](crate::resolver::InheritanceResolver).

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, trace};

use ddags_core::{identifier::ModelId, model::ModelDefinition};

use crate::error::{Result, SchemaError};

/// Registered model definitions, in registration order.
#[derive(Debug, Default, Clone)]
pub struct ModelRegistry {
    models: IndexMap<ModelId, ModelDefinition>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry by registering `models` in order.
    ///
    /// # Errors
    ///
    /// Returns the first error [`register`](Self::register) reports.
    pub fn from_models(models: impl IntoIterator<Item = ModelDefinition>) -> Result<Self> {
        let mut registry = Self::new();
        for model in models {
            registry.register(model)?;
        }
        Ok(registry)
    }

    /// Registers a model definition verbatim.
    ///
    /// On error the registry is left unchanged.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::InvalidModel`] if the model id is empty.
    /// - [`SchemaError::DuplicateModel`] if the id is already registered.
    /// - [`SchemaError::DuplicateAttribute`] if two attributes share a name.
    pub fn register(&mut self, model: ModelDefinition) -> Result<()> {
        let model_id = model.model_id();

        if model_id.is_empty() {
            return Err(SchemaError::InvalidModel {
                name: model.name().to_string(),
            });
        }
        if self.models.contains_key(&model_id) {
            return Err(SchemaError::DuplicateModel { model_id });
        }

        Self::check_attribute_names(model_id, model.attributes().iter().map(|a| a.name()))?;

        debug!(
            model_id:% = model_id,
            attributes_count = model.attributes().len();
            "Registered model"
        );
        self.models.insert(model_id, model);
        Ok(())
    }

    /// Checks that no two of `names` are equal.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateAttribute`] for the first repeat.
    pub fn check_attribute_names<'a>(
        model_id: ModelId,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<()> {
        let mut seen = HashSet::new();
        for name in names {
            if !seen.insert(name) {
                return Err(SchemaError::DuplicateAttribute {
                    model_id,
                    attribute: name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the definition registered under `model_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ModelNotFound`] if no such model is registered.
    pub fn get(&self, model_id: ModelId) -> Result<&ModelDefinition> {
        self.models
            .get(&model_id)
            .ok_or(SchemaError::ModelNotFound { model_id })
    }

    /// Removes a model so that a replacement can be registered under its id.
    ///
    /// The relative order of the remaining models is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ModelNotFound`] if no such model is registered.
    pub fn remove(&mut self, model_id: ModelId) -> Result<ModelDefinition> {
        let model = self
            .models
            .shift_remove(&model_id)
            .ok_or(SchemaError::ModelNotFound { model_id })?;
        trace!(model_id:% = model_id; "Removed model");
        Ok(model)
    }

    /// Returns `true` if a model is registered under `model_id`.
    pub fn contains(&self, model_id: ModelId) -> bool {
        self.models.contains_key(&model_id)
    }

    /// Returns all registered definitions in registration order.
    pub fn list(&self) -> impl Iterator<Item = &ModelDefinition> {
        self.models.values()
    }

    /// Returns all registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = ModelId> + '_ {
        self.models.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use ddags_core::attribute::{AttributeDefinition, PrimitiveKind};

    use super::*;

    fn string_attr(name: &str) -> AttributeDefinition {
        AttributeDefinition::primitive(name, PrimitiveKind::String, false)
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ModelRegistry::new();
        registry
            .register(ModelDefinition::new(
                "animal",
                "Animal",
                vec![string_attr("name")],
            ))
            .unwrap();

        let model = registry.get(ModelId::new("animal")).unwrap();
        assert_eq!(model.name(), "Animal");
        assert_eq!(model.attributes().len(), 1);
        assert!(registry.contains(ModelId::new("animal")));
    }

    #[test]
    fn test_register_duplicate_model_keeps_first() {
        let mut registry = ModelRegistry::new();
        registry
            .register(ModelDefinition::new("animal", "Animal", Vec::new()))
            .unwrap();

        let err = registry
            .register(ModelDefinition::new(
                "animal",
                "Impostor",
                vec![string_attr("x")],
            ))
            .unwrap_err();

        assert_eq!(
            err,
            SchemaError::DuplicateModel {
                model_id: ModelId::new("animal")
            }
        );
        let listed: Vec<_> = registry.list().collect();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name(), "Animal");
        assert!(listed[0].attributes().is_empty());
    }

    #[test]
    fn test_register_empty_model_id() {
        let mut registry = ModelRegistry::new();
        let err = registry
            .register(ModelDefinition::new("", "Nameless", Vec::new()))
            .unwrap_err();

        assert!(matches!(err, SchemaError::InvalidModel { ref name } if name == "Nameless"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_duplicate_attribute() {
        let mut registry = ModelRegistry::new();
        let err = registry
            .register(ModelDefinition::new(
                "person",
                "Person",
                vec![string_attr("email"), string_attr("email")],
            ))
            .unwrap_err();

        assert_eq!(
            err,
            SchemaError::DuplicateAttribute {
                model_id: ModelId::new("person"),
                attribute: "email".to_string(),
            }
        );
        assert!(!registry.contains(ModelId::new("person")));
    }

    #[test]
    fn test_same_attribute_name_across_models_is_allowed() {
        let registry = ModelRegistry::from_models([
            ModelDefinition::new("a", "A", vec![string_attr("id")]),
            ModelDefinition::new("b", "B", vec![string_attr("id")]),
        ]);

        assert!(registry.is_ok());
    }

    #[test]
    fn test_get_missing_model() {
        let registry = ModelRegistry::new();
        let err = registry.get(ModelId::new("ghost")).unwrap_err();

        assert_eq!(
            err,
            SchemaError::ModelNotFound {
                model_id: ModelId::new("ghost")
            }
        );
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let registry = ModelRegistry::from_models([
            ModelDefinition::new("zebra", "Zebra", Vec::new()),
            ModelDefinition::new("ant", "Ant", Vec::new()),
            ModelDefinition::new("moose", "Moose", Vec::new()),
        ])
        .unwrap();

        let ids: Vec<_> = registry.ids().map(|id| id.to_string()).collect();
        assert_eq!(ids, ["zebra", "ant", "moose"]);
    }

    #[test]
    fn test_remove_then_register_replacement() {
        let mut registry = ModelRegistry::from_models([
            ModelDefinition::new("a", "A", Vec::new()),
            ModelDefinition::new("b", "B", Vec::new()),
            ModelDefinition::new("c", "C", Vec::new()),
        ])
        .unwrap();

        let removed = registry.remove(ModelId::new("b")).unwrap();
        assert_eq!(removed.name(), "B");
        assert_eq!(registry.len(), 2);

        registry
            .register(ModelDefinition::new("b", "B2", vec![string_attr("x")]))
            .unwrap();

        let names: Vec<_> = registry.list().map(|m| m.name()).collect();
        assert_eq!(names, ["A", "C", "B2"]);
    }

    #[test]
    fn test_remove_missing_model() {
        let mut registry = ModelRegistry::new();
        assert!(matches!(
            registry.remove(ModelId::new("nope")),
            Err(SchemaError::ModelNotFound { .. })
        ));
    }
}

//! Structural and referential checks for attribute definitions.
//!
//! The validator runs against an already populated
//! [`ModelRegistry`] and never mutates it. Call it before registering a
//! model, or before committing an edited attribute list.

use log::trace;

use ddags_core::{
    attribute::{AttributeDefinition, AttributeType},
    identifier::ModelId,
    model::ModelDefinition,
};

use crate::{
    error::{AttributeIssue, Result, SchemaError},
    registry::ModelRegistry,
    snapshot::RawAttributeDefinition,
};

/// Checks attribute lists against a registry.
pub struct AttributeValidator;

impl AttributeValidator {
    /// Validates `attributes` in order, stopping at the first failure.
    ///
    /// `owner` is the model the attributes belong to. When given, a reference
    /// back to it is rejected even if it is registered.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::InvalidAttribute`] for an empty name or a reference
    ///   without a target.
    /// - [`SchemaError::SelfReference`] for a reference to `owner`.
    /// - [`SchemaError::ModelNotFound`] for a reference to an unregistered
    ///   model.
    pub fn validate(
        attributes: &[AttributeDefinition],
        registry: &ModelRegistry,
        owner: Option<ModelId>,
    ) -> Result<()> {
        for attribute in attributes {
            Self::validate_single(attribute, registry, owner)?;
        }
        Ok(())
    }

    /// Validates the attributes of `model`, using it as the owner.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn validate_model(model: &ModelDefinition, registry: &ModelRegistry) -> Result<()> {
        Self::validate(model.attributes(), registry, Some(model.model_id()))
    }

    /// Decodes and validates raw attributes, returning the typed list.
    ///
    /// Each attribute is fully checked (name, type tag, primitive kind,
    /// reference) before the next one is looked at.
    ///
    /// # Errors
    ///
    /// Everything [`validate`](Self::validate) reports, plus
    /// [`SchemaError::InvalidAttributeType`] and
    /// [`SchemaError::UnsupportedAttributeType`] from decoding.
    pub fn validate_raw(
        attributes: &[RawAttributeDefinition],
        registry: &ModelRegistry,
        owner: Option<ModelId>,
    ) -> Result<Vec<AttributeDefinition>> {
        attributes
            .iter()
            .map(|raw| {
                let attribute = raw.decode()?;
                Self::validate_single(&attribute, registry, owner)?;
                Ok(attribute)
            })
            .collect()
    }

    fn validate_single(
        attribute: &AttributeDefinition,
        registry: &ModelRegistry,
        owner: Option<ModelId>,
    ) -> Result<()> {
        Self::check_name(attribute.name())?;

        match attribute.attribute_type() {
            AttributeType::Primitive { .. } => {}
            AttributeType::Reference { target } => {
                if target.is_empty() {
                    return Err(SchemaError::InvalidAttribute(
                        AttributeIssue::MissingReferenceTarget {
                            attribute: attribute.name().to_string(),
                        },
                    ));
                }
                if let Some(owner) = owner.filter(|owner| *owner == target) {
                    return Err(SchemaError::SelfReference {
                        attribute: attribute.name().to_string(),
                        model_id: owner,
                    });
                }
                registry.get(target)?;
            }
        }

        trace!(attribute = attribute.name(); "Attribute is valid");
        Ok(())
    }

    fn check_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(SchemaError::InvalidAttribute(AttributeIssue::EmptyName));
        }
        Ok(())
    }
}

//! Loosely typed mirrors of the snapshot wire format.
//!
//! Editors and transports hand over data that may be incomplete or carry
//! type tags this engine does not know. The `Raw*` types accept any such
//! input so that decoding into the strongly typed
//! [`ddags_core::model`] records can report a precise [`SchemaError`]
//! instead of a generic deserialization failure.
//!
//! Missing identifiers decode to empty [`ModelId`]s; the registry and graph
//! reject those with their own typed errors.

use serde::Deserialize;

use ddags_core::{
    attribute::{AttributeDefinition, AttributeType, PrimitiveKind},
    identifier::ModelId,
    model::{InheritanceDefinition, ModelDefinition, ModelSnapshot},
};

use crate::{
    error::{AttributeIssue, Result, SchemaError},
    registry::ModelRegistry,
};

/// An attribute type as found on the wire, before its tag is checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawAttributeType {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default, rename = "type")]
    pub primitive: Option<String>,
    #[serde(default, rename = "modelId")]
    pub model_id: Option<String>,
}

impl RawAttributeType {
    /// Decodes the type of the attribute named `attribute`.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::InvalidAttributeType`] for a primitive kind outside
    ///   the recognized set.
    /// - [`SchemaError::InvalidAttribute`] for a reference without a target.
    /// - [`SchemaError::UnsupportedAttributeType`] for any other tag.
    pub fn decode(&self, attribute: &str) -> Result<AttributeType> {
        match self.kind.as_deref() {
            Some("primitive") => {
                let value = self.primitive.as_deref().unwrap_or_default();
                let kind = value.parse::<PrimitiveKind>().map_err(|err| {
                    SchemaError::InvalidAttributeType {
                        attribute: attribute.to_string(),
                        kind: err.0,
                    }
                })?;
                Ok(AttributeType::primitive(kind))
            }
            Some("reference") => match self.model_id.as_deref() {
                Some(target) if !target.is_empty() => Ok(AttributeType::reference(target)),
                _ => Err(SchemaError::InvalidAttribute(
                    AttributeIssue::MissingReferenceTarget {
                        attribute: attribute.to_string(),
                    },
                )),
            },
            other => Err(SchemaError::UnsupportedAttributeType {
                attribute: attribute.to_string(),
                kind: other.unwrap_or("unknown").to_string(),
            }),
        }
    }
}

/// An attribute definition as found on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawAttributeDefinition {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub attribute_type: RawAttributeType,
    #[serde(default)]
    pub nullable: bool,
}

impl RawAttributeDefinition {
    /// Returns the attribute name, or `""` when absent.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Decodes into a typed attribute.
    ///
    /// The name is checked before the type, so an unnamed attribute is
    /// reported as such whatever its type tag holds.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::InvalidAttribute`] for a missing or blank name.
    /// - Everything [`RawAttributeType::decode`] reports.
    pub fn decode(&self) -> Result<AttributeDefinition> {
        if self.name().trim().is_empty() {
            return Err(SchemaError::InvalidAttribute(AttributeIssue::EmptyName));
        }
        let attribute_type = self.attribute_type.decode(self.name())?;
        Ok(AttributeDefinition::new(
            self.name(),
            attribute_type,
            self.nullable,
        ))
    }
}

/// A model definition as found on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModelDefinition {
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attributes: Vec<RawAttributeDefinition>,
}

impl RawModelDefinition {
    /// Returns the model id, empty when absent.
    pub fn model_id(&self) -> ModelId {
        ModelId::new(self.model_id.as_deref().unwrap_or_default())
    }

    /// Decodes into a typed model definition.
    ///
    /// # Errors
    ///
    /// Returns the first attribute that fails to decode.
    pub fn decode(&self) -> Result<ModelDefinition> {
        let attributes = self
            .attributes
            .iter()
            .map(RawAttributeDefinition::decode)
            .collect::<Result<Vec<_>>>()?;
        Ok(self.with_attributes(attributes))
    }

    /// Builds the typed definition from this model's identity and
    /// already decoded `attributes`.
    pub fn with_attributes(&self, attributes: Vec<AttributeDefinition>) -> ModelDefinition {
        let model = ModelDefinition::new(
            self.model_id(),
            self.name.as_deref().unwrap_or_default(),
            attributes,
        );
        match &self.description {
            Some(description) => model.with_description(description),
            None => model,
        }
    }
}

/// An inheritance edge as found on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInheritanceDefinition {
    #[serde(default)]
    pub parent_model_id: Option<String>,
    #[serde(default)]
    pub child_model_id: Option<String>,
}

impl RawInheritanceDefinition {
    pub fn decode(&self) -> InheritanceDefinition {
        InheritanceDefinition::new(
            self.parent_model_id.as_deref().unwrap_or_default(),
            self.child_model_id.as_deref().unwrap_or_default(),
        )
    }
}

/// A whole snapshot as found on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawModelSnapshot {
    #[serde(default)]
    pub models: Vec<RawModelDefinition>,
    #[serde(default)]
    pub inheritances: Vec<RawInheritanceDefinition>,
}

impl RawModelSnapshot {
    /// Registers every model without its attributes.
    ///
    /// Runs the checks [`ModelRegistry::register`] performs (id, then
    /// uniqueness, then attribute names) for all models before any attribute
    /// type is looked at. The returned registry knows every id of the
    /// snapshot, which is what reference checks need.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::InvalidModel`] for a model without an id.
    /// - [`SchemaError::DuplicateModel`] for a repeated id.
    /// - [`SchemaError::DuplicateAttribute`] for a repeated attribute name.
    pub fn identities(&self) -> Result<ModelRegistry> {
        let mut registry = ModelRegistry::new();
        for model in &self.models {
            let model_id = model.model_id();
            registry.register(model.with_attributes(Vec::new()))?;
            ModelRegistry::check_attribute_names(
                model_id,
                model.attributes.iter().map(RawAttributeDefinition::name),
            )?;
        }
        Ok(registry)
    }

    /// Decodes the inheritance edges, in order.
    pub fn decode_inheritances(&self) -> Vec<InheritanceDefinition> {
        self.inheritances
            .iter()
            .map(RawInheritanceDefinition::decode)
            .collect()
    }

    /// Decodes every model and edge, in order.
    ///
    /// # Errors
    ///
    /// Returns the first attribute type that fails to decode.
    pub fn decode(&self) -> Result<ModelSnapshot> {
        let models = self
            .models
            .iter()
            .map(RawModelDefinition::decode)
            .collect::<Result<Vec<_>>>()?;
        Ok(ModelSnapshot::new(models, self.decode_inheritances()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_type(json: &str) -> RawAttributeType {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_decode_primitive() {
        let ty = raw_type(r#"{"kind":"primitive","type":"BOOLEAN"}"#)
            .decode("active")
            .unwrap();
        assert_eq!(ty, AttributeType::primitive(PrimitiveKind::Boolean));
    }

    #[test]
    fn test_decode_unknown_primitive_kind() {
        let err = raw_type(r#"{"kind":"primitive","type":"DECIMAL"}"#)
            .decode("price")
            .unwrap_err();

        assert_eq!(
            err,
            SchemaError::InvalidAttributeType {
                attribute: "price".to_string(),
                kind: "DECIMAL".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_missing_primitive_kind() {
        let err = raw_type(r#"{"kind":"primitive"}"#)
            .decode("price")
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidAttributeType { .. }));
    }

    #[test]
    fn test_decode_reference_without_target() {
        for json in [r#"{"kind":"reference"}"#, r#"{"kind":"reference","modelId":""}"#] {
            let err = raw_type(json).decode("owner").unwrap_err();
            assert_eq!(
                err,
                SchemaError::InvalidAttribute(AttributeIssue::MissingReferenceTarget {
                    attribute: "owner".to_string()
                })
            );
        }
    }

    #[test]
    fn test_decode_unsupported_kind() {
        let err = raw_type(r#"{"kind":"union"}"#).decode("value").unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnsupportedAttributeType {
                attribute: "value".to_string(),
                kind: "union".to_string(),
            }
        );

        let err = raw_type("{}").decode("value").unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnsupportedAttributeType { ref kind, .. } if kind == "unknown"
        ));
    }

    #[test]
    fn test_decode_snapshot() {
        let raw: RawModelSnapshot = serde_json::from_str(
            r#"{
                "models": [
                    {
                        "modelId": "animal",
                        "name": "Animal",
                        "description": "Any animal",
                        "attributes": [
                            {
                                "name": "name",
                                "type": { "kind": "primitive", "type": "STRING" },
                                "nullable": false
                            }
                        ]
                    },
                    { "modelId": "dog", "name": "Dog" }
                ],
                "inheritances": [
                    { "parentModelId": "animal", "childModelId": "dog" }
                ]
            }"#,
        )
        .unwrap();

        let snapshot = raw.decode().unwrap();

        assert_eq!(snapshot.models().len(), 2);
        assert_eq!(snapshot.models()[0].description(), Some("Any animal"));
        assert_eq!(snapshot.models()[0].attributes()[0].name(), "name");
        assert_eq!(snapshot.inheritances()[0].parent_model_id(), "animal");
    }

    #[test]
    fn test_attribute_name_checked_before_type() {
        let raw: RawAttributeDefinition =
            serde_json::from_str(r#"{ "name": " ", "type": { "kind": "union" } }"#).unwrap();

        let err = raw.decode().unwrap_err();

        assert_eq!(err, SchemaError::InvalidAttribute(AttributeIssue::EmptyName));
    }

    #[test]
    fn test_identities_run_before_type_decoding() {
        let raw: RawModelSnapshot = serde_json::from_str(
            r#"{ "models": [
                { "modelId": "dog", "name": "Dog" },
                { "modelId": "dog", "name": "Dog", "attributes": [
                    { "name": "price", "type": { "kind": "primitive", "type": "DECIMAL" } }
                ] }
            ] }"#,
        )
        .unwrap();

        let err = raw.identities().unwrap_err();

        assert_eq!(
            err,
            SchemaError::DuplicateModel {
                model_id: ModelId::new("dog")
            }
        );
    }

    #[test]
    fn test_identities_reject_repeated_attribute_names() {
        let raw: RawModelSnapshot = serde_json::from_str(
            r#"{ "models": [ { "modelId": "dog", "name": "Dog", "attributes": [
                { "name": "breed", "type": { "kind": "union" } },
                { "name": "breed", "type": { "kind": "primitive", "type": "STRING" } }
            ] } ] }"#,
        )
        .unwrap();

        let err = raw.identities().unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateAttribute { .. }));
    }

    #[test]
    fn test_identities_know_every_id() {
        let raw: RawModelSnapshot = serde_json::from_str(
            r#"{ "models": [ { "modelId": "dog", "name": "Dog" }, { "modelId": "person" } ] }"#,
        )
        .unwrap();

        let registry = raw.identities().unwrap();

        assert_eq!(registry.ids().collect::<Vec<_>>(), ["dog", "person"]);
        assert!(registry.list().all(|model| model.attributes().is_empty()));
    }

    #[test]
    fn test_missing_ids_decode_to_empty() {
        let raw: RawModelSnapshot = serde_json::from_str(
            r#"{ "models": [ { "name": "Anon" } ], "inheritances": [ { "childModelId": "x" } ] }"#,
        )
        .unwrap();

        let snapshot = raw.decode().unwrap();

        assert!(snapshot.models()[0].model_id().is_empty());
        assert!(snapshot.inheritances()[0].parent_model_id().is_empty());
    }
}

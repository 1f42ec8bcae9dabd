//! Attribute definitions and their types.
//!
//! An attribute is a named, typed field on a model. Its type is either one of
//! the [`PrimitiveKind`]s or a reference to another model.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifier::ModelId;

/// Built-in scalar kinds an attribute can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    Date,
}

impl PrimitiveKind {
    /// Every recognized primitive kind, in wire order.
    pub const ALL: [PrimitiveKind; 4] = [
        PrimitiveKind::String,
        PrimitiveKind::Number,
        PrimitiveKind::Boolean,
        PrimitiveKind::Date,
    ];

    /// Returns the wire name of this kind (e.g., "STRING").
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "STRING",
            PrimitiveKind::Number => "NUMBER",
            PrimitiveKind::Boolean => "BOOLEAN",
            PrimitiveKind::Date => "DATE",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A primitive kind name that is not one of [`PrimitiveKind::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid primitive type `{0}`")]
pub struct UnknownPrimitiveKind(pub String);

impl FromStr for PrimitiveKind {
    type Err = UnknownPrimitiveKind;

    /// Parses a wire name. Matching is exact, so `"string"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrimitiveKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownPrimitiveKind(s.to_string()))
    }
}

/// The type of an attribute.
///
/// Serialized with a `kind` tag:
///
/// ```
/// use ddags_core::attribute::{AttributeType, PrimitiveKind};
///
/// let ty = AttributeType::primitive(PrimitiveKind::Date);
/// let json = serde_json::to_string(&ty).unwrap();
/// assert_eq!(json, r#"{"kind":"primitive","type":"DATE"}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AttributeType {
    /// A scalar value of the given kind.
    Primitive {
        #[serde(rename = "type")]
        kind: PrimitiveKind,
    },

    /// A reference to another model.
    Reference {
        #[serde(rename = "modelId")]
        target: ModelId,
    },
}

impl AttributeType {
    /// Shorthand for a primitive attribute type.
    pub fn primitive(kind: PrimitiveKind) -> Self {
        AttributeType::Primitive { kind }
    }

    /// Shorthand for a reference attribute type.
    pub fn reference(target: impl Into<ModelId>) -> Self {
        AttributeType::Reference {
            target: target.into(),
        }
    }

    /// Returns the referenced model if this is a reference type.
    pub fn reference_target(&self) -> Option<ModelId> {
        match self {
            AttributeType::Reference { target } => Some(*target),
            AttributeType::Primitive { .. } => None,
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::Primitive { kind } => write!(f, "{kind}"),
            AttributeType::Reference { target } => write!(f, "-> {target}"),
        }
    }
}

/// A named, typed field on a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    name: String,
    #[serde(rename = "type")]
    attribute_type: AttributeType,
    nullable: bool,
}

impl AttributeDefinition {
    /// Creates a new attribute definition.
    ///
    /// # Arguments
    ///
    /// * `name` - Attribute name, unique within its owning model.
    /// * `attribute_type` - Primitive kind or model reference.
    /// * `nullable` - Whether the attribute may be absent.
    pub fn new(name: impl Into<String>, attribute_type: AttributeType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            attribute_type,
            nullable,
        }
    }

    /// Shorthand for a primitive attribute.
    pub fn primitive(name: impl Into<String>, kind: PrimitiveKind, nullable: bool) -> Self {
        Self::new(name, AttributeType::primitive(kind), nullable)
    }

    /// Shorthand for a reference attribute.
    pub fn reference(name: impl Into<String>, target: impl Into<ModelId>, nullable: bool) -> Self {
        Self::new(name, AttributeType::reference(target), nullable)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute_type(&self) -> AttributeType {
        self.attribute_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

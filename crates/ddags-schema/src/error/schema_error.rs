//! The [`SchemaError`] type returned by every schema operation.

use thiserror::Error;

use ddags_core::identifier::ModelId;

use crate::error::ErrorCode;

/// A type alias for `Result<T, SchemaError>`.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Why an inheritance edge was rejected before insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InheritanceIssue {
    #[error("inheritance must include parentModelId and childModelId")]
    MissingModelId,

    #[error("inheritance cannot reference itself")]
    SelfInheritance,
}

/// Why an attribute definition is structurally unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeIssue {
    #[error("attribute name is required")]
    EmptyName,

    #[error("reference modelId is required for `{attribute}`")]
    MissingReferenceTarget { attribute: String },
}

/// Errors raised by the registry, graph, validator and resolver.
///
/// None of these are transient: the same input always produces the same
/// error, so callers are expected to fix the input rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("model `{model_id}` already exists")]
    DuplicateModel { model_id: ModelId },

    #[error("modelId is required for model `{name}`")]
    InvalidModel { name: String },

    #[error("duplicate attribute name `{attribute}` in model `{model_id}`")]
    DuplicateAttribute { model_id: ModelId, attribute: String },

    #[error("model `{model_id}` not found")]
    ModelNotFound { model_id: ModelId },

    #[error("invalid inheritance `{parent}` -> `{child}`: {issue}")]
    InvalidInheritance {
        parent: ModelId,
        child: ModelId,
        issue: InheritanceIssue,
    },

    #[error(
        "multiple inheritance detected for `{child}`: \
        already inherits from `{existing}`, cannot also inherit from `{rejected}`"
    )]
    MultipleParent {
        child: ModelId,
        existing: ModelId,
        rejected: ModelId,
    },

    #[error("inheritance cycle detected at `{model_id}`")]
    CycleDetected { model_id: ModelId },

    #[error("{0}")]
    InvalidAttribute(AttributeIssue),

    #[error("invalid primitive type `{kind}` for attribute `{attribute}`")]
    InvalidAttributeType { attribute: String, kind: String },

    #[error("attribute `{attribute}` cannot reference its own model `{model_id}`")]
    SelfReference { attribute: String, model_id: ModelId },

    #[error("unsupported attribute type kind `{kind}` for attribute `{attribute}`")]
    UnsupportedAttributeType { attribute: String, kind: String },
}

impl SchemaError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SchemaError::DuplicateModel { .. } => ErrorCode::E100,
            SchemaError::InvalidModel { .. } => ErrorCode::E101,
            SchemaError::DuplicateAttribute { .. } => ErrorCode::E102,
            SchemaError::ModelNotFound { .. } => ErrorCode::E103,
            SchemaError::InvalidInheritance { .. } => ErrorCode::E200,
            SchemaError::MultipleParent { .. } => ErrorCode::E201,
            SchemaError::CycleDetected { .. } => ErrorCode::E202,
            SchemaError::InvalidAttribute(_) => ErrorCode::E300,
            SchemaError::InvalidAttributeType { .. } => ErrorCode::E301,
            SchemaError::SelfReference { .. } => ErrorCode::E302,
            SchemaError::UnsupportedAttributeType { .. } => ErrorCode::E303,
        }
    }

    /// Returns a short suggestion for fixing the input.
    pub fn help(&self) -> &'static str {
        match self {
            SchemaError::DuplicateModel { .. } => {
                "remove the existing model before registering a replacement"
            }
            SchemaError::InvalidModel { .. } => "give the model a non-empty modelId",
            SchemaError::DuplicateAttribute { .. } => {
                "rename or remove one of the attributes; names must be unique within a model"
            }
            SchemaError::ModelNotFound { .. } => {
                "register the model, or remove the edge or reference that mentions it"
            }
            SchemaError::InvalidInheritance { .. } => {
                "an inheritance edge needs two different, non-empty model ids"
            }
            SchemaError::MultipleParent { .. } => "a model can inherit from at most one parent",
            SchemaError::CycleDetected { .. } => {
                "remove one inheritance edge so that the chain ends at a root model"
            }
            SchemaError::InvalidAttribute(AttributeIssue::EmptyName) => {
                "give every attribute a non-empty name"
            }
            SchemaError::InvalidAttribute(AttributeIssue::MissingReferenceTarget { .. }) => {
                "set the modelId of the referenced model"
            }
            SchemaError::InvalidAttributeType { .. } => {
                "valid primitive types are: STRING, NUMBER, BOOLEAN, DATE"
            }
            SchemaError::SelfReference { .. } => "reference a different model",
            SchemaError::UnsupportedAttributeType { .. } => {
                "valid attribute type kinds are: primitive, reference"
            }
        }
    }
}

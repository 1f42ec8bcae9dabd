//! Error codes for the ddags schema engine.
//!
//! Error codes are organized by component:
//! - `E1xx` - Model registry errors
//! - `E2xx` - Inheritance graph errors
//! - `E3xx` - Attribute validation errors

use std::fmt;

/// Error codes for categorizing schema errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Registry Errors (E1xx)
    // =========================================================================
    /// Duplicate model.
    ///
    /// A model with this identifier has already been registered.
    E100,

    /// Invalid model.
    ///
    /// The model has an empty identifier.
    E101,

    /// Duplicate attribute.
    ///
    /// Two attributes of the same model share a name.
    E102,

    /// Model not found.
    ///
    /// A model identifier was looked up that is not registered.
    E103,

    // =========================================================================
    // Graph Errors (E2xx)
    // =========================================================================
    /// Invalid inheritance.
    ///
    /// An inheritance edge is missing an identifier or points a model at itself.
    E200,

    /// Multiple parents.
    ///
    /// A child model already inherits from a different parent.
    E201,

    /// Inheritance cycle.
    ///
    /// Following parent edges leads back to a model already on the path.
    E202,

    // =========================================================================
    // Validation Errors (E3xx)
    // =========================================================================
    /// Invalid attribute.
    ///
    /// An attribute has an empty name, or a reference attribute has no target.
    E300,

    /// Invalid primitive type.
    ///
    /// A primitive attribute names a kind other than STRING, NUMBER, BOOLEAN
    /// or DATE.
    E301,

    /// Self reference.
    ///
    /// A reference attribute targets the model that owns it.
    E302,

    /// Unsupported attribute type.
    ///
    /// The attribute type tag is neither `primitive` nor `reference`.
    E303,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Registry errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            // Graph errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            // Validation errors
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
            ErrorCode::E303 => "E303",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Registry errors
            ErrorCode::E100 => "duplicate model",
            ErrorCode::E101 => "invalid model",
            ErrorCode::E102 => "duplicate attribute",
            ErrorCode::E103 => "model not found",
            // Graph errors
            ErrorCode::E200 => "invalid inheritance",
            ErrorCode::E201 => "multiple parents",
            ErrorCode::E202 => "inheritance cycle",
            // Validation errors
            ErrorCode::E300 => "invalid attribute",
            ErrorCode::E301 => "invalid primitive type",
            ErrorCode::E302 => "self reference",
            ErrorCode::E303 => "unsupported attribute type",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

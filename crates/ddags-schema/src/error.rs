//! Error system for the ddags schema engine.
//!
//! Every fallible operation returns a [`SchemaError`]. Each variant carries
//! the identifiers involved and maps to a stable [`ErrorCode`] for
//! documentation and searchability:
//!
//! ```
//! # use ddags_schema::error::{ErrorCode, SchemaError};
//! # use ddags_core::identifier::ModelId;
//! let err = SchemaError::CycleDetected {
//!     model_id: ModelId::new("vehicle"),
//! };
//!
//! assert_eq!(err.code(), ErrorCode::E202);
//! assert_eq!(err.to_string(), "inheritance cycle detected at `vehicle`");
//! ```

mod error_code;
mod schema_error;

pub use error_code::ErrorCode;
pub use schema_error::{AttributeIssue, InheritanceIssue, Result, SchemaError};

//! Error adapter for converting DdagsError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Schema errors
//! carry their stable `E1xx`..`E3xx` code and a remediation hint; other
//! failures are reported under a `ddags::*` category code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use ddags::{DdagsError, SchemaError};

/// Adapter for a typed [`SchemaError`].
pub struct SchemaErrorAdapter<'a>(pub &'a SchemaError);

impl fmt::Debug for SchemaErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for SchemaErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for SchemaErrorAdapter<'_> {}

impl MietteDiagnostic for SchemaErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.0.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.0.help()))
    }
}

/// Adapter for non-schema [`DdagsError`] variants.
///
/// This adapter handles errors that carry no schema error code, such as I/O,
/// snapshot decoding and configuration errors.
pub struct ErrorAdapter<'a>(pub &'a DdagsError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            DdagsError::Io(_) => "ddags::io",
            DdagsError::Snapshot(_) => "ddags::snapshot",
            DdagsError::Config(_) => "ddags::config",
            DdagsError::Schema(_) => "ddags::schema",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            DdagsError::Snapshot(_) => {
                "the input must be a JSON object with `models` and `inheritances` arrays"
            }
            DdagsError::Config(_) => {
                "check the path given with --config and the TOML section names"
            }
            DdagsError::Io(_) | DdagsError::Schema(_) => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a schema error or any other error, providing a
/// uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A schema error with a stable error code.
    Schema(SchemaErrorAdapter<'a>),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Schema(s) => fmt::Display::fmt(s, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Schema(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Schema(s) => s.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Schema(s) => s.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`DdagsError`] into a reportable error.
pub fn to_reportable(err: &DdagsError) -> Reportable<'_> {
    match err.as_schema_error() {
        Some(schema_err) => Reportable::Schema(SchemaErrorAdapter(schema_err)),
        None => Reportable::Error(ErrorAdapter(err)),
    }
}

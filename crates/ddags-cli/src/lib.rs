//! CLI logic for the ddags schema resolver.
//!
//! This module contains the core CLI logic: load a snapshot, resolve the
//! requested models and write them out as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use ddags::{DdagsError, SchemaBuilder, identifier::ModelId};

/// Run the ddags CLI application
///
/// This function loads the input snapshot, resolves the selected models (all
/// of them when none are given) and writes the JSON array to the output file
/// or stdout.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `DdagsError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Snapshot decoding errors
/// - Schema errors raised while loading or resolving
pub fn run(args: &Args) -> Result<(), DdagsError> {
    info!(
        input_path = args.input,
        models_count = args.models.len();
        "Processing snapshot"
    );

    let app_config = config::load_config(args)?;

    let source = fs::read_to_string(&args.input)?;

    let builder = SchemaBuilder::new(app_config);
    let session = builder.parse(&source)?;

    let resolved = if args.models.is_empty() {
        session.resolve_all()?
    } else {
        session.resolve_many(args.models.iter().map(|id| ModelId::new(id)))?
    };
    let json = builder.render_json(&resolved)?;

    match &args.output {
        Some(output) => {
            fs::write(output, json)?;
            info!(
                output_file = output,
                models_count = resolved.len();
                "Resolved models exported"
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}

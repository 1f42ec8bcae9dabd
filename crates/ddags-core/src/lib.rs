//! ddags Core Types and Definitions
//!
//! This crate provides the foundational types shared by the ddags schema
//! engine and its collaborators. It includes:
//!
//! - **Identifiers**: Interned model identifiers ([`identifier::ModelId`])
//! - **Attributes**: Attribute definitions and their closed type variant
//!   ([`attribute`] module)
//! - **Models**: Model definitions, inheritance edges, snapshots and resolved
//!   models ([`model`] module)

pub mod attribute;
pub mod identifier;
pub mod model;

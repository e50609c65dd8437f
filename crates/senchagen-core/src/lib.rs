//! Core contracts for senchagen.
//!
//! This crate defines the canonical schema types consumed by the export
//! engine, schema validation helpers, and the naming transforms used to
//! derive model and association identifiers.

pub mod error;
pub mod naming;
pub mod schema;
pub mod validation;

pub use error::{Error, Result};
pub use schema::{Column, DefaultValue, ManyToManyLink, Relation, Schema, Table};
pub use schema::derive_many_to_many;
pub use validation::validate_schema;

/// Current schema contract version for `schema.json` artifacts.
pub const SCHEMA_VERSION: &str = "0.1";

//! Model export engine for senchagen.
//!
//! Takes a materialized [`senchagen_core::Schema`] and writes one ExtJS
//! model definition per table: relations are classified into
//! association categories, column metadata becomes field and validation
//! descriptors, and the resulting descriptor tree is serialized as
//! deterministic object-literal text in the configured dialect.

pub mod assembler;
pub mod classify;
pub mod datatype;
pub mod engine;
pub mod errors;
pub mod fields;
pub mod jsobject;
pub mod model;
pub mod proxy;
pub mod writer;

pub use classify::{Accessors, Association, Associations};
pub use datatype::{DatatypeMapper, ExtDatatype};
pub use engine::{ExportEngine, ExportResult};
pub use errors::ExportError;
pub use jsobject::JsValue;
pub use model::{
    BodyStyle, ExportConfig, ExportOptions, ExportReport, ModelFormat, TableOutcome, TableReport,
};
pub use writer::{BufferWriter, FileWriter, Writer};

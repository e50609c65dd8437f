use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Target dialect for generated model files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFormat {
    /// `Ext.define` with a single model object.
    ExtJs4,
    /// Legacy two-statement `Ext.extend` form with a UI descriptor.
    ExtJs3,
}

/// Serialization strategy for the ExtJS4 model body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyStyle {
    /// One nested object literal passed to `Ext.define`.
    Nested,
    /// Class body built line by line, one statement per top-level key.
    Statements,
}

/// Configuration for one export run.
///
/// Every flag is read-only for the duration of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Namespace prefix prepended to every model reference.
    pub class_prefix: String,
    /// Base class every generated model extends.
    pub parent_class: String,
    /// Output path template; `%model%` and `%extension%` placeholders.
    pub filename_template: String,
    /// File extension substituted into the template.
    pub extension: String,
    /// Emit presence/length validation descriptors.
    pub generate_validation: bool,
    /// Emit the REST proxy block.
    pub generate_proxy: bool,
    /// Emit `idProperty` from the primary-key column.
    pub add_id_property: bool,
    /// Suppress file generation for pure junction tables.
    pub skip_many_to_many: bool,
    pub format: ModelFormat,
    pub body_style: BodyStyle,
    /// Optional comment block prepended to every generated file.
    pub header: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            class_prefix: "App.model".to_string(),
            parent_class: "Ext.data.Model".to_string(),
            filename_template: "model/%model%.%extension%".to_string(),
            extension: "js".to_string(),
            generate_validation: false,
            generate_proxy: false,
            add_id_property: false,
            skip_many_to_many: true,
            format: ModelFormat::ExtJs4,
            body_style: BodyStyle::Nested,
            header: None,
        }
    }
}

impl ExportConfig {
    /// Fully addressable reference for a model name.
    pub fn qualified_name(&self, model_name: &str) -> String {
        if self.class_prefix.is_empty() {
            model_name.to_string()
        } else {
            format!("{}.{}", self.class_prefix, model_name)
        }
    }

    /// Render the output target for a model name.
    pub fn target_path(&self, model_name: &str) -> String {
        self.filename_template
            .replace("%model%", model_name)
            .replace("%extension%", &self.extension)
    }
}

/// Options for the export engine.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory where generated files and the report are written.
    pub out_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("out"),
        }
    }
}

/// Per-table outcome of an export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableOutcome {
    Generated,
    External,
    ManyToMany,
}

/// Summary of one processed table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table: String,
    pub model: String,
    pub outcome: TableOutcome,
    /// Written path relative to the out dir; only for generated tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Report for an export run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportReport {
    pub run_id: String,
    pub started_at: String,
    pub tables: Vec<TableReport>,
    pub files_written: u64,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

impl ExportReport {
    pub fn new(run_id: String, started_at: String) -> Self {
        Self {
            run_id,
            started_at,
            tables: Vec::new(),
            files_written: 0,
            bytes_written: 0,
            duration_ms: 0,
        }
    }

    pub fn record(&mut self, entry: TableReport) {
        if entry.outcome == TableOutcome::Generated {
            self.files_written += 1;
        }
        self.tables.push(entry);
    }
}

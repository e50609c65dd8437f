use std::path::PathBuf;
use std::time::Instant;

use senchagen_core::{validate_schema, Schema};
use tracing::{debug, info};

use crate::assembler;
use crate::datatype::ExtDatatype;
use crate::errors::ExportError;
use crate::model::{ExportConfig, ExportOptions, ExportReport, TableOutcome, TableReport};
use crate::writer::{FileWriter, Writer};

/// Result of an export run.
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub out_dir: PathBuf,
    pub report: ExportReport,
}

/// Entry point for exporting model files from a schema.
#[derive(Debug, Clone, Default)]
pub struct ExportEngine {
    options: ExportOptions,
}

impl ExportEngine {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Process every table in declaration order.
    ///
    /// Each table resolves to exactly one outcome: external tables and
    /// (when configured) pure junction tables are skipped without
    /// opening an output target; every other table gets exactly one
    /// generated file. The run report is written to the out dir as
    /// `export_report.json`.
    pub fn run(&self, schema: &Schema, config: &ExportConfig) -> Result<ExportResult, ExportError> {
        let start = Instant::now();
        validate_schema(schema)?;

        let run_id = uuid::Uuid::new_v4().to_string();
        let started_at = chrono::Utc::now().to_rfc3339();
        std::fs::create_dir_all(&self.options.out_dir)?;

        let mut report = ExportReport::new(run_id.clone(), started_at);
        let assembler = assembler::select(config.format);
        let mapper = ExtDatatype;
        let mut writer = FileWriter::new(self.options.out_dir.clone());

        info!(
            run_id = %run_id,
            tables = schema.tables.len(),
            format = ?config.format,
            "export started"
        );

        for table in &schema.tables {
            let model = table.model_name();

            if table.external {
                debug!(table = %table.name, "skipping external table");
                report.record(TableReport {
                    table: table.name.clone(),
                    model,
                    outcome: TableOutcome::External,
                    path: None,
                });
                continue;
            }

            if config.skip_many_to_many && table.is_pivot() {
                debug!(table = %table.name, "skipping many-to-many junction table");
                report.record(TableReport {
                    table: table.name.clone(),
                    model,
                    outcome: TableOutcome::ManyToMany,
                    path: None,
                });
                continue;
            }

            let target = config.target_path(&model);
            writer.open(&target)?;
            let written = assembler.write_model(&mut writer, table, schema, config, &mapper);
            writer.close()?;
            written?;

            info!(table = %table.name, model = %model, path = %target, "model generated");
            report.record(TableReport {
                table: table.name.clone(),
                model,
                outcome: TableOutcome::Generated,
                path: Some(target),
            });
        }

        report.bytes_written = writer.bytes_written();
        report.duration_ms = start.elapsed().as_millis() as u64;

        let report_path = self.options.out_dir.join("export_report.json");
        std::fs::write(&report_path, serde_json::to_vec_pretty(&report)?)?;

        info!(
            run_id = %run_id,
            files_written = report.files_written,
            bytes_written = report.bytes_written,
            duration_ms = report.duration_ms,
            "export completed"
        );

        Ok(ExportResult {
            out_dir: self.options.out_dir.clone(),
            report,
        })
    }
}

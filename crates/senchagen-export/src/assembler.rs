//! Model assembly strategies.
//!
//! A single classification/field pipeline feeds two interchangeable
//! output shapes: the ExtJS4 `Ext.define` form (body rendered either as
//! one nested literal or as statement lines, selected by
//! configuration) and the legacy ExtJS3 two-statement `Ext.extend` form
//! with its parallel UI descriptor.

use senchagen_core::{naming, Schema, Table};

use crate::classify::{associations_value, classify, uses_value};
use crate::datatype::DatatypeMapper;
use crate::errors::ExportError;
use crate::fields::{build_fields, build_validations, fields_value, validations_value};
use crate::jsobject::{to_literal, write_statements, JsValue};
use crate::model::{BodyStyle, ExportConfig, ModelFormat};
use crate::proxy::ProxyConfig;
use crate::writer::Writer;

/// Writes one model definition for a table through an open writer.
pub trait ModelAssembler {
    fn write_model(
        &self,
        writer: &mut dyn Writer,
        table: &Table,
        schema: &Schema,
        config: &ExportConfig,
        mapper: &dyn DatatypeMapper,
    ) -> Result<(), ExportError>;
}

/// Assembler strategy for a configured format.
pub fn select(format: ModelFormat) -> &'static dyn ModelAssembler {
    match format {
        ModelFormat::ExtJs4 => &ExtJs4Model,
        ModelFormat::ExtJs3 => &ExtJs3Model,
    }
}

/// `Ext.define('<qualified>', { ... });`
pub struct ExtJs4Model;

/// Legacy `Ext.extend` form: model statement plus UI-descriptor statement.
pub struct ExtJs3Model;

impl ModelAssembler for ExtJs4Model {
    fn write_model(
        &self,
        writer: &mut dyn Writer,
        table: &Table,
        schema: &Schema,
        config: &ExportConfig,
        mapper: &dyn DatatypeMapper,
    ) -> Result<(), ExportError> {
        let qualified = config.qualified_name(&table.model_name());
        let entries = model_entries(table, schema, config, mapper)?;

        write_header(writer, config)?;
        match config.body_style {
            BodyStyle::Nested => {
                let body = to_literal(&JsValue::Obj(entries), 0);
                writer.write_block(&format!("Ext.define('{qualified}', {body});"))?;
            }
            BodyStyle::Statements => {
                writer.write_line(&format!("Ext.define('{qualified}', {{"))?;
                writer.indent();
                write_statements(writer, &entries)?;
                writer.outdent();
                writer.write_line("});")?;
            }
        }
        Ok(())
    }
}

impl ModelAssembler for ExtJs3Model {
    fn write_model(
        &self,
        writer: &mut dyn Writer,
        table: &Table,
        schema: &Schema,
        config: &ExportConfig,
        mapper: &dyn DatatypeMapper,
    ) -> Result<(), ExportError> {
        // The legacy form still resolves relation targets through the
        // classifier; unresolvable references fail here too.
        classify(table, schema, config)?;

        let model = table.model_name();
        let qualified = config.qualified_name(&model);
        let url = naming::camel_to_dash(&model);
        let title = url.replace('-', " ");

        let fields = build_fields(table, mapper);
        let model_obj = JsValue::Obj(vec![
            ("id".to_string(), JsValue::string(&model)),
            ("url".to_string(), JsValue::string(&url)),
            ("title".to_string(), JsValue::string(&title)),
            ("fields".to_string(), fields_value(&fields)),
        ]);

        write_header(writer, config)?;
        writer.write_block(&format!(
            "{qualified} = Ext.extend({}, {});",
            config.parent_class,
            to_literal(&model_obj, 0)
        ))?;
        writer.write_line("")?;
        writer.write_block(&format!(
            "{qualified} = Ext.extend({qualified}, {});",
            to_literal(&ui_descriptor(table, mapper), 0)
        ))?;
        writer.write_line("")?;
        Ok(())
    }
}

/// Ordered top-level keys for the ExtJS4 model object.
///
/// Empty derived lists are omitted entirely; `idProperty` is omitted
/// when the flag is off or no primary key exists.
fn model_entries(
    table: &Table,
    schema: &Schema,
    config: &ExportConfig,
    mapper: &dyn DatatypeMapper,
) -> Result<Vec<(String, JsValue)>, ExportError> {
    let mut entries = vec![(
        "extend".to_string(),
        JsValue::string(&config.parent_class),
    )];

    if config.add_id_property
        && let Some(primary) = table.primary_key()
    {
        entries.push(("idProperty".to_string(), JsValue::string(&primary.name)));
    }

    let associations = classify(table, schema, config)?;
    if !associations.uses.is_empty() {
        entries.push(("uses".to_string(), uses_value(&associations.uses)));
    }
    if !associations.belongs_to.is_empty() {
        entries.push((
            "belongsTo".to_string(),
            associations_value(&associations.belongs_to),
        ));
    }
    if !associations.has_one.is_empty() {
        entries.push((
            "hasOne".to_string(),
            associations_value(&associations.has_one),
        ));
    }
    if !associations.has_many.is_empty() {
        entries.push((
            "hasMany".to_string(),
            associations_value(&associations.has_many),
        ));
    }

    entries.push(("fields".to_string(), fields_value(&build_fields(table, mapper))));

    if config.generate_validation {
        let validations = build_validations(table);
        if !validations.is_empty() {
            entries.push(("validations".to_string(), validations_value(&validations)));
        }
    }
    if config.generate_proxy {
        let proxy = ProxyConfig::for_model(&table.model_name());
        entries.push(("proxy".to_string(), proxy.to_value()));
    }

    Ok(entries)
}

/// Grid columns and form items mirroring the table's columns.
fn ui_descriptor(table: &Table, mapper: &dyn DatatypeMapper) -> JsValue {
    let mut columns = Vec::new();
    let mut items = Vec::new();
    for column in &table.columns {
        columns.push(JsValue::Obj(vec![
            ("header".to_string(), JsValue::string(&column.name)),
            ("dataIndex".to_string(), JsValue::string(&column.name)),
            ("sortable".to_string(), JsValue::Bool(true)),
        ]));

        let xtype = match mapper.field_type(column) {
            Some("int") | Some("float") => "numberfield",
            Some("boolean") => "checkbox",
            Some("date") => "datefield",
            _ => "textfield",
        };
        let mut item = vec![
            ("xtype".to_string(), JsValue::string(xtype)),
            ("fieldLabel".to_string(), JsValue::string(&column.name)),
            ("name".to_string(), JsValue::string(&column.name)),
            ("allowBlank".to_string(), JsValue::Bool(!column.not_null)),
        ];
        if let Some(length) = column.length
            && length > 0
        {
            item.push(("maxLength".to_string(), JsValue::Int(i64::from(length))));
        }
        items.push(JsValue::Obj(item));
    }

    JsValue::Obj(vec![
        ("columns".to_string(), JsValue::Arr(columns)),
        (
            "formItems".to_string(),
            JsValue::Obj(vec![
                ("title".to_string(), JsValue::string("Basic Details")),
                ("layout".to_string(), JsValue::string("form")),
                ("items".to_string(), JsValue::Arr(items)),
            ]),
        ),
    ])
}

fn write_header(writer: &mut dyn Writer, config: &ExportConfig) -> Result<(), ExportError> {
    if let Some(header) = &config.header {
        writer.write_comment(header)?;
        writer.write_line("")?;
    }
    Ok(())
}

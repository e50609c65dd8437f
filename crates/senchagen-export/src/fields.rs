//! Field and validation descriptors derived from column metadata.

use senchagen_core::{Column, DefaultValue, Table};

use crate::datatype::DatatypeMapper;
use crate::jsobject::JsValue;

/// Untyped marker for columns the mapper cannot resolve.
const AUTO_TYPE: &str = "auto";

/// One model field descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: String,
    pub default: Option<DefaultValue>,
}

impl Field {
    pub fn to_value(&self) -> JsValue {
        let mut entries = vec![
            ("name".to_string(), JsValue::string(&self.name)),
            ("type".to_string(), JsValue::string(&self.ty)),
        ];
        if let Some(default) = &self.default {
            entries.push(("defaultValue".to_string(), default_value(default)));
        }
        JsValue::Obj(entries)
    }
}

/// One validation descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Presence { field: String },
    Length { field: String, max: u32 },
}

impl Validation {
    pub fn to_value(&self) -> JsValue {
        match self {
            Validation::Presence { field } => JsValue::Obj(vec![
                ("type".to_string(), JsValue::string("presence")),
                ("field".to_string(), JsValue::string(field)),
            ]),
            Validation::Length { field, max } => JsValue::Obj(vec![
                ("type".to_string(), JsValue::string("length")),
                ("field".to_string(), JsValue::string(field)),
                ("max".to_string(), JsValue::Int(i64::from(*max))),
            ]),
        }
    }
}

/// Build field descriptors in table column order.
pub fn build_fields(table: &Table, mapper: &dyn DatatypeMapper) -> Vec<Field> {
    table
        .columns
        .iter()
        .map(|column| Field {
            name: column.name.clone(),
            ty: mapper.field_type(column).unwrap_or(AUTO_TYPE).to_string(),
            default: column.default.clone(),
        })
        .collect()
}

/// Build validation descriptors in a single left-to-right column scan.
///
/// Per column, the presence check (not-nullable and not the primary
/// key) is evaluated before the length check (bounded length > 0), so a
/// column needing both contributes presence first.
pub fn build_validations(table: &Table) -> Vec<Validation> {
    let mut validations = Vec::new();
    for column in &table.columns {
        if column.not_null && !column.primary {
            validations.push(Validation::Presence {
                field: column.name.clone(),
            });
        }
        if let Some(length) = column.length
            && length > 0
        {
            validations.push(Validation::Length {
                field: column.name.clone(),
                max: length,
            });
        }
    }
    validations
}

/// Array value for a list of fields.
pub fn fields_value(fields: &[Field]) -> JsValue {
    JsValue::Arr(fields.iter().map(Field::to_value).collect())
}

/// Array value for a list of validations.
pub fn validations_value(validations: &[Validation]) -> JsValue {
    JsValue::Arr(validations.iter().map(Validation::to_value).collect())
}

fn default_value(default: &DefaultValue) -> JsValue {
    match default {
        DefaultValue::Bool(flag) => JsValue::Bool(*flag),
        DefaultValue::Num(number) => {
            if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
                JsValue::Int(*number as i64)
            } else {
                JsValue::Float(*number)
            }
        }
        DefaultValue::Str(text) => JsValue::string(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatype::ExtDatatype;

    fn column(name: &str, sql_type: &str) -> Column {
        Column {
            name: name.to_string(),
            sql_type: sql_type.to_string(),
            not_null: false,
            primary: false,
            length: None,
            default: None,
        }
    }

    fn table(columns: Vec<Column>) -> Table {
        Table {
            name: "orders".to_string(),
            columns,
            relations: Vec::new(),
            many_to_many: Vec::new(),
            external: false,
        }
    }

    #[test]
    fn unmapped_type_falls_back_to_auto() {
        let table = table(vec![column("payload", "geometry")]);
        let fields = build_fields(&table, &ExtDatatype);
        assert_eq!(fields[0].ty, "auto");
    }

    #[test]
    fn bounded_not_null_column_emits_presence_then_length() {
        let mut name = column("name", "varchar");
        name.not_null = true;
        name.length = Some(50);
        let table = table(vec![name]);

        let validations = build_validations(&table);
        assert_eq!(
            validations,
            vec![
                Validation::Presence {
                    field: "name".to_string(),
                },
                Validation::Length {
                    field: "name".to_string(),
                    max: 50,
                },
            ]
        );
    }

    #[test]
    fn primary_key_never_gets_presence() {
        let mut id = column("id", "int");
        id.not_null = true;
        id.primary = true;
        let table = table(vec![id]);
        assert!(build_validations(&table).is_empty());
    }

    #[test]
    fn numeric_default_renders_unquoted() {
        let mut qty = column("qty", "int");
        qty.default = Some(DefaultValue::Num(1.0));
        let table = table(vec![qty]);
        let fields = build_fields(&table, &ExtDatatype);
        let value = fields[0].to_value();
        assert_eq!(value.get("defaultValue"), Some(&JsValue::Int(1)));
    }
}

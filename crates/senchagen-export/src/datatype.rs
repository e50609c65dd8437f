use senchagen_core::Column;

/// Maps a column's declared SQL type to an ExtJS field type.
///
/// Returning `None` leaves the field untyped; the field builder falls
/// back to the `auto` marker.
pub trait DatatypeMapper {
    fn field_type(&self, column: &Column) -> Option<&'static str>;
}

/// Default mapping for common SQL types.
#[derive(Debug, Default)]
pub struct ExtDatatype;

impl DatatypeMapper for ExtDatatype {
    fn field_type(&self, column: &Column) -> Option<&'static str> {
        let base = column
            .sql_type
            .split('(')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match base.as_str() {
            "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "bigint" | "serial"
            | "bigserial" => Some("int"),
            "float" | "double" | "decimal" | "numeric" | "real" => Some("float"),
            "char" | "varchar" | "text" | "tinytext" | "mediumtext" | "longtext" | "enum"
            | "set" => Some("string"),
            "bool" | "boolean" => Some("boolean"),
            "date" | "datetime" | "timestamp" | "time" | "year" => Some("date"),
            _ => None,
        }
    }
}

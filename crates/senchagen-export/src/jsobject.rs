//! Ordered object-literal values and their text rendering.
//!
//! `JsValue` preserves key insertion order; nothing is ever re-sorted.
//! Two rendering modes exist: a flat literal (the whole value as one
//! multi-line expression) and statement mode (top-level keys emitted as
//! `key: value,` blocks through a [`Writer`]).

use std::io;

use crate::writer::Writer;

const INDENT: &str = "    ";

/// An ordered object-literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum JsValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    Arr(Vec<JsValue>),
    Obj(Vec<(String, JsValue)>),
}

impl JsValue {
    pub fn string(value: impl Into<String>) -> Self {
        JsValue::Str(value.into())
    }

    /// Look up a key in an object value.
    pub fn get(&self, key: &str) -> Option<&JsValue> {
        match self {
            JsValue::Obj(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsValue::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Render a value as an indented object-literal expression.
///
/// `level` is the indentation depth of the position the expression
/// starts at; continuation lines are indented relative to it. The
/// trailing separator for each element is decided by an indexed
/// remaining-count check as the element is emitted.
pub fn to_literal(value: &JsValue, level: usize) -> String {
    match value {
        JsValue::Str(text) => format!("'{}'", escape(text)),
        JsValue::Bool(flag) => flag.to_string(),
        JsValue::Int(number) => number.to_string(),
        JsValue::Float(number) => number.to_string(),
        JsValue::Arr(items) if items.is_empty() => "[]".to_string(),
        JsValue::Obj(entries) if entries.is_empty() => "{}".to_string(),
        JsValue::Arr(items) => {
            let mut out = String::from("[\n");
            for (idx, item) in items.iter().enumerate() {
                out.push_str(&INDENT.repeat(level + 1));
                out.push_str(&to_literal(item, level + 1));
                if idx + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            out.push_str(&INDENT.repeat(level));
            out.push(']');
            out
        }
        JsValue::Obj(entries) => {
            let mut out = String::from("{\n");
            for (idx, (key, item)) in entries.iter().enumerate() {
                out.push_str(&INDENT.repeat(level + 1));
                out.push_str(key);
                out.push_str(": ");
                out.push_str(&to_literal(item, level + 1));
                if idx + 1 < entries.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            out.push_str(&INDENT.repeat(level));
            out.push('}');
            out
        }
    }
}

/// Emit top-level keys as `key: value,` statement blocks.
///
/// The last key omits the trailing separator; the caller owns the
/// surrounding declaration header and footer lines.
pub fn write_statements(
    writer: &mut dyn Writer,
    entries: &[(String, JsValue)],
) -> io::Result<()> {
    for (idx, (key, value)) in entries.iter().enumerate() {
        let separator = if idx + 1 < entries.len() { "," } else { "" };
        let block = format!("{key}: {}{separator}", to_literal(value, 0));
        writer.write_block(&block)?;
    }
    Ok(())
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::BufferWriter;

    #[test]
    fn scalars_render_bare_or_quoted() {
        assert_eq!(to_literal(&JsValue::string("ajax"), 0), "'ajax'");
        assert_eq!(to_literal(&JsValue::Bool(true), 0), "true");
        assert_eq!(to_literal(&JsValue::Int(50), 0), "50");
        assert_eq!(to_literal(&JsValue::string("it's"), 0), "'it\\'s'");
    }

    #[test]
    fn trailing_comma_on_all_but_last() {
        let value = JsValue::Arr(vec![
            JsValue::string("a"),
            JsValue::string("b"),
            JsValue::string("c"),
        ]);
        assert_eq!(to_literal(&value, 0), "[\n    'a',\n    'b',\n    'c'\n]");
    }

    #[test]
    fn nested_object_indents_relative_to_start() {
        let value = JsValue::Obj(vec![
            ("type".to_string(), JsValue::string("json")),
            (
                "api".to_string(),
                JsValue::Obj(vec![("read".to_string(), JsValue::string("/data/x"))]),
            ),
        ]);
        let expected = "{\n    type: 'json',\n    api: {\n        read: '/data/x'\n    }\n}";
        assert_eq!(to_literal(&value, 0), expected);
    }

    #[test]
    fn statement_mode_matches_flat_content() {
        let entries = vec![
            ("extend".to_string(), JsValue::string("Ext.data.Model")),
            (
                "uses".to_string(),
                JsValue::Arr(vec![JsValue::string("App.model.User")]),
            ),
        ];

        let mut writer = BufferWriter::new();
        writer.open("model/X.js").expect("open");
        writer.indent();
        write_statements(&mut writer, &entries).expect("write");
        writer.outdent();
        writer.close().expect("close");

        let body = writer.content("model/X.js").expect("content");
        let expected = "    extend: 'Ext.data.Model',\n    uses: [\n        'App.model.User'\n    ]\n";
        assert_eq!(body, expected);
    }
}

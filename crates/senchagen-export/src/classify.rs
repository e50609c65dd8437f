//! Relation classification.
//!
//! Partitions a table's relations into the belongsTo / hasOne / hasMany
//! association categories and derives the deduplicated `uses` list of
//! cross-model references. The `many_to_one` flag is the single
//! discriminator between belongsTo and hasOne, so the categories are
//! mutually exclusive by construction.

use senchagen_core::{naming, Schema, Table};

use crate::errors::ExportError;
use crate::jsobject::JsValue;
use crate::model::ExportConfig;

/// Accessor names generated for an association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessors {
    GetterSetter { getter: String, setter: String },
    Store { name: String },
}

/// One classified association entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    /// Qualified model name of the referenced table.
    pub model: String,
    pub association_key: String,
    pub accessors: Accessors,
}

impl Association {
    pub fn to_value(&self) -> JsValue {
        let mut entries = vec![
            ("model".to_string(), JsValue::string(&self.model)),
            (
                "associationKey".to_string(),
                JsValue::string(&self.association_key),
            ),
        ];
        match &self.accessors {
            Accessors::GetterSetter { getter, setter } => {
                entries.push(("getterName".to_string(), JsValue::string(getter)));
                entries.push(("setterName".to_string(), JsValue::string(setter)));
            }
            Accessors::Store { name } => {
                entries.push(("name".to_string(), JsValue::string(name)));
            }
        }
        JsValue::Obj(entries)
    }
}

/// Classified associations for one table.
#[derive(Debug, Clone, Default)]
pub struct Associations {
    pub belongs_to: Vec<Association>,
    pub has_one: Vec<Association>,
    pub has_many: Vec<Association>,
    /// Qualified names of every referenced model, deduplicated, never
    /// containing the table's own qualified name.
    pub uses: Vec<String>,
}

/// Classify a table's relations and many-to-many links.
///
/// Category order follows relation declaration order; the `uses` list
/// collects belongsTo references first, then hasOne, then hasMany. An
/// unresolvable referenced table is a fatal schema error.
pub fn classify(
    table: &Table,
    schema: &Schema,
    config: &ExportConfig,
) -> Result<Associations, ExportError> {
    let current = config.qualified_name(&table.model_name());

    let mut belongs_to = Vec::new();
    let mut has_one = Vec::new();
    for relation in &table.relations {
        let model = referenced_model(schema, table, &relation.referenced_table)?;
        let entry = Association {
            model: config.qualified_name(&model),
            association_key: naming::association_key(&model),
            accessors: Accessors::GetterSetter {
                getter: format!("get{model}"),
                setter: format!("set{model}"),
            },
        };
        if relation.many_to_one {
            belongs_to.push(entry);
        } else {
            has_one.push(entry);
        }
    }

    let mut has_many = Vec::new();
    for link in &table.many_to_many {
        let model = referenced_model(schema, table, &link.referenced_table)?;
        has_many.push(Association {
            model: config.qualified_name(&model),
            association_key: naming::association_key(&model),
            accessors: Accessors::Store {
                name: format!("get{model}Store"),
            },
        });
    }

    let mut uses: Vec<String> = Vec::new();
    for entry in belongs_to.iter().chain(&has_one).chain(&has_many) {
        if entry.model != current && !uses.contains(&entry.model) {
            uses.push(entry.model.clone());
        }
    }

    Ok(Associations {
        belongs_to,
        has_one,
        has_many,
        uses,
    })
}

/// Array value for a list of association entries.
pub fn associations_value(entries: &[Association]) -> JsValue {
    JsValue::Arr(entries.iter().map(Association::to_value).collect())
}

/// Array value for the `uses` list.
pub fn uses_value(uses: &[String]) -> JsValue {
    JsValue::Arr(uses.iter().map(JsValue::string).collect())
}

fn referenced_model(schema: &Schema, table: &Table, name: &str) -> Result<String, ExportError> {
    schema
        .tables
        .iter()
        .find(|candidate| candidate.name == name)
        .map(Table::model_name)
        .ok_or_else(|| {
            ExportError::InvalidSchema(format!(
                "relation of table '{}' references unknown table '{}'",
                table.name, name
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use senchagen_core::{Column, ManyToManyLink, Relation};

    fn column(name: &str) -> Column {
        Column {
            name: name.to_string(),
            sql_type: "int".to_string(),
            not_null: false,
            primary: false,
            length: None,
            default: None,
        }
    }

    fn table(name: &str) -> Table {
        Table {
            name: name.to_string(),
            columns: vec![column("id")],
            relations: Vec::new(),
            many_to_many: Vec::new(),
            external: false,
        }
    }

    fn relation(referenced: &str, many_to_one: bool) -> Relation {
        Relation {
            column: None,
            referenced_table: referenced.to_string(),
            many_to_one,
        }
    }

    #[test]
    fn many_to_one_flag_is_the_only_discriminator() {
        let mut orders = table("orders");
        orders.relations.push(relation("users", true));
        orders.relations.push(relation("invoices", false));
        let schema = Schema {
            tables: vec![orders.clone(), table("users"), table("invoices")],
        };

        let config = ExportConfig::default();
        let associations = classify(&orders, &schema, &config).expect("classify");

        assert_eq!(associations.belongs_to.len(), 1);
        assert_eq!(associations.has_one.len(), 1);
        assert_eq!(associations.belongs_to[0].model, "App.model.Users");
        assert_eq!(associations.has_one[0].model, "App.model.Invoices");
        assert_eq!(
            associations.belongs_to[0].accessors,
            Accessors::GetterSetter {
                getter: "getUsers".to_string(),
                setter: "setUsers".to_string(),
            }
        );
    }

    #[test]
    fn uses_deduplicates_across_categories() {
        let mut orders = table("orders");
        orders.relations.push(relation("users", true));
        orders.relations.push(relation("users", false));
        orders.many_to_many.push(ManyToManyLink {
            junction_table: "order_user".to_string(),
            referenced_table: "users".to_string(),
        });
        let schema = Schema {
            tables: vec![orders.clone(), table("users"), table("order_user")],
        };

        let associations =
            classify(&orders, &schema, &ExportConfig::default()).expect("classify");
        assert_eq!(associations.uses, vec!["App.model.Users".to_string()]);
        assert_eq!(associations.has_many[0].accessors, Accessors::Store {
            name: "getUsersStore".to_string(),
        });
    }

    #[test]
    fn uses_excludes_self_reference_but_keeps_category_entry() {
        let mut nodes = table("nodes");
        nodes.relations.push(relation("nodes", true));
        let schema = Schema {
            tables: vec![nodes.clone()],
        };

        let associations =
            classify(&nodes, &schema, &ExportConfig::default()).expect("classify");
        assert!(associations.uses.is_empty());
        assert_eq!(associations.belongs_to.len(), 1);
        assert_eq!(associations.belongs_to[0].model, "App.model.Nodes");
    }

    #[test]
    fn unknown_referenced_table_is_fatal() {
        let mut orders = table("orders");
        orders.relations.push(relation("missing", true));
        let schema = Schema {
            tables: vec![orders.clone()],
        };

        let err = classify(&orders, &schema, &ExportConfig::default()).unwrap_err();
        assert!(matches!(err, ExportError::InvalidSchema(_)));
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::naming;

/// Top-level schema snapshot consumed by the export engine.
///
/// Table order is semantic: generated artifacts and reports follow the
/// declaration order of this list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Schema {
    pub tables: Vec<Table>,
}

/// A table together with its outgoing relations and many-to-many links.
///
/// Tables are constructed once when the schema is loaded and never
/// mutated by the engine; everything derived from them is transient.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Table {
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<Column>,
    /// Relations where this table is the source.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<Relation>,
    /// Logical hasMany links through junction tables.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub many_to_many: Vec<ManyToManyLink>,
    /// Defined outside the generation scope; no file is written.
    #[serde(default)]
    pub external: bool,
}

/// Column metadata for a table.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Column {
    pub name: String,
    /// Declared SQL-ish type (e.g. `varchar`, `int`).
    pub sql_type: String,
    #[serde(default)]
    pub not_null: bool,
    #[serde(default)]
    pub primary: bool,
    /// Bounded length when declared (e.g. `varchar(50)` -> 50).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
}

/// A column default, preserving whether it was declared as text or a
/// bare literal so the serializer can quote it correctly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Num(f64),
    Str(String),
}

/// A directed edge from the owning table to a referenced table.
///
/// `many_to_one = true` means the owning table holds the foreign key;
/// `false` means the owning table is the referenced side of a
/// one-to-one. The referenced table is addressed by name and must
/// resolve within the schema.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Relation {
    /// Local foreign-key column, when the owning table holds one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub referenced_table: String,
    pub many_to_one: bool,
}

/// A logical hasMany between two tables through a junction table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ManyToManyLink {
    pub junction_table: String,
    pub referenced_table: String,
}

impl Table {
    /// Model class name derived from the table name.
    pub fn model_name(&self) -> String {
        naming::model_name(&self.name)
    }

    /// The primary-key column, when one exists.
    pub fn primary_key(&self) -> Option<&Column> {
        self.columns.iter().find(|column| column.primary)
    }

    /// True when this table exists only to join two other tables:
    /// exactly two many-to-one relations whose local columns cover
    /// every column of the table.
    pub fn is_pivot(&self) -> bool {
        if self.relations.len() != 2 {
            return false;
        }
        if !self.relations.iter().all(|relation| relation.many_to_one) {
            return false;
        }
        let fk_columns: Vec<&str> = self
            .relations
            .iter()
            .filter_map(|relation| relation.column.as_deref())
            .collect();
        if fk_columns.len() != 2 {
            return false;
        }
        self.columns
            .iter()
            .all(|column| fk_columns.contains(&column.name.as_str()))
    }
}

/// Populate `many_to_many` links from pivot tables.
///
/// For every pivot table J joining A and B, A gains a link to B through
/// J and B gains a link to A through J. A junction joining a table to
/// itself produces no link. Tables that already carry explicit links
/// are left untouched.
pub fn derive_many_to_many(schema: &mut Schema) {
    let mut links: Vec<(String, ManyToManyLink)> = Vec::new();

    for table in &schema.tables {
        if !table.is_pivot() {
            continue;
        }
        let left = &table.relations[0].referenced_table;
        let right = &table.relations[1].referenced_table;
        if left == right {
            continue;
        }
        links.push((
            left.clone(),
            ManyToManyLink {
                junction_table: table.name.clone(),
                referenced_table: right.clone(),
            },
        ));
        links.push((
            right.clone(),
            ManyToManyLink {
                junction_table: table.name.clone(),
                referenced_table: left.clone(),
            },
        ));
    }

    for (owner, link) in links {
        if let Some(table) = schema.tables.iter_mut().find(|table| table.name == owner)
            && !table.many_to_many.contains(&link)
        {
            table.many_to_many.push(link);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str) -> Column {
        Column {
            name: name.to_string(),
            sql_type: "int".to_string(),
            not_null: true,
            primary: false,
            length: None,
            default: None,
        }
    }

    fn fk(column_name: &str, referenced: &str) -> Relation {
        Relation {
            column: Some(column_name.to_string()),
            referenced_table: referenced.to_string(),
            many_to_one: true,
        }
    }

    fn table(name: &str, columns: Vec<Column>, relations: Vec<Relation>) -> Table {
        Table {
            name: name.to_string(),
            columns,
            relations,
            many_to_many: Vec::new(),
            external: false,
        }
    }

    #[test]
    fn pivot_requires_fk_coverage() {
        let pivot = table(
            "user_group",
            vec![column("user_id"), column("group_id")],
            vec![fk("user_id", "users"), fk("group_id", "groups")],
        );
        assert!(pivot.is_pivot());

        let extra = table(
            "membership",
            vec![column("user_id"), column("group_id"), column("joined_at")],
            vec![fk("user_id", "users"), fk("group_id", "groups")],
        );
        assert!(!extra.is_pivot());
    }

    #[test]
    fn pivot_requires_many_to_one_on_both_sides() {
        let mut pivot = table(
            "user_group",
            vec![column("user_id"), column("group_id")],
            vec![fk("user_id", "users"), fk("group_id", "groups")],
        );
        pivot.relations[1].many_to_one = false;
        assert!(!pivot.is_pivot());
    }

    #[test]
    fn derive_links_both_endpoints() {
        let mut schema = Schema {
            tables: vec![
                table("users", vec![column("id")], Vec::new()),
                table("groups", vec![column("id")], Vec::new()),
                table(
                    "user_group",
                    vec![column("user_id"), column("group_id")],
                    vec![fk("user_id", "users"), fk("group_id", "groups")],
                ),
            ],
        };

        derive_many_to_many(&mut schema);

        assert_eq!(
            schema.tables[0].many_to_many,
            vec![ManyToManyLink {
                junction_table: "user_group".to_string(),
                referenced_table: "groups".to_string(),
            }]
        );
        assert_eq!(
            schema.tables[1].many_to_many,
            vec![ManyToManyLink {
                junction_table: "user_group".to_string(),
                referenced_table: "users".to_string(),
            }]
        );
        assert!(schema.tables[2].many_to_many.is_empty());
    }

    #[test]
    fn derive_skips_self_junction() {
        let mut schema = Schema {
            tables: vec![
                table("nodes", vec![column("id")], Vec::new()),
                table(
                    "node_edges",
                    vec![column("from_id"), column("to_id")],
                    vec![fk("from_id", "nodes"), fk("to_id", "nodes")],
                ),
            ],
        };

        derive_many_to_many(&mut schema);
        assert!(schema.tables[0].many_to_many.is_empty());
    }
}

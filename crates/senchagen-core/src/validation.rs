use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::schema::Schema;

/// Validate internal consistency of a schema.
///
/// This checks:
/// - duplicate table/column names
/// - at most one primary-key column per table
/// - relation and many-to-many targets resolve to known tables
pub fn validate_schema(schema: &Schema) -> Result<()> {
    let mut catalog: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

    for table in &schema.tables {
        if catalog.contains_key(table.name.as_str()) {
            return Err(Error::InvalidSchema(format!(
                "duplicate table name: {}",
                table.name
            )));
        }

        let mut columns = BTreeSet::new();
        let mut primary_count = 0;
        for column in &table.columns {
            if !columns.insert(column.name.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "duplicate column name: {}.{}",
                    table.name, column.name
                )));
            }
            if column.primary {
                primary_count += 1;
            }
        }
        if primary_count > 1 {
            return Err(Error::InvalidSchema(format!(
                "table {} declares {} primary-key columns",
                table.name, primary_count
            )));
        }

        catalog.insert(table.name.as_str(), columns);
    }

    for table in &schema.tables {
        let columns = catalog
            .get(table.name.as_str())
            .ok_or_else(|| Error::InvalidSchema(format!("missing table in catalog: {}", table.name)))?;

        for relation in &table.relations {
            if !catalog.contains_key(relation.referenced_table.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "relation target not found: {} -> {}",
                    table.name, relation.referenced_table
                )));
            }
            if let Some(column) = &relation.column
                && !columns.contains(column.as_str())
            {
                return Err(Error::InvalidSchema(format!(
                    "foreign key column not found: {}.{}",
                    table.name, column
                )));
            }
        }

        for link in &table.many_to_many {
            if !catalog.contains_key(link.junction_table.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "junction table not found: {} -> {}",
                    table.name, link.junction_table
                )));
            }
            if !catalog.contains_key(link.referenced_table.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "many-to-many target not found: {} -> {}",
                    table.name, link.referenced_table
                )));
            }
        }
    }

    Ok(())
}

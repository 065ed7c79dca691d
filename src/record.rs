//! Flat records and the tables that collect them

use crate::entity::EntityKind;
use crate::property::FieldSpec;

/// Ordered column names shared by every record of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<&'static str>,
}

impl Schema {
    /// Schema starting with the key column of the subject
    pub fn keyed(key_column: &'static str) -> Self {
        Self {
            columns: vec![key_column],
        }
    }

    /// Append the columns of a field table
    pub fn with_fields(mut self, fields: &[FieldSpec]) -> Self {
        self.columns.extend(fields.iter().map(|spec| spec.name));
        self
    }

    /// Append a single column
    pub fn push(&mut self, column: &'static str) {
        self.columns.push(column);
    }

    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column by name
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| *name == column)
    }
}

/// One row: a string per schema column, `""` when absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRecord {
    values: Vec<String>,
}

impl EntityRecord {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Records of one entity kind in subject order
#[derive(Debug, Clone)]
pub struct Table {
    kind: EntityKind,
    schema: Schema,
    records: Vec<EntityRecord>,
}

impl Table {
    pub fn new(kind: EntityKind, schema: Schema) -> Self {
        Self {
            kind,
            schema,
            records: Vec::new(),
        }
    }

    /// Append a record
    ///
    /// Short records are padded with empty strings; every record carries the
    /// full schema.
    pub fn push(&mut self, mut record: EntityRecord) {
        debug_assert!(
            record.values.len() <= self.schema.len(),
            "{} values for {} columns",
            record.values.len(),
            self.schema.len()
        );
        record.values.resize(self.schema.len(), String::new());
        self.records.push(record);
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[EntityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cell lookup by row index and column name
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.schema.index_of(column)?;
        self.records
            .get(row)
            .and_then(|record| record.values.get(index))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: [FieldSpec; 2] = [
        FieldSpec::direct("name", "http://ex/name"),
        FieldSpec::direct("note", "http://ex/note"),
    ];

    #[test]
    fn test_schema_key_first() {
        let schema = Schema::keyed("resource_uri").with_fields(&FIELDS);
        assert_eq!(schema.columns(), &["resource_uri", "name", "note"]);
        assert_eq!(schema.index_of("note"), Some(2));
        assert_eq!(schema.index_of("missing"), None);
    }

    #[test]
    fn test_push_pads_short_records() {
        let schema = Schema::keyed("resource_uri").with_fields(&FIELDS);
        let mut table = Table::new(EntityKind::Package, schema);
        table.push(EntityRecord::new(vec!["http://ex/a".to_string()]));

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0, "resource_uri"), Some("http://ex/a"));
        assert_eq!(table.get(0, "note"), Some(""));
        assert_eq!(table.get(1, "note"), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "4 values for 3 columns")]
    fn test_push_rejects_long_records() {
        let schema = Schema::keyed("resource_uri").with_fields(&FIELDS);
        let mut table = Table::new(EntityKind::Package, schema);
        table.push(EntityRecord::new(vec![String::new(); 4]));
    }
}

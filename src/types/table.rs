use rusqlite::types::Value;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Text,
    /// RFC 3339 text in UTC.
    Timestamp,
}

impl ColumnType {
    #[must_use]
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text | ColumnType::Timestamp => "TEXT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnType,
}

impl Column {
    pub fn new(name: &str, kind: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

/// Records that know their own tabular shape.
pub trait TableRow {
    fn columns() -> Vec<Column>;
    fn to_row(&self) -> Vec<Value>;

    fn column_names() -> Vec<String> {
        Self::columns().into_iter().map(|c| c.name).collect()
    }
}

/// Column-typed rows destined for a staging table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn from_records<R: TableRow>(records: &[R]) -> Self {
        Self {
            columns: R::columns(),
            rows: records.iter().map(TableRow::to_row).collect(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::TableShape(format!(
                "row has {} values but table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    fn require_index(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| Error::InvalidIdentifier(format!("no column named '{name}'")))
    }

    /// Projects the named columns, in the given order. Duplicate rows are kept.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        let indices = names
            .iter()
            .map(|n| self.require_index(n.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Table {
            columns: indices.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        })
    }

    pub fn drop_column(&mut self, name: &str) -> Result<()> {
        let idx = self.require_index(name)?;
        self.columns.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedTable {
    pub name: String,
    pub table: Table,
}

/// Named tables in load order. Inserting an existing name replaces it in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSet {
    tables: Vec<NamedTable>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, table: Table) {
        match self.tables.iter_mut().find(|t| t.name == name) {
            Some(existing) => existing.table = table,
            None => self.tables.push(NamedTable {
                name: name.to_string(),
                table,
            }),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name).map(|t| &t.table)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedTable> {
        self.tables.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(vec![
            Column::new("author_id", ColumnType::Integer),
            Column::new("name", ColumnType::Text),
            Column::new("id", ColumnType::Text),
        ]);
        table
            .push_row(vec![
                Value::Integer(1),
                Value::Text("ada".into()),
                Value::Text("a1".into()),
            ])
            .unwrap();
        table
            .push_row(vec![
                Value::Integer(1),
                Value::Text("ada".into()),
                Value::Text("a2".into()),
            ])
            .unwrap();
        table
    }

    #[test]
    fn test_push_row_checks_width() {
        let mut table = sample();
        let err = table.push_row(vec![Value::Integer(2)]).unwrap_err();
        assert!(matches!(err, Error::TableShape(_)));
        assert!(err.to_string().starts_with("table shape mismatch"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_select_keeps_duplicates_and_order() {
        let projected = sample().select(&["name", "author_id"]).unwrap();
        assert_eq!(projected.columns()[0].name, "name");
        assert_eq!(projected.len(), 2);
        assert_eq!(projected.rows()[0], projected.rows()[1]);
        assert_eq!(projected.rows()[0][1], Value::Integer(1));
    }

    #[test]
    fn test_select_unknown_column() {
        assert!(matches!(
            sample().select(&["email"]),
            Err(Error::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_drop_column() {
        let mut table = sample();
        table.drop_column("name").unwrap();
        assert_eq!(table.columns().len(), 2);
        assert!(table.column_index("name").is_none());
        assert_eq!(table.rows()[1], vec![Value::Integer(1), Value::Text("a2".into())]);
    }

    #[test]
    fn test_table_set_insert_replaces_by_name() {
        let mut set = TableSet::new();
        set.insert("commit_df", sample());
        set.insert("author_df", Table::new(vec![]));
        set.insert("commit_df", Table::new(vec![]));

        let names: Vec<&str> = set.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["commit_df", "author_df"]);
        assert!(set.get("commit_df").unwrap().is_empty());
    }
}

use std::cmp::Ordering;

use crate::error::{DataError, Result};
use crate::model::Cell;

/// A named column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

/// Column-oriented in-memory table.
///
/// Column names are unique and every column holds exactly `height` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    height: usize,
}

impl Table {
    /// Creates an empty table with no columns and no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from columns, rejecting ragged input or duplicate names.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let height = columns.first().map_or(0, |column| column.cells.len());
        let mut table = Table {
            columns: Vec::with_capacity(columns.len()),
            height,
        };
        for column in columns {
            if table.contains(&column.name) {
                return Err(DataError::DuplicateColumn(column.name));
            }
            if column.cells.len() != height {
                return Err(DataError::RaggedTable {
                    column: column.name,
                    expected: height,
                    found: column.cells.len(),
                });
            }
            table.columns.push(column);
        }
        Ok(table)
    }

    /// Builds a table from a header and row-major data. Short rows are padded
    /// with missing values, long rows are truncated to the header width.
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let mut columns: Vec<Column> = header
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();
        for row in rows {
            let mut row = row.into_iter();
            for column in &mut columns {
                column.cells.push(row.next().unwrap_or_default());
            }
        }
        Self::from_columns(columns)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| column.name.clone())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Looks a column up or fails with [`DataError::MissingColumn`].
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    }

    /// Returns the cell at `row` in column `name`.
    pub fn cell(&self, name: &str, row: usize) -> Option<&Cell> {
        self.column(name).and_then(|column| column.cells.get(row))
    }

    /// Inserts a column, replacing an existing one of the same name in place.
    pub fn set_column(&mut self, column: Column) -> Result<()> {
        if self.columns.is_empty() {
            self.height = column.cells.len();
        }
        if column.cells.len() != self.height {
            return Err(DataError::RaggedTable {
                column: column.name,
                expected: self.height,
                found: column.cells.len(),
            });
        }
        match self.position(&column.name) {
            Some(index) => self.columns[index] = column,
            None => self.columns.push(column),
        }
        Ok(())
    }

    /// Sets a column holding the same value on every row.
    pub fn set_constant(&mut self, name: &str, value: Cell) -> Result<()> {
        let cells = vec![value; self.height];
        self.set_column(Column::new(name, cells))
    }

    /// Keeps the rows whose mask entry is `true`.
    pub fn filter(&self, mask: &[bool]) -> Table {
        let indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(index, keep)| keep.then_some(index))
            .collect();
        self.take(&indices)
    }

    /// Builds a new table from the given row indices, in that order.
    pub fn take(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|column| {
                let cells = indices
                    .iter()
                    .map(|&index| column.cells[index].clone())
                    .collect();
                Column::new(column.name.clone(), cells)
            })
            .collect();
        Table {
            columns,
            height: indices.len(),
        }
    }

    /// Stable sort by the given keys, ascending. Keys missing from the table
    /// are skipped.
    pub fn sort_by_columns(&self, keys: &[&str]) -> Table {
        let key_columns: Vec<&Column> = keys.iter().filter_map(|key| self.column(key)).collect();
        let mut indices: Vec<usize> = (0..self.height).collect();
        indices.sort_by(|&lhs, &rhs| {
            key_columns
                .iter()
                .map(|column| column.cells[lhs].cmp(&column.cells[rhs]))
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
        self.take(&indices)
    }

    /// Outer concatenation: the result carries the union of all columns in
    /// order of first appearance, gaps filled with missing values.
    pub fn concat(tables: &[&Table]) -> Table {
        let mut names: Vec<&str> = Vec::new();
        for table in tables {
            for column in &table.columns {
                if !names.contains(&column.name.as_str()) {
                    names.push(&column.name);
                }
            }
        }

        let height = tables.iter().map(|table| table.height).sum();
        let columns = names
            .iter()
            .map(|name| {
                let mut cells = Vec::with_capacity(height);
                for table in tables {
                    match table.column(name) {
                        Some(column) => cells.extend(column.cells.iter().cloned()),
                        None => cells.extend(std::iter::repeat_n(Cell::Empty, table.height)),
                    }
                }
                Column::new(*name, cells)
            })
            .collect();

        Table { columns, height }
    }

    /// Distinct whole years in `column`, ascending. Missing and non-integral
    /// values are ignored.
    pub fn distinct_years(&self, column: &str) -> Vec<i64> {
        let mut years: Vec<i64> = self
            .column(column)
            .map(|column| column.cells.iter().filter_map(Cell::as_year).collect())
            .unwrap_or_default();
        years.sort_unstable();
        years.dedup();
        years
    }
}

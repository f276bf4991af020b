use std::collections::HashMap;
use std::fmt;

use crate::regatta::tools::error::{Result, ToolError};
use crate::regatta::tools::schema::Field;

/// A single spreadsheet value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// Plain text.
    Text(String),
    /// Numeric value as stored by the spreadsheet.
    Number(f64),
    /// Boolean value, produced by flag normalization.
    Bool(bool),
    /// Blank cell or a value absent after a join.
    #[default]
    Missing,
}

impl Cell {
    /// Creates a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// True for blank cells and values absent after a join.
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Returns the text content, if the cell holds text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the boolean content, if the cell holds a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Cell::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Canonical form of an identifier cell: text, with integral numbers
    /// rendered without a fractional part and blanks turned into missing.
    pub fn into_identifier(self) -> Cell {
        match self {
            Cell::Text(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    Cell::Missing
                } else if trimmed.len() == value.len() {
                    Cell::Text(value)
                } else {
                    Cell::Text(trimmed.to_string())
                }
            }
            Cell::Number(value)
                if value.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(&value) =>
            {
                Cell::Text(format!("{}", value as i64))
            }
            Cell::Number(value) => Cell::Text(value.to_string()),
            Cell::Bool(value) => Cell::Text(value.to_string()),
            Cell::Missing => Cell::Missing,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(value) => f.write_str(value),
            Cell::Number(value) => write!(f, "{value}"),
            Cell::Bool(value) => write!(f, "{value}"),
            Cell::Missing => Ok(()),
        }
    }
}

/// A report as read from a worksheet, before its columns are mapped onto
/// canonical fields. Columns are addressed by position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    /// Header row as written by the exporting platform.
    pub headers: Vec<String>,
    /// Data rows below the header, cells in sheet column order.
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Creates a raw table from a header row and data rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// Number of addressable columns: the widest of the header and any row.
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }
}

/// A table whose columns are canonical fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Field>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates an empty table with the given columns.
    pub fn new(columns: Vec<Field>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Creates a table from column and row data. Every row must be as wide
    /// as the column list.
    pub fn from_rows(columns: Vec<Field>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Column fields in table order.
    pub fn columns(&self) -> &[Field] {
        &self.columns
    }

    /// Rows in insertion order, each as wide as [`Table::columns`].
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the table carries the `field` column.
    pub fn has_column(&self, field: Field) -> bool {
        self.columns.contains(&field)
    }

    /// Position of the given field in the column list.
    pub fn column_index(&self, field: Field) -> Result<usize> {
        self.columns
            .iter()
            .position(|column| *column == field)
            .ok_or(ToolError::MissingColumn(field))
    }

    /// Returns the cell at `row` in the `field` column.
    pub fn get(&self, row: usize, field: Field) -> Option<&Cell> {
        let column = self.columns.iter().position(|column| *column == field)?;
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    /// Returns every cell of the `field` column in row order.
    pub fn column(&self, field: Field) -> Result<Vec<&Cell>> {
        let index = self.column_index(field)?;
        Ok(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// Appends a row, which must be as wide as the column list.
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ToolError::InvalidWorkbook(format!(
                "row has {} cells but the table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Replaces the `field` column with `values`, appending the column when
    /// the table does not have it yet.
    pub fn set_column(&mut self, field: Field, values: Vec<Cell>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(ToolError::InvalidWorkbook(format!(
                "column '{field}' has {} values but the table has {} rows",
                values.len(),
                self.rows.len()
            )));
        }

        match self.columns.iter().position(|column| *column == field) {
            Some(index) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[index] = value;
                }
            }
            None => {
                self.columns.push(field);
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }

    /// Keeps the rows for which `keep` returns true.
    pub fn filter_rows(&self, mut keep: impl FnMut(&[Cell]) -> bool) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| keep(row))
                .cloned()
                .collect(),
        }
    }

    /// Projects the table onto `fields`, in that order.
    pub fn select(&self, fields: &[Field]) -> Result<Table> {
        let indices = fields
            .iter()
            .map(|field| self.column_index(*field))
            .collect::<Result<Vec<_>>>()?;
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|index| row[*index].clone()).collect())
            .collect();
        Ok(Table {
            columns: fields.to_vec(),
            rows,
        })
    }

    /// Renames the `from` column to `to`.
    pub fn rename(&mut self, from: Field, to: Field) -> Result<()> {
        let index = self.column_index(from)?;
        if self.columns.iter().any(|column| *column == to) {
            return Err(ToolError::InvalidWorkbook(format!(
                "cannot rename '{from}' to '{to}': column already exists"
            )));
        }
        self.columns[index] = to;
        Ok(())
    }

    /// Appends the rows of `other` below the rows of this table. The column
    /// set becomes the union of both tables, keeping this table's order first;
    /// cells a side does not carry are missing.
    pub fn append(&mut self, other: Table) {
        let mut positions: HashMap<Field, usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(index, field)| (*field, index))
            .collect();

        for field in &other.columns {
            if !positions.contains_key(field) {
                positions.insert(*field, self.columns.len());
                self.columns.push(*field);
                for row in &mut self.rows {
                    row.push(Cell::Missing);
                }
            }
        }

        let width = self.columns.len();
        for source in other.rows {
            let mut row = vec![Cell::Missing; width];
            for (field, cell) in other.columns.iter().zip(source) {
                row[positions[field]] = cell;
            }
            self.rows.push(row);
        }
    }
}

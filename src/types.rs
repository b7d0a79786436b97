//! Core data model types.
//!
//! Loaders produce a [`Table`]: header-derived column names plus row-major [`Value`] storage.
//! A cell is *absent* when it is [`Value::Null`] or an empty string; absent cells are shown and
//! exported as the literal [`NULL_SENTINEL`].

use std::fmt;

/// Literal string that stands in for an absent cell in rendered and exported tables.
pub const NULL_SENTINEL: &str = "NULL";

/// A single cell value in a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`] and the empty string.
    ///
    /// Whitespace-only strings are present.
    pub fn is_absent(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Utf8(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns `true` when the cell holds data.
    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    /// Returns the cell unchanged, or the [`NULL_SENTINEL`] string when it is absent.
    pub fn normalized(&self) -> Value {
        if self.is_absent() {
            Value::Utf8(NULL_SENTINEL.to_string())
        } else {
            self.clone()
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Utf8(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Utf8(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            v if v.is_absent() => f.write_str(NULL_SENTINEL),
            Value::Int64(v) => write!(f, "{v}"),
            // Spreadsheets show whole-number floats without a fractional part.
            Value::Float64(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", *v as i64)
            }
            Value::Float64(v) => write!(f, "{v}"),
            Value::Bool(true) => f.write_str("TRUE"),
            Value::Bool(false) => f.write_str("FALSE"),
            Value::Utf8(s) => f.write_str(s),
            Value::Null => f.write_str(NULL_SENTINEL),
        }
    }
}

/// In-memory tabular data.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as [`Table::columns`]. A row shorter
/// than the header reads as absent for the missing positions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Ordered column names (display order).
    pub columns: Vec<String>,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

static ABSENT: Value = Value::Null;

impl Table {
    /// Create a table from column names and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Create a table with the given header and no rows.
    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the header.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `true` when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the index of a column by exact (case-sensitive) name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Reads the cell at `idx` from `row`; a missing column or short row reads as [`Value::Null`].
    pub fn cell<'a>(row: &'a [Value], idx: Option<usize>) -> &'a Value {
        idx.and_then(|i| row.get(i)).unwrap_or(&ABSENT)
    }

    /// Looks a cell up by row position and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.index_of(column)?;
        self.rows.get(row).map(|r| Self::cell(r, Some(idx)))
    }

    /// Returns a copy with every absent cell replaced by the [`NULL_SENTINEL`] string and every
    /// row padded to the header width.
    pub fn normalized(&self) -> Self {
        let width = self.columns.len();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                (0..width.max(row.len()))
                    .map(|i| Self::cell(row, Some(i)).normalized())
                    .collect()
            })
            .collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }
}

use crate::scalar::Scalar;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// A labeled, column-oriented table of [`Scalar`]s.
///
/// Every column has one value per row ID, and headers and IDs are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub(crate) headers: Vec<String>,
    pub(crate) ids: Vec<String>,
    pub(crate) values: Vec<Vec<Scalar>>,
}

#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    headers: Option<Vec<String>>,
    ids: Option<Vec<String>>,
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers(mut self, headers: Vec<String>) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn ids(mut self, ids: Vec<String>) -> Self {
        self.ids = Some(ids);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => write!(f, "row"),
            Self::Column => write!(f, "column"),
        }
    }
}

/// Picks a row or column either by name or by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Name(String),
    Index(usize),
}

impl From<&str> for Selector {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for Selector {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for Selector {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl Table {
    /// Builds a table from a list of equally long columns.
    ///
    /// Headers default to `"1".."N"` and row IDs to `"1".."M"`.
    pub fn from_columns(
        columns: Vec<Vec<Scalar>>,
        options: TableOptions,
    ) -> Result<Self, TableError> {
        if columns.is_empty() {
            return Err(TableError::EmptyTable);
        }

        let rows_len = columns[0].len();
        if columns.iter().skip(1).any(|c| c.len() != rows_len) {
            return Err(TableError::RowSizeMismatch);
        }

        let headers = options
            .headers
            .unwrap_or_else(|| (1..=columns.len()).map(|i| i.to_string()).collect());
        if headers.len() != columns.len() {
            return Err(TableError::HeaderCountMismatch {
                headers: headers.len(),
                columns: columns.len(),
            });
        }

        let ids = options
            .ids
            .unwrap_or_else(|| (1..=rows_len).map(|i| i.to_string()).collect());
        if ids.len() != rows_len {
            return Err(TableError::IdCountMismatch {
                ids: ids.len(),
                rows: rows_len,
            });
        }

        Ok(Self {
            headers,
            ids,
            values: columns,
        })
    }

    /// Returns the column headers.
    pub fn list(&self) -> &[String] {
        &self.headers
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn values(&self) -> &[Vec<Scalar>] {
        &self.values
    }

    pub fn columns_len(&self) -> usize {
        self.headers.len()
    }

    pub fn rows_len(&self) -> usize {
        self.ids.len()
    }

    pub fn column(&self, header: &str) -> Result<&[Scalar], TableError> {
        self.headers
            .iter()
            .position(|h| h == header)
            .map(|i| self.values[i].as_slice())
            .ok_or_else(|| TableError::UnknownHeader {
                header: header.to_owned(),
            })
    }

    pub fn append<K: ToString>(
        &mut self,
        axis: Axis,
        values: Vec<Scalar>,
        key: Option<K>,
    ) -> Result<&mut Self, TableError> {
        match axis {
            Axis::Column => self.append_column(values, key),
            Axis::Row => self.append_row(values, key),
        }
    }

    /// Adds a column; `header` defaults to the next column number.
    ///
    /// The column must have one value per row. A zero-column table still knows
    /// its row count through its IDs.
    pub fn append_column<K: ToString>(
        &mut self,
        values: Vec<Scalar>,
        header: Option<K>,
    ) -> Result<&mut Self, TableError> {
        let header = header
            .map(|h| h.to_string())
            .unwrap_or_else(|| (self.headers.len() + 1).to_string());
        if self.headers.contains(&header) {
            return Err(TableError::DuplicateHeader { header });
        }
        if values.len() != self.rows_len() {
            return Err(TableError::DimensionMismatch {
                expected: self.rows_len(),
                actual: values.len(),
            });
        }

        debug!(header = %header, rows = values.len(), "append column");
        self.values.push(values);
        self.headers.push(header);
        Ok(self)
    }

    /// Adds a row holding one value per column, in column order; `id` defaults
    /// to the next row number.
    pub fn append_row<K: ToString>(
        &mut self,
        values: Vec<Scalar>,
        id: Option<K>,
    ) -> Result<&mut Self, TableError> {
        let id = id
            .map(|i| i.to_string())
            .unwrap_or_else(|| (self.ids.len() + 1).to_string());
        if self.ids.contains(&id) {
            return Err(TableError::DuplicateId { id });
        }
        if values.len() != self.columns_len() {
            return Err(TableError::DimensionMismatch {
                expected: self.columns_len(),
                actual: values.len(),
            });
        }

        debug!(id = %id, "append row");
        for (column, value) in self.values.iter_mut().zip(values) {
            column.push(value);
        }
        self.ids.push(id);
        Ok(self)
    }

    /// Removes rows or columns by name or position.
    ///
    /// Positions refer to the table as it is before this call. Targets that
    /// do not exist (or were already removed by an earlier target) are skipped.
    pub fn remove<I>(&mut self, axis: Axis, targets: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Selector>,
    {
        let names = match axis {
            Axis::Column => &self.headers,
            Axis::Row => &self.ids,
        };
        let resolved = targets
            .into_iter()
            .map(Into::<Selector>::into)
            .filter_map(|target| match target {
                Selector::Name(name) => Some(name),
                Selector::Index(i) => {
                    let name = names.get(i).cloned();
                    if name.is_none() {
                        warn!(index = i, axis = %axis, "no such position");
                    }
                    name
                }
            })
            .collect::<Vec<_>>();

        let mut removed = 0;
        for name in resolved {
            let names = match axis {
                Axis::Column => &self.headers,
                Axis::Row => &self.ids,
            };
            let Some(position) = names.iter().position(|n| *n == name) else {
                continue;
            };
            match axis {
                Axis::Column => {
                    self.headers.remove(position);
                    self.values.remove(position);
                }
                Axis::Row => {
                    self.ids.remove(position);
                    for column in &mut self.values {
                        column.remove(position);
                    }
                }
            }
            removed += 1;
        }
        debug!(axis = %axis, removed, "remove");
        self
    }

    pub fn remove_column(&mut self, target: impl Into<Selector>) -> &mut Self {
        self.remove(Axis::Column, std::iter::once(target))
    }

    pub fn remove_row(&mut self, target: impl Into<Selector>) -> &mut Self {
        self.remove(Axis::Row, std::iter::once(target))
    }
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TableError {
    #[error("table must have at least one column")]
    EmptyTable,

    #[error("some of columns have a different row count from others")]
    RowSizeMismatch,

    #[error("{headers} headers given for {columns} columns")]
    HeaderCountMismatch { headers: usize, columns: usize },

    #[error("{ids} IDs given for {rows} rows")]
    IdCountMismatch { ids: usize, rows: usize },

    #[error("metadata must have a name property")]
    MissingName,

    #[error("invalid model: {name}")]
    InvalidName { name: String },

    #[error("this header already exist: {header}")]
    DuplicateHeader { header: String },

    #[error("this ID already exist: {id}")]
    DuplicateId { id: String },

    #[error("dimension doesn't match: expected {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("column {header} holds a non finite number at row {id}")]
    NonFiniteValue { header: String, id: String },

    #[error("no such header: {header}")]
    UnknownHeader { header: String },

    #[error("malformed metadata: {0}")]
    Json(#[from] serde_json::Error),
}

use crate::scalar::Scalar;
use crate::table::{Table, TableError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const SERIALIZED_NAME: &str = "metadata";

/// The exchange form of a [`Table`].
///
/// ```json
/// { "name": "metadata", "headers": ["iris"], "IDs": ["1", "2"], "values": [["setosa", "virginica"]] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedTable {
    pub name: String,
    pub headers: Vec<String>,
    #[serde(rename = "IDs")]
    pub ids: Vec<String>,
    pub values: Vec<Vec<Scalar>>,
}

impl Table {
    /// Restores a table from its serialized form.
    pub fn load(serialized: SerializedTable) -> Result<Self, TableError> {
        if serialized.name != SERIALIZED_NAME {
            return Err(TableError::InvalidName {
                name: serialized.name,
            });
        }

        let SerializedTable {
            headers,
            ids,
            values,
            ..
        } = serialized;
        if headers.len() != values.len() {
            return Err(TableError::HeaderCountMismatch {
                headers: headers.len(),
                columns: values.len(),
            });
        }
        if values.iter().any(|c| c.len() != ids.len()) {
            return Err(TableError::RowSizeMismatch);
        }

        Ok(Self {
            headers,
            ids,
            values,
        })
    }

    pub fn from_json_value(value: Value) -> Result<Self, TableError> {
        if !value.get("name").map_or(false, Value::is_string) {
            return Err(TableError::MissingName);
        }
        Self::load(serde_json::from_value(value)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, TableError> {
        Self::from_json_value(serde_json::from_str(s)?)
    }

    pub fn to_serialized(&self) -> SerializedTable {
        SerializedTable {
            name: SERIALIZED_NAME.to_owned(),
            headers: self.headers.clone(),
            ids: self.ids.clone(),
            values: self.values.clone(),
        }
    }

    /// JSON has no representation for NaN or infinities, so tables holding
    /// them are rejected rather than written as `null`.
    pub fn to_json_value(&self) -> Result<Value, TableError> {
        self.ensure_finite()?;
        Ok(serde_json::to_value(self.to_serialized())?)
    }

    pub fn to_json_string(&self) -> Result<String, TableError> {
        self.ensure_finite()?;
        Ok(serde_json::to_string(&self.to_serialized())?)
    }

    fn ensure_finite(&self) -> Result<(), TableError> {
        for (header, column) in self.headers.iter().zip(&self.values) {
            let non_finite = column
                .iter()
                .position(|x| x.as_number().map_or(false, |v| !v.is_finite()));
            if let Some(row) = non_finite {
                return Err(TableError::NonFiniteValue {
                    header: header.clone(),
                    id: self.ids[row].clone(),
                });
            }
        }
        Ok(())
    }
}

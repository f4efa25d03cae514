use crate::scalar::Scalar;
use crate::summary::{summarize_class, ClassSummary};
use crate::table::{Table, TableError};
use ndarray::Array2;

/// How [`Table::get`] encodes the extracted column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// The values as stored.
    #[default]
    Vector,
    /// The position of each value's group.
    Factor,
    /// Factor codes as an `n × 1` matrix.
    Matrix,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Encoded {
    Vector(Vec<Scalar>),
    Factor(Vec<usize>),
    Matrix(Array2<f64>),
}

impl Encoded {
    pub fn as_vector(&self) -> Option<&[Scalar]> {
        match self {
            Self::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_factor(&self) -> Option<&[usize]> {
        match self {
            Self::Factor(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&Array2<f64>> {
        match self {
            Self::Matrix(m) => Some(m),
            _ => None,
        }
    }
}

/// A column viewed as categorical labels.
#[derive(Debug, Clone)]
pub struct ClassVector {
    pub header: String,
    /// Distinct values in first-occurrence order.
    pub groups: Vec<Scalar>,
    pub summary: ClassSummary<Scalar>,
    pub n_obs: usize,
    pub n_class: usize,
    pub values: Encoded,
}

impl Table {
    /// Extracts the column named `header` together with its groups and counts.
    pub fn get(&self, header: &str, format: Format) -> Result<ClassVector, TableError> {
        let class_vector = self.column(header)?;
        let n_obs = class_vector.len();
        let summary = summarize_class(class_vector);
        let groups = summary.groups().cloned().collect::<Vec<_>>();
        let n_class = groups.len();

        let factor = || {
            class_vector
                .iter()
                .map(|x| summary.position(x).expect("never fails"))
                .collect::<Vec<_>>()
        };
        let values = match format {
            Format::Vector => Encoded::Vector(class_vector.to_vec()),
            Format::Factor => Encoded::Factor(factor()),
            Format::Matrix => Encoded::Matrix(
                Array2::from_shape_vec(
                    (n_obs, 1),
                    factor().into_iter().map(|i| i as f64).collect(),
                )
                .expect("never fails"),
            ),
        };

        Ok(ClassVector {
            header: header.to_owned(),
            groups,
            summary,
            n_obs,
            n_class,
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableOptions;

    fn iris() -> Result<Table, TableError> {
        let classes = ["setosa", "versicolor", "virginica"]
            .iter()
            .flat_map(|&c| std::iter::repeat(Scalar::from(c)).take(50))
            .collect();
        Table::from_columns(
            vec![classes],
            TableOptions::new().headers(vec!["iris".to_owned()]),
        )
    }

    #[test]
    fn vector_format() -> Result<(), anyhow::Error> {
        let class = iris()?.get("iris", Format::Vector)?;
        assert_eq!(class.header, "iris");
        assert_eq!(class.n_obs, 150);
        assert_eq!(class.n_class, 3);
        assert_eq!(class.values.as_vector().map(|v| v.len()), Some(150));

        let summary = summarize_class(class.values.as_vector().unwrap_or_default());
        assert_eq!(summary.count_by_name("setosa"), Some(50));
        assert_eq!(summary.count_by_name("versicolor"), Some(50));
        assert_eq!(summary.count_by_name("virginica"), Some(50));
        Ok(())
    }

    #[test]
    fn factor_format() -> Result<(), anyhow::Error> {
        let table = iris()?;
        let raw = table.get("iris", Format::Vector)?;
        let class = table.get("iris", Format::Factor)?;
        let codes = class.values.as_factor().unwrap_or_default();
        let raw = raw.values.as_vector().unwrap_or_default();

        for (code, value) in codes.iter().zip(raw) {
            assert_eq!(&class.groups[*code], value);
        }
        let summary = summarize_class(codes);
        assert_eq!(
            summary.iter().collect::<Vec<_>>(),
            vec![(&0, 50), (&1, 50), (&2, 50)]
        );
        Ok(())
    }

    #[test]
    fn factor_follows_first_occurrence() -> Result<(), anyhow::Error> {
        let column = ["b", "a", "b", "c"].iter().map(|&s| Scalar::from(s)).collect();
        let table = Table::from_columns(vec![column], TableOptions::new())?;
        let class = table.get("1", Format::Factor)?;
        assert_eq!(
            class.groups,
            vec![Scalar::from("b"), Scalar::from("a"), Scalar::from("c")]
        );
        assert_eq!(class.values, Encoded::Factor(vec![0, 1, 0, 2]));
        Ok(())
    }

    #[test]
    fn matrix_format() -> Result<(), anyhow::Error> {
        let class = iris()?.get("iris", Format::Matrix)?;
        let matrix = class.values.as_matrix().cloned().unwrap_or_default();
        assert_eq!(matrix.shape(), &[150, 1]);
        assert_eq!(matrix[[0, 0]], 0.0);
        assert_eq!(matrix[[75, 0]], 1.0);
        assert_eq!(matrix[[149, 0]], 2.0);
        Ok(())
    }

    #[test]
    fn unknown_header() -> Result<(), anyhow::Error> {
        assert!(matches!(
            iris()?.get("species", Format::Vector),
            Err(TableError::UnknownHeader { .. })
        ));
        Ok(())
    }
}

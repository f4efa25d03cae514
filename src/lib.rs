//! A labeled, column-oriented metadata table.
//!
//! A [`Table`] keeps per-row metadata such as class labels next to a primary
//! dataset. Any column can be viewed as a class vector with [`Table::get`],
//! summarized with [`summarize_class`], and split into train/test row
//! partitions that keep per-class proportions with [`Table::sample`].
pub use class_vector::{ClassVector, Encoded, Format};
pub use sampling::{sample_class, Partition, Sample, SampleError, SampleOptions};
pub use scalar::Scalar;
pub use serialized::SerializedTable;
pub use summary::{summarize_class, ClassSummary};
pub use table::{Axis, Selector, Table, TableError, TableOptions};

mod class_vector;
mod sampling;
mod scalar;
mod serialized;
mod summary;
mod table;

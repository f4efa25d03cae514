use crate::scalar::Scalar;
use crate::summary::summarize_class;
use crate::table::{Table, TableError};
use itertools::Itertools as _;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hash::Hash;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct SampleOptions {
    fraction: f64,
    seed: Option<u64>,
}

impl SampleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of each class that goes to the train partition.
    pub fn fraction(mut self, fraction: f64) -> Self {
        self.fraction = fraction;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        let seed_u64 = self.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut seed = [0u8; 32];
        seed[0..8].copy_from_slice(&seed_u64.to_be_bytes()[..]);
        StdRng::from_seed(seed)
    }
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            fraction: 0.8,
            seed: None,
        }
    }
}

/// A train/test split of row positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Train rows, in draw order.
    pub train_index: Vec<usize>,
    /// Test rows, ascending.
    pub test_index: Vec<usize>,
    /// `mask[i]` is `true` iff row `i` is in the train partition.
    pub mask: Vec<bool>,
}

/// The result of [`Table::sample`]: a [`Partition`] plus the class vector it was drawn from.
#[derive(Debug, Clone)]
pub struct Sample {
    pub train_index: Vec<usize>,
    pub test_index: Vec<usize>,
    pub mask: Vec<bool>,
    pub class_vector: Vec<Scalar>,
}

/// Splits the positions of `class_vector` into train and test partitions.
///
/// For every distinct class with `c` members, `floor(c * fraction)` of its
/// positions are drawn uniformly at random without replacement into the train
/// partition and the remaining ones go to the test partition.
pub fn sample_class<T, R>(
    rng: &mut R,
    class_vector: &[T],
    fraction: f64,
) -> Result<Partition, SampleError>
where
    T: Ord + Hash + Clone,
    R: Rng + ?Sized,
{
    if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
        return Err(SampleError::InvalidFraction { fraction });
    }

    // `order[k]` is the original position of the value at sorted position `k`.
    let order = (0..class_vector.len())
        .sorted_by_key(|&i| &class_vector[i])
        .collect::<Vec<_>>();
    let sorted = order
        .iter()
        .map(|&i| class_vector[i].clone())
        .collect::<Vec<_>>();
    let counts = summarize_class(&sorted);

    let mut selected = Vec::new();
    let mut shift = 0;
    for (class, count) in counts.counts().enumerate() {
        let quota = (count as f64 * fraction).floor() as usize;
        selected.extend(
            rand::seq::index::sample(rng, count, quota)
                .into_iter()
                .map(|picked| picked + shift),
        );
        trace!(class, count, quota, "drew class members");
        shift += count;
    }

    let train_index = selected.into_iter().map(|k| order[k]).collect::<Vec<_>>();
    let mut mask = vec![false; class_vector.len()];
    for &i in &train_index {
        mask[i] = true;
    }
    let test_index = mask
        .iter()
        .positions(|&in_train| !in_train)
        .collect::<Vec<_>>();

    debug!(
        classes = counts.len(),
        train = train_index.len(),
        test = test_index.len(),
        "stratified sample"
    );
    Ok(Partition {
        train_index,
        test_index,
        mask,
    })
}

impl Table {
    /// Draws a stratified train/test split over the column named `header`.
    pub fn sample(&self, header: &str, options: SampleOptions) -> Result<Sample, SampleError> {
        let mut rng = options.rng();
        self.sample_with_rng(&mut rng, header, options.fraction)
    }

    pub fn sample_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        header: &str,
        fraction: f64,
    ) -> Result<Sample, SampleError> {
        let class_vector = self.column(header)?.to_vec();
        let Partition {
            train_index,
            test_index,
            mask,
        } = sample_class(rng, &class_vector, fraction)?;
        Ok(Sample {
            train_index,
            test_index,
            mask,
            class_vector,
        })
    }
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("sampling fraction must be a finite number in [0, 1], got {fraction}")]
    InvalidFraction { fraction: f64 },

    #[error(transparent)]
    Table(#[from] TableError),
}

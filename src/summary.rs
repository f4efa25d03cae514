use crate::scalar::Scalar;
use std::collections::HashMap;
use std::hash::Hash;

/// Occurrence counts of the distinct values of a class vector.
///
/// Groups iterate in the order they were first seen, which is the order the
/// factor encoding and the sampling offsets rely on.
#[derive(Debug, Clone)]
pub struct ClassSummary<T> {
    entries: Vec<(T, usize)>,
    positions: HashMap<T, usize>,
}

impl<T> ClassSummary<T>
where
    T: Eq + Hash + Clone,
{
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    fn increment(&mut self, value: &T) {
        if let Some(&i) = self.positions.get(value) {
            self.entries[i].1 += 1;
        } else {
            self.positions.insert(value.clone(), self.entries.len());
            self.entries.push((value.clone(), 1));
        }
    }

    pub fn count(&self, value: &T) -> Option<usize> {
        self.position(value).map(|i| self.entries[i].1)
    }

    /// Position of `value` among the groups, in first-occurrence order.
    pub fn position(&self, value: &T) -> Option<usize> {
        self.positions.get(value).copied()
    }

    pub fn groups(&self) -> impl '_ + Iterator<Item = &T> + Clone {
        self.entries.iter().map(|(g, _)| g)
    }

    pub fn counts(&self) -> impl '_ + Iterator<Item = usize> + Clone {
        self.entries.iter().map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl '_ + Iterator<Item = (&T, usize)> {
        self.entries.iter().map(|(g, c)| (g, *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the length of the summarized vector.
    pub fn total(&self) -> usize {
        self.counts().sum()
    }
}

impl ClassSummary<Scalar> {
    /// Looks a group up by its string form, so `"133"` finds the number `133`.
    ///
    /// Text `"1"` and the number `1` are distinct groups with the same string
    /// form; the group seen first in the class vector wins. Use [`count`] to
    /// address a group exactly.
    ///
    /// [`count`]: ClassSummary::count
    pub fn count_by_name(&self, name: &str) -> Option<usize> {
        self.iter()
            .find(|(g, _)| g.to_string() == name)
            .map(|(_, c)| c)
    }
}

/// Counts each distinct value of `class_vector` in a single left-to-right scan.
pub fn summarize_class<T>(class_vector: &[T]) -> ClassSummary<T>
where
    T: Eq + Hash + Clone,
{
    let mut summary = ClassSummary::new();
    for x in class_vector {
        summary.increment(x);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_in_first_occurrence_order() {
        let xs = ["b", "a", "b", "c", "a", "b"]
            .iter()
            .map(|&s| Scalar::from(s))
            .collect::<Vec<_>>();
        let summary = summarize_class(&xs);

        assert_eq!(
            summary.groups().cloned().collect::<Vec<_>>(),
            vec![Scalar::from("b"), Scalar::from("a"), Scalar::from("c")]
        );
        assert_eq!(summary.counts().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(summary.total(), xs.len());
        assert_eq!(summary.position(&Scalar::from("c")), Some(2));
        assert_eq!(summary.count(&Scalar::from("z")), None);
    }

    #[test]
    fn distinct_values_count_once() {
        let summary = summarize_class(&[3usize, 1, 4, 5, 9]);
        assert_eq!(summary.len(), 5);
        assert!(summary.counts().all(|c| c == 1));
    }

    #[test]
    fn empty_vector() {
        let summary = summarize_class::<usize>(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn lookup_by_name() {
        let xs = vec![Scalar::from(133), Scalar::from("x"), Scalar::from(133)];
        let summary = summarize_class(&xs);
        assert_eq!(summary.count_by_name("133"), Some(2));
        assert_eq!(summary.count_by_name("x"), Some(1));
        assert_eq!(summary.count_by_name("y"), None);
    }

    #[test]
    fn lookup_by_name_prefers_first_seen_group() {
        let xs = vec![Scalar::from("1"), Scalar::from(1), Scalar::from(1)];
        let summary = summarize_class(&xs);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary.count_by_name("1"), Some(1));
        assert_eq!(summary.count(&Scalar::from(1)), Some(2));

        let xs = vec![Scalar::from(1), Scalar::from("1"), Scalar::from(1)];
        assert_eq!(summarize_class(&xs).count_by_name("1"), Some(2));
    }
}

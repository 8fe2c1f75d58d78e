//! Exclusion sets for the plane average
//!
//! An [`ExclusionSet`] is the fixed list of sample values the average
//! ignores. Sets are small (tens of entries at most), so membership is a
//! linear scan. Integer samples match by value; float samples match when
//! they are exactly equal to an entry converted to `f32`.

/// Sample values ignored by the exclusion mean
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    values: Vec<i64>,
}

impl ExclusionSet {
    /// Empty set: nothing is excluded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from caller-supplied values.
    ///
    /// Order is irrelevant and duplicates are dropped.
    pub fn from_values(values: &[i64]) -> Self {
        let mut values = values.to_vec();
        values.sort_unstable();
        values.dedup();
        Self { values }
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether an integer sample value is excluded.
    #[inline]
    pub fn contains_int(&self, value: i64) -> bool {
        self.values.iter().any(|&v| v == value)
    }

    /// Whether a float sample is excluded.
    #[inline]
    pub fn contains_float(&self, value: f32) -> bool {
        self.values.iter().any(|&v| v as f32 == value)
    }
}

impl From<Vec<i64>> for ExclusionSet {
    fn from(values: Vec<i64>) -> Self {
        Self::from_values(&values)
    }
}

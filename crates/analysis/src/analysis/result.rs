//! Result containers.
//!
//! A [`StatisticResult`] is an ordered map from entry key (`"population"`, a
//! sample identifier or a clade label) to either one scalar or a per-contig
//! map. Insertion order is preserved so the serialized document follows the
//! deterministic order in which the engine produced the entries.
//!
//! JSON has no `NaN`, so every non-finite value serializes as `null`.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Entry key for statistics computed over every sample.
pub const POPULATION_KEY: &str = "population";

/// Key of the weighted mean inside a contig-resolved entry.
pub const GENOME_WIDE_KEY: &str = "genome-wide";

/// `Some(value)` for finite values, `None` for `NaN` and infinities.
pub fn finite_or_null(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// `serialize_with` helper writing non-finite values as `null`.
pub fn serialize_finite<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    finite_or_null(*value).serialize(serializer)
}

/// Per-contig values of one entry, in contig order, plus the genome-wide mean
/// once it has been aggregated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContigValues {
    values: Vec<(String, f64)>,
    genome_wide: Option<f64>,
}

impl ContigValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a contig value. Contig labels are expected to be unique.
    pub fn push(&mut self, contig: impl Into<String>, value: f64) {
        self.values.push((contig.into(), value));
    }

    pub fn get(&self, contig: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(label, _)| label == contig)
            .map(|&(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(label, v)| (label.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn genome_wide(&self) -> Option<f64> {
        self.genome_wide
    }

    pub fn set_genome_wide(&mut self, value: f64) {
        self.genome_wide = Some(value);
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ContigValues {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            genome_wide: None,
        }
    }
}

impl Serialize for ContigValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.values.len() + usize::from(self.genome_wide.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for (label, value) in &self.values {
            map.serialize_entry(label, &finite_or_null(*value))?;
        }
        if let Some(gw) = self.genome_wide {
            map.serialize_entry(GENOME_WIDE_KEY, &finite_or_null(gw))?;
        }
        map.end()
    }
}

/// Value of one result entry.
#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    /// One number over all selected variants
    Scalar(f64),
    /// One number per contig
    Contigs(ContigValues),
}

impl StatValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Contigs(_) => None,
        }
    }

    pub fn as_contigs(&self) -> Option<&ContigValues> {
        match self {
            Self::Contigs(c) => Some(c),
            Self::Scalar(_) => None,
        }
    }
}

impl Serialize for StatValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(v) => finite_or_null(*v).serialize(serializer),
            Self::Contigs(c) => c.serialize(serializer),
        }
    }
}

/// Ordered mapping from entry key to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticResult {
    entries: Vec<(String, StatValue)>,
}

impl StatisticResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing the value in place if the key exists.
    pub fn insert(&mut self, key: impl Into<String>, value: StatValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&StatValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut StatValue> {
        self.entries.iter_mut().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for StatisticResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

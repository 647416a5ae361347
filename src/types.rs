//! Core data types: group labels, observations and datasets.

use crate::error::{AnovaError, Result};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifier of a factor level.
///
/// Only distinctness matters to the analysis; the ordering exists so that
/// partitions iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupLabel(pub u32);

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for GroupLabel {
    fn from(level: u32) -> Self {
        GroupLabel(level)
    }
}

impl TryFrom<usize> for GroupLabel {
    type Error = AnovaError;

    fn try_from(level: usize) -> Result<Self> {
        u32::try_from(level).map(GroupLabel).map_err(|_| {
            AnovaError::InvalidInput(format!("level index {level} does not fit a group label"))
        })
    }
}

/// A single `(group, value)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub group: GroupLabel,
    pub value: f64,
}

impl Observation {
    pub fn new(group: impl Into<GroupLabel>, value: f64) -> Self {
        Self {
            group: group.into(),
            value,
        }
    }
}

/// An ordered, immutable table of observations.
///
/// Stored column-wise: one label per row and the observed values as a
/// 1-dimensional array. Deserialization goes through [`Dataset::from_columns`],
/// so both columns always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DatasetColumns")]
pub struct Dataset {
    labels: Vec<GroupLabel>,
    values: Array1<f64>,
}

/// Unchecked serialized form of a [`Dataset`].
#[derive(Deserialize)]
struct DatasetColumns {
    labels: Vec<GroupLabel>,
    values: Array1<f64>,
}

impl TryFrom<DatasetColumns> for Dataset {
    type Error = AnovaError;

    fn try_from(columns: DatasetColumns) -> Result<Self> {
        Dataset::from_columns(columns.labels, columns.values)
    }
}

impl Dataset {
    /// Builds a dataset from observations, keeping their order.
    pub fn new(observations: Vec<Observation>) -> Self {
        let (labels, values): (Vec<_>, Vec<_>) = observations
            .into_iter()
            .map(|obs| (obs.group, obs.value))
            .unzip();
        Self {
            labels,
            values: Array1::from_vec(values),
        }
    }

    /// Builds a dataset from a label column and a value column of equal length.
    pub fn from_columns(labels: Vec<GroupLabel>, values: Array1<f64>) -> Result<Self> {
        if labels.len() != values.len() {
            return Err(AnovaError::ShapeMismatch {
                expected: format!("{} values", labels.len()),
                actual: format!("{} values", values.len()),
            });
        }
        Ok(Self { labels, values })
    }

    /// Builds a dataset where `groups[i]` holds the values of level `i`.
    pub fn from_groups(groups: &[Vec<f64>]) -> Result<Self> {
        let mut observations = Vec::with_capacity(groups.iter().map(Vec::len).sum());
        for (level, values) in groups.iter().enumerate() {
            let label = GroupLabel::try_from(level)?;
            observations.extend(values.iter().map(|&value| Observation::new(label, value)));
        }
        Ok(Self::new(observations))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn labels(&self) -> &[GroupLabel] {
        &self.labels
    }

    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    /// Iterates over the observations in storage order.
    pub fn iter(&self) -> impl Iterator<Item = Observation> + '_ {
        self.labels
            .iter()
            .zip(self.values.iter())
            .map(|(&group, &value)| Observation { group, value })
    }

    /// Number of distinct group labels.
    pub fn group_count(&self) -> usize {
        self.labels.iter().collect::<BTreeSet<_>>().len()
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index_width = self.len().saturating_sub(1).to_string().len();
        writeln!(f, "{:>index_width$}  {:>5}  {:>10}", "", "level", "y")?;
        for (row, obs) in self.iter().enumerate() {
            writeln!(
                f,
                "{:>index_width$}  {:>5}  {:>10.6}",
                row, obs.group, obs.value
            )?;
        }
        write!(f, "\n[{} rows x 2 columns]", self.len())
    }
}

use std::collections::{btree_map, BTreeMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::series::DateRange;

/// A named series of daily values. Dates are unique and ordered by construction. A value might be
/// missing for a date, which is stored as `null`.
#[derive(PartialEq, Debug, Default, Serialize, Deserialize, Clone)]
#[serde(transparent)]
pub struct Metric {
    values: BTreeMap<NaiveDate, Option<f64>>,
}

impl Metric {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets value for a day, replacing the previous one.
    pub fn insert(&mut self, date: NaiveDate, value: Option<f64>) -> Option<Option<f64>> {
        self.values.insert(date, value)
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.values.get(&date).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All entries, including the ones without a value.
    fn entries(&self) -> impl DoubleEndedIterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.values.iter().map(|(date, value)| (*date, *value))
    }

    /// Entries that hold a value, in chronological order.
    pub fn known_points(&self) -> impl DoubleEndedIterator<Item = (NaiveDate, f64)> + '_ {
        self.entries()
            .filter_map(|(date, value)| value.map(|v| (date, v)))
    }

    /// Closest known point at or before `date`.
    pub fn known_at_or_before(&self, date: NaiveDate) -> Option<(NaiveDate, f64)> {
        self.values
            .range(..=date)
            .rev()
            .find_map(|(date, value)| value.map(|v| (*date, v)))
    }

    /// Closest known point at or after `date`.
    pub fn known_at_or_after(&self, date: NaiveDate) -> Option<(NaiveDate, f64)> {
        self.values
            .range(date..)
            .find_map(|(date, value)| value.map(|v| (*date, v)))
    }

    /// First and last day that hold a value.
    pub fn known_span(&self) -> Option<DateRange> {
        let mut points = self.known_points();
        let first = points.next()?;
        let last = points.next_back().unwrap_or(first);
        DateRange::new(first.0, last.0)
    }
}

impl FromIterator<(NaiveDate, f64)> for Metric {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(date, v)| (date, Some(v))).collect(),
        }
    }
}

/// Every tracked metric keyed by its name. This is exactly what gets persisted.
#[derive(PartialEq, Debug, Default, Serialize, Deserialize, Clone)]
#[serde(transparent)]
pub struct Dataset {
    pub(super) metrics: BTreeMap<String, Metric>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Metric> {
        self.metrics.get(name)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Metric> {
        self.metrics.iter()
    }

    /// Range between the earliest and the latest known value across all metrics. Missing when no
    /// metric has a single value yet.
    pub fn date_span(&self) -> Option<DateRange> {
        self.metrics
            .values()
            .filter_map(Metric::known_span)
            .reduce(|a, b| a.union(b))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = (&'a String, &'a Metric);
    type IntoIter = btree_map::Iter<'a, String, Metric>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: Into<String>> FromIterator<(S, Metric)> for Dataset {
    fn from_iter<T: IntoIterator<Item = (S, Metric)>>(iter: T) -> Self {
        Self {
            metrics: iter.into_iter().map(|(name, m)| (name.into(), m)).collect(),
        }
    }
}

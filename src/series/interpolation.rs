use std::fmt::Display;

use chrono::NaiveDate;
use clap::ValueEnum;

use crate::storage::entities::Metric;

use super::{DateRange, Days};

/// How days without a value are filled in.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum FillPolicy {
    /// Straight line between the closest known values. Days outside of known values repeat the
    /// nearest known value.
    #[default]
    Linear,
    /// Repeat the last known value. Days before the first known value are left out.
    Forward,
}

impl Display for FillPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FillPolicy::Linear => write!(f, "linear"),
            FillPolicy::Forward => write!(f, "forward"),
        }
    }
}

/// Lazily produces one value per day of `range` for `metric`.
pub fn fill(metric: &Metric, range: DateRange, policy: FillPolicy) -> Filled<'_> {
    Filled {
        metric,
        days: range.days(),
        policy,
    }
}

/// Shorthand for [fill] with [FillPolicy::Linear].
pub fn interpolate(metric: &Metric, range: DateRange) -> Filled<'_> {
    fill(metric, range, FillPolicy::Linear)
}

/// Iterator returned by [fill].
pub struct Filled<'a> {
    metric: &'a Metric,
    days: Days,
    policy: FillPolicy,
}

impl Filled<'_> {
    fn value_at(&self, date: NaiveDate) -> Option<f64> {
        let before = self.metric.known_at_or_before(date);
        match self.policy {
            FillPolicy::Forward => before.map(|(_, v)| v),
            FillPolicy::Linear => {
                let after = self.metric.known_at_or_after(date);
                match (before, after) {
                    (Some((start, a)), Some((end, b))) if start != end => {
                        let position = (date - start).num_days() as f64;
                        let width = (end - start).num_days() as f64;
                        Some(a + (b - a) * position / width)
                    }
                    (Some((_, v)), _) | (None, Some((_, v))) => Some(v),
                    (None, None) => None,
                }
            }
        }
    }
}

impl Iterator for Filled<'_> {
    type Item = (NaiveDate, f64);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let date = self.days.next()?;
            match self.value_at(date) {
                Some(v) => return Some((date, v)),
                // Without a single known value nothing can be produced for the remaining days.
                None if self.policy == FillPolicy::Linear => {
                    self.days.next = None;
                    return None;
                }
                None => continue,
            }
        }
    }
}

//! Turning sparse metrics into continuous daily series.

pub mod interpolation;

use std::iter::FusedIterator;

use chrono::NaiveDate;

/// Inclusive range of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Returns [None] if `start` comes after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days between start and end. A single day range has 0 days.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Smallest range covering both ranges.
    pub fn union(self, other: DateRange) -> DateRange {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn days(&self) -> Days {
        Days {
            next: Some(self.start),
            end: self.end,
        }
    }
}

/// Iterator over dates between start (inclusive) and end (inclusive).
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for Days {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|v| *v <= self.end)?;
        self.next = current.succ_opt();
        Some(current)
    }
}

impl FusedIterator for Days {}

//! Visible date window of the graph and the rules for axis labels.

use chrono::{Duration, NaiveDate};

use crate::{
    series::DateRange,
    utils::time::{axis_to_date, date_to_axis},
};

/// Adds some breathing room around the data. Short spans get a fixed number of days, long ones 5%.
pub fn padded_span(span: DateRange) -> DateRange {
    let days = span.num_days();
    let padding = match days {
        0 => 3,
        1..=6 => 1,
        7..=29 => 2,
        _ => (days * 5 / 100).max(3),
    };
    DateRange::new(shift(span.start(), -padding), shift(span.end(), padding)).unwrap_or(span)
}

/// The more days are visible, the less precise labels become.
pub fn date_label_format(days: i64) -> &'static str {
    if days <= 14 {
        "%b %d %a"
    } else if days <= 180 {
        "%b %d"
    } else {
        "%b %Y"
    }
}

/// Number of labels on the date axis. Roughly a label per day for a week, per week for a month,
/// per month for a year and per quarter beyond that, limited by available `width`.
pub fn date_label_count(days: i64, width: u16) -> usize {
    let wanted = match days {
        i64::MIN..=0 => 1,
        1..=7 => days + 1,
        8..=30 => (days / 7 + 1).max(4),
        31..=365 => (days / 30 + 1).max(4),
        _ => (days / 90 + 1).max(4),
    };
    let fits = (width / 12).max(2) as i64;
    wanted.min(fits).max(1) as usize
}

fn shift(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Window of dates currently shown. Zooming and panning only move the window, the data stays as
/// is. The window never leaves `limits`.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewWindow {
    initial: DateRange,
    limits: DateRange,
    current: DateRange,
}

impl ViewWindow {
    /// `zoom` overrides the initial window. Limits grow to include it.
    pub fn new(span: DateRange, zoom: Option<DateRange>) -> Self {
        let padded = padded_span(span);
        let initial = zoom.unwrap_or(padded);
        Self {
            initial,
            limits: padded.union(initial),
            current: initial,
        }
    }

    pub fn current(&self) -> DateRange {
        self.current
    }

    pub fn limits(&self) -> DateRange {
        self.limits
    }

    /// Chart bounds of the window. A single day gets half a day on each side.
    pub fn bounds(&self) -> [f64; 2] {
        let start = date_to_axis(self.current.start());
        let end = date_to_axis(self.current.end());
        if start == end {
            [start - 0.5, end + 0.5]
        } else {
            [start, end]
        }
    }

    pub fn labels(&self, width: u16) -> Vec<String> {
        let days = self.current.num_days();
        let format = date_label_format(days);
        let count = date_label_count(days, width);
        if count == 1 {
            return vec![self.current.start().format(format).to_string()];
        }
        let [start, end] = self.bounds();
        (0..count)
            .filter_map(|i| {
                let position = start + (end - start) * i as f64 / (count - 1) as f64;
                axis_to_date(position.round())
            })
            .map(|date| date.format(format).to_string())
            .collect()
    }

    /// Halves the window around its centre. A window of one day can't be zoomed further.
    pub fn zoom_in(&mut self) {
        let width = self.current.num_days();
        if width <= 1 {
            return;
        }
        let new_width = (width / 2).max(1);
        let start = shift(self.current.start(), (width - new_width) / 2);
        self.place(start, new_width);
    }

    /// Doubles the window around its centre, up to the limits.
    pub fn zoom_out(&mut self) {
        let width = self.current.num_days();
        let new_width = (width * 2).max(2).min(self.limits.num_days());
        let start = shift(self.current.start(), -(new_width - width) / 2);
        self.place(start, new_width);
    }

    pub fn pan_left(&mut self) {
        let width = self.current.num_days();
        let start = shift(self.current.start(), -(width / 4).max(1));
        self.place(start, width);
    }

    pub fn pan_right(&mut self) {
        let width = self.current.num_days();
        let start = shift(self.current.start(), (width / 4).max(1));
        self.place(start, width);
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
    }

    /// Moves a window of `width` days starting at `start` inside the limits.
    fn place(&mut self, start: NaiveDate, width: i64) {
        let width = width.min(self.limits.num_days());
        let latest_start = shift(self.limits.end(), -width);
        let start = start.clamp(self.limits.start(), latest_start);
        if let Some(range) = DateRange::new(start, shift(start, width)) {
            self.current = range;
        }
    }
}

use ratatui::style::Color;

use crate::{
    series::{
        interpolation::{fill, FillPolicy},
        DateRange,
    },
    storage::entities::Dataset,
    utils::time::date_to_axis,
};

use super::style::series_color;

/// Everything the chart needs for a single metric, already converted into chart coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesModel {
    pub name: String,
    pub color: Color,
    /// Filled daily values.
    pub line: Vec<(f64, f64)>,
    /// Values that were actually recorded.
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartModel {
    pub series: Vec<SeriesModel>,
    /// Days covered by recorded values. Missing when there is nothing to draw.
    pub span: Option<DateRange>,
}

impl ChartModel {
    /// Fills every metric over the span of the whole dataset so all lines cover the same days.
    /// Metrics keep their color even if they have no values yet.
    pub fn build(dataset: &Dataset, policy: FillPolicy) -> Self {
        let Some(span) = dataset.date_span() else {
            return Self::default();
        };

        let series = dataset
            .iter()
            .enumerate()
            .filter_map(|(index, (name, metric))| {
                let points = metric
                    .known_points()
                    .map(|(date, v)| (date_to_axis(date), v))
                    .collect::<Vec<_>>();
                if points.is_empty() {
                    return None;
                }
                let line = fill(metric, span, policy)
                    .map(|(date, v)| (date_to_axis(date), v))
                    .collect();
                Some(SeriesModel {
                    name: name.clone(),
                    color: series_color(index),
                    line,
                    points,
                })
            })
            .collect();

        Self {
            series,
            span: Some(span),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

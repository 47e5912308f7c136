use chrono::NaiveDate;
use tracing::debug;

use super::entities::{Dataset, Metric};

/// Builds the name a metric is stored under. Units are kept as a part of the name, so `weight` in
/// `kg` becomes `weight (kg)`.
pub fn metric_name_with_unit(name: &str, unit: &str) -> String {
    let name = name.trim();
    let unit = unit.trim();
    if unit.is_empty() {
        name.to_string()
    } else {
        format!("{name} ({unit})")
    }
}

impl Dataset {
    pub fn contains(&self, name: &str) -> bool {
        self.metrics.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.metrics.keys().map(String::as_str)
    }

    /// Starts tracking a metric. Returns false if the metric was already tracked, in which case
    /// nothing changes.
    pub fn add_metric(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.metrics.contains_key(&name) {
            return false;
        }
        debug!("Tracking new metric {name:?}");
        self.metrics.insert(name, Metric::new());
        true
    }

    /// Records a value of a metric for a day. Unknown metrics are created on the fly.
    pub fn record(&mut self, name: &str, date: NaiveDate, value: f64) {
        if !self.metrics.contains_key(name) {
            debug!("Recording created metric {name:?}");
        }
        self.metrics
            .entry(name.to_string())
            .or_default()
            .insert(date, Some(value));
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::storage::entities::Dataset;

    use super::metric_name_with_unit;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_add_metric_twice_keeps_one_entry() {
        let mut dataset = Dataset::new();

        assert!(dataset.add_metric("pushups"));
        dataset.record("pushups", test_date(), 10.);
        assert!(!dataset.add_metric("pushups"));

        assert_eq!(dataset.names().collect::<Vec<_>>(), vec!["pushups"]);
        assert_eq!(dataset.get("pushups").unwrap().get(test_date()), Some(10.));
    }

    #[test]
    fn test_record_creates_metric() {
        let mut dataset = Dataset::new();

        dataset.record("steps", test_date(), 8000.);

        assert!(dataset.contains("steps"));
        assert_eq!(dataset.get("steps").unwrap().get(test_date()), Some(8000.));
    }

    #[test]
    fn test_record_overwrites_same_day() {
        let mut dataset = Dataset::new();

        dataset.record("steps", test_date(), 8000.);
        dataset.record("steps", test_date(), 9000.);

        let metric = dataset.get("steps").unwrap();
        assert_eq!(metric.len(), 1);
        assert_eq!(metric.get(test_date()), Some(9000.));
    }

    #[test]
    fn test_same_name_with_other_unit_is_a_new_metric() {
        let mut dataset = Dataset::new();

        assert!(dataset.add_metric(metric_name_with_unit("weight", "kg")));
        assert!(dataset.add_metric(metric_name_with_unit("weight", "lbs")));
        assert!(!dataset.add_metric(metric_name_with_unit("weight", "kg")));

        assert_eq!(dataset.names().collect::<Vec<_>>(), vec!["weight (kg)", "weight (lbs)"]);
        assert!(!dataset.contains("weight"));
    }

    #[test]
    fn test_metric_name_with_unit() {
        assert_eq!(metric_name_with_unit(" weight ", "kg"), "weight (kg)");
        assert_eq!(metric_name_with_unit("pushups", "  "), "pushups");
    }
}

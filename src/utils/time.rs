
use chrono::{Datelike, NaiveDate};


/// This is the standard way of converting a date to a string in daytally. The store uses the same
/// format for its keys.
pub fn date_to_record_name(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Converts a date into a position on the x axis of a chart. One unit is one day.
pub fn date_to_axis(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Reverse of [date_to_axis]. Fractional days are truncated towards the earlier date.
pub fn axis_to_date(value: f64) -> Option<NaiveDate> {
    let days = value.floor();
    if days < i32::MIN as f64 || days > i32::MAX as f64 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(days as i32)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{axis_to_date, date_to_axis, date_to_record_name};

    #[test]
    fn test_record_name_is_iso() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert_eq!(date_to_record_name(date), "2024-01-03");
    }

    #[test]
    fn test_axis_conversion_steps_by_day() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let next = date.succ_opt().unwrap();
        assert_eq!(date_to_axis(next) - date_to_axis(date), 1.);
        assert_eq!(axis_to_date(date_to_axis(date) + 0.7), Some(date));
    }
}

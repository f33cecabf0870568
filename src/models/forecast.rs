use super::weather::WeatherCondition;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One day of the multi-day outlook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub condition: WeatherCondition,
    pub temperature_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub humidity_pct: f64,
    pub description: String,
}

impl DailyForecast {
    /// Short label for the forecast strip: "Today", "Tomorrow", then the
    /// abbreviated weekday.
    pub fn day_label(&self, today: NaiveDate) -> String {
        if self.date == today {
            "Today".to_string()
        } else if self.date == today.succ_opt().unwrap_or(today) {
            "Tomorrow".to_string()
        } else {
            self.date.weekday().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: NaiveDate) -> DailyForecast {
        DailyForecast {
            date,
            condition: WeatherCondition::Clear,
            temperature_c: 20.0,
            temp_min_c: 15.0,
            temp_max_c: 25.0,
            humidity_pct: 50.0,
            description: "clear sky".into(),
        }
    }

    #[test]
    fn day_labels() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(); // a Monday
        assert_eq!(day(today).day_label(today), "Today");
        assert_eq!(
            day(today.succ_opt().unwrap()).day_label(today),
            "Tomorrow"
        );
        let wednesday = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        assert_eq!(day(wednesday).day_label(today), "Wed");
    }
}

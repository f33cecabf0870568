//! Demo weather provider used when no API key is configured.
//!
//! Values are drawn from a splitmix64 generator seeded by city name and
//! date, so the same city on the same day always reproduces the same
//! report. A short artificial delay stands in for network latency.

use crate::error::Result;
use crate::models::{
    CurrentConditions, DailyForecast, Location, LocationQuery, ReportSource, WeatherCondition,
    WeatherReport,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use std::hash::{DefaultHasher, Hash, Hasher};
use std::time::Duration;

const MOCK_DELAY: Duration = Duration::from_millis(1000);

/// Stand-in reverse geocoding targets for coordinate queries.
const DEMO_CITIES: &[(&str, f64, f64)] = &[
    ("London", 51.5074, -0.1278),
    ("New York", 40.7128, -74.0060),
    ("Tokyo", 35.6762, 139.6503),
    ("Paris", 48.8566, 2.3522),
    ("Sydney", -33.8688, 151.2093),
];

const CONDITIONS: &[WeatherCondition] = &[
    WeatherCondition::Clear,
    WeatherCondition::Clouds,
    WeatherCondition::Rain,
    WeatherCondition::Snow,
];

fn descriptions(condition: WeatherCondition) -> &'static [&'static str] {
    match condition {
        WeatherCondition::Clear => &["sunny", "clear sky", "bright sunshine"],
        WeatherCondition::Clouds => &["partly cloudy", "overcast", "scattered clouds"],
        WeatherCondition::Rain => &["light rain", "heavy rain", "drizzle"],
        WeatherCondition::Snow => &["light snow", "heavy snow", "snow showers"],
        _ => &["unsettled"],
    }
}

/// splitmix64; small and reproducible, which is all the demo data needs.
struct SeededRng(u64);

impl SeededRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn in_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockWeatherClient;

impl MockWeatherClient {
    pub fn new() -> Self {
        Self
    }

    /// Produce a report after the simulated latency.
    pub async fn fetch_report(&self, query: &LocationQuery) -> Result<WeatherReport> {
        tokio::time::sleep(MOCK_DELAY).await;

        let (name, lat, lon) = resolve_query(query);
        Ok(generate_report(&name, lat, lon, Utc::now().date_naive()))
    }

    pub async fn test_connection(&self) -> Result<bool> {
        Ok(true)
    }
}

fn resolve_query(query: &LocationQuery) -> (String, f64, f64) {
    match query {
        LocationQuery::City(name) => (name.clone(), 51.5074, -0.1278),
        LocationQuery::Coords { lat, lon } => {
            // Deterministic stand-in for reverse geocoding.
            let mut hasher = DefaultHasher::new();
            lat.to_bits().hash(&mut hasher);
            lon.to_bits().hash(&mut hasher);
            let (name, _, _) =
                DEMO_CITIES[(hasher.finish() % DEMO_CITIES.len() as u64) as usize];
            (name.to_string(), *lat, *lon)
        }
    }
}

fn seed_for(city: &str, date: NaiveDate) -> u64 {
    let mut hasher = DefaultHasher::new();
    city.to_lowercase().hash(&mut hasher);
    date.hash(&mut hasher);
    hasher.finish()
}

/// Deterministic report for a city and date.
pub fn generate_report(city: &str, lat: f64, lon: f64, today: NaiveDate) -> WeatherReport {
    let mut rng = SeededRng::new(seed_for(city, today));

    let condition = *rng.pick(CONDITIONS);
    let description = (*rng.pick(descriptions(condition))).to_string();
    let temperature_c = rng.in_range(-5.0, 35.0).round();

    let sunrise = today
        .and_time(NaiveTime::from_hms_opt(6, 30, 0).unwrap_or_default())
        .and_utc();
    let sunset = today
        .and_time(NaiveTime::from_hms_opt(18, 45, 0).unwrap_or_default())
        .and_utc();

    let current = CurrentConditions {
        temperature_c,
        feels_like_c: temperature_c + rng.in_range(-3.0, 3.0).round(),
        temp_min_c: temperature_c - 5.0,
        temp_max_c: temperature_c + 5.0,
        condition,
        description,
        humidity_pct: rng.in_range(40.0, 80.0).round(),
        pressure_hpa: rng.in_range(1000.0, 1100.0).round(),
        wind_speed_kmh: rng.in_range(5.0, 35.0).round(),
        wind_direction_deg: rng.in_range(0.0, 360.0).round(),
        visibility_km: rng.in_range(5.0, 25.0).round(),
        uv_index: Some(rng.in_range(0.0, 11.0).floor()),
        sunrise,
        sunset,
    };

    let forecast = (0..7)
        .map(|offset| {
            let date = today + chrono::Duration::days(offset);
            let condition = *rng.pick(CONDITIONS);
            let temp = temperature_c + rng.in_range(-5.0, 5.0).round();
            DailyForecast {
                date,
                condition,
                temperature_c: temp,
                temp_min_c: temp - rng.in_range(2.0, 10.0).round(),
                temp_max_c: temp + rng.in_range(2.0, 10.0).round(),
                humidity_pct: rng.in_range(40.0, 80.0).round(),
                description: descriptions(condition)[0].to_string(),
            }
        })
        .collect();

    WeatherReport {
        fetched_at: Utc::now(),
        source: ReportSource::Mock,
        location: Location {
            name: city.to_string(),
            country: "Demo".to_string(),
            latitude: lat,
            longitude: lon,
        },
        current,
        forecast,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn reports_are_deterministic_per_city_and_day() {
        let a = generate_report("London", 51.5, -0.13, date());
        let b = generate_report("London", 51.5, -0.13, date());
        assert_eq!(a.current.temperature_c, b.current.temperature_c);
        assert_eq!(a.current.condition, b.current.condition);
        assert_eq!(a.current.humidity_pct, b.current.humidity_pct);
        assert_eq!(a.forecast.len(), b.forecast.len());
        for (x, y) in a.forecast.iter().zip(b.forecast.iter()) {
            assert_eq!(x.temperature_c, y.temperature_c);
            assert_eq!(x.condition, y.condition);
        }
    }

    #[test]
    fn city_case_does_not_change_the_seed() {
        let a = generate_report("london", 51.5, -0.13, date());
        let b = generate_report("LONDON", 51.5, -0.13, date());
        assert_eq!(a.current.temperature_c, b.current.temperature_c);
    }

    #[test]
    fn values_stay_in_declared_ranges() {
        for city in ["London", "Tokyo", "Paris", "Ouagadougou"] {
            let report = generate_report(city, 0.0, 0.0, date());
            let c = &report.current;
            assert!((-5.0..=35.0).contains(&c.temperature_c));
            assert!((40.0..=80.0).contains(&c.humidity_pct));
            assert!((5.0..=35.0).contains(&c.wind_speed_kmh));
            assert!(c.uv_index.is_some_and(|uv| (0.0..11.0).contains(&uv)));
        }
    }

    #[test]
    fn forecast_covers_seven_sequential_days() {
        let report = generate_report("London", 51.5, -0.13, date());
        assert_eq!(report.forecast.len(), 7);
        for (i, day) in report.forecast.iter().enumerate() {
            assert_eq!(day.date, date() + chrono::Duration::days(i as i64));
            assert!(day.temp_min_c <= day.temperature_c);
            assert!(day.temp_max_c >= day.temperature_c);
        }
    }

    #[test]
    fn coordinate_queries_resolve_to_a_stable_demo_city() {
        let query = LocationQuery::Coords {
            lat: 48.85,
            lon: 2.35,
        };
        let (a, _, _) = resolve_query(&query);
        let (b, _, _) = resolve_query(&query);
        assert_eq!(a, b);
        assert!(DEMO_CITIES.iter().any(|(name, _, _)| *name == a));
    }
}

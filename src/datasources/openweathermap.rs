use crate::config::OpenWeatherMapConfig;
use crate::error::{Result, SkycastError};
use crate::models::{
    meters_to_km, mps_to_kmh, CurrentConditions, DailyForecast, Location, LocationQuery,
    ReportSource, WeatherCondition, WeatherReport,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Days of outlook retained from the 5-day/3-hour forecast feed.
const FORECAST_DAYS: usize = 7;

#[derive(Clone)]
pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures

#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    coord: OwmCoord,
    weather: Vec<OwmWeather>,
    main: OwmMain,
    #[serde(default)]
    visibility: Option<f64>,
    wind: OwmWind,
    sys: OwmSys,
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    #[serde(default)]
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwmCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmForecastMain,
    weather: Vec<OwmWeather>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch current conditions plus the aggregated multi-day outlook.
    pub async fn fetch_report(&self, query: &LocationQuery) -> Result<WeatherReport> {
        let current: OwmCurrentResponse = self.get_json("weather", query).await?;
        let forecast: OwmForecastResponse = self.get_json("forecast", query).await?;

        Ok(self.convert_report(current, forecast))
    }

    /// Cheap connectivity probe used by `skycast check`.
    pub async fn test_connection(&self, query: &LocationQuery) -> Result<bool> {
        let response = self
            .client
            .get(format!("{}/weather", API_BASE_URL))
            .query(&self.query_params(query))
            .send()
            .await
            .map_err(|e| SkycastError::Provider(format!("OpenWeatherMap: {}", e)))?;

        Ok(response.status().is_success())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &LocationQuery,
    ) -> Result<T> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        let response = self
            .client
            .get(&url)
            .query(&self.query_params(query))
            .send()
            .await
            .map_err(|e| SkycastError::Provider(format!("OpenWeatherMap: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SkycastError::Provider(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        response.json::<T>().await.map_err(|e| {
            SkycastError::Provider(format!("Failed to parse OpenWeatherMap response: {}", e))
        })
    }

    fn query_params(&self, query: &LocationQuery) -> Vec<(String, String)> {
        let mut params = vec![
            ("appid".to_string(), self.config.api_key.clone()),
            ("units".to_string(), "metric".to_string()),
        ];
        match query {
            LocationQuery::City(name) => params.push(("q".to_string(), name.clone())),
            LocationQuery::Coords { lat, lon } => {
                params.push(("lat".to_string(), lat.to_string()));
                params.push(("lon".to_string(), lon.to_string()));
            }
        }
        params
    }

    fn convert_report(
        &self,
        current: OwmCurrentResponse,
        forecast: OwmForecastResponse,
    ) -> WeatherReport {
        let location = Location {
            name: current.name.clone(),
            country: current.sys.country.clone(),
            latitude: current.coord.lat,
            longitude: current.coord.lon,
        };

        let (condition, description) = current
            .weather
            .first()
            .map(|w| (WeatherCondition::from_token(&w.main), w.description.clone()))
            .unwrap_or_else(|| (WeatherCondition::Other, String::new()));

        let conditions = CurrentConditions {
            temperature_c: current.main.temp,
            feels_like_c: current.main.feels_like,
            temp_min_c: current.main.temp_min,
            temp_max_c: current.main.temp_max,
            condition,
            description,
            humidity_pct: current.main.humidity,
            pressure_hpa: current.main.pressure,
            wind_speed_kmh: mps_to_kmh(current.wind.speed),
            wind_direction_deg: current.wind.deg,
            // The current-weather endpoint reports visibility in meters and
            // caps it at 10 km; missing means unrestricted.
            visibility_km: meters_to_km(current.visibility.unwrap_or(10_000.0)),
            // UV index is not served by these endpoints.
            uv_index: None,
            sunrise: DateTime::from_timestamp(current.sys.sunrise, 0).unwrap_or_else(Utc::now),
            sunset: DateTime::from_timestamp(current.sys.sunset, 0).unwrap_or_else(Utc::now),
        };

        WeatherReport {
            fetched_at: Utc::now(),
            source: ReportSource::Live,
            location,
            current: conditions,
            forecast: aggregate_daily(&forecast.list),
        }
    }
}

/// Collapse 3-hourly forecast points into one entry per day.
fn aggregate_daily(items: &[OwmForecastItem]) -> Vec<DailyForecast> {
    let mut by_date: HashMap<NaiveDate, Vec<&OwmForecastItem>> = HashMap::new();
    for item in items {
        let date = DateTime::from_timestamp(item.dt, 0)
            .unwrap_or_else(Utc::now)
            .date_naive();
        by_date.entry(date).or_default().push(item);
    }

    let mut days: Vec<DailyForecast> = by_date
        .into_iter()
        .map(|(date, points)| aggregate_day(date, &points))
        .collect();

    days.sort_by_key(|d| d.date);
    days.truncate(FORECAST_DAYS);
    days
}

fn aggregate_day(date: NaiveDate, points: &[&OwmForecastItem]) -> DailyForecast {
    let count = points.len().max(1) as f64;

    let temperature_c = points.iter().map(|p| p.main.temp).sum::<f64>() / count;

    let temp_min_c = points
        .iter()
        .map(|p| p.main.temp_min)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0.0);

    let temp_max_c = points
        .iter()
        .map(|p| p.main.temp_max)
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0.0);

    let humidity_pct = points.iter().map(|p| p.main.humidity).sum::<f64>() / count;

    // Dominant condition is the most frequent one across the day.
    let mut condition_counts: HashMap<WeatherCondition, usize> = HashMap::new();
    for point in points {
        if let Some(w) = point.weather.first() {
            *condition_counts
                .entry(WeatherCondition::from_token(&w.main))
                .or_insert(0) += 1;
        }
    }
    let condition = condition_counts
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(condition, _)| condition)
        .unwrap_or_default();

    let description = points
        .iter()
        .filter_map(|p| p.weather.first())
        .find(|w| WeatherCondition::from_token(&w.main) == condition)
        .map(|w| w.description.clone())
        .unwrap_or_default();

    DailyForecast {
        date,
        condition,
        temperature_c,
        temp_min_c,
        temp_max_c,
        humidity_pct,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> OpenWeatherMapConfig {
        OpenWeatherMapConfig {
            api_key: "test_key".to_string(),
            enabled: true,
        }
    }

    fn item(dt: i64, temp: f64, token: &str) -> OwmForecastItem {
        OwmForecastItem {
            dt,
            main: OwmForecastMain {
                temp,
                temp_min: temp - 2.0,
                temp_max: temp + 2.0,
                humidity: 60.0,
            },
            weather: vec![OwmWeather {
                main: token.to_string(),
                description: format!("{} sky", token.to_lowercase()),
            }],
        }
    }

    #[test]
    fn city_query_params() {
        let client = OpenWeatherMapClient::new(sample_config());
        let params = client.query_params(&LocationQuery::City("New York".into()));
        assert!(params.contains(&("q".to_string(), "New York".to_string())));
        assert!(params.contains(&("units".to_string(), "metric".to_string())));
    }

    #[test]
    fn coord_query_params() {
        let client = OpenWeatherMapClient::new(sample_config());
        let params = client.query_params(&LocationQuery::Coords {
            lat: 51.5,
            lon: -0.12,
        });
        assert!(params.contains(&("lat".to_string(), "51.5".to_string())));
        assert!(params.contains(&("lon".to_string(), "-0.12".to_string())));
    }

    #[test]
    fn daily_aggregation_groups_and_sorts() {
        // Two days of 3-hourly points, second day first in the feed.
        const DAY: i64 = 86_400;
        let items = vec![
            item(DAY + 3_600, 20.0, "Clear"),
            item(3_600, 10.0, "Rain"),
            item(7_200, 12.0, "Rain"),
            item(10_800, 14.0, "Clouds"),
        ];

        let days = aggregate_daily(&items);
        assert_eq!(days.len(), 2);

        assert_eq!(days[0].condition, WeatherCondition::Rain);
        assert!((days[0].temperature_c - 12.0).abs() < 1e-9);
        assert!((days[0].temp_min_c - 8.0).abs() < 1e-9);
        assert!((days[0].temp_max_c - 16.0).abs() < 1e-9);

        assert_eq!(days[1].condition, WeatherCondition::Clear);
    }

    #[test]
    fn aggregation_caps_day_count() {
        const DAY: i64 = 86_400;
        let items: Vec<OwmForecastItem> = (0..10)
            .map(|d| item(d * DAY + 3_600, 15.0, "Clear"))
            .collect();
        assert_eq!(aggregate_daily(&items).len(), FORECAST_DAYS);
    }
}

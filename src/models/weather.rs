use super::forecast::DailyForecast;
use super::snapshot::WeatherSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a report came from. Cached reports are shown until a live
/// fetch replaces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportSource {
    Live,
    Mock,
    Cached,
}

impl ReportSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportSource::Live => "Live",
            ReportSource::Mock => "Demo",
            ReportSource::Cached => "Cached",
        }
    }
}

impl std::fmt::Display for ReportSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// What to fetch weather for: a free-text city name or coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coords { lat: f64, lon: f64 },
}

impl LocationQuery {
    /// Case-insensitive match against a city name, used to decide whether
    /// a failed query should fall back to the default city.
    pub fn is_city(&self, name: &str) -> bool {
        match self {
            LocationQuery::City(c) => c.eq_ignore_ascii_case(name),
            LocationQuery::Coords { .. } => false,
        }
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationQuery::City(name) => write!(f, "{}", name),
            LocationQuery::Coords { lat, lon } => write!(f, "{:.2}, {:.2}", lat, lon),
        }
    }
}

/// Coarse weather condition categories shared by all providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WeatherCondition {
    #[default]
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Other,
}

impl WeatherCondition {
    /// Parse a provider condition token ("Rain", "clouds", "sunny", ...).
    /// Unknown tokens map to Other rather than failing.
    pub fn from_token(token: &str) -> Self {
        let t = token.to_lowercase();
        if t.contains("thunder") {
            WeatherCondition::Thunderstorm
        } else if t.contains("drizzle") {
            WeatherCondition::Drizzle
        } else if t.contains("rain") {
            WeatherCondition::Rain
        } else if t.contains("snow") {
            WeatherCondition::Snow
        } else if t.contains("cloud") {
            WeatherCondition::Clouds
        } else if t.contains("clear") || t.contains("sun") {
            WeatherCondition::Clear
        } else if t.contains("mist") || t.contains("fog") || t.contains("haze") {
            WeatherCondition::Mist
        } else {
            WeatherCondition::Other
        }
    }

    /// Lowercase token used for substring classification downstream.
    pub fn token(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "clear",
            WeatherCondition::Clouds => "clouds",
            WeatherCondition::Rain => "rain",
            WeatherCondition::Drizzle => "drizzle",
            WeatherCondition::Thunderstorm => "thunderstorm",
            WeatherCondition::Snow => "snow",
            WeatherCondition::Mist => "mist",
            WeatherCondition::Other => "other",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Clouds => "Cloudy",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Drizzle => "Drizzle",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::Mist => "Mist",
            WeatherCondition::Other => "Other",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "☀",
            WeatherCondition::Clouds => "☁",
            WeatherCondition::Rain => "🌧",
            WeatherCondition::Drizzle => "🌦",
            WeatherCondition::Thunderstorm => "⛈",
            WeatherCondition::Snow => "❄",
            WeatherCondition::Mist => "🌫",
            WeatherCondition::Other => "?",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current conditions for one location, metric units throughout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub condition: WeatherCondition,
    pub description: String,
    pub humidity_pct: f64,
    pub pressure_hpa: f64,
    pub wind_speed_kmh: f64,
    pub wind_direction_deg: f64,
    pub visibility_km: f64,
    pub uv_index: Option<f64>,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

impl CurrentConditions {
    /// Freeze the fields the insight engine classifies on.
    pub fn snapshot(&self) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_c: self.temperature_c,
            condition: self.condition.token().to_string(),
            humidity_pct: self.humidity_pct,
            wind_speed_kmh: self.wind_speed_kmh,
            uv_index: self.uv_index,
        }
    }

    pub fn uv_label(&self) -> Option<&'static str> {
        let uv = self.uv_index?;
        Some(if uv <= 2.0 {
            "Low"
        } else if uv <= 5.0 {
            "Moderate"
        } else if uv <= 7.0 {
            "High"
        } else {
            "Very High"
        })
    }
}

/// One complete fetch result: location, current conditions and the
/// multi-day outlook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub fetched_at: DateTime<Utc>,
    pub source: ReportSource,
    pub location: Location,
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecast>,
}

pub fn mps_to_kmh(mps: f64) -> f64 {
    mps * 3.6
}

pub fn meters_to_km(m: f64) -> f64 {
    m / 1000.0
}

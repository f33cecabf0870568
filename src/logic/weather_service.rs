use crate::config::Config;
use crate::datasources::{MockWeatherClient, OpenWeatherMapClient};
use crate::db::Database;
use crate::error::Result;
use crate::models::{LocationQuery, WeatherReport};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Result of one fetch task, tagged with the requesting generation so the
/// UI loop can discard superseded responses.
#[derive(Debug)]
pub struct FetchEvent {
    pub generation: u64,
    pub query: LocationQuery,
    pub result: std::result::Result<WeatherReport, String>,
}

#[derive(Debug, Clone)]
pub struct ConnectionStatus {
    pub provider: &'static str,
    pub connected: bool,
}

/// Owns the configured weather provider and the report cache.
///
/// The real client is used when an API key is configured and enabled;
/// otherwise every query is served by the deterministic demo provider.
#[derive(Clone)]
pub struct WeatherService {
    openweathermap: Option<OpenWeatherMapClient>,
    mock: MockWeatherClient,
    db: Database,
    default_city: String,
}

impl WeatherService {
    pub fn new(config: &Config, db: Database) -> Self {
        let openweathermap = config
            .openweathermap
            .as_ref()
            .filter(|c| c.enabled && !c.api_key.is_empty())
            .map(|c| {
                tracing::info!("OpenWeatherMap client configured for live weather");
                OpenWeatherMapClient::new(c.clone())
            });

        if openweathermap.is_none() {
            tracing::info!("OpenWeatherMap not configured - using demo weather data");
        }

        Self {
            openweathermap,
            mock: MockWeatherClient::new(),
            db,
            default_city: config.location.default_city.clone(),
        }
    }

    pub fn is_mock(&self) -> bool {
        self.openweathermap.is_none()
    }

    pub fn default_city(&self) -> &str {
        &self.default_city
    }

    /// The query to issue at startup: configured coordinates first, then
    /// the last viewed city, then the configured default.
    pub fn initial_query(&self, config: &Config) -> LocationQuery {
        if let (Some(lat), Some(lon)) = (config.location.latitude, config.location.longitude) {
            return LocationQuery::Coords { lat, lon };
        }

        let city = self
            .db
            .get_last_city()
            .unwrap_or_default()
            .unwrap_or_else(|| self.default_city.clone());
        LocationQuery::City(city)
    }

    /// Fetch a report and write it through to the cache. Cache failures
    /// are logged, never surfaced: the report is still good.
    pub async fn fetch(&self, query: &LocationQuery) -> Result<WeatherReport> {
        let report = match &self.openweathermap {
            Some(client) => client.fetch_report(query).await?,
            None => self.mock.fetch_report(query).await?,
        };

        if let Err(e) = self.db.cache_report(&report) {
            tracing::warn!(error = %e, "Failed to cache weather report");
        }
        if let Err(e) = self.db.set_last_city(&report.location.name) {
            tracing::warn!(error = %e, "Failed to remember last city");
        }

        Ok(report)
    }

    /// Spawn a fetch as a background task delivering on `tx`. A newer
    /// generation supersedes this one; the receiver filters by tag.
    pub fn spawn_fetch(
        &self,
        query: LocationQuery,
        generation: u64,
        tx: UnboundedSender<FetchEvent>,
    ) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            let result = service.fetch(&query).await.map_err(|e| e.to_string());
            if let Err(ref e) = result {
                tracing::warn!(query = %query, error = %e, "Weather fetch failed");
            }
            let _ = tx.send(FetchEvent {
                generation,
                query,
                result,
            });
        })
    }

    /// Last cached report for the startup city, if any.
    pub fn cached_report(&self, city: &str) -> Option<WeatherReport> {
        self.db.get_cached_report(city).unwrap_or_default()
    }

    pub async fn check_connection(&self) -> ConnectionStatus {
        match &self.openweathermap {
            Some(client) => {
                let query = LocationQuery::City(self.default_city.clone());
                ConnectionStatus {
                    provider: "OpenWeatherMap",
                    connected: client.test_connection(&query).await.unwrap_or(false),
                }
            }
            None => ConnectionStatus {
                provider: "Demo data",
                connected: self.mock.test_connection().await.unwrap_or(false),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LocationConfig;
    use tokio::sync::mpsc;

    fn mock_config() -> Config {
        Config {
            location: LocationConfig {
                default_city: "London".into(),
                latitude: None,
                longitude: None,
            },
            openweathermap: None,
            ..Config::default()
        }
    }

    fn service() -> WeatherService {
        WeatherService::new(&mock_config(), Database::open_in_memory().unwrap())
    }

    #[tokio::test]
    async fn unconfigured_key_means_mock_mode() {
        let service = service();
        assert!(service.is_mock());
        let status = service.check_connection().await;
        assert!(status.connected);
        assert_eq!(status.provider, "Demo data");
    }

    #[tokio::test]
    async fn fetch_writes_through_cache_and_last_city() {
        let service = service();
        let report = service
            .fetch(&LocationQuery::City("Tokyo".into()))
            .await
            .unwrap();
        assert_eq!(report.location.name, "Tokyo");

        assert!(service.cached_report("Tokyo").is_some());
        assert_eq!(
            service.db.get_last_city().unwrap().as_deref(),
            Some("Tokyo")
        );
    }

    #[tokio::test]
    async fn spawned_fetch_delivers_tagged_event() {
        let service = service();
        let (tx, mut rx) = mpsc::unbounded_channel();
        service.spawn_fetch(LocationQuery::City("Paris".into()), 3, tx);

        let event = rx.recv().await.expect("fetch event");
        assert_eq!(event.generation, 3);
        assert!(event.query.is_city("Paris"));
        assert_eq!(event.result.unwrap().location.name, "Paris");
    }

    #[test]
    fn initial_query_prefers_coords_then_last_city() {
        let db = Database::open_in_memory().unwrap();
        let mut config = mock_config();
        let service = WeatherService::new(&config, db.clone());

        // Nothing remembered: default city.
        assert_eq!(
            service.initial_query(&config),
            LocationQuery::City("London".into())
        );

        db.set_last_city("Sydney").unwrap();
        assert_eq!(
            service.initial_query(&config),
            LocationQuery::City("Sydney".into())
        );

        config.location.latitude = Some(35.67);
        config.location.longitude = Some(139.65);
        assert_eq!(
            service.initial_query(&config),
            LocationQuery::Coords {
                lat: 35.67,
                lon: 139.65
            }
        );
    }
}

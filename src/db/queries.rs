use crate::db::Database;
use crate::error::Result;
use crate::models::{ReportSource, WeatherReport};
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use tracing::warn;

const LAST_CITY_KEY: &str = "last_city";

fn location_key(name: &str) -> String {
    name.trim().to_lowercase()
}

// Weather report cache

impl Database {
    pub fn cache_report(&self, report: &WeatherReport) -> Result<()> {
        let payload = serde_json::to_string(report)?;
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT OR REPLACE INTO weather_cache (location_key, payload, fetched_at)
                VALUES (?1, ?2, ?3)
                "#,
                params![
                    location_key(&report.location.name),
                    payload,
                    report.fetched_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
    }

    /// Last cached report for a city, re-tagged as cached so the UI can
    /// label it stale. Unreadable payloads are dropped, not fatal.
    pub fn get_cached_report(&self, city: &str) -> Result<Option<WeatherReport>> {
        let payload: Option<String> = self.with_conn(|conn| {
            conn.query_row(
                "SELECT payload FROM weather_cache WHERE location_key = ?1",
                params![location_key(city)],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
        })?;

        let Some(payload) = payload else {
            return Ok(None);
        };

        match serde_json::from_str::<WeatherReport>(&payload) {
            Ok(mut report) => {
                report.source = ReportSource::Cached;
                Ok(Some(report))
            }
            Err(e) => {
                warn!(city, error = %e, "Discarding unreadable cached report");
                Ok(None)
            }
        }
    }

    /// Drop cache entries older than `days` days.
    pub fn prune_cache(&self, days: i64) -> Result<usize> {
        let cutoff = (Utc::now() - chrono::Duration::days(days)).to_rfc3339();
        self.with_conn(|conn| {
            let removed = conn.execute(
                "DELETE FROM weather_cache WHERE fetched_at < ?1",
                params![cutoff],
            )?;
            Ok(removed)
        })
    }
}

// Settings

impl Database {
    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
            Ok(())
        })
    }

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn set_last_city(&self, city: &str) -> Result<()> {
        self.set_setting(LAST_CITY_KEY, city)
    }

    pub fn get_last_city(&self) -> Result<Option<String>> {
        self.get_setting(LAST_CITY_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasources::mock::generate_report;
    use chrono::NaiveDate;

    fn sample_report(city: &str) -> WeatherReport {
        generate_report(
            city,
            51.5,
            -0.13,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        )
    }

    #[test]
    fn cache_round_trip_marks_report_cached() {
        let db = Database::open_in_memory().unwrap();
        let report = sample_report("London");
        db.cache_report(&report).unwrap();

        let cached = db.get_cached_report("London").unwrap().unwrap();
        assert_eq!(cached.source, ReportSource::Cached);
        assert_eq!(cached.location.name, "London");
        assert_eq!(cached.current.temperature_c, report.current.temperature_c);
    }

    #[test]
    fn cache_key_is_case_and_whitespace_insensitive() {
        let db = Database::open_in_memory().unwrap();
        db.cache_report(&sample_report("New York")).unwrap();
        assert!(db.get_cached_report(" new york ").unwrap().is_some());
    }

    #[test]
    fn replacing_a_cached_report() {
        let db = Database::open_in_memory().unwrap();
        let mut report = sample_report("Paris");
        db.cache_report(&report).unwrap();

        report.current.temperature_c = 99.0;
        db.cache_report(&report).unwrap();

        let cached = db.get_cached_report("Paris").unwrap().unwrap();
        assert_eq!(cached.current.temperature_c, 99.0);
    }

    #[test]
    fn missing_city_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_cached_report("Atlantis").unwrap().is_none());
    }

    #[test]
    fn corrupt_payload_is_discarded() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO weather_cache (location_key, payload, fetched_at) VALUES ('x', 'not json', '2025-01-01T00:00:00Z')",
                [],
            )?;
            Ok(())
        })
        .unwrap();
        assert!(db.get_cached_report("x").unwrap().is_none());
    }

    #[test]
    fn prune_removes_only_old_entries() {
        let db = Database::open_in_memory().unwrap();
        let mut old = sample_report("Old Town");
        old.fetched_at = Utc::now() - chrono::Duration::days(30);
        db.cache_report(&old).unwrap();
        db.cache_report(&sample_report("London")).unwrap();

        let removed = db.prune_cache(7).unwrap();
        assert_eq!(removed, 1);
        assert!(db.get_cached_report("Old Town").unwrap().is_none());
        assert!(db.get_cached_report("London").unwrap().is_some());
    }

    #[test]
    fn last_city_setting() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_last_city().unwrap().is_none());
        db.set_last_city("Tokyo").unwrap();
        assert_eq!(db.get_last_city().unwrap().as_deref(), Some("Tokyo"));
    }
}

use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::logic::rules::InsightEvent;
use crate::logic::weather_service::FetchEvent;
use crate::models::{Insight, LocationQuery, WeatherReport, WeatherSnapshot};
use std::time::Instant;

/// Shortlist shown in the search overlay.
pub const POPULAR_CITIES: &[&str] = &[
    "London",
    "New York",
    "Tokyo",
    "Paris",
    "Sydney",
    "Dubai",
    "Singapore",
    "Los Angeles",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Forecast,
    Insights,
    Search,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Dashboard),
            '2' => Some(Screen::Forecast),
            '3' => Some(Screen::Insights),
            's' | 'S' | '/' => Some(Screen::Search),
            _ => None,
        }
    }
}

pub struct SearchState {
    pub query: String,
    pub selected_city: usize,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            selected_city: 0,
        }
    }

    pub fn next_city(&mut self) {
        if self.selected_city < POPULAR_CITIES.len() - 1 {
            self.selected_city += 1;
        }
    }

    pub fn prev_city(&mut self) {
        if self.selected_city > 0 {
            self.selected_city -= 1;
        }
    }

    /// City to fetch on Enter: the typed query, or the highlighted
    /// shortlist entry when the input is empty.
    pub fn submit(&mut self) -> String {
        let typed = std::mem::take(&mut self.query);
        let trimmed = typed.trim();
        if trimmed.is_empty() {
            POPULAR_CITIES[self.selected_city].to_string()
        } else {
            trimmed.to_string()
        }
    }
}

pub struct InsightsState {
    pub selected_index: usize,
}

impl InsightsState {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn next(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }
}

/// Follow-up work the event loop must schedule after a fetch result.
#[derive(Debug)]
pub enum AfterFetch {
    /// Nothing to do (stale result or terminal failure).
    None,
    /// Spawn an insight derivation for the accepted snapshot.
    Derive(WeatherSnapshot, u64),
    /// Retry with the configured default city.
    Fallback(LocationQuery),
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub config: Config,
    pub db: Database,

    // Data
    pub report: Option<WeatherReport>,
    pub insight: Option<Insight>,

    // Supersede bookkeeping: only events tagged with the latest
    // generation are applied, everything older is discarded.
    weather_generation: u64,
    insight_generation: u64,
    pub fetching: bool,
    pub deriving: bool,
    fallback_used: bool,

    // Screen states
    pub search_state: SearchState,
    pub insights_state: InsightsState,

    // UI state
    pub status_message: Option<String>,
    pub last_fetch_request: Option<Instant>,
}

impl App {
    pub fn new(config: Config, db: Database) -> Result<Self> {
        // Show the last cached report for the remembered city while the
        // first live fetch runs.
        let city = db
            .get_last_city()?
            .unwrap_or_else(|| config.location.default_city.clone());
        let report = db.get_cached_report(&city)?;

        Ok(Self {
            screen: Screen::Dashboard,
            should_quit: false,
            config,
            db,
            report,
            insight: None,
            weather_generation: 0,
            insight_generation: 0,
            fetching: false,
            deriving: false,
            fallback_used: false,
            search_state: SearchState::new(),
            insights_state: InsightsState::new(),
            status_message: None,
            last_fetch_request: None,
        })
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    /// Register a new fetch; any in-flight request is now superseded.
    pub fn begin_fetch(&mut self, query: &LocationQuery) -> u64 {
        self.weather_generation += 1;
        self.fetching = true;
        self.last_fetch_request = Some(Instant::now());
        self.set_status(&format!("Updating weather for {}...", query));
        self.weather_generation
    }

    /// Kick off derivation for an already-present (cached) report.
    pub fn begin_cached_derivation(&mut self) -> Option<(WeatherSnapshot, u64)> {
        let report = self.report.as_ref()?;
        self.deriving = true;
        self.insight = None;
        self.insight_generation += 1;
        Some((report.current.snapshot(), self.insight_generation))
    }

    pub fn handle_fetch_event(&mut self, event: FetchEvent) -> AfterFetch {
        if event.generation != self.weather_generation {
            tracing::debug!(
                generation = event.generation,
                latest = self.weather_generation,
                "Discarding superseded fetch result"
            );
            return AfterFetch::None;
        }

        self.fetching = false;

        match event.result {
            Ok(report) => {
                let snapshot = report.current.snapshot();
                self.fallback_used = false;
                self.set_status(&format!("Weather for {} loaded", report.location.name));
                self.insights_state = InsightsState::new();
                self.report = Some(report);
                // A new snapshot supersedes any pending derivation.
                self.insight = None;
                self.deriving = true;
                self.insight_generation += 1;
                AfterFetch::Derive(snapshot, self.insight_generation)
            }
            Err(_) => {
                let default_city = self.config.location.default_city.clone();
                if !self.fallback_used && !event.query.is_city(&default_city) {
                    self.fallback_used = true;
                    self.set_status(&format!(
                        "Unable to fetch weather data. Trying {}...",
                        default_city
                    ));
                    AfterFetch::Fallback(LocationQuery::City(default_city))
                } else {
                    self.set_status("Unable to fetch weather data. Please try again.");
                    AfterFetch::None
                }
            }
        }
    }

    pub fn handle_insight_event(&mut self, event: InsightEvent) {
        if event.generation != self.insight_generation {
            tracing::debug!(
                generation = event.generation,
                latest = self.insight_generation,
                "Discarding superseded insight"
            );
            return;
        }
        self.deriving = false;
        self.insight = Some(event.insight);
    }

    /// Query for a manual or automatic refresh of the visible location.
    pub fn refresh_query(&self) -> LocationQuery {
        match &self.report {
            Some(report) => LocationQuery::City(report.location.name.clone()),
            None => LocationQuery::City(self.config.location.default_city.clone()),
        }
    }

    pub fn should_auto_refresh(&self) -> bool {
        let mins = self.config.ui.refresh_interval_mins;
        if mins == 0 || self.fetching {
            return false;
        }
        match self.last_fetch_request {
            Some(at) => at.elapsed().as_secs() >= mins * 60,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasources::mock::generate_report;
    use crate::models::Recommendation;
    use chrono::NaiveDate;

    fn app() -> App {
        App::new(Config::default(), Database::open_in_memory().unwrap()).unwrap()
    }

    fn report(city: &str) -> WeatherReport {
        generate_report(
            city,
            51.5,
            -0.13,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        )
    }

    fn ok_event(generation: u64, city: &str) -> FetchEvent {
        FetchEvent {
            generation,
            query: LocationQuery::City(city.into()),
            result: Ok(report(city)),
        }
    }

    fn err_event(generation: u64, city: &str) -> FetchEvent {
        FetchEvent {
            generation,
            query: LocationQuery::City(city.into()),
            result: Err("boom".into()),
        }
    }

    #[test]
    fn accepted_fetch_schedules_derivation() {
        let mut app = app();
        let generation = app.begin_fetch(&LocationQuery::City("Tokyo".into()));

        match app.handle_fetch_event(ok_event(generation, "Tokyo")) {
            AfterFetch::Derive(snapshot, insight_generation) => {
                assert_eq!(insight_generation, 1);
                assert!(!snapshot.condition.is_empty());
            }
            other => panic!("expected Derive, got {:?}", other),
        }
        assert!(!app.fetching);
        assert!(app.deriving);
        assert!(app.report.is_some());
    }

    #[test]
    fn superseded_fetch_is_discarded() {
        let mut app = app();
        let old = app.begin_fetch(&LocationQuery::City("Tokyo".into()));
        let _new = app.begin_fetch(&LocationQuery::City("Paris".into()));

        match app.handle_fetch_event(ok_event(old, "Tokyo")) {
            AfterFetch::None => {}
            other => panic!("expected None, got {:?}", other),
        }
        // The stale result must not be rendered.
        assert!(app.report.is_none());
        assert!(app.fetching);
    }

    #[test]
    fn failed_fetch_falls_back_to_default_city_once() {
        let mut app = app();
        let generation = app.begin_fetch(&LocationQuery::City("Atlantis".into()));

        match app.handle_fetch_event(err_event(generation, "Atlantis")) {
            AfterFetch::Fallback(query) => assert!(query.is_city("London")),
            other => panic!("expected Fallback, got {:?}", other),
        }

        // The fallback itself failing must not loop.
        let generation = app.begin_fetch(&LocationQuery::City("London".into()));
        match app.handle_fetch_event(err_event(generation, "London")) {
            AfterFetch::None => {}
            other => panic!("expected None, got {:?}", other),
        }
    }

    #[test]
    fn failed_default_city_fetch_does_not_fall_back() {
        let mut app = app();
        let generation = app.begin_fetch(&LocationQuery::City("London".into()));
        match app.handle_fetch_event(err_event(generation, "london")) {
            AfterFetch::None => {}
            other => panic!("expected None, got {:?}", other),
        }
    }

    #[test]
    fn stale_insight_is_discarded() {
        let mut app = app();
        let generation = app.begin_fetch(&LocationQuery::City("Tokyo".into()));
        let AfterFetch::Derive(snapshot, first_insight) =
            app.handle_fetch_event(ok_event(generation, "Tokyo"))
        else {
            panic!("expected Derive");
        };

        // A second report arrives before the first derivation finishes.
        let generation = app.begin_fetch(&LocationQuery::City("Paris".into()));
        let AfterFetch::Derive(_, second_insight) =
            app.handle_fetch_event(ok_event(generation, "Paris"))
        else {
            panic!("expected Derive");
        };
        assert!(second_insight > first_insight);

        let stale = Insight {
            summary: "stale".into(),
            recommendations: vec![Recommendation::new("stale")],
        };
        app.handle_insight_event(InsightEvent {
            generation: first_insight,
            insight: stale,
        });
        assert!(app.insight.is_none());
        assert!(app.deriving);

        let fresh = crate::logic::InsightEngine::new().derive(&snapshot);
        app.handle_insight_event(InsightEvent {
            generation: second_insight,
            insight: fresh.clone(),
        });
        assert_eq!(app.insight, Some(fresh));
        assert!(!app.deriving);
    }

    #[test]
    fn search_submit_prefers_typed_query() {
        let mut search = SearchState::new();
        search.query = "  Reykjavik  ".into();
        assert_eq!(search.submit(), "Reykjavik");
        assert!(search.query.is_empty());

        search.selected_city = 2;
        assert_eq!(search.submit(), POPULAR_CITIES[2]);
    }

    #[test]
    fn auto_refresh_respects_interval() {
        let mut app = app();
        assert!(!app.should_auto_refresh());

        app.config.ui.refresh_interval_mins = 15;
        app.last_fetch_request = Some(Instant::now());
        assert!(!app.should_auto_refresh());

        app.config.ui.refresh_interval_mins = 0;
        assert!(!app.should_auto_refresh());
    }
}

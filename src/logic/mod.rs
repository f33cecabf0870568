pub mod rules;
pub mod summary;
pub mod weather_service;

pub use rules::InsightEngine;
pub use weather_service::WeatherService;

pub mod dashboard;
pub mod forecast;
pub mod insights;
pub mod search;

pub use dashboard::DashboardScreen;
pub use forecast::ForecastScreen;
pub use insights::InsightsScreen;
pub use search::SearchScreen;

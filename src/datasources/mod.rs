pub mod mock;
pub mod openweathermap;

pub use mock::MockWeatherClient;
pub use openweathermap::OpenWeatherMapClient;

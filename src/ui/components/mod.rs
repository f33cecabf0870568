pub mod stat;

pub use stat::{humidity_stat, pressure_stat, visibility_stat, wind_stat, StatCard};

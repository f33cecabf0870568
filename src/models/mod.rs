pub mod forecast;
pub mod insight;
pub mod snapshot;
pub mod weather;

pub use forecast::*;
pub use insight::*;
pub use snapshot::*;
pub use weather::*;

pub mod config;
pub mod cycle;
pub mod error;
mod light;
mod phase;

pub use config::LightConfig;
pub use error::LightError;
pub use light::TrafficLight;
pub use phase::Phase;

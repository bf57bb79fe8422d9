pub use stoplight_light::{config, cycle, LightConfig, LightError, Phase, TrafficLight};

pub use log;

pub use stoplight_utils as utils;

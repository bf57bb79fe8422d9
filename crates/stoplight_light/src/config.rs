use std::time::Duration;

use crate::error::LightError;

/// How long a phase is held before the light toggles.
///
/// Each dwell is drawn uniformly from `dwell_min..=dwell_max` with millisecond
/// granularity, independently for every cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightConfig {
  pub dwell_min: Duration,
  pub dwell_max: Duration,
}

impl LightConfig {
  pub fn set_dwell_range(mut self, min: Duration, max: Duration) -> Self {
    self.dwell_min = min;
    self.dwell_max = max;
    self
  }

  pub fn set_dwell_min(mut self, min: Duration) -> Self {
    self.dwell_min = min;
    self
  }

  pub fn set_dwell_max(mut self, max: Duration) -> Self {
    self.dwell_max = max;
    self
  }

  pub fn validate(&self) -> Result<(), LightError> {
    if self.dwell_min.as_millis() == 0 || self.dwell_min > self.dwell_max {
      return Err(LightError::InvalidDwellRange {
        min: self.dwell_min,
        max: self.dwell_max,
      });
    }

    Ok(())
  }
}

impl Default for LightConfig {
  fn default() -> Self {
    Self {
      dwell_min: Duration::from_millis(4000),
      dwell_max: Duration::from_millis(6000),
    }
  }
}

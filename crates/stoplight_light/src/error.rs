use std::time::Duration;

use stoplight_utils::thread::RecvError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LightError {
  #[error("Traffic light was already started")]
  AlreadyStarted,
  #[error("Traffic light was stopped")]
  Cancelled,
  #[error("Timed out waiting for green")]
  Timeout,
  #[error("Invalid dwell range {min:?}..={max:?}")]
  InvalidDwellRange { min: Duration, max: Duration },
  #[error("Failed to spawn the phase thread")]
  Spawn(#[source] std::io::Error),
}

impl From<RecvError> for LightError {
  fn from(err: RecvError) -> Self {
    match err {
      RecvError::Closed => LightError::Cancelled,
      RecvError::Timeout => LightError::Timeout,
    }
  }
}

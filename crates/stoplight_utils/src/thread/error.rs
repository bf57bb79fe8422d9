use std::fmt::Debug;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecvError {
  #[error("Channel is closed and has no pending value")]
  Closed,
  #[error("Timed out waiting for a value")]
  Timeout,
}

/// Returned by `send` on a closed channel. Gives the value back to the caller.
#[derive(Error, PartialEq, Eq)]
#[error("Sending on a closed channel")]
pub struct SendError<T>(pub T);

impl<T> SendError<T> {
  pub fn into_inner(self) -> T {
    self.0
  }
}

impl<T> Debug for SendError<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SendError").finish_non_exhaustive()
  }
}

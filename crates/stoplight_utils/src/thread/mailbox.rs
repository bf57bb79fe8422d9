use std::time::Duration;

use super::{
  channel::Channel,
  error::{RecvError, SendError},
};

/// Latest-value-wins blocking channel.
///
/// Holds at most one undelivered value. A `send` replaces whatever is still
/// pending, so a receiver always gets the newest value and never the history.
/// Use [`Queue`](super::Queue) when every value has to be delivered in order.
///
/// Clones share the same slot. Any number of threads may send and receive.
pub struct Mailbox<T> {
  channel: Channel<Option<T>>,
}

impl<T> Mailbox<T> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Stores `value`, dropping any undelivered one, and wakes one receiver.
  ///
  /// Never waits for a receiver. Fails only once the mailbox is closed.
  pub fn send(&self, value: T) -> Result<(), SendError<T>> {
    self.channel.send(value)
  }

  /// Blocks until a value is available and takes it.
  ///
  /// Returns [`RecvError::Closed`] if the mailbox is closed while empty.
  pub fn receive(&self) -> Result<T, RecvError> {
    self.channel.receive()
  }

  pub fn receive_timeout(&self, timeout: Duration) -> Result<T, RecvError> {
    self.channel.receive_timeout(timeout)
  }

  pub fn try_receive(&self) -> Option<T> {
    self.channel.try_receive()
  }

  /// Rejects further sends and wakes every blocked receiver.
  /// A value that is already stored can still be received.
  pub fn close(&self) {
    self.channel.close();
  }

  pub fn is_closed(&self) -> bool {
    self.channel.is_closed()
  }

  pub fn has_pending(&self) -> bool {
    self.channel.pending() > 0
  }
}

impl<T> Default for Mailbox<T> {
  fn default() -> Self {
    Self {
      channel: Channel::new(),
    }
  }
}

impl<T> Clone for Mailbox<T> {
  fn clone(&self) -> Self {
    Self {
      channel: self.channel.clone(),
    }
  }
}

use std::{collections::VecDeque, time::Duration};

use super::{
  channel::Channel,
  error::{RecvError, SendError},
};

/// Unbounded FIFO blocking channel.
///
/// Every sent value is kept until received, and values come out oldest first.
/// Unlike [`Mailbox`](super::Mailbox) nothing is ever dropped, so a slow
/// receiver sees the full history.
pub struct Queue<T> {
  channel: Channel<VecDeque<T>>,
}

impl<T> Queue<T> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn send(&self, value: T) -> Result<(), SendError<T>> {
    self.channel.send(value)
  }

  /// Blocks until a value is available and takes the oldest one.
  pub fn receive(&self) -> Result<T, RecvError> {
    self.channel.receive()
  }

  pub fn receive_timeout(&self, timeout: Duration) -> Result<T, RecvError> {
    self.channel.receive_timeout(timeout)
  }

  pub fn try_receive(&self) -> Option<T> {
    self.channel.try_receive()
  }

  pub fn close(&self) {
    self.channel.close();
  }

  pub fn is_closed(&self) -> bool {
    self.channel.is_closed()
  }

  pub fn len(&self) -> usize {
    self.channel.pending()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl<T> Default for Queue<T> {
  fn default() -> Self {
    Self {
      channel: Channel::new(),
    }
  }
}

impl<T> Clone for Queue<T> {
  fn clone(&self) -> Self {
    Self {
      channel: self.channel.clone(),
    }
  }
}

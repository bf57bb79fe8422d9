use std::{
  collections::VecDeque,
  sync::{Arc, Condvar, Mutex, MutexGuard},
  time::Duration,
};

#[cfg(feature = "debug")]
use log::trace;

use super::error::{RecvError, SendError};

const POISONED: &str = "Unrecoverable error: channel lock poisoned";

/// Storage policy behind a [`Channel`].
pub(crate) trait Buffer: Default {
  type Item;

  fn push(&mut self, value: Self::Item);
  fn pop(&mut self) -> Option<Self::Item>;
  fn pending(&self) -> usize;
}

/// Single slot, a push overwrites whatever was not yet taken.
impl<T> Buffer for Option<T> {
  type Item = T;

  fn push(&mut self, value: T) {
    *self = Some(value);
  }

  fn pop(&mut self) -> Option<T> {
    self.take()
  }

  fn pending(&self) -> usize {
    usize::from(self.is_some())
  }
}

impl<T> Buffer for VecDeque<T> {
  type Item = T;

  fn push(&mut self, value: T) {
    self.push_back(value);
  }

  fn pop(&mut self) -> Option<T> {
    self.pop_front()
  }

  fn pending(&self) -> usize {
    self.len()
  }
}

struct State<B> {
  buffer: B,
  closed: bool,
}

impl<B: Buffer> State<B> {
  fn must_wait(&self) -> bool {
    self.buffer.pending() == 0 && !self.closed
  }
}

/// Mutex + condvar core shared by `Mailbox` and `Queue`.
///
/// The buffer and the closed flag are only touched with the lock held, and
/// every wait re-checks "something pending or closed" after waking up.
pub(crate) struct Channel<B> {
  inner: Arc<(Mutex<State<B>>, Condvar)>,
}

impl<B: Buffer> Channel<B> {
  pub(crate) fn new() -> Self {
    Self {
      inner: Arc::new((
        Mutex::new(State {
          buffer: B::default(),
          closed: false,
        }),
        Condvar::new(),
      )),
    }
  }

  fn lock(&self) -> MutexGuard<'_, State<B>> {
    self.inner.0.lock().expect(POISONED)
  }

  pub(crate) fn send(&self, value: B::Item) -> Result<(), SendError<B::Item>> {
    {
      let mut state = self.lock();
      if state.closed {
        return Err(SendError(value));
      }
      state.buffer.push(value);

      #[cfg(feature = "debug")]
      trace!("Channel send, {} pending", state.buffer.pending());
    }

    self.inner.1.notify_one();
    Ok(())
  }

  pub(crate) fn receive(&self) -> Result<B::Item, RecvError> {
    let state = self.lock();
    let mut state = self
      .inner
      .1
      .wait_while(state, |state| state.must_wait())
      .expect(POISONED);

    state.buffer.pop().ok_or(RecvError::Closed)
  }

  pub(crate) fn receive_timeout(&self, timeout: Duration) -> Result<B::Item, RecvError> {
    let state = self.lock();
    let (mut state, _) = self
      .inner
      .1
      .wait_timeout_while(state, timeout, |state| state.must_wait())
      .expect(POISONED);

    match state.buffer.pop() {
      Some(value) => Ok(value),
      None if state.closed => Err(RecvError::Closed),
      None => Err(RecvError::Timeout),
    }
  }

  pub(crate) fn try_receive(&self) -> Option<B::Item> {
    self.lock().buffer.pop()
  }

  pub(crate) fn close(&self) {
    {
      let mut state = self.lock();
      if state.closed {
        return;
      }
      state.closed = true;

      #[cfg(feature = "debug")]
      trace!("Channel closed, {} pending", state.buffer.pending());
    }

    self.inner.1.notify_all();
  }

  pub(crate) fn is_closed(&self) -> bool {
    self.lock().closed
  }

  pub(crate) fn pending(&self) -> usize {
    self.lock().buffer.pending()
  }
}

impl<B> Clone for Channel<B> {
  fn clone(&self) -> Self {
    Self {
      inner: Arc::clone(&self.inner),
    }
  }
}

use std::{
  fmt::Display,
  sync::atomic::{AtomicU8, Ordering},
};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
  Red = 0,
  Green = 1,
}

impl Phase {
  /// The phase that follows `self` once its dwell time has elapsed.
  ///
  /// | current | next  |
  /// |---------|-------|
  /// | Red     | Green |
  /// | Green   | Red   |
  #[inline]
  pub const fn next(self) -> Self {
    match self {
      Phase::Red => Phase::Green,
      Phase::Green => Phase::Red,
    }
  }

  #[inline]
  pub fn is_green(self) -> bool {
    self == Phase::Green
  }

  const fn from_bits(bits: u8) -> Self {
    match bits {
      0 => Phase::Red,
      _ => Phase::Green,
    }
  }
}

impl Display for Phase {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Phase::Red => write!(f, "red"),
      Phase::Green => write!(f, "green"),
    }
  }
}

/// Phase cell written by the light's own thread and read from anywhere.
/// Reads are a snapshot only, the mailbox is the synchronized signal.
#[derive(Debug)]
pub(crate) struct AtomicPhase(AtomicU8);

impl AtomicPhase {
  pub(crate) fn new(phase: Phase) -> Self {
    Self(AtomicU8::new(phase as u8))
  }

  pub(crate) fn load(&self) -> Phase {
    Phase::from_bits(self.0.load(Ordering::Relaxed))
  }

  pub(crate) fn store(&self, phase: Phase) {
    self.0.store(phase as u8, Ordering::Relaxed);
  }
}

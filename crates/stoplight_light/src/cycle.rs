use std::time::{Duration, Instant};

use log::debug;
#[cfg(feature = "debug")]
use log::trace;
use rand::Rng;

use crate::{config::LightConfig, error::LightError, phase::Phase};

/// Draws dwell durations uniformly from the configured range.
pub struct DwellTimer<R> {
  rng: R,
  min_ms: u64,
  max_ms: u64,
}

impl<R: Rng> DwellTimer<R> {
  pub fn new(config: &LightConfig, rng: R) -> Result<Self, LightError> {
    config.validate()?;
    Ok(Self::unchecked(config, rng))
  }

  /// `config` must already satisfy [`LightConfig::validate`].
  pub(crate) fn unchecked(config: &LightConfig, rng: R) -> Self {
    Self {
      rng,
      min_ms: millis(config.dwell_min),
      max_ms: millis(config.dwell_max),
    }
  }

  pub fn draw(&mut self) -> Duration {
    let dwell = Duration::from_millis(self.rng.gen_range(self.min_ms..=self.max_ms));

    #[cfg(feature = "debug")]
    trace!("Drew dwell of {:?}", dwell);

    dwell
  }
}

fn millis(duration: Duration) -> u64 {
  u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// The toggle loop body, free of real time.
///
/// Callers feed it timestamps through [`tick`](PhaseCycle::tick), so the
/// transition logic can be driven with a synthetic clock.
pub struct PhaseCycle<R> {
  phase: Phase,
  dwell: Duration,
  started: Instant,
  timer: DwellTimer<R>,
}

impl<R: Rng> PhaseCycle<R> {
  pub fn new(phase: Phase, mut timer: DwellTimer<R>, now: Instant) -> Self {
    let dwell = timer.draw();

    Self {
      phase,
      dwell,
      started: now,
      timer,
    }
  }

  /// Advances the cycle to `now`.
  ///
  /// Once the current dwell has elapsed (inclusive), switches to the next
  /// phase, draws a fresh dwell, restarts the timer at `now` and returns the
  /// new phase.
  pub fn tick(&mut self, now: Instant) -> Option<Phase> {
    let elapsed = now.saturating_duration_since(self.started);
    if elapsed < self.dwell {
      return None;
    }

    let previous = self.phase;
    self.phase = previous.next();
    self.dwell = self.timer.draw();
    self.started = now;

    debug!(
      "Phase {} -> {} after {:?}, next dwell {:?}",
      previous, self.phase, elapsed, self.dwell
    );

    Some(self.phase)
  }

  pub fn phase(&self) -> Phase {
    self.phase
  }

  pub fn dwell(&self) -> Duration {
    self.dwell
  }

  pub fn started(&self) -> Instant {
    self.started
  }
}

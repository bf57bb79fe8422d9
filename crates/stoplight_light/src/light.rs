use std::{
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
  },
  thread::{self, JoinHandle},
  time::{Duration, Instant},
};

use log::{error, info, warn};
#[cfg(feature = "debug")]
use log::trace;
use rand::{rngs::StdRng, Rng, SeedableRng};
use stoplight_utils::thread::Mailbox;

use crate::{
  config::LightConfig,
  cycle::{DwellTimer, PhaseCycle},
  error::LightError,
  phase::{AtomicPhase, Phase},
};

const POLL_INTERVAL: Duration = Duration::from_millis(1);
const POISONED: &str = "Unrecoverable error: traffic light lock poisoned";

/// A two-phase traffic light toggling between red and green on its own thread.
///
/// Every toggle is published on a [`Mailbox`], so consumers only ever see the
/// latest phase. [`wait_for_green`](TrafficLight::wait_for_green) filters that
/// mailbox for [`Phase::Green`].
///
/// The light owns its thread: [`stop`](TrafficLight::stop) (or dropping the
/// light) cancels the loop, releases blocked waiters and joins the thread.
pub struct TrafficLight<R = StdRng> {
  phase: Arc<AtomicPhase>,
  channel: Mailbox<Phase>,
  cancel: Arc<AtomicBool>,
  timer: Mutex<Option<DwellTimer<R>>>,
  handle: Mutex<Option<JoinHandle<()>>>,
}

impl TrafficLight {
  pub fn new() -> Self {
    Self::build(DwellTimer::unchecked(&LightConfig::default(), StdRng::from_entropy()))
  }

  /// Creates a red light with its own entropy-seeded random source.
  pub fn with_config(config: LightConfig) -> Result<Self, LightError> {
    Self::with_rng(config, StdRng::from_entropy())
  }
}

impl Default for TrafficLight {
  fn default() -> Self {
    Self::new()
  }
}

impl<R: Rng + Send + 'static> TrafficLight<R> {
  pub fn with_rng(config: LightConfig, rng: R) -> Result<Self, LightError> {
    Ok(Self::build(DwellTimer::new(&config, rng)?))
  }

  fn build(timer: DwellTimer<R>) -> Self {
    Self {
      phase: Arc::new(AtomicPhase::new(Phase::Red)),
      channel: Mailbox::new(),
      cancel: Arc::new(AtomicBool::new(false)),
      timer: Mutex::new(Some(timer)),
      handle: Mutex::new(None),
    }
  }

  /// Spawns the phase thread. A light can only be started once.
  pub fn start(&self) -> Result<(), LightError> {
    if self.cancel.load(Ordering::Acquire) {
      return Err(LightError::Cancelled);
    }

    let Some(timer) = self.timer.lock().expect(POISONED).take() else {
      warn!("Traffic light was already started");
      return Err(LightError::AlreadyStarted);
    };

    let phase = Arc::clone(&self.phase);
    let channel = self.channel.clone();
    let cancel = Arc::clone(&self.cancel);

    let handle = thread::Builder::new()
      .name("traffic-light".into())
      .spawn(move || run(timer, &phase, &channel, &cancel))
      .map_err(LightError::Spawn)?;

    *self.handle.lock().expect(POISONED) = Some(handle);
    info!("Traffic light started");

    Ok(())
  }
}

impl<R> TrafficLight<R> {
  /// Last phase written by the phase thread.
  ///
  /// Not synchronized with the mailbox, the value may be about to change.
  pub fn current_phase(&self) -> Phase {
    self.phase.load()
  }

  /// Blocks until the light publishes [`Phase::Green`].
  ///
  /// Each toggle wakes the caller once. Returns [`LightError::Cancelled`] if
  /// the light is stopped while waiting.
  pub fn wait_for_green(&self) -> Result<(), LightError> {
    loop {
      if self.channel.receive()?.is_green() {
        return Ok(());
      }
    }
  }

  pub fn wait_for_green_timeout(&self, timeout: Duration) -> Result<(), LightError> {
    let Some(deadline) = Instant::now().checked_add(timeout) else {
      return self.wait_for_green();
    };

    loop {
      let remaining = deadline.saturating_duration_since(Instant::now());
      match self.channel.receive_timeout(remaining) {
        Ok(phase) if phase.is_green() => return Ok(()),
        Ok(_) => {}
        Err(err) => return Err(err.into()),
      }
    }
  }

  /// A handle on the phase mailbox.
  ///
  /// Receivers on the handle compete with `wait_for_green` callers for the
  /// same published phases.
  pub fn subscribe(&self) -> Mailbox<Phase> {
    self.channel.clone()
  }

  pub fn is_running(&self) -> bool {
    !self.cancel.load(Ordering::Acquire) && self.handle.lock().expect(POISONED).is_some()
  }

  /// Cancels the phase thread, wakes every waiter and joins the thread.
  pub fn stop(&self) {
    self.cancel.store(true, Ordering::Release);
    self.channel.close();

    let handle = self.handle.lock().expect(POISONED).take();
    if let Some(handle) = handle {
      if handle.join().is_err() {
        error!("Traffic light thread panicked");
      }
      info!("Traffic light stopped");
    }
  }
}

impl<R> Drop for TrafficLight<R> {
  fn drop(&mut self) {
    self.stop();
  }
}

fn run<R: Rng>(
  timer: DwellTimer<R>,
  phase: &AtomicPhase,
  channel: &Mailbox<Phase>,
  cancel: &AtomicBool,
) {
  let mut cycle = PhaseCycle::new(phase.load(), timer, Instant::now());

  while !cancel.load(Ordering::Acquire) {
    thread::sleep(POLL_INTERVAL);

    if let Some(next) = cycle.tick(Instant::now()) {
      phase.store(next);
      if channel.send(next).is_err() {
        break;
      }
    }
  }

  #[cfg(feature = "debug")]
  trace!("Phase loop exited in {}", cycle.phase());
}

#[cfg(test)]
mod test {
  use std::{
    sync::Arc,
    thread,
    time::{Duration, Instant},
  };

  use rand::{rngs::StdRng, SeedableRng};

  use super::TrafficLight;
  use crate::{config::LightConfig, error::LightError, phase::Phase};

  fn fast() -> LightConfig {
    LightConfig::default().set_dwell_range(Duration::from_millis(10), Duration::from_millis(20))
  }

  #[test]
  fn starts_red() {
    let light = TrafficLight::new();

    assert_eq!(light.current_phase(), Phase::Red);
    assert!(!light.is_running());
  }

  #[test]
  fn rejects_invalid_config() {
    let config =
      LightConfig::default().set_dwell_range(Duration::from_secs(2), Duration::from_secs(1));

    assert!(matches!(
      TrafficLight::with_config(config),
      Err(LightError::InvalidDwellRange { .. })
    ));
  }

  #[test]
  fn double_start() {
    let light = TrafficLight::with_rng(fast(), StdRng::seed_from_u64(0)).unwrap();

    light.start().unwrap();
    assert!(light.is_running());
    assert!(matches!(light.start(), Err(LightError::AlreadyStarted)));
  }

  #[test]
  fn start_after_stop() {
    let light = TrafficLight::with_config(fast()).unwrap();
    light.stop();

    assert!(matches!(light.start(), Err(LightError::Cancelled)));
  }

  #[test]
  fn stop_is_idempotent() {
    let light = TrafficLight::with_config(fast()).unwrap();
    light.start().unwrap();

    light.stop();
    light.stop();
    assert!(!light.is_running());
  }

  #[test]
  fn wait_for_green_without_start_times_out() {
    let light = TrafficLight::new();

    assert!(matches!(
      light.wait_for_green_timeout(Duration::from_millis(20)),
      Err(LightError::Timeout)
    ));
  }

  #[test]
  fn wait_for_green_skips_red() {
    let light = TrafficLight::new();
    let mailbox = light.subscribe();

    mailbox.send(Phase::Red).unwrap();
    assert!(matches!(
      light.wait_for_green_timeout(Duration::from_millis(20)),
      Err(LightError::Timeout)
    ));

    mailbox.send(Phase::Green).unwrap();
    assert!(light.wait_for_green_timeout(Duration::from_millis(20)).is_ok());
  }

  #[test]
  fn wait_for_green_unbounded_timeout() {
    let light = TrafficLight::new();
    light.subscribe().send(Phase::Green).unwrap();

    assert!(light.wait_for_green_timeout(Duration::MAX).is_ok());
  }

  #[test]
  fn wait_for_green_unbounded_timeout_cancelled() {
    let light = TrafficLight::new();
    light.stop();

    assert!(matches!(
      light.wait_for_green_timeout(Duration::MAX),
      Err(LightError::Cancelled)
    ));
  }

  #[test]
  fn wait_for_green_blocks_through_red() {
    let light = Arc::new(TrafficLight::new());
    let mailbox = light.subscribe();
    let delay = Duration::from_millis(50);

    let start = Instant::now();
    let sender = thread::spawn(move || {
      mailbox.send(Phase::Red).unwrap();
      thread::sleep(delay);
      mailbox.send(Phase::Green).unwrap();
    });

    light.wait_for_green().unwrap();
    assert!(start.elapsed() >= delay);
    assert!(light.subscribe().try_receive().is_none());

    sender.join().unwrap();
  }

  #[test]
  fn wait_for_green_fast_light() {
    let light = TrafficLight::with_config(fast()).unwrap();
    light.start().unwrap();

    light.wait_for_green_timeout(Duration::from_secs(2)).unwrap();
  }
}

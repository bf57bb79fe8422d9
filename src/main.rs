use std::{sync::Arc, thread};

use anyhow::{anyhow, Result};
use stoplight::{log::info, TrafficLight};

const VEHICLES: usize = 3;

fn main() -> Result<()> {
  #[cfg(feature = "debug")]
  env_logger::init();

  let light = Arc::new(TrafficLight::new());
  light.start()?;
  info!("Light is {}", light.current_phase());

  let vehicles: Vec<_> = (0..VEHICLES)
    .map(|id| {
      let light = Arc::clone(&light);
      thread::spawn(move || -> Result<()> {
        info!("Vehicle {} waiting at the light", id);
        light.wait_for_green()?;
        info!("Vehicle {} crossed on {}", id, light.current_phase());
        Ok(())
      })
    })
    .collect();

  for vehicle in vehicles {
    vehicle
      .join()
      .map_err(|_| anyhow!("Vehicle thread panicked"))??;
  }

  light.stop();
  println!("All {} vehicles crossed", VEHICLES);

  Ok(())
}

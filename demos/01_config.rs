//! Configuration example: a 4x4 keypad plus two GPIs.
#![allow(unused)]
use adp5587::{Adp5587, Config, IntStatus, Pin, PinSet, DEFAULT_ADDRESS};
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

#[allow(dead_code)]
async fn main_async<I2C, E>(i2c: I2C) -> Result<(), adp5587::Error<E>>
where
  I2C: I2c<SevenBitAddress, Error = E>,
{
  let gpis = PinSet::from_pins(&[Pin::C8, Pin::C9]);
  let config = Config::keypad_matrix(4, 4)
    .with_interrupts(IntStatus::KE_INT | IntStatus::OVR_FLOW_INT)
    .with_gpi_events(gpis)
    .with_auto_increment(true);

  let mut dev = Adp5587::new(i2c, DEFAULT_ADDRESS, config);
  dev.initialize().await?;

  let id = dev.device_id().await?;
  let _ = id.revision;

  // Keypad lock can be toggled at runtime.
  dev.set_keypad_lock(true).await?;
  Ok(())
}

fn main() {}

//! Event servicing example: keys, GPIs, lock and overflow.
#![allow(unused)]
use adp5587::{Adp5587, Config, Identity, DEFAULT_ADDRESS};
use embedded_hal_async::{
  digital::Wait,
  i2c::{I2c, SevenBitAddress},
};

#[allow(dead_code)]
async fn main_async<I2C, INT, E>(i2c: I2C, mut int: INT) -> Result<(), adp5587::Error<E>>
where
  I2C: I2c<SevenBitAddress, Error = E>,
  INT: Wait,
{
  let mut dev = Adp5587::new(i2c, DEFAULT_ADDRESS, Config::keypad_matrix(4, 4));
  dev.initialize().await?;

  loop {
    let report = dev.wait_and_service(&mut int).await?;
    for raw in report.rejected.iter() {
      let _ = raw;
      // unknown code, already dropped
    }

    for event in dev.drain_events() {
      match event.identity {
        Identity::Key(key) => {
          let _ = (key, event.is_pressed());
          // handle key
        }
        Identity::Gpi(pin) => {
          let _ = (pin, event.transition);
          // handle GPI
        }
        Identity::Init => {}
      }
    }

    if let Some(lock) = dev.take_lock_change() {
      let _ = lock.is_locked();
    }
    let _ = dev.take_gpi_interrupts();
    if dev.pending_overflow() {
      dev.acknowledge_overflow();
    }
  }
}

fn main() {}

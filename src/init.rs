use embedded_hal_async::i2c::{I2c, SevenBitAddress};
use log::{debug, info, warn};

use crate::{Adp5587, Error, IntStatus, LockState, PinSet, Reg, FIFO_DEPTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitState {
  VerifyDevice,
  WriteConfig,
  FlushFifo,
  ClearInterrupts,
}

impl<I, E> Adp5587<I>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  /// Verify the device, stage the [`Config`](crate::Config) and start from an
  /// empty FIFO with no pending interrupts.
  pub async fn initialize(&mut self) -> Result<(), Error<E>> {
    let mut state = InitState::VerifyDevice;

    loop {
      debug!("ADP5587: init {:?}", state);

      match state {
        InitState::VerifyDevice => {
          let id = self.device_id().await?;
          if id.is_adp5587() {
            state = InitState::WriteConfig;
          } else {
            return Err(Error::InvalidDeviceId((id.manufacturer << 4) | id.revision));
          }
        }

        InitState::WriteConfig => {
          let config = self.config;
          self.write_config(&config).await?;
          state = InitState::FlushFifo;
        }

        InitState::FlushFifo => {
          let stat = self.lock_status().await?;
          let count = match stat.valid_event_count() {
            Some(count) => count,
            None => {
              warn!("ADP5587: corrupted event count {}, flushing every slot", stat.event_count());
              FIFO_DEPTH
            }
          };
          let mut stale = [0u8; FIFO_DEPTH];
          self.read_fifo(&mut stale[..count]).await?;
          if count > 0 {
            debug!("ADP5587: discarded {} stale events", count);
          }
          state = InitState::ClearInterrupts;
        }

        InitState::ClearInterrupts => {
          let status = IntStatus::from_bits(self.read_register(Reg::IntStat).await?);
          if !status.is_empty() {
            warn!("ADP5587: clearing stale interrupts {:?}", status);
            self.write_register(Reg::IntStat, status.into_bits()).await?;
          }

          self.fifo.clear();
          self.lock_state = LockState::Unlocked;
          self.lock_changed = false;
          self.overflow = false;
          self.gpi_pending = PinSet::empty();

          info!("ADP5587: initialized at {:#04x}", self.address);
          return Ok(());
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use embassy_futures::block_on;

  use crate::mock::RegisterFile;
  use crate::{Adp5587, Config, Error, Reg, DEFAULT_ADDRESS};

  #[test]
  fn rejects_foreign_device() {
    let mut dev = Adp5587::new(RegisterFile::new().with(Reg::DevId, 0x31), DEFAULT_ADDRESS, Config::default());
    let res = block_on(dev.initialize());
    assert!(matches!(res, Err(Error::InvalidDeviceId(0x31))));
    assert!(dev.release().writes().is_empty());
  }

  #[test]
  fn writes_config_and_clears_stale_interrupts() {
    let bus = RegisterFile::new().with(Reg::DevId, 0x01).with(Reg::IntStat, 0b1010);
    let config = Config::keypad_matrix(4, 4);
    let mut dev = Adp5587::new(bus, DEFAULT_ADDRESS, config);
    block_on(dev.initialize()).unwrap();

    assert_eq!(dev.config_flags(), config.flags);
    assert_eq!(dev.pending_events(), 0);

    let bus = dev.release();
    assert_eq!(bus.get(Reg::Cfg), config.flags.into_bits());
    assert_eq!(bus.get(Reg::KpGpio1), 0x0F);
    assert_eq!(bus.writes().last(), Some(&(0x02, 0b1010)));
    assert_eq!(bus.get(Reg::IntStat), 0);
  }

  #[test]
  fn flush_reads_each_queued_slot_once() {
    let bus = RegisterFile::new().with_events(&[0x01, 0x02, 0x03]);
    let mut dev = Adp5587::new(bus, DEFAULT_ADDRESS, Config::default());
    block_on(dev.initialize()).unwrap();
    assert_eq!(dev.pending_events(), 0);

    // DEV_ID, KEY_LCK_EC_STAT, three slots, INT_STAT.
    assert_eq!(dev.release().reads(), 1 + 1 + 3 + 1);
  }

  #[test]
  fn flush_uses_one_burst_with_auto_increment() {
    let bus = RegisterFile::new().with_events(&[0x01, 0x02, 0x03, 0x04]);
    let config = Config::default().with_auto_increment(true);
    let mut dev = Adp5587::new(bus, DEFAULT_ADDRESS, config);
    block_on(dev.initialize()).unwrap();

    // DEV_ID, KEY_LCK_EC_STAT, one burst, INT_STAT.
    assert_eq!(dev.release().reads(), 4);
  }

  #[test]
  fn corrupt_count_flushes_the_whole_window() {
    let bus = RegisterFile::new().with(Reg::KeyLckEcStat, 0x0F);
    let mut dev = Adp5587::new(bus, DEFAULT_ADDRESS, Config::default());
    block_on(dev.initialize()).unwrap();
    assert_eq!(dev.release().reads(), 1 + 1 + 10 + 1);
  }

  #[test]
  fn no_interrupt_write_when_nothing_pending() {
    let mut dev = Adp5587::new(RegisterFile::new(), DEFAULT_ADDRESS, Config::default());
    block_on(dev.initialize()).unwrap();
    let bus = dev.release();
    assert_eq!(bus.writes_to(Reg::IntStat).count(), 0);
  }
}

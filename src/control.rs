use embedded_hal_async::i2c::{I2c, SevenBitAddress};
use log::debug;

use crate::{Adp5587, ConfigFlags, DeviceId, Error, IntStatus, KeyLockEventCount, Reg};

impl<I, E> Adp5587<I>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  /// Read the manufacturer and revision reported in `DEV_ID`.
  pub async fn device_id(&mut self) -> Result<DeviceId, Error<E>> {
    let id = DeviceId::from_bits(self.read_register(Reg::DevId).await?);
    debug!("ADP5587: manufacturer {:#x}, revision {:#x}", id.manufacturer, id.revision);
    Ok(id)
  }

  /// Read `CFG` and refresh the cached copy.
  pub async fn read_config_flags(&mut self) -> Result<ConfigFlags, Error<E>> {
    self.flags = ConfigFlags::from_bits(self.read_register(Reg::Cfg).await?);
    Ok(self.flags)
  }

  /// Read-modify-write `CFG`.
  pub async fn modify_config<F: FnOnce(&mut ConfigFlags)>(&mut self, f: F) -> Result<(), Error<E>> {
    let mut flags = self.read_config_flags().await?;

    f(&mut flags);

    self.write_register(Reg::Cfg, flags.into_bits()).await?;
    self.flags = flags;
    Ok(())
  }

  /// Toggle `AUTO_INC`, which enables burst reads of the FIFO.
  pub async fn set_auto_increment(&mut self, enabled: bool) -> Result<(), Error<E>> {
    self.modify_config(|x| x.set_auto_inc(enabled)).await
  }

  pub async fn set_overflow_mode(&mut self, enabled: bool) -> Result<(), Error<E>> {
    self.modify_config(|x| x.set_ovr_flow_m(enabled)).await
  }

  /// Enable exactly the interrupt causes in `causes`, disabling the rest.
  pub async fn set_interrupts(&mut self, causes: IntStatus) -> Result<(), Error<E>> {
    self.modify_config(|x| *x = x.with_interrupts(causes)).await
  }

  /// Read `KEY_LCK_EC_STAT` and refresh the latched lock state.
  pub async fn lock_status(&mut self) -> Result<KeyLockEventCount, Error<E>> {
    let stat = KeyLockEventCount::from_bits(self.read_register(Reg::KeyLckEcStat).await?);
    self.lock_state = stat.lock_state();
    Ok(stat)
  }

  /// Enable or disable the keypad lock feature (`K_LCK_EN`).
  pub async fn set_keypad_lock(&mut self, enabled: bool) -> Result<(), Error<E>> {
    let mut stat = self.lock_status().await?;
    stat.set_k_lck_en(enabled);
    self.write_register(Reg::KeyLckEcStat, stat.into_bits()).await
  }
}

#[cfg(test)]
mod tests {
  use embassy_futures::block_on;

  use crate::mock::RegisterFile;
  use crate::{Adp5587, Config, Error, IntStatus, LockState, Reg, DEFAULT_ADDRESS};

  fn driver(bus: RegisterFile) -> Adp5587<RegisterFile> {
    Adp5587::new(bus, DEFAULT_ADDRESS, Config::default())
  }

  #[test]
  fn device_id_splits_nibbles() {
    let mut dev = driver(RegisterFile::new().with(Reg::DevId, 0x02));
    let id = block_on(dev.device_id()).unwrap();
    assert_eq!((id.manufacturer, id.revision), (0, 2));
    assert!(id.is_adp5587());
  }

  #[test]
  fn modify_config_preserves_other_bits() {
    let mut dev = driver(RegisterFile::new().with(Reg::Cfg, 0b0001_1001));
    block_on(dev.set_auto_increment(true)).unwrap();
    assert_eq!(dev.config_flags().into_bits(), 0b1001_1001);

    block_on(dev.set_overflow_mode(true)).unwrap();
    assert!(dev.config_flags().ovr_flow_m());

    let bus = dev.release();
    assert_eq!(bus.writes(), &[(0x01, 0b1001_1001), (0x01, 0b1011_1001)]);
  }

  #[test]
  fn set_interrupts_rewrites_only_enables() {
    let mut dev = driver(RegisterFile::new().with(Reg::Cfg, 0b1001_1001));
    block_on(dev.set_interrupts(IntStatus::GPI_INT)).unwrap();
    assert_eq!(dev.release().get(Reg::Cfg), 0b1001_0010);
  }

  #[test]
  fn keypad_lock_toggles_enable_bit() {
    let mut dev = driver(RegisterFile::new().with(Reg::KeyLckEcStat, 0b0011_0010));
    block_on(dev.set_keypad_lock(true)).unwrap();
    assert_eq!(dev.pending_lock_state(), LockState::Locked);

    let bus = dev.release();
    assert_eq!(bus.writes(), &[(0x03, 0b0111_0010)]);
  }

  #[test]
  fn failed_cfg_read_leaves_cache_untouched() {
    let mut dev = driver(RegisterFile::new().failing_read(Reg::Cfg));
    let res = block_on(dev.set_auto_increment(true));
    assert!(matches!(res, Err(Error::I2c(_))));
    assert!(!dev.config_flags().auto_inc());
    assert!(dev.release().writes().is_empty());
  }
}

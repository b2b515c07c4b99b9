use embedded_hal_async::i2c::{I2c, SevenBitAddress};
use log::trace;

use crate::{Adp5587, Error, PinGroup, PinSet, Reg};

impl<I, E> Adp5587<I>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  /// Read a single register.
  pub async fn read_register(&mut self, reg: Reg) -> Result<u8, Error<E>> {
    let mut buf = [0u8; 1];
    self.i2c.write_read(self.address, &[reg.addr()], &mut buf).await.map_err(Error::I2c)?;
    trace!("ADP5587: read {:?} ({:#04x}) = {:#010b}", reg, reg.addr(), buf[0]);
    Ok(buf[0])
  }

  /// Read `buf.len()` consecutive registers starting at `start` in one transaction.
  ///
  /// Only valid while `AUTO_INC` is enabled; without it the device would
  /// return `start` over and over. Every address touched must be a documented
  /// register, so a burst never crosses a gap in the map.
  pub async fn read_burst(&mut self, start: Reg, buf: &mut [u8]) -> Result<(), Error<E>> {
    if !self.flags.auto_inc() {
      return Err(Error::BurstWithoutAutoIncrement);
    }
    if buf.is_empty() {
      return Ok(());
    }
    let in_block = (0..buf.len()).all(|offset| {
      u8::try_from(offset)
        .ok()
        .and_then(|offset| start.addr().checked_add(offset))
        .is_some_and(|addr| Reg::try_from(addr).is_ok())
    });
    if !in_block {
      return Err(Error::BurstOutOfRange);
    }
    self.i2c.write_read(self.address, &[start.addr()], buf).await.map_err(Error::I2c)?;
    trace!("ADP5587: burst read {} bytes from {:?}", buf.len(), start);
    Ok(())
  }

  /// Write a single register. The device does not support burst writes.
  pub async fn write_register(&mut self, reg: Reg, value: u8) -> Result<(), Error<E>> {
    trace!("ADP5587: write {:?} ({:#04x}) = {:#010b}", reg, reg.addr(), value);
    self.i2c.write(self.address, &[reg.addr(), value]).await.map_err(Error::I2c)
  }

  /// Read the three banks of a pin group.
  pub async fn read_pins(&mut self, group: PinGroup) -> Result<PinSet, Error<E>> {
    let mut bytes = [0u8; 3];
    for (byte, reg) in bytes.iter_mut().zip(group.registers()) {
      *byte = self.read_register(reg).await?;
    }
    Ok(PinSet::from_bytes(bytes))
  }

  /// Write the three banks of a pin group, one register at a time.
  pub async fn write_pins(&mut self, group: PinGroup, pins: PinSet) -> Result<(), Error<E>> {
    if !group.is_writable() {
      return Err(Error::ReadOnlyGroup(group));
    }
    for (byte, reg) in pins.to_bytes().into_iter().zip(group.registers()) {
      self.write_register(reg, byte).await?;
    }
    Ok(())
  }
}

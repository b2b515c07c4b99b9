//! In-memory register file standing in for the ADP5587 on the I²C bus.

use embedded_hal_async::i2c::{ErrorKind, ErrorType, I2c, Operation, SevenBitAddress};
use heapless::Vec;

use crate::{Reg, DEFAULT_ADDRESS};

const REGISTERS: usize = 0x35;

pub(crate) struct RegisterFile {
  regs: [u8; REGISTERS],
  writes: Vec<(u8, u8), 64>,
  reads: usize,
  fail_read: Option<u8>,
  fail_write: Option<u8>,
}

impl RegisterFile {
  pub(crate) fn new() -> Self {
    Self { regs: [0; REGISTERS], writes: Vec::new(), reads: 0, fail_read: None, fail_write: None }
  }

  pub(crate) fn with(mut self, reg: Reg, value: u8) -> Self {
    self.regs[reg.addr() as usize] = value;
    self
  }

  /// Fill the FIFO slots from `KEY_EVENTA` and set the event count to match.
  pub(crate) fn with_events(mut self, events: &[u8]) -> Self {
    for (i, byte) in events.iter().enumerate() {
      self.regs[Reg::KeyEventA.addr() as usize + i] = *byte;
    }
    let lock_bits = self.regs[Reg::KeyLckEcStat.addr() as usize] & 0xF0;
    self.regs[Reg::KeyLckEcStat.addr() as usize] = lock_bits | events.len() as u8;
    self
  }

  /// Every read touching `reg` fails.
  pub(crate) fn failing_read(mut self, reg: Reg) -> Self {
    self.fail_read = Some(reg.addr());
    self
  }

  /// Every write to `reg` fails.
  pub(crate) fn failing_write(mut self, reg: Reg) -> Self {
    self.fail_write = Some(reg.addr());
    self
  }

  pub(crate) fn get(&self, reg: Reg) -> u8 {
    self.regs[reg.addr() as usize]
  }

  /// Captured `(address, value)` writes in bus order.
  pub(crate) fn writes(&self) -> &[(u8, u8)] {
    &self.writes
  }

  pub(crate) fn writes_to(&self, reg: Reg) -> impl Iterator<Item = u8> + '_ {
    self.writes.iter().filter(move |(addr, _)| *addr == reg.addr()).map(|(_, value)| *value)
  }

  /// Number of read operations served.
  pub(crate) fn reads(&self) -> usize {
    self.reads
  }

  fn auto_increment(&self) -> bool {
    self.regs[Reg::Cfg.addr() as usize] & 0x80 != 0
  }

  fn store(&mut self, addr: u8, value: u8) -> Result<(), ErrorKind> {
    if self.fail_write == Some(addr) {
      return Err(ErrorKind::Other);
    }
    self.writes.push((addr, value)).map_err(|_| ErrorKind::Overrun)?;
    let slot = self.regs.get_mut(addr as usize).ok_or(ErrorKind::Other)?;
    if addr == Reg::IntStat.addr() {
      *slot &= !value;
    } else {
      *slot = value;
    }
    Ok(())
  }
}

impl ErrorType for RegisterFile {
  type Error = ErrorKind;
}

impl I2c<SevenBitAddress> for RegisterFile {
  async fn transaction(&mut self, address: SevenBitAddress, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
    if address != DEFAULT_ADDRESS {
      return Err(ErrorKind::NoAcknowledge(embedded_hal_async::i2c::NoAcknowledgeSource::Address));
    }

    let mut pointer = 0u8;
    for op in operations {
      match op {
        Operation::Write(bytes) => {
          let (addr, values) = bytes.split_first().ok_or(ErrorKind::Other)?;
          pointer = *addr;
          if values.len() > 1 {
            // Burst writes are not supported by the device.
            return Err(ErrorKind::Other);
          }
          if let Some(value) = values.first() {
            self.store(pointer, *value)?;
          }
        }
        Operation::Read(buf) => {
          self.reads += 1;
          let step = if self.auto_increment() { 1 } else { 0 };
          for byte in buf.iter_mut() {
            if self.fail_read == Some(pointer) {
              return Err(ErrorKind::Other);
            }
            *byte = *self.regs.get(pointer as usize).ok_or(ErrorKind::Other)?;
            pointer = pointer.wrapping_add(step);
          }
        }
      }
    }
    Ok(())
  }
}

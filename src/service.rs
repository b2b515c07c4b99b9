//! Interrupt servicing: the `Idle → Servicing → Idle` pass that turns an INT
//! assertion into decoded events and latched conditions.
//!
//! Each asserted cause in `INT_STAT` is handled on its own and cleared with a
//! write carrying only that cause's bit. A cause whose handling fails stays
//! asserted in hardware, keeps the INT line active and is retried on the next
//! pass; the other causes of the same pass are unaffected.

use embedded_hal_async::digital::Wait;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};
use heapless::Vec;
use log::{debug, trace, warn};

use crate::defs::KeyLockEventCount;
use crate::event::{decode, DecodeError, Identity, KeyEvent};
use crate::reg::FIFO_DEPTH;
use crate::{Adp5587, Error, IntStatus, LockState, PinGroup, PinSet, Reg};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecoderState {
  Idle,
  Servicing,
}

/// Outcome of one servicing pass.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServiceReport<E> {
  /// Causes asserted when the pass started.
  pub status: IntStatus,
  /// Causes cleared by this pass.
  pub cleared: IntStatus,
  /// Events appended to the mirror.
  pub events: usize,
  /// FIFO bytes dropped because they decoded to no known code.
  pub rejected: Vec<u8, FIFO_DEPTH>,
  pub key_event_error: Option<Error<E>>,
  pub gpi_error: Option<Error<E>>,
  pub lock_error: Option<Error<E>>,
  pub overflow_error: Option<Error<E>>,
}

impl<E> ServiceReport<E> {
  fn new(status: IntStatus) -> Self {
    Self {
      status,
      cleared: IntStatus::NONE,
      events: 0,
      rejected: Vec::new(),
      key_event_error: None,
      gpi_error: None,
      lock_error: None,
      overflow_error: None,
    }
  }

  /// `INT_STAT` had no cause asserted.
  pub fn is_spurious(&self) -> bool {
    self.status.is_empty()
  }

  /// Causes that were asserted but are still set in hardware.
  pub fn pending(&self) -> IntStatus {
    self.status & !self.cleared
  }

  /// Every cause was handled and cleared, and no byte was dropped.
  pub fn is_clean(&self) -> bool {
    self.pending().is_empty() && self.rejected.is_empty()
  }

  /// Per-cause failures, in servicing order.
  pub fn errors(&self) -> impl Iterator<Item = &Error<E>> + '_ {
    [&self.key_event_error, &self.gpi_error, &self.lock_error, &self.overflow_error].into_iter().flatten()
  }

  /// The dropped bytes as decode errors.
  pub fn decode_errors(&self) -> impl Iterator<Item = DecodeError> + '_ {
    self.rejected.iter().map(|raw| DecodeError::UnknownCode(*raw))
  }
}

impl<I, E> Adp5587<I>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  /// Run one servicing pass. Call once per INT assertion.
  ///
  /// Only a failed `INT_STAT` read aborts the whole pass; every other failure
  /// is recorded per cause in the returned report.
  pub async fn service_interrupt(&mut self) -> Result<ServiceReport<E>, Error<E>> {
    if self.state == DecoderState::Servicing {
      warn!("ADP5587: previous servicing pass did not complete");
    }
    self.state = DecoderState::Servicing;
    let result = self.service_causes().await;
    self.state = DecoderState::Idle;
    result
  }

  /// Await the (active-low) INT line, then run one servicing pass.
  pub async fn wait_and_service<P: Wait>(&mut self, int: &mut P) -> Result<ServiceReport<E>, Error<E>> {
    int.wait_for_low().await.map_err(|_| Error::Interrupt)?;
    self.service_interrupt().await
  }

  async fn service_causes(&mut self) -> Result<ServiceReport<E>, Error<E>> {
    let status = IntStatus::from_bits(self.read_register(Reg::IntStat).await?);
    let mut report = ServiceReport::new(status);

    if status.is_empty() {
      warn!("ADP5587: spurious interrupt, INT_STAT is clear");
      return Ok(report);
    }
    debug!("ADP5587: servicing {:?}", status);

    // KEY_LCK_EC_STAT as read during this pass, shared by the key event and
    // key lock causes.
    let mut lock_ec: Option<KeyLockEventCount> = None;

    if status.ke_int() {
      match self.handle_key_events(&mut report, &mut lock_ec).await {
        Ok(()) => self.clear(IntStatus::KE_INT, &mut report.cleared, &mut report.key_event_error).await,
        Err(e) => report.key_event_error = Some(e),
      }
    }

    if status.gpi_int() {
      match self.handle_gpi().await {
        Ok(()) => self.clear(IntStatus::GPI_INT, &mut report.cleared, &mut report.gpi_error).await,
        Err(e) => report.gpi_error = Some(e),
      }
    }

    if status.k_lck_int() {
      match self.handle_lock(lock_ec).await {
        Ok(()) => self.clear(IntStatus::K_LCK_INT, &mut report.cleared, &mut report.lock_error).await,
        Err(e) => report.lock_error = Some(e),
      }
    }

    if status.ovr_flow_int() {
      warn!("ADP5587: key event FIFO overflowed, events were lost");
      self.overflow = true;
      self.clear(IntStatus::OVR_FLOW_INT, &mut report.cleared, &mut report.overflow_error).await;
    }

    debug!(
      "ADP5587: pass done, cleared {:?}, {} events, {} rejected",
      report.cleared,
      report.events,
      report.rejected.len()
    );
    Ok(report)
  }

  async fn handle_key_events(
    &mut self,
    report: &mut ServiceReport<E>,
    lock_ec: &mut Option<KeyLockEventCount>,
  ) -> Result<(), Error<E>> {
    let stat = self.read_lock_event_count().await?;
    *lock_ec = Some(stat);

    let count = match stat.valid_event_count() {
      Some(count) => count,
      None => {
        warn!("ADP5587: corrupted event count {}", stat.event_count());
        return Err(DecodeError::CorruptEventCount(stat.event_count()).into());
      }
    };

    let mut raw = [0u8; FIFO_DEPTH];
    self.read_fifo(&mut raw[..count]).await?;

    for byte in &raw[..count] {
      match decode(*byte) {
        Ok((Identity::Init, _)) => trace!("ADP5587: empty FIFO slot"),
        Ok((identity, transition)) => {
          let event = KeyEvent::new(identity, transition);
          trace!("ADP5587: {:?}", event);
          self.fifo.push(event);
          report.events += 1;
        }
        Err(e) => {
          warn!("ADP5587: dropping FIFO byte: {}", e);
          // At most `count` bytes, which fits the report's capacity.
          let _ = report.rejected.push(*byte);
        }
      }
    }
    Ok(())
  }

  async fn handle_gpi(&mut self) -> Result<(), Error<E>> {
    let pins = self.read_pins(PinGroup::GpioInterruptStatus).await?;
    debug!("ADP5587: GPI interrupt on {} pins", pins.len());
    self.gpi_pending = self.gpi_pending.union(pins);
    Ok(())
  }

  async fn handle_lock(&mut self, lock_ec: Option<KeyLockEventCount>) -> Result<(), Error<E>> {
    let stat = match lock_ec {
      Some(stat) => stat,
      None => self.read_lock_event_count().await?,
    };
    debug!("ADP5587: keypad lock state is now {:?}", stat.lock_state());
    self.lock_changed = true;
    Ok(())
  }

  async fn read_lock_event_count(&mut self) -> Result<KeyLockEventCount, Error<E>> {
    let stat = KeyLockEventCount::from_bits(self.read_register(Reg::KeyLckEcStat).await?);
    self.lock_state = stat.lock_state();
    Ok(stat)
  }

  /// Read `buf.len()` FIFO slots starting at `KEY_EVENTA`, in address order.
  pub(crate) async fn read_fifo(&mut self, buf: &mut [u8]) -> Result<(), Error<E>> {
    if buf.is_empty() {
      return Ok(());
    }
    if self.flags.auto_inc() {
      return self.read_burst(Reg::KeyEventA, buf).await;
    }
    for (byte, reg) in buf.iter_mut().zip(Reg::KEY_EVENTS) {
      *byte = self.read_register(reg).await?;
    }
    Ok(())
  }

  /// Write-1-clear exactly `cause`, recording the outcome.
  async fn clear(&mut self, cause: IntStatus, cleared: &mut IntStatus, error: &mut Option<Error<E>>) {
    match self.write_register(Reg::IntStat, cause.into_bits()).await {
      Ok(()) => *cleared = *cleared | cause,
      Err(e) => {
        warn!("ADP5587: failed to clear {:?}", cause);
        *error = Some(e);
      }
    }
  }

  pub fn state(&self) -> DecoderState {
    self.state
  }

  /// Remove and return the buffered events, oldest first.
  pub fn drain_events(&mut self) -> Vec<KeyEvent, FIFO_DEPTH> {
    self.fifo.drain()
  }

  pub fn pending_events(&self) -> usize {
    self.fifo.len()
  }

  /// Read-only view of the local FIFO mirror.
  pub fn events(&self) -> &crate::EventFifo {
    &self.fifo
  }

  /// Most recently observed keypad lock state.
  pub fn pending_lock_state(&self) -> LockState {
    self.lock_state
  }

  /// The lock state, if a key lock interrupt was serviced since the last call.
  pub fn take_lock_change(&mut self) -> Option<LockState> {
    if core::mem::take(&mut self.lock_changed) {
      Some(self.lock_state)
    } else {
      None
    }
  }

  /// `true` once an overflow interrupt was serviced, until acknowledged.
  pub fn pending_overflow(&self) -> bool {
    self.overflow
  }

  pub fn acknowledge_overflow(&mut self) {
    self.overflow = false;
  }

  /// Pins that raised a GPI interrupt since the last call.
  pub fn take_gpi_interrupts(&mut self) -> PinSet {
    core::mem::take(&mut self.gpi_pending)
  }
}

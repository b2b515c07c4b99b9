#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Async, `no_std` driver for the Analog Devices ADP5587 keypad decoder and
//! I/O expander.
//!
//! The ADP5587 scans up to 80 keys (rows A–J × columns 0–7) and 18 GPI pins in
//! hardware, queues every transition in a 10-entry FIFO and raises a single
//! interrupt line. This crate sits between that interrupt line and the
//! application:
//!
//! - A typed register map and bitfields instead of raw addresses and masks
//! - Table-driven decoding of FIFO bytes into [`KeyEvent`]s
//! - An interrupt servicing pass that handles each cause independently and
//!   clears exactly the causes it handled
//! - A local mirror of the FIFO that the application drains at its own pace
//! - `embedded-hal` / `embedded-hal-async` 1.0 traits so the driver works
//!   across MCU families
//!
//! ```no_run
//! use embedded_hal_async::{digital::Wait, i2c::{I2c, SevenBitAddress}};
//! use adp5587::{Adp5587, Config, DEFAULT_ADDRESS};
//!
//! async fn example<I2C, INT, E>(i2c: I2C, mut int: INT) -> Result<(), adp5587::Error<E>>
//! where
//!   I2C: I2c<SevenBitAddress, Error = E>,
//!   INT: Wait,
//! {
//!   let mut keypad = Adp5587::new(i2c, DEFAULT_ADDRESS, Config::keypad_matrix(4, 4));
//!   keypad.initialize().await?;
//!
//!   loop {
//!     keypad.wait_and_service(&mut int).await?;
//!     for event in keypad.drain_events() {
//!       let _ = event;
//!     }
//!   }
//! }
//! ```
mod config;
mod control;
mod defs;
mod event;
mod fifo;
mod init;
mod pins;
mod reg;
mod rw;
mod service;

#[cfg(test)]
mod mock;

use embedded_hal_async::i2c::{I2c, SevenBitAddress};

pub use config::Config;
pub use defs::{ConfigFlags, DeviceId, IntStatus, KeyLockEventCount, LockState};
pub use event::{
  decode, encode, DecodeError, EventCode, Identity, Key, KeyEvent, KeyRow, Literal, On, Transition, INIT,
  KEY_COLUMNS, ON,
};
pub use fifo::EventFifo;
pub use init::InitState;
pub use pins::{Pin, PinGroup, PinSet};
pub use reg::{Reg, UnknownRegister, DEFAULT_ADDRESS, FIFO_DEPTH};
pub use service::{DecoderState, ServiceReport};

/// Errors that can occur while interacting with the controller.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
  /// I²C bus transaction failed with the underlying driver error.
  I2c(E),
  /// A FIFO byte or event count could not be decoded.
  Decode(DecodeError),
  /// `DEV_ID` did not carry the ADP5587 manufacturer code.
  InvalidDeviceId(u8),
  /// A burst read was requested while `AUTO_INC` is disabled.
  BurstWithoutAutoIncrement,
  /// A burst read that runs past the end of a contiguous register block.
  BurstOutOfRange,
  /// The pin group is read-only.
  ReadOnlyGroup(PinGroup),
  /// The interrupt line could not be awaited.
  Interrupt,
}

impl<E> From<DecodeError> for Error<E> {
  fn from(e: DecodeError) -> Self {
    Error::Decode(e)
  }
}

/// Driver state for one ADP5587 on an I²C bus.
///
/// The driver owns the bus handle and the local mirror of the key event FIFO.
/// Create an instance with [`Adp5587::new`], call [`Adp5587::initialize`] to
/// stage the [`Config`], then call [`Adp5587::service_interrupt`] each time the
/// INT line asserts (or let [`Adp5587::wait_and_service`] await it).
pub struct Adp5587<I> {
  i2c: I,
  address: SevenBitAddress,
  config: Config,
  /// Last value written to or read from `CFG`.
  flags: ConfigFlags,
  state: DecoderState,
  fifo: EventFifo,
  lock_state: LockState,
  lock_changed: bool,
  overflow: bool,
  gpi_pending: PinSet,
}

impl<I, E> Adp5587<I>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  /// Create a new driver instance for the device at `address`.
  ///
  /// Nothing is sent to the device until [`Adp5587::initialize`] is called.
  pub fn new(i2c: I, address: SevenBitAddress, config: Config) -> Self {
    Self {
      i2c,
      address,
      config,
      flags: ConfigFlags::new(),
      state: DecoderState::Idle,
      fifo: EventFifo::new(),
      lock_state: LockState::Unlocked,
      lock_changed: false,
      overflow: false,
      gpi_pending: PinSet::empty(),
    }
  }

  pub fn address(&self) -> SevenBitAddress {
    self.address
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Last known contents of `CFG`.
  pub fn config_flags(&self) -> ConfigFlags {
    self.flags
  }

  /// Give the bus handle back.
  pub fn release(self) -> I {
    self.i2c
  }
}

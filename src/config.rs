use embedded_hal_async::i2c::{I2c, SevenBitAddress};
use log::debug;

use crate::{Adp5587, ConfigFlags, Error, IntStatus, Pin, PinGroup, PinSet, Reg};

impl<I, E> Adp5587<I>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  /// Program every pin group, then `CFG`.
  ///
  /// `CFG` goes last so interrupts are only enabled once the pins they refer
  /// to are set up.
  pub(crate) async fn write_config(&mut self, config: &Config) -> Result<(), Error<E>> {
    for (group, pins) in config.pin_groups() {
      self.write_pins(group, pins).await?;
    }
    self.write_register(Reg::Cfg, config.flags.into_bits()).await?;
    self.flags = config.flags;
    debug!("ADP5587: configuration written, CFG = {:#010b}", config.flags.into_bits());
    Ok(())
  }
}

/// Staged device configuration, written by [`Adp5587::initialize`].
///
/// Each pin group holds one bit per pin; see [`PinSet`]. Pins outside
/// `keypad` act as GPIOs.
///
/// # Example
/// ```no_run
/// use adp5587::{Config, IntStatus, Pin, PinSet};
///
/// let config = Config::keypad_matrix(4, 3)
///   .with_interrupts(IntStatus::KE_INT | IntStatus::OVR_FLOW_INT)
///   .with_gpi_events(PinSet::from_pins(&[Pin::R7]))
///   .with_auto_increment(true);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
  pub flags: ConfigFlags,
  pub keypad: PinSet,
  pub gpi_events: PinSet,
  pub gpio_interrupts: PinSet,
  pub interrupt_level_high: PinSet,
  pub outputs: PinSet,
  pub debounce_disabled: PinSet,
  pub pull_disabled: PinSet,
}

impl Config {
  /// Key event and overflow interrupts, INT pulsed while events remain, no
  /// keypad pins.
  pub const fn new() -> Self {
    Self {
      flags: ConfigFlags::new().with_ke_ien(true).with_ovr_flow_ien(true).with_int_cfg(true),
      keypad: PinSet::empty(),
      gpi_events: PinSet::empty(),
      gpio_interrupts: PinSet::empty(),
      interrupt_level_high: PinSet::empty(),
      outputs: PinSet::empty(),
      debounce_disabled: PinSet::empty(),
      pull_disabled: PinSet::empty(),
    }
  }

  /// Scan rows `R0..rows` against columns `C0..columns`.
  ///
  /// Counts are clamped to the 8 rows and 10 columns the device has.
  pub const fn keypad_matrix(rows: usize, columns: usize) -> Self {
    let mut keypad = PinSet::empty();
    let mut i = 0;
    while i < rows && i < Pin::ROWS.len() {
      keypad = keypad.with(Pin::ROWS[i]);
      i += 1;
    }
    i = 0;
    while i < columns && i < Pin::COLUMNS.len() {
      keypad = keypad.with(Pin::COLUMNS[i]);
      i += 1;
    }
    Self::new().with_keypad(keypad)
  }

  pub const fn with_flags(mut self, flags: ConfigFlags) -> Self {
    self.flags = flags;
    self
  }

  /// Enable exactly the interrupt causes in `causes`.
  pub const fn with_interrupts(mut self, causes: IntStatus) -> Self {
    self.flags = self.flags.with_interrupts(causes);
    self
  }

  pub const fn with_auto_increment(mut self, enabled: bool) -> Self {
    self.flags = self.flags.with_auto_inc(enabled);
    self
  }

  /// When set, a full FIFO drops its oldest event instead of the newest.
  pub const fn with_overflow_mode(mut self, enabled: bool) -> Self {
    self.flags = self.flags.with_ovr_flow_m(enabled);
    self
  }

  pub const fn with_keypad(mut self, pins: PinSet) -> Self {
    self.keypad = pins;
    self
  }

  /// GPIs reported through the key event FIFO.
  pub const fn with_gpi_events(mut self, pins: PinSet) -> Self {
    self.gpi_events = pins;
    self
  }

  pub const fn with_gpio_interrupts(mut self, pins: PinSet) -> Self {
    self.gpio_interrupts = pins;
    self
  }

  pub const fn with_interrupt_level_high(mut self, pins: PinSet) -> Self {
    self.interrupt_level_high = pins;
    self
  }

  pub const fn with_outputs(mut self, pins: PinSet) -> Self {
    self.outputs = pins;
    self
  }

  pub const fn with_debounce_disabled(mut self, pins: PinSet) -> Self {
    self.debounce_disabled = pins;
    self
  }

  pub const fn with_pull_disabled(mut self, pins: PinSet) -> Self {
    self.pull_disabled = pins;
    self
  }

  fn pin_groups(&self) -> [(PinGroup, PinSet); 7] {
    [
      (PinGroup::KeypadSelect, self.keypad),
      (PinGroup::GpiEventMode, self.gpi_events),
      (PinGroup::GpioInterruptEnable, self.gpio_interrupts),
      (PinGroup::InterruptLevel, self.interrupt_level_high),
      (PinGroup::Direction, self.outputs),
      (PinGroup::DebounceDisable, self.debounce_disabled),
      (PinGroup::PullDisable, self.pull_disabled),
    ]
  }
}

impl Default for Config {
  fn default() -> Self {
    Self::new()
  }
}

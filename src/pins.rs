//! Row/column select masks shared by every per-pin register group.
//!
//! The ADP5587 exposes its 18 pins (R0–R7, C0–C9) through groups of three
//! registers. Bank 1 carries R0–R7, bank 2 carries C0–C7 and bank 3 carries C8
//! and C9 in its two low bits. A pin keeps the same bank and bit position in
//! every group, so a single [`PinSet`] value can be written to any of them.

use crate::reg::Reg;

/// A physical row or column pin.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pin {
  R0 = 0,
  R1 = 1,
  R2 = 2,
  R3 = 3,
  R4 = 4,
  R5 = 5,
  R6 = 6,
  R7 = 7,
  C0 = 8,
  C1 = 9,
  C2 = 10,
  C3 = 11,
  C4 = 12,
  C5 = 13,
  C6 = 14,
  C7 = 15,
  C8 = 16,
  C9 = 17,
}

impl Pin {
  pub const COUNT: usize = 18;

  pub const ALL: [Pin; Self::COUNT] = [
    Pin::R0,
    Pin::R1,
    Pin::R2,
    Pin::R3,
    Pin::R4,
    Pin::R5,
    Pin::R6,
    Pin::R7,
    Pin::C0,
    Pin::C1,
    Pin::C2,
    Pin::C3,
    Pin::C4,
    Pin::C5,
    Pin::C6,
    Pin::C7,
    Pin::C8,
    Pin::C9,
  ];

  pub const ROWS: [Pin; 8] = [Pin::R0, Pin::R1, Pin::R2, Pin::R3, Pin::R4, Pin::R5, Pin::R6, Pin::R7];

  pub const COLUMNS: [Pin; 10] =
    [Pin::C0, Pin::C1, Pin::C2, Pin::C3, Pin::C4, Pin::C5, Pin::C6, Pin::C7, Pin::C8, Pin::C9];

  /// Register bank (0..=2) holding this pin.
  pub const fn bank(self) -> usize {
    (self as usize) / 8
  }

  /// Single-bit mask of this pin within its bank.
  pub const fn mask(self) -> u8 {
    1 << ((self as u8) % 8)
  }
}

/// A set of pins laid out exactly as the three registers of a pin group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSet([u8; 3]);

impl PinSet {
  /// Bits of bank 3 that map to pins (C8, C9).
  const BANK3_MASK: u8 = 0b0000_0011;

  pub const fn empty() -> Self {
    Self([0; 3])
  }

  pub const fn all() -> Self {
    Self([0xFF, 0xFF, Self::BANK3_MASK])
  }

  /// Build a set from raw register bytes, ignoring bits that map to no pin.
  pub const fn from_bytes(bytes: [u8; 3]) -> Self {
    Self([bytes[0], bytes[1], bytes[2] & Self::BANK3_MASK])
  }

  pub const fn to_bytes(self) -> [u8; 3] {
    self.0
  }

  pub const fn from_pins(pins: &[Pin]) -> Self {
    let mut set = Self::empty();
    let mut i = 0;
    while i < pins.len() {
      set = set.with(pins[i]);
      i += 1;
    }
    set
  }

  pub const fn with(mut self, pin: Pin) -> Self {
    self.0[pin.bank()] |= pin.mask();
    self
  }

  pub const fn without(mut self, pin: Pin) -> Self {
    self.0[pin.bank()] &= !pin.mask();
    self
  }

  pub fn insert(&mut self, pin: Pin) {
    *self = self.with(pin);
  }

  pub fn remove(&mut self, pin: Pin) {
    *self = self.without(pin);
  }

  pub const fn contains(&self, pin: Pin) -> bool {
    self.0[pin.bank()] & pin.mask() != 0
  }

  pub const fn union(self, other: Self) -> Self {
    Self([self.0[0] | other.0[0], self.0[1] | other.0[1], self.0[2] | other.0[2]])
  }

  pub const fn is_empty(&self) -> bool {
    self.0[0] == 0 && self.0[1] == 0 && self.0[2] == 0
  }

  pub fn len(&self) -> usize {
    self.0.iter().map(|b| b.count_ones() as usize).sum()
  }

  /// Iterate over the pins in the set, rows first.
  pub fn iter(&self) -> impl Iterator<Item = Pin> + '_ {
    Pin::ALL.into_iter().filter(|pin| self.contains(*pin))
  }
}

/// Register groups addressed through a [`PinSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinGroup {
  /// Pending GPI interrupts (read-only, cleared on read).
  GpioInterruptStatus,
  /// GPIO interrupt enable.
  GpioInterruptEnable,
  /// 1 = pin is part of the keypad matrix, 0 = GPIO.
  KeypadSelect,
  /// 1 = GPI changes are queued in the key event FIFO.
  GpiEventMode,
  /// 1 = output, 0 = input.
  Direction,
  /// 1 = interrupt on high level, 0 = on low level.
  InterruptLevel,
  /// 1 = debounce disabled.
  DebounceDisable,
  /// 1 = pull resistor disabled.
  PullDisable,
}

impl PinGroup {
  /// The three registers of this group, bank 1 first.
  ///
  /// The banks are not always contiguous (`DEBOUNCE_DIS1` sits apart from
  /// banks 2 and 3), so every register is listed explicitly.
  pub const fn registers(self) -> [Reg; 3] {
    match self {
      Self::GpioInterruptStatus => [Reg::GpioIntStat1, Reg::GpioIntStat2, Reg::GpioIntStat3],
      Self::GpioInterruptEnable => [Reg::GpioIntEn1, Reg::GpioIntEn2, Reg::GpioIntEn3],
      Self::KeypadSelect => [Reg::KpGpio1, Reg::KpGpio2, Reg::KpGpio3],
      Self::GpiEventMode => [Reg::GpiEmReg1, Reg::GpiEmReg2, Reg::GpiEmReg3],
      Self::Direction => [Reg::GpioDir1, Reg::GpioDir2, Reg::GpioDir3],
      Self::InterruptLevel => [Reg::GpioIntLvl1, Reg::GpioIntLvl2, Reg::GpioIntLvl3],
      Self::DebounceDisable => [Reg::DebounceDis1, Reg::DebounceDis2, Reg::DebounceDis3],
      Self::PullDisable => [Reg::GpioPull1, Reg::GpioPull2, Reg::GpioPull3],
    }
  }

  pub const fn is_writable(self) -> bool {
    !matches!(self, Self::GpioInterruptStatus)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn banks_and_masks() {
    assert_eq!((Pin::R0.bank(), Pin::R0.mask()), (0, 0b0000_0001));
    assert_eq!((Pin::R7.bank(), Pin::R7.mask()), (0, 0b1000_0000));
    assert_eq!((Pin::C0.bank(), Pin::C0.mask()), (1, 0b0000_0001));
    assert_eq!((Pin::C7.bank(), Pin::C7.mask()), (1, 0b1000_0000));
    assert_eq!((Pin::C8.bank(), Pin::C8.mask()), (2, 0b0000_0001));
    assert_eq!((Pin::C9.bank(), Pin::C9.mask()), (2, 0b0000_0010));
  }

  #[test]
  fn pin_set_bytes() {
    let set = PinSet::from_pins(&[Pin::R1, Pin::C0, Pin::C9]);
    assert_eq!(set.to_bytes(), [0b0000_0010, 0b0000_0001, 0b0000_0010]);
    assert_eq!(set.len(), 3);
    assert!(set.contains(Pin::C9));
    assert!(!set.contains(Pin::C8));

    let mut iter = set.iter();
    assert_eq!(iter.next(), Some(Pin::R1));
    assert_eq!(iter.next(), Some(Pin::C0));
    assert_eq!(iter.next(), Some(Pin::C9));
    assert_eq!(iter.next(), None);
  }

  #[test]
  fn unused_bank3_bits_are_dropped() {
    let set = PinSet::from_bytes([0, 0, 0xFF]);
    assert_eq!(set.to_bytes(), [0, 0, 0b11]);
    assert_eq!(set, PinSet::from_pins(&[Pin::C8, Pin::C9]));
    assert_eq!(PinSet::all().len(), Pin::COUNT);
  }

  #[test]
  fn insert_remove_union() {
    let mut set = PinSet::empty();
    set.insert(Pin::R3);
    set.insert(Pin::C4);
    set.remove(Pin::R3);
    assert_eq!(set, PinSet::empty().with(Pin::C4));
    assert_eq!(set.union(PinSet::empty().with(Pin::R0)).len(), 2);
    assert!(PinSet::empty().is_empty());
  }

  #[test]
  fn every_group_has_distinct_registers() {
    let groups = [
      PinGroup::GpioInterruptStatus,
      PinGroup::GpioInterruptEnable,
      PinGroup::KeypadSelect,
      PinGroup::GpiEventMode,
      PinGroup::Direction,
      PinGroup::InterruptLevel,
      PinGroup::DebounceDisable,
      PinGroup::PullDisable,
    ];
    for (i, a) in groups.iter().enumerate() {
      for b in &groups[i + 1..] {
        for ra in a.registers() {
          assert!(!b.registers().contains(&ra));
        }
      }
    }
    assert!(!PinGroup::GpioInterruptStatus.is_writable());
  }
}

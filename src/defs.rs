use core::ops::{BitAnd, BitOr, Not};

use bitfield_struct::bitfield;

use crate::reg::FIFO_DEPTH;

/// Manufacturer nibble reported in `DEV_ID[7:4]`.
pub(crate) const MANUFACTURER_ID: u8 = 0b0000;

/// Interrupt status register (`INT_STAT`, 0x02).
///
/// Every cause is write-1-to-clear. Clearing must only ever write the bits of
/// the causes that were actually handled; use the associated constants to build
/// a bit-precise mask.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntStatus {
  /// Key events interrupt status.
  pub ke_int: bool,
  /// GPI interrupt status.
  pub gpi_int: bool,
  /// Keylock interrupt status.
  pub k_lck_int: bool,
  /// Overflow interrupt status.
  pub ovr_flow_int: bool,
  #[bits(4)]
  __: u8,
}

impl IntStatus {
  pub const NONE: Self = Self::new();
  pub const KE_INT: Self = Self::new().with_ke_int(true);
  pub const GPI_INT: Self = Self::new().with_gpi_int(true);
  pub const K_LCK_INT: Self = Self::new().with_k_lck_int(true);
  pub const OVR_FLOW_INT: Self = Self::new().with_ovr_flow_int(true);

  /// `true` if every cause in `other` is asserted here.
  pub const fn contains(self, other: Self) -> bool {
    self.into_bits() & other.into_bits() == other.into_bits()
  }

  pub const fn is_empty(self) -> bool {
    self.into_bits() == 0
  }
}

impl BitOr for IntStatus {
  type Output = Self;

  fn bitor(self, rhs: Self) -> Self {
    Self::from_bits(self.into_bits() | rhs.into_bits())
  }
}

impl BitAnd for IntStatus {
  type Output = Self;

  fn bitand(self, rhs: Self) -> Self {
    Self::from_bits(self.into_bits() & rhs.into_bits())
  }
}

impl Not for IntStatus {
  type Output = Self;

  fn not(self) -> Self {
    Self::from_bits(!self.into_bits() & 0x0F)
  }
}

/// Keypad lock status (`KEY_LCK_EC_STAT[5:4]`, read-only).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockState {
  #[default]
  Unlocked,
  Locked,
  /// Any pattern other than `00` or `11`.
  Reserved(u8),
}

impl LockState {
  pub const fn into_bits(self) -> u8 {
    match self {
      Self::Unlocked => 0b00,
      Self::Locked => 0b11,
      Self::Reserved(bits) => bits & 0b11,
    }
  }

  pub const fn from_bits(bits: u8) -> Self {
    match bits & 0b11 {
      0b00 => Self::Unlocked,
      0b11 => Self::Locked,
      other => Self::Reserved(other),
    }
  }

  pub const fn is_locked(self) -> bool {
    matches!(self, Self::Locked)
  }
}

/// Keylock and event counter register (`KEY_LCK_EC_STAT`, 0x03).
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyLockEventCount {
  /// Number of events queued in the FIFO (0..=10).
  #[bits(4)]
  pub event_count: u8,
  /// Read-only in hardware.
  #[bits(2)]
  pub lock_state: LockState,
  /// Lock feature enable.
  pub k_lck_en: bool,
  __: bool,
}

impl KeyLockEventCount {
  /// The event count, or `None` if it exceeds the FIFO depth.
  ///
  /// The counter is a 4-bit field but the hardware never reports more than ten
  /// events; anything above is a corrupted read.
  pub const fn valid_event_count(self) -> Option<usize> {
    let n = self.event_count() as usize;
    if n <= FIFO_DEPTH {
      Some(n)
    } else {
      None
    }
  }
}

/// Configuration register (`CFG`, 0x01).
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigFlags {
  /// Key events interrupt enable.
  pub ke_ien: bool,
  /// GPI interrupt enable.
  pub gpi_ien: bool,
  /// Keypad lock interrupt mask.
  pub k_lck_im: bool,
  /// Overflow interrupt enable.
  pub ovr_flow_ien: bool,
  /// Interrupt configuration: deassert INT for 50 µs and reassert while events remain.
  pub int_cfg: bool,
  /// Overflow mode: when set, new events push the oldest out of a full FIFO.
  pub ovr_flow_m: bool,
  /// GPI event mode configuration: when set, GPI events are not tracked while locked.
  pub gpiem_cfg: bool,
  /// I²C auto-increment. Burst read is supported, burst write is not.
  pub auto_inc: bool,
}

impl ConfigFlags {
  /// Enable bits matching the interrupt causes in `causes`.
  pub const fn with_interrupts(self, causes: IntStatus) -> Self {
    self
      .with_ke_ien(causes.ke_int())
      .with_gpi_ien(causes.gpi_int())
      .with_k_lck_im(causes.k_lck_int())
      .with_ovr_flow_ien(causes.ovr_flow_int())
  }
}

impl BitOr for ConfigFlags {
  type Output = Self;

  fn bitor(self, rhs: Self) -> Self {
    Self::from_bits(self.into_bits() | rhs.into_bits())
  }
}

/// Contents of `DEV_ID` (0x00).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceId {
  pub manufacturer: u8,
  pub revision: u8,
}

impl DeviceId {
  pub const fn from_bits(bits: u8) -> Self {
    Self { manufacturer: bits >> 4, revision: bits & 0x0F }
  }

  pub const fn is_adp5587(self) -> bool {
    self.manufacturer == MANUFACTURER_ID
  }
}

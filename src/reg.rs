/******************************************************************************
 * Refer to the ADP5587 datasheet for more information, available here:       *
 * - https://www.analog.com/media/en/technical-documentation/data-sheets/     *
 *   adp5587.pdf                                                              *
 * ========================================================================== *
 *                        ADP5587 - Registers & Memory Map                    *
*******************************************************************************/

use core::fmt;

use embedded_hal::i2c::SevenBitAddress;

/// I²C address of the ADP5587ACPZ-1 variant.
pub const DEFAULT_ADDRESS: SevenBitAddress = 0x60;

/// Depth of the hardware key event FIFO.
pub const FIFO_DEPTH: usize = 10;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reg {
  // Identification and status (0x00..0x03)
  DevId = 0x00,
  Cfg = 0x01,
  IntStat = 0x02,
  KeyLckEcStat = 0x03,

  // Key event FIFO (0x04..0x0D)
  KeyEventA = 0x04,
  KeyEventB = 0x05,
  KeyEventC = 0x06,
  KeyEventD = 0x07,
  KeyEventE = 0x08,
  KeyEventF = 0x09,
  KeyEventG = 0x0A,
  KeyEventH = 0x0B,
  KeyEventI = 0x0C,
  KeyEventJ = 0x0D,

  // GPIO interrupt status (0x11..0x13)
  GpioIntStat1 = 0x11,
  GpioIntStat2 = 0x12,
  GpioIntStat3 = 0x13,

  // GPIO interrupt enable (0x1A..0x1C)
  GpioIntEn1 = 0x1A,
  GpioIntEn2 = 0x1B,
  GpioIntEn3 = 0x1C,

  // Keypad or GPIO selection (0x1D..0x1F)
  KpGpio1 = 0x1D,
  KpGpio2 = 0x1E,
  KpGpio3 = 0x1F,

  // GPI event mode (0x20..0x22)
  GpiEmReg1 = 0x20,
  GpiEmReg2 = 0x21,
  GpiEmReg3 = 0x22,

  // GPIO direction (0x23..0x25)
  GpioDir1 = 0x23,
  GpioDir2 = 0x24,
  GpioDir3 = 0x25,

  // GPIO interrupt level (0x26..0x28)
  GpioIntLvl1 = 0x26,
  GpioIntLvl2 = 0x27,
  GpioIntLvl3 = 0x28,

  // Debounce disable (0x29, 0x30..0x31)
  DebounceDis1 = 0x29,
  DebounceDis2 = 0x30,
  DebounceDis3 = 0x31,

  // Pull disable (0x32..0x34)
  GpioPull1 = 0x32,
  GpioPull2 = 0x33,
  GpioPull3 = 0x34,
}

impl Reg {
  /// Every documented register in ascending address order.
  pub const ALL: [Reg; 38] = [
    Reg::DevId,
    Reg::Cfg,
    Reg::IntStat,
    Reg::KeyLckEcStat,
    Reg::KeyEventA,
    Reg::KeyEventB,
    Reg::KeyEventC,
    Reg::KeyEventD,
    Reg::KeyEventE,
    Reg::KeyEventF,
    Reg::KeyEventG,
    Reg::KeyEventH,
    Reg::KeyEventI,
    Reg::KeyEventJ,
    Reg::GpioIntStat1,
    Reg::GpioIntStat2,
    Reg::GpioIntStat3,
    Reg::GpioIntEn1,
    Reg::GpioIntEn2,
    Reg::GpioIntEn3,
    Reg::KpGpio1,
    Reg::KpGpio2,
    Reg::KpGpio3,
    Reg::GpiEmReg1,
    Reg::GpiEmReg2,
    Reg::GpiEmReg3,
    Reg::GpioDir1,
    Reg::GpioDir2,
    Reg::GpioDir3,
    Reg::GpioIntLvl1,
    Reg::GpioIntLvl2,
    Reg::GpioIntLvl3,
    Reg::DebounceDis1,
    Reg::DebounceDis2,
    Reg::DebounceDis3,
    Reg::GpioPull1,
    Reg::GpioPull2,
    Reg::GpioPull3,
  ];

  /// The FIFO slots in address order, oldest event first.
  pub const KEY_EVENTS: [Reg; FIFO_DEPTH] = [
    Reg::KeyEventA,
    Reg::KeyEventB,
    Reg::KeyEventC,
    Reg::KeyEventD,
    Reg::KeyEventE,
    Reg::KeyEventF,
    Reg::KeyEventG,
    Reg::KeyEventH,
    Reg::KeyEventI,
    Reg::KeyEventJ,
  ];

  /// FIFO slot `index` (0 = `KEY_EVENTA`), if it exists.
  pub const fn key_event(index: usize) -> Option<Reg> {
    if index < FIFO_DEPTH {
      Some(Self::KEY_EVENTS[index])
    } else {
      None
    }
  }

  pub const fn addr(self) -> u8 {
    self as u8
  }

  /// Writing a 1 to a set bit of this register clears it.
  pub const fn is_write_one_to_clear(self) -> bool {
    matches!(self, Reg::IntStat)
  }
}

impl From<Reg> for u8 {
  #[inline]
  fn from(r: Reg) -> Self {
    r as u8
  }
}

/// An address that falls outside the documented register map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownRegister(pub u8);

impl fmt::Display for UnknownRegister {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "no ADP5587 register at address {:#04x}", self.0)
  }
}

impl TryFrom<u8> for Reg {
  type Error = UnknownRegister;

  fn try_from(addr: u8) -> Result<Self, Self::Error> {
    Reg::ALL.iter().copied().find(|r| *r as u8 == addr).ok_or(UnknownRegister(addr))
  }
}

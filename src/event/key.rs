use core::fmt;

use crate::pins::Pin;

use super::Identity;

/// Keypad row letter as used in the event code table (A–J).
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyRow {
  A = 0,
  B = 1,
  C = 2,
  D = 3,
  E = 4,
  F = 5,
  G = 6,
  H = 7,
  I = 8,
  J = 9,
}

impl KeyRow {
  pub const COUNT: usize = 10;

  pub const ALL: [KeyRow; Self::COUNT] = [
    KeyRow::A,
    KeyRow::B,
    KeyRow::C,
    KeyRow::D,
    KeyRow::E,
    KeyRow::F,
    KeyRow::G,
    KeyRow::H,
    KeyRow::I,
    KeyRow::J,
  ];

  pub const fn as_char(self) -> char {
    match self {
      KeyRow::A => 'A',
      KeyRow::B => 'B',
      KeyRow::C => 'C',
      KeyRow::D => 'D',
      KeyRow::E => 'E',
      KeyRow::F => 'F',
      KeyRow::G => 'G',
      KeyRow::H => 'H',
      KeyRow::I => 'I',
      KeyRow::J => 'J',
    }
  }
}

/// Number of key columns per row letter.
pub const KEY_COLUMNS: usize = 8;

// Release codes as listed in the datasheet key event table. The press code is
// the same literal with bit 7 set.
const KEYPAD_CODES: [[u8; KEY_COLUMNS]; KeyRow::COUNT] = [
  /* A */ [1, 11, 21, 31, 41, 51, 61, 71],
  /* B */ [2, 12, 22, 32, 42, 52, 62, 72],
  /* C */ [3, 13, 23, 33, 43, 53, 63, 73],
  /* D */ [4, 14, 24, 34, 44, 54, 64, 74],
  /* E */ [5, 15, 25, 35, 45, 55, 65, 75],
  /* F */ [6, 16, 26, 36, 46, 56, 66, 76],
  /* G */ [7, 17, 27, 37, 47, 57, 67, 77],
  /* H */ [8, 18, 28, 38, 48, 58, 68, 78],
  /* I */ [9, 19, 29, 39, 49, 59, 69, 79],
  /* J */ [10, 20, 30, 40, 50, 60, 70, 80],
];

// GPI release codes, one per pin.
const GPI_CODES: [(Pin, u8); Pin::COUNT] = [
  (Pin::R0, 97),
  (Pin::R1, 98),
  (Pin::R2, 99),
  (Pin::R3, 100),
  (Pin::R4, 101),
  (Pin::R5, 102),
  (Pin::R6, 103),
  (Pin::R7, 104),
  (Pin::C0, 105),
  (Pin::C1, 106),
  (Pin::C2, 107),
  (Pin::C3, 108),
  (Pin::C4, 109),
  (Pin::C5, 110),
  (Pin::C6, 111),
  (Pin::C7, 112),
  (Pin::C8, 113),
  (Pin::C9, 114),
];

/// Inverse of the literal tables, indexed by the code with bit 7 cleared.
pub(super) const IDENTITIES: [Option<Identity>; 128] = build_identities();

const fn build_identities() -> [Option<Identity>; 128] {
  let mut table: [Option<Identity>; 128] = [None; 128];
  table[0] = Some(Identity::Init);

  let mut r = 0;
  while r < KeyRow::COUNT {
    let mut c = 0;
    while c < KEY_COLUMNS {
      let code = KEYPAD_CODES[r][c] as usize;
      if table[code].is_some() {
        panic!("duplicate keypad event code");
      }
      table[code] = Some(Identity::Key(Key { row: KeyRow::ALL[r], column: c as u8 }));
      c += 1;
    }
    r += 1;
  }

  let mut i = 0;
  while i < Pin::COUNT {
    let (pin, code) = GPI_CODES[i];
    if table[code as usize].is_some() {
      panic!("duplicate GPI event code");
    }
    table[code as usize] = Some(Identity::Gpi(pin));
    i += 1;
  }

  table
}

/// One of the 80 keypad positions (A0–J7).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Key {
  row: KeyRow,
  column: u8,
}

impl Key {
  /// Returns `None` if `column` is not in `0..8`.
  pub const fn new(row: KeyRow, column: u8) -> Option<Self> {
    if (column as usize) < KEY_COLUMNS {
      Some(Self { row, column })
    } else {
      None
    }
  }

  pub const fn row(self) -> KeyRow {
    self.row
  }

  pub const fn column(self) -> u8 {
    self.column
  }

  /// Release code of this key.
  pub const fn code(self) -> u8 {
    KEYPAD_CODES[self.row as usize][self.column as usize]
  }

  /// Look up a key from its release code.
  pub const fn from_code(code: u8) -> Option<Self> {
    if code as usize >= IDENTITIES.len() {
      return None;
    }
    match IDENTITIES[code as usize] {
      Some(Identity::Key(key)) => Some(key),
      _ => None,
    }
  }

  /// Every key in release-code order (A0, B0, … J0, A1, … J7).
  pub fn all() -> impl Iterator<Item = Key> {
    (1u8..=80).filter_map(Key::from_code)
  }
}

impl fmt::Display for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}", self.row.as_char(), self.column)
  }
}

/// Release code of a GPI pin.
pub(super) const fn gpi_code(pin: Pin) -> u8 {
  GPI_CODES[pin as usize].1
}

/// Look up a GPI pin from its release code.
pub(super) const fn gpi_from_code(code: u8) -> Option<Pin> {
  if code as usize >= IDENTITIES.len() {
    return None;
  }
  match IDENTITIES[code as usize] {
    Some(Identity::Gpi(pin)) => Some(pin),
    _ => None,
  }
}

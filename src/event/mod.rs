//! Key event code model.
//!
//! Every byte popped from the ADP5587 key event FIFO encodes one transition:
//! the low seven bits select a keypad position (A0–J7) or a GPI pin (R0–C9),
//! bit 7 tells whether it was pressed or released. The literal values are not a
//! linear function of the position, so both directions go through explicit
//! lookup tables (see [`key`]).

use core::fmt;

use crate::pins::Pin;

mod code;
mod key;

pub use code::*;
pub use key::{Key, KeyRow, KEY_COLUMNS};

/// Value of an empty FIFO slot.
pub const INIT: u8 = 0;

/// What a key event code refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Identity {
  /// Empty FIFO slot sentinel.
  Init,
  Key(Key),
  Gpi(Pin),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
  Released,
  Pressed,
}

impl Transition {
  pub const fn is_pressed(self) -> bool {
    matches!(self, Transition::Pressed)
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
  /// A byte outside the documented key event code space.
  UnknownCode(u8),
  /// `KEY_LCK_EC_STAT` reported more events than the FIFO can hold.
  CorruptEventCount(u8),
}

impl fmt::Display for DecodeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DecodeError::UnknownCode(raw) => write!(f, "unknown key event code {:#04x}", raw),
      DecodeError::CorruptEventCount(n) => write!(f, "event count {} exceeds FIFO depth", n),
    }
  }
}

/// Decode one FIFO byte.
///
/// Accepts the 80 keypad codes and 18 GPI codes with or without the press bit,
/// plus the empty-slot sentinel [`INIT`] (which has no pressed form).
pub fn decode(raw: u8) -> Result<(Identity, Transition), DecodeError> {
  let transition = if raw & On::BIT != 0 { Transition::Pressed } else { Transition::Released };
  match key::IDENTITIES[(raw & !On::BIT) as usize] {
    Some(Identity::Init) if transition.is_pressed() => Err(DecodeError::UnknownCode(raw)),
    Some(identity) => Ok((identity, transition)),
    None => Err(DecodeError::UnknownCode(raw)),
  }
}

/// Exact inverse of [`decode`].
///
/// [`Identity::Init`] always encodes to [`INIT`].
pub fn encode(identity: Identity, transition: Transition) -> u8 {
  let base = match identity {
    Identity::Init => return INIT,
    Identity::Key(key) => key.code(),
    Identity::Gpi(pin) => Literal::code(pin),
  };
  match transition {
    Transition::Released => base,
    Transition::Pressed => base | On::BIT,
  }
}

/// A decoded key or GPI transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
  pub identity: Identity,
  pub transition: Transition,
}

impl KeyEvent {
  pub const fn new(identity: Identity, transition: Transition) -> Self {
    Self { identity, transition }
  }

  pub const fn key(&self) -> Option<Key> {
    match self.identity {
      Identity::Key(key) => Some(key),
      _ => None,
    }
  }

  pub const fn gpi(&self) -> Option<Pin> {
    match self.identity {
      Identity::Gpi(pin) => Some(pin),
      _ => None,
    }
  }

  pub const fn is_pressed(&self) -> bool {
    self.transition.is_pressed()
  }

  pub const fn is_init(&self) -> bool {
    matches!(self.identity, Identity::Init)
  }

  pub fn raw(&self) -> u8 {
    encode(self.identity, self.transition)
  }
}

impl TryFrom<u8> for KeyEvent {
  type Error = DecodeError;

  fn try_from(raw: u8) -> Result<Self, Self::Error> {
    decode(raw).map(|(identity, transition)| Self::new(identity, transition))
  }
}

impl From<KeyEvent> for u8 {
  fn from(event: KeyEvent) -> Self {
    event.raw()
  }
}

impl From<KeyEvent> for (Identity, Transition) {
  fn from(event: KeyEvent) -> Self {
    (event.identity, event.transition)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn documented(raw: u8) -> bool {
    let base = raw & 0x7F;
    raw == INIT || (1..=80).contains(&base) || (97..=114).contains(&base)
  }

  #[test]
  fn keypad_release_and_press() {
    for key in Key::all() {
      let base = EventCode::released(key);
      assert_eq!(decode(u8::from(base)), Ok((Identity::Key(key), Transition::Released)));
      assert_eq!(decode(u8::from(key | ON)), Ok((Identity::Key(key), Transition::Pressed)));
    }
  }

  #[test]
  fn gpi_release_and_press() {
    for pin in Pin::ALL {
      let raw = Literal::code(pin);
      assert_eq!(decode(raw), Ok((Identity::Gpi(pin), Transition::Released)));
      assert_eq!(decode(raw | 0x80), Ok((Identity::Gpi(pin), Transition::Pressed)));
    }
  }

  #[test]
  fn undocumented_bytes_are_unknown() {
    let mut rejected = 0;
    for raw in 0..=255u8 {
      if !documented(raw) {
        assert_eq!(decode(raw), Err(DecodeError::UnknownCode(raw)));
        rejected += 1;
      }
    }
    // 256 - INIT - 2 * (80 + 18) documented codes, 0x80 included.
    assert_eq!(rejected, 256 - 1 - 2 * 98);
    assert_eq!(decode(0x80), Err(DecodeError::UnknownCode(0x80)));
  }

  #[test]
  fn encode_inverts_decode() {
    for raw in 0..=255u8 {
      if let Ok((identity, transition)) = decode(raw) {
        assert_eq!(encode(identity, transition), raw);
      }
    }
  }

  #[test]
  fn init_is_the_empty_sentinel() {
    assert_eq!(decode(INIT), Ok((Identity::Init, Transition::Released)));
    assert_eq!(encode(Identity::Init, Transition::Pressed), INIT);
    assert!(KeyEvent::try_from(INIT).unwrap().is_init());
  }

  #[test]
  fn key_event_accessors() {
    let event = KeyEvent::try_from(0x81).unwrap();
    assert_eq!(event.key(), Key::new(KeyRow::A, 0));
    assert_eq!(event.gpi(), None);
    assert!(event.is_pressed());
    assert_eq!(u8::from(event), 0x81);

    let event = KeyEvent::try_from(114).unwrap();
    assert_eq!(event.gpi(), Some(Pin::C9));
    assert!(!event.is_pressed());
  }
}

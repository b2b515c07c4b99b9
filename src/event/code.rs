use core::ops::BitOr;

use crate::pins::Pin;

use super::{key, DecodeError, Identity, Key, KeyEvent, Transition};

/// The press marker (bit 7) of a key event code.
///
/// `ON` only combines with a release literal of one code family, producing an
/// [`EventCode`] of that same family:
///
/// ```ignore
/// let pressed = Key::new(KeyRow::A, 0).unwrap() | ON;
/// assert_eq!(u8::from(pressed), 0x81);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct On;

pub const ON: On = On;

impl On {
  pub const BIT: u8 = 0x80;
}

mod sealed {
  pub trait Sealed {}
  impl Sealed for crate::event::Key {}
  impl Sealed for crate::pins::Pin {}
}

/// A family of release literals in the key event code space.
pub trait Literal: sealed::Sealed + Copy {
  /// Release code of this literal.
  fn code(self) -> u8;

  /// Literal of this family with release code `code`, if any.
  fn from_code(code: u8) -> Option<Self>;

  fn identity(self) -> Identity;
}

impl Literal for Key {
  fn code(self) -> u8 {
    Key::code(self)
  }

  fn from_code(code: u8) -> Option<Self> {
    Key::from_code(code)
  }

  fn identity(self) -> Identity {
    Identity::Key(self)
  }
}

impl Literal for Pin {
  fn code(self) -> u8 {
    key::gpi_code(self)
  }

  fn from_code(code: u8) -> Option<Self> {
    key::gpi_from_code(code)
  }

  fn identity(self) -> Identity {
    Identity::Gpi(self)
  }
}

/// A complete event code restricted to one literal family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventCode<L> {
  literal: L,
  transition: Transition,
}

impl<L: Literal> EventCode<L> {
  pub const fn released(literal: L) -> Self {
    Self { literal, transition: Transition::Released }
  }

  pub const fn pressed(literal: L) -> Self {
    Self { literal, transition: Transition::Pressed }
  }

  pub fn literal(&self) -> L {
    self.literal
  }

  pub fn transition(&self) -> Transition {
    self.transition
  }

  pub fn raw(&self) -> u8 {
    match self.transition {
      Transition::Released => self.literal.code(),
      Transition::Pressed => self.literal.code() | On::BIT,
    }
  }

  pub fn event(&self) -> KeyEvent {
    KeyEvent::new(self.literal.identity(), self.transition)
  }
}

impl<L: Literal> From<EventCode<L>> for u8 {
  fn from(code: EventCode<L>) -> Self {
    code.raw()
  }
}

impl<L: Literal> TryFrom<u8> for EventCode<L> {
  type Error = DecodeError;

  fn try_from(raw: u8) -> Result<Self, Self::Error> {
    let literal = L::from_code(raw & !On::BIT).ok_or(DecodeError::UnknownCode(raw))?;
    Ok(if raw & On::BIT != 0 { Self::pressed(literal) } else { Self::released(literal) })
  }
}

impl<L: Literal> BitOr<On> for EventCode<L> {
  type Output = EventCode<L>;

  fn bitor(self, _: On) -> EventCode<L> {
    Self::pressed(self.literal)
  }
}

impl BitOr<On> for Key {
  type Output = EventCode<Key>;

  fn bitor(self, _: On) -> EventCode<Key> {
    EventCode::pressed(self)
  }
}

impl BitOr<On> for Pin {
  type Output = EventCode<Pin>;

  fn bitor(self, _: On) -> EventCode<Pin> {
    EventCode::pressed(self)
  }
}

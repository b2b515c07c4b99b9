use heapless::{Deque, Vec};
use log::warn;

use crate::event::KeyEvent;
use crate::reg::FIFO_DEPTH;

/// Local mirror of the hardware key event FIFO.
///
/// Events are appended in hardware arrival order and drained oldest first. The
/// mirror holds at most [`FIFO_DEPTH`] entries: when a new batch arrives before
/// the previous one was drained, the oldest undrained entries make room.
#[derive(Debug, Default)]
pub struct EventFifo {
  events: Deque<KeyEvent, FIFO_DEPTH>,
  discarded: usize,
}

impl EventFifo {
  pub const fn new() -> Self {
    Self { events: Deque::new(), discarded: 0 }
  }

  /// Append one event, evicting the oldest entry when full.
  pub fn push(&mut self, event: KeyEvent) {
    if self.events.is_full() {
      if let Some(old) = self.events.pop_front() {
        warn!("ADP5587: event mirror full, discarding undrained {:?}", old);
        self.discarded += 1;
      }
    }
    // Cannot fail, a slot was freed above.
    let _ = self.events.push_back(event);
  }

  /// Remove and return every buffered event, oldest first.
  pub fn drain(&mut self) -> Vec<KeyEvent, FIFO_DEPTH> {
    let mut out = Vec::new();
    while let Some(event) = self.events.pop_front() {
      // Same capacity as the deque.
      let _ = out.push(event);
    }
    out
  }

  pub fn peek(&self) -> Option<&KeyEvent> {
    self.events.front()
  }

  pub fn iter(&self) -> impl Iterator<Item = &KeyEvent> + '_ {
    self.events.iter()
  }

  pub fn len(&self) -> usize {
    self.events.len()
  }

  pub fn is_empty(&self) -> bool {
    self.events.is_empty()
  }

  /// Number of undrained events evicted since the mirror was created or reset.
  pub fn discarded(&self) -> usize {
    self.discarded
  }

  pub fn clear(&mut self) {
    self.events.clear();
    self.discarded = 0;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::event::{Identity, Key, KeyRow, Transition};

  fn key_event(column: u8, transition: Transition) -> KeyEvent {
    KeyEvent::new(Identity::Key(Key::new(KeyRow::B, column).unwrap()), transition)
  }

  #[test]
  fn drains_in_arrival_order() {
    let mut fifo = EventFifo::new();
    fifo.push(key_event(0, Transition::Pressed));
    fifo.push(key_event(0, Transition::Released));
    assert_eq!(fifo.len(), 2);
    assert_eq!(fifo.peek(), Some(&key_event(0, Transition::Pressed)));

    let drained = fifo.drain();
    assert_eq!(drained.as_slice(), &[key_event(0, Transition::Pressed), key_event(0, Transition::Released)]);
    assert!(fifo.is_empty());
  }

  #[test]
  fn never_exceeds_depth_and_keeps_newest() {
    let mut fifo = EventFifo::new();
    for column in 0..8 {
      fifo.push(key_event(column, Transition::Pressed));
    }
    for column in 0..4 {
      fifo.push(key_event(column, Transition::Released));
    }
    assert_eq!(fifo.len(), FIFO_DEPTH);
    assert_eq!(fifo.discarded(), 2);
    assert_eq!(fifo.peek(), Some(&key_event(2, Transition::Pressed)));
    assert_eq!(fifo.iter().last(), Some(&key_event(3, Transition::Released)));

    fifo.clear();
    assert!(fifo.is_empty());
    assert_eq!(fifo.discarded(), 0);
  }
}

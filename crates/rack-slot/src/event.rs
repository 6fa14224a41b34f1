//! Slot identity and the intents a slot sends to its coordinator.

use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender};

static NEXT_SLOT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique reference to one slot.
///
/// Unlike a chain position, a `SlotId` stays valid across reordering, so
/// events can name their slot even after it has moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u64);

impl SlotId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        Self(NEXT_SLOT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An intent emitted by a slot. The slot never acts on these itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotEvent {
    /// Move the slot one position toward the chain input.
    MoveEarlier(SlotId),
    /// Move the slot one position toward the chain output.
    MoveLater(SlotId),
    /// Remove the slot from the chain.
    Remove(SlotId),
    /// The parameter editor was shown.
    EditorShown(SlotId),
    /// The parameter editor was hidden.
    EditorHidden(SlotId),
}

impl SlotEvent {
    /// The slot the event concerns.
    pub fn slot(&self) -> SlotId {
        match *self {
            SlotEvent::MoveEarlier(id)
            | SlotEvent::MoveLater(id)
            | SlotEvent::Remove(id)
            | SlotEvent::EditorShown(id)
            | SlotEvent::EditorHidden(id) => id,
        }
    }
}

/// Create the channel slots emit their events on.
pub fn event_channel() -> (Sender<SlotEvent>, Receiver<SlotEvent>) {
    crossbeam_channel::unbounded()
}

//! Chain-side handling of slot intents.
//!
//! Slots only ask; a [`ChainCoordinator`] decides. [`Rack`] is the minimal
//! coordinator: an ordered list of slots that applies moves, removes slots
//! in quiesce-then-destroy order, and mirrors every structural change to the
//! audio side through the [`AudioPort`].
//!
//! ```text
//!  Attached ──move──► Attached
//!     │
//!   remove
//!     ▼
//!  Detached   (terminal, later events ignored)
//! ```

use std::collections::HashSet;

use crossbeam_channel::{Receiver, Sender};
use rack_config::AudioConfig;

use crate::controller::EffectSlotController;
use crate::error::SlotError;
use crate::event::{SlotEvent, SlotId, event_channel};
use crate::host::HostContext;
use crate::port::AudioPort;

/// Receives slot intents.
pub trait ChainCoordinator {
    /// React to one event.
    fn handle_event(&mut self, event: SlotEvent);
}

/// Where a slot stands relative to its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// In the chain and processing.
    Attached,
    /// Removed. Terminal.
    Detached,
}

/// Ordered chain of slots.
pub struct Rack {
    host: HostContext,
    port: AudioPort,
    events_tx: Sender<SlotEvent>,
    events_rx: Receiver<SlotEvent>,
    slots: Vec<EffectSlotController>,
    detached: HashSet<SlotId>,
    open_editors: HashSet<SlotId>,
}

impl Rack {
    /// Create an empty rack sending structural changes through `port`.
    pub fn new(host: HostContext, port: AudioPort) -> Self {
        let (events_tx, events_rx) = event_channel();
        Self {
            host,
            port,
            events_tx,
            events_rx,
            slots: Vec::new(),
            detached: HashSet::new(),
            open_editors: HashSet::new(),
        }
    }

    /// Append a slot hosting `identity`.
    ///
    /// # Errors
    ///
    /// [`SlotError::UnknownEffect`] when the registry has no such effect.
    pub fn insert(&mut self, identity: &str) -> Result<SlotId, SlotError> {
        let controller = EffectSlotController::new(
            identity,
            &self.host,
            self.port.clone(),
            self.events_tx.clone(),
        )?;
        let id = controller.slot();
        self.slots.push(controller);
        Ok(id)
    }

    /// Drop what the audio side has retired, then handle every pending slot
    /// event. Returns how many events were handled.
    pub fn pump(&mut self) -> usize {
        self.port.collect_retired();
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Slot ids in chain order.
    pub fn order(&self) -> Vec<SlotId> {
        self.slots.iter().map(EffectSlotController::slot).collect()
    }

    /// Number of attached slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no slot is attached.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// An attached slot.
    pub fn slot(&self, id: SlotId) -> Option<&EffectSlotController> {
        self.slots.iter().find(|s| s.slot() == id)
    }

    /// An attached slot, mutably.
    pub fn slot_mut(&mut self, id: SlotId) -> Option<&mut EffectSlotController> {
        self.slots.iter_mut().find(|s| s.slot() == id)
    }

    /// Attached slots in chain order.
    pub fn slots(&self) -> impl Iterator<Item = &EffectSlotController> {
        self.slots.iter()
    }

    /// Membership of a slot this rack has seen, `None` for strangers.
    pub fn membership(&self, id: SlotId) -> Option<Membership> {
        if self.detached.contains(&id) {
            Some(Membership::Detached)
        } else if self.position(id).is_some() {
            Some(Membership::Attached)
        } else {
            None
        }
    }

    /// Whether the rack considers a slot's editor open.
    pub fn editor_open(&self, id: SlotId) -> bool {
        self.open_editors.contains(&id)
    }

    /// Current audio configuration.
    pub fn audio_config(&self) -> AudioConfig {
        self.host.audio
    }

    /// Apply a new audio configuration to the audio side and every slot.
    pub fn set_audio_config(&mut self, audio: AudioConfig) {
        let rate_changed = audio.sample_rate != self.host.audio.sample_rate;
        self.host.audio = audio;
        for slot in &mut self.slots {
            slot.apply_audio_config(audio);
            if rate_changed
                && let Err(err) = slot.rebuild_kernel(&self.host.registry, audio.sample_rate as f32)
            {
                tracing::warn!(slot = %slot.slot(), %err, "kernel kept at old sample rate");
            }
        }
        tracing::info!(
            sample_rate = audio.sample_rate,
            frames_per_buffer = audio.frames_per_buffer,
            "audio config applied"
        );
    }

    /// Move a slot one position earlier. No-op at the front.
    pub fn move_earlier(&mut self, id: SlotId) -> bool {
        match self.position(id) {
            Some(pos) if pos > 0 => {
                self.slots.swap(pos, pos - 1);
                self.sync_order();
                true
            }
            _ => false,
        }
    }

    /// Move a slot one position later. No-op at the back.
    pub fn move_later(&mut self, id: SlotId) -> bool {
        match self.position(id) {
            Some(pos) if pos + 1 < self.slots.len() => {
                self.slots.swap(pos, pos + 1);
                self.sync_order();
                true
            }
            _ => false,
        }
    }

    /// Remove a slot: quiesce its engine, then drop the controller.
    pub fn remove(&mut self, id: SlotId) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        let mut controller = self.slots.remove(pos);
        controller.quiesce();
        drop(controller);
        self.detached.insert(id);
        self.open_editors.remove(&id);
        true
    }

    fn position(&self, id: SlotId) -> Option<usize> {
        self.slots.iter().position(|s| s.slot() == id)
    }

    fn sync_order(&self) {
        let order = self.order();
        tracing::debug!(?order, "chain reordered");
        self.port.reorder(order);
    }
}

impl ChainCoordinator for Rack {
    fn handle_event(&mut self, event: SlotEvent) {
        let id = event.slot();
        match self.membership(id) {
            Some(Membership::Attached) => {}
            Some(Membership::Detached) => {
                tracing::warn!(slot = %id, ?event, "event for detached slot ignored");
                return;
            }
            None => {
                tracing::warn!(slot = %id, ?event, "event for unknown slot ignored");
                return;
            }
        }

        match event {
            SlotEvent::MoveEarlier(id) => {
                self.move_earlier(id);
            }
            SlotEvent::MoveLater(id) => {
                self.move_later(id);
            }
            SlotEvent::Remove(id) => {
                self.remove(id);
            }
            SlotEvent::EditorShown(id) => {
                self.open_editors.insert(id);
            }
            SlotEvent::EditorHidden(id) => {
                self.open_editors.remove(&id);
            }
        }
    }
}

impl std::fmt::Debug for Rack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rack")
            .field("slots", &self.slots)
            .field("detached", &self.detached.len())
            .finish_non_exhaustive()
    }
}

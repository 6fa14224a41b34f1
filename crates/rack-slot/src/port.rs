//! Structural command queue between the control thread and the audio thread.
//!
//! Parameter changes travel through each engine's atomics. Changes to the
//! chain itself (attach, reorder, detach, kernel swap) travel as
//! [`PortCommand`]s over a lock-free channel that [`PortProcessor`] drains at
//! the start of every block. Whatever the audio side lets go of travels back
//! as [`Retired`] and is dropped on the control thread:
//!
//! ```text
//! controller ──► AudioPort::attach/reorder/detach/replace_kernel
//!                        │  (crossbeam unbounded)
//!                        ▼
//! audio thread ◄── PortProcessor::process_block
//!                        │  (crossbeam bounded)
//!                        ▼
//! controller ◄── AudioPort::collect_retired
//! ```

use crossbeam_channel::{Receiver, Sender};
use rack_core::{EffectWithParams, EngineProcessor};

use crate::event::SlotId;

/// A structural change to the audio-side chain.
pub enum PortCommand {
    /// Append a processor at the end of the chain.
    Attach {
        /// Owning slot.
        slot: SlotId,
        /// Audio half of the slot's engine.
        processor: EngineProcessor,
    },
    /// Reorder the chain. Ids not attached are ignored; attached slots
    /// missing from the list keep their relative order at the end.
    Reorder(Vec<SlotId>),
    /// Remove a slot's processor and hand it back for disposal.
    Detach(SlotId),
    /// Swap a slot's kernel for one built at a new sample rate.
    ReplaceKernel {
        /// Owning slot.
        slot: SlotId,
        /// Kernel prepared for `sample_rate`, parameters already applied.
        kernel: Box<dyn EffectWithParams + Send>,
        /// Rate the kernel was built for.
        sample_rate: f32,
    },
}

/// Something the audio side no longer owns, on its way back to be dropped.
pub enum Retired {
    /// A detached processor.
    Processor(EngineProcessor),
    /// A kernel replaced by [`PortCommand::ReplaceKernel`].
    Kernel(Box<dyn EffectWithParams + Send>),
    /// The id list of an applied [`PortCommand::Reorder`].
    Order(Vec<SlotId>),
}

/// Retired items the audio side can queue between two collections. When
/// full, the audio side drops items itself.
pub const RETIRED_CAPACITY: usize = 256;

/// Control-thread end of the port.
#[derive(Clone)]
pub struct AudioPort {
    tx: Sender<PortCommand>,
    retired_rx: Receiver<Retired>,
}

/// Create a connected port pair.
pub fn audio_port() -> (AudioPort, PortProcessor) {
    let (tx, rx) = crossbeam_channel::unbounded();
    let (retired_tx, retired_rx) = crossbeam_channel::bounded(RETIRED_CAPACITY);
    (
        AudioPort { tx, retired_rx },
        PortProcessor {
            rx,
            retired_tx,
            chain: Vec::new(),
        },
    )
}

impl AudioPort {
    /// Queue a processor for attachment.
    pub fn attach(&self, slot: SlotId, processor: EngineProcessor) {
        self.send(PortCommand::Attach { slot, processor });
    }

    /// Queue a new chain order.
    pub fn reorder(&self, order: Vec<SlotId>) {
        self.send(PortCommand::Reorder(order));
    }

    /// Queue a detach.
    pub fn detach(&self, slot: SlotId) {
        self.send(PortCommand::Detach(slot));
    }

    /// Queue a kernel swap for a slot.
    pub fn replace_kernel(
        &self,
        slot: SlotId,
        kernel: Box<dyn EffectWithParams + Send>,
        sample_rate: f32,
    ) {
        self.send(PortCommand::ReplaceKernel {
            slot,
            kernel,
            sample_rate,
        });
    }

    /// Drop everything the audio side has handed back. Returns how many
    /// items were dropped.
    pub fn collect_retired(&self) -> usize {
        let mut count = 0;
        while let Ok(item) = self.retired_rx.try_recv() {
            if let Retired::Processor(processor) = &item {
                tracing::debug!(name = processor.shared().name(), "retired processor dropped");
            }
            drop(item);
            count += 1;
        }
        count
    }

    fn send(&self, cmd: PortCommand) {
        if self.tx.send(cmd).is_err() {
            tracing::warn!("audio side of the port is gone, command dropped");
        }
    }
}

/// Audio-thread end of the port. Owns the processors in chain order.
pub struct PortProcessor {
    rx: Receiver<PortCommand>,
    retired_tx: Sender<Retired>,
    chain: Vec<(SlotId, EngineProcessor)>,
}

impl PortProcessor {
    /// Apply every queued command.
    pub fn drain_commands(&mut self) {
        while let Ok(cmd) = self.rx.try_recv() {
            match cmd {
                PortCommand::Attach { slot, processor } => self.chain.push((slot, processor)),
                PortCommand::Reorder(order) => {
                    self.reorder(&order);
                    self.retire(Retired::Order(order));
                }
                PortCommand::Detach(slot) => {
                    if let Some(pos) = self.chain.iter().position(|(id, _)| *id == slot) {
                        let (_, processor) = self.chain.remove(pos);
                        self.retire(Retired::Processor(processor));
                    }
                }
                PortCommand::ReplaceKernel {
                    slot,
                    kernel,
                    sample_rate,
                } => {
                    let old = match self.chain.iter_mut().find(|(id, _)| *id == slot) {
                        Some((_, processor)) => processor.replace_kernel(kernel, sample_rate),
                        None => kernel,
                    };
                    self.retire(Retired::Kernel(old));
                }
            }
        }
    }

    fn retire(&self, item: Retired) {
        // A full or closed queue hands the item back and it drops here.
        let _ = self.retired_tx.try_send(item);
    }

    /// Drain commands, then run the block through each processor in order.
    pub fn process_block(&mut self, buffer: &mut [f32]) {
        self.drain_commands();
        for (_, processor) in &mut self.chain {
            processor.process_block(buffer);
        }
    }

    /// Slot ids in processing order.
    pub fn order(&self) -> Vec<SlotId> {
        self.chain.iter().map(|(id, _)| *id).collect()
    }

    /// Number of attached processors.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Returns true if nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// The processor attached for a slot.
    pub fn processor(&self, slot: SlotId) -> Option<&EngineProcessor> {
        self.chain
            .iter()
            .find(|(id, _)| *id == slot)
            .map(|(_, p)| p)
    }

    /// In place: each listed id is rotated into the next position, so
    /// unlisted slots keep their relative order behind the listed ones.
    fn reorder(&mut self, order: &[SlotId]) {
        let mut next = 0;
        for id in order {
            if let Some(offset) = self.chain[next..].iter().position(|(slot, _)| slot == id) {
                self.chain[next..=next + offset].rotate_right(1);
                next += 1;
            }
        }
    }
}

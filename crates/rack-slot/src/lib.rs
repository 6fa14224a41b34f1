//! Rack Slot - control logic for one effect slot in a signal chain
//!
//! An [`EffectSlotController`] wires a single effect engine into a host chain.
//! It maps the slot's four controls (bypass, wet/dry, decay, gate) onto
//! engine state, derives the auto-quit timeout from the decay time and the
//! host's buffering, saves and restores itself as an [`Element`], and raises
//! [`SlotEvent`]s instead of rearranging the chain itself.
//!
//! # Example
//!
//! ```rust
//! use rack_slot::{HostContext, Rack, audio_port};
//!
//! let (port, mut audio) = audio_port();
//! let mut rack = Rack::new(HostContext::default(), port);
//! let echo = rack.insert("echo").unwrap();
//!
//! let slot = rack.slot_mut(echo).unwrap();
//! slot.set_wet_level(0.5);
//! slot.set_decay(1200.0);
//! let saved = slot.save_state();
//! slot.request_removal();
//!
//! rack.pump();
//! assert!(rack.is_empty());
//!
//! // Audio thread
//! let mut block = [0.0f32; 256];
//! audio.process_block(&mut block);
//! assert!(audio.is_empty());
//! # let _ = saved;
//! ```
//!
//! [`Element`]: rack_config::Element

pub mod controller;
pub mod coordinator;
pub mod error;
pub mod event;
pub mod host;
pub mod port;
pub mod slot_controls;

pub use controller::EffectSlotController;
pub use coordinator::{ChainCoordinator, Membership, Rack};
pub use error::SlotError;
pub use event::{SlotEvent, SlotId, event_channel};
pub use host::HostContext;
pub use port::{AudioPort, PortCommand, PortProcessor, RETIRED_CAPACITY, Retired, audio_port};
pub use slot_controls::SlotControl;

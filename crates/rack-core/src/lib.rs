//! Rack Core - engine-side primitives for an effect slot
//!
//! This crate holds everything that runs below the slot controller: the DSP
//! kernel abstraction, parameter metadata, the lock-free bridge between the
//! control thread and the audio thread, and the auto-quit scheduling.
//!
//! # Core Abstractions
//!
//! - [`Effect`] / [`EffectWithParams`] - opaque DSP kernels
//! - [`ParamDescriptor`] / [`ParameterInfo`] - parameter introspection
//! - [`EffectEngine`] - the capability set a slot controller drives
//! - [`engine_pair`] - builds an [`EngineHandle`] (control thread) and an
//!   [`EngineProcessor`] (audio thread) sharing one [`EngineShared`]
//! - [`buffer_count`] - decay time to auto-quit buffer count
//!
//! # Example
//!
//! ```rust
//! use rack_core::{Effect, EffectEngine, ParamDescriptor, ParameterInfo, buffer_count, engine_pair};
//!
//! struct Invert;
//!
//! impl Effect for Invert {
//!     fn process(&mut self, input: f32) -> f32 { -input }
//!     fn set_sample_rate(&mut self, _sample_rate: f32) {}
//!     fn reset(&mut self) {}
//! }
//!
//! impl ParameterInfo for Invert {
//!     fn param_count(&self) -> usize { 0 }
//!     fn param_info(&self, _index: usize) -> Option<ParamDescriptor> { None }
//!     fn get_param(&self, _index: usize) -> f32 { 0.0 }
//!     fn set_param(&mut self, _index: usize, _value: f32) {}
//! }
//!
//! let (handle, mut processor) = engine_pair("Invert", Box::new(Invert), 44100.0, 256);
//! handle.set_timeout_buffers(buffer_count(100.0, 44100, 256));
//!
//! let mut block = [0.5f32; 256];
//! processor.process_block(&mut block);
//! assert_eq!(block[0], -0.5);
//! ```
//!
//! # Threading
//!
//! Control-side setters are atomic stores and the audio side only loads, so
//! neither thread ever waits on the other.

pub mod effect;
pub mod effect_with_params;
pub mod engine;
pub mod math;
pub mod param;
pub mod param_info;
pub mod processor;
pub mod shared;
pub mod timeout;

pub use effect::Effect;
pub use effect_with_params::EffectWithParams;
pub use engine::{EffectEngine, EngineHandle, engine_pair};
pub use math::{db_to_linear, flush_denormal, mean_square, wet_dry_mix};
pub use param::SmoothedParam;
pub use param_info::{ParamDescriptor, ParamUnit, ParameterInfo};
pub use processor::{EngineProcessor, RunState};
pub use shared::EngineShared;
pub use timeout::{DECAY_MAX_MS, DECAY_MIN_MS, buffer_count};

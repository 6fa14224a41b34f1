//! Effect registry and factory for rack slots.
//!
//! A slot is created from an effect identity. The registry resolves that
//! identity to descriptor metadata (display name, short label, editor tag)
//! and a factory that builds the DSP kernel. Unknown identities are an error,
//! never a silent fallback.
//!
//! # Example
//!
//! ```rust
//! use rack_core::EffectEngine;
//! use rack_registry::EffectRegistry;
//!
//! let registry = EffectRegistry::new();
//! for effect in registry.all_effects() {
//!     println!("{}: {}", effect.id, effect.description);
//! }
//!
//! let (handle, _processor) = registry.instantiate("echo", 48000.0, 256).unwrap();
//! assert_eq!(handle.display_name(), "Echo");
//! assert!(registry.create("nope", 48000.0).is_err());
//! ```

pub mod builtin;

use rack_core::{EffectWithParams, EngineHandle, EngineProcessor, engine_pair};
use thiserror::Error;

use crate::builtin::{Amplifier, Echo, Invert};

/// Category of effect, used to group listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectCategory {
    /// Delay, reverb and other effects with a tail.
    TimeBased,
    /// Gain stages and signal utilities.
    Utility,
}

impl EffectCategory {
    /// Human-readable name.
    pub const fn name(&self) -> &'static str {
        match self {
            EffectCategory::TimeBased => "Time-Based",
            EffectCategory::Utility => "Utility",
        }
    }
}

/// Describes an effect in the registry.
#[derive(Debug, Clone)]
pub struct EffectDescriptor {
    /// Unique identifier (lowercase, no spaces).
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Short label shown on the slot.
    pub short_name: &'static str,
    /// Brief description.
    pub description: &'static str,
    /// Tag of the nested editor-state element in saved slot state.
    pub editor_tag: &'static str,
    /// Category for organization.
    pub category: EffectCategory,
    /// Number of editable parameters.
    pub param_count: usize,
}

/// Errors from registry lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No effect is registered under the given identity.
    #[error("unknown effect: {0}")]
    UnknownEffect(String),
}

/// Factory function type for creating kernels.
pub type EffectFactory = fn(f32) -> Box<dyn EffectWithParams + Send>;

struct RegistryEntry {
    descriptor: EffectDescriptor,
    factory: EffectFactory,
}

/// Registry of available effects.
pub struct EffectRegistry {
    entries: Vec<RegistryEntry>,
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectRegistry {
    /// Create a registry with the built-in effects registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_builtin_effects();
        registry
    }

    /// Create a registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            entries: Vec::with_capacity(3),
        }
    }

    fn register_builtin_effects(&mut self) {
        self.register(
            EffectDescriptor {
                id: "amplifier",
                name: "Amplifier",
                short_name: "Amp",
                description: "Smoothed gain stage, ±24 dB",
                editor_tag: "amplifiercontrols",
                category: EffectCategory::Utility,
                param_count: 1,
            },
            |sr| Box::new(Amplifier::new(sr)),
        );

        self.register(
            EffectDescriptor {
                id: "echo",
                name: "Echo",
                short_name: "Echo",
                description: "Feedback echo with up to 2 s delay",
                editor_tag: "echocontrols",
                category: EffectCategory::TimeBased,
                param_count: 2,
            },
            |sr| Box::new(Echo::new(sr)),
        );

        self.register(
            EffectDescriptor {
                id: "invert",
                name: "Invert",
                short_name: "Inv",
                description: "Polarity inversion, no controls",
                editor_tag: "invertcontrols",
                category: EffectCategory::Utility,
                param_count: 0,
            },
            |_| Box::new(Invert),
        );
    }

    /// Register an effect. A later registration under an existing id
    /// replaces the earlier one.
    pub fn register(&mut self, descriptor: EffectDescriptor, factory: EffectFactory) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.descriptor.id == descriptor.id)
        {
            tracing::debug!(id = descriptor.id, "replacing registered effect");
            entry.descriptor = descriptor;
            entry.factory = factory;
            return;
        }
        self.entries.push(RegistryEntry {
            descriptor,
            factory,
        });
    }

    /// Returns descriptors for all registered effects.
    pub fn all_effects(&self) -> Vec<&EffectDescriptor> {
        self.entries.iter().map(|e| &e.descriptor).collect()
    }

    /// Returns descriptors for effects in a category.
    pub fn effects_in_category(&self, category: EffectCategory) -> Vec<&EffectDescriptor> {
        self.entries
            .iter()
            .filter(|e| e.descriptor.category == category)
            .map(|e| &e.descriptor)
            .collect()
    }

    /// Get a descriptor by effect ID.
    pub fn get(&self, id: &str) -> Option<&EffectDescriptor> {
        self.entry(id).map(|e| &e.descriptor)
    }

    /// Get a descriptor by effect ID, failing on unknown identities.
    pub fn descriptor(&self, id: &str) -> Result<&EffectDescriptor, RegistryError> {
        self.get(id)
            .ok_or_else(|| RegistryError::UnknownEffect(id.to_owned()))
    }

    /// Create a kernel by ID.
    pub fn create(
        &self,
        id: &str,
        sample_rate: f32,
    ) -> Result<Box<dyn EffectWithParams + Send>, RegistryError> {
        self.entry(id)
            .map(|e| (e.factory)(sample_rate))
            .ok_or_else(|| RegistryError::UnknownEffect(id.to_owned()))
    }

    /// Create a kernel by ID and wrap it in an engine pair.
    ///
    /// The handle goes to the slot controller; the processor goes to the
    /// audio thread.
    pub fn instantiate(
        &self,
        id: &str,
        sample_rate: f32,
        max_block: usize,
    ) -> Result<(EngineHandle, EngineProcessor), RegistryError> {
        let entry = self
            .entry(id)
            .ok_or_else(|| RegistryError::UnknownEffect(id.to_owned()))?;
        let kernel = (entry.factory)(sample_rate);
        Ok(engine_pair(
            entry.descriptor.name,
            kernel,
            sample_rate,
            max_block,
        ))
    }

    /// Number of registered effects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, id: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| e.descriptor.id == id)
    }
}

//! Slot construction errors.

use rack_registry::RegistryError;
use thiserror::Error;

/// Errors returned when creating a slot.
#[derive(Debug, Error)]
pub enum SlotError {
    /// The effect identity did not resolve in the registry.
    #[error("cannot create slot: {0}")]
    UnknownEffect(#[from] RegistryError),
}

//! Reference kernels shipped with the registry.

mod amplifier;
mod echo;
mod invert;

pub use amplifier::Amplifier;
pub use echo::Echo;
pub use invert::Invert;

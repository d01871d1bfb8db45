//! graft-remap-core: clone mapping and kind-dispatched reference rewriting

pub mod context;
pub mod error;
pub mod mapping;
pub mod registry;
pub mod strategies;
pub mod strategy;

pub use context::{ParameterSetFill, RemapContext, RemapOptions};
pub use error::RemapError;
pub use mapping::CloneMapping;
pub use registry::{RegistrationInfo, RemapRegistry, FALLBACK_PRIORITY};
pub use strategy::RemapStrategy;

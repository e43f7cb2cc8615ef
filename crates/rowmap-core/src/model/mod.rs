//! Output models
//!
//! - `ModelSchema`: caller-declared classes and their fields
//! - `ModelObject` / `ModelInstance`: attribute-style objects built from a schema
//! - `ScratchRecord`: map-like temporary target used by component groups
//! - `OutputTarget`: the capability trait the engine writes through

pub mod object;
pub mod schema;
pub mod scratch;
pub mod target;

pub use object::{ModelInstance, ModelObject};
pub use schema::{FieldSpec, ModelClass, ModelSchema};
pub use scratch::ScratchRecord;
pub use target::OutputTarget;

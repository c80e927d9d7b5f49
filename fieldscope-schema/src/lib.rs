//! Versioned schema families
//!
//! A family is every version of one schema package, gathered from three
//! roots (base, distributed plugins, instance) and handed to a
//! [`FamilyBuilder`] that turns it into a validated family. The builder is
//! injected at construction so tests can substitute their own.

pub mod builder;
pub mod error;
pub mod family;
pub mod loader;

pub use builder::{FamilyBuilder, LineageBuilder};
pub use error::{Result, SchemaError};
pub use family::{SchemaFamily, SchemaVersion, VersionedSchema};
pub use loader::{BaseLoadPaths, BaseSchemaLoader};

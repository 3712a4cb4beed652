#![deny(missing_docs)]

//! # mdi-core: Foundational Types for Metadata Import Validation
//!
//! This crate defines the types every other crate in the workspace builds on.
//! It has no internal crate dependencies; externally it uses `serde`, `serde_json`,
//! `thiserror` and `sha2`.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for catalog identifiers.** An [`EntryName`] is not an
//!    [`EntryTypeName`]; each validates its format at construction.
//!
//! 2. **Explicit field presence.** Every extracted field is a [`Field`]:
//!    missing, present-but-empty, or present with a value. No probing
//!    through nested maps with fallbacks.
//!
//! 3. **One canonical field-naming convention.** Records use the camelCase
//!    import format. The older snake_case format is translated at the parse
//!    boundary by [`legacy::translate_legacy_keys`], never handled by a
//!    second code path.
//!
//! 4. **[`ValidationError`] for identifier rejections.** Structured errors
//!    with `thiserror`, no `.unwrap()` outside tests.

pub mod digest;
pub mod error;
pub mod identity;
pub mod legacy;
pub mod record;

// Re-export primary types at crate root for ergonomic imports.
pub use digest::{ContentDigest, Sha256Accumulator};
pub use error::ValidationError;
pub use identity::{entry_group_path, AspectKey, EntryName, EntryTypeName, FullyQualifiedName};
pub use legacy::translate_legacy_keys;
pub use record::{
    Field, FieldDescriptor, ImportRecord, SchemaAspect, SCHEMA_ASPECT_TYPE, UNMAPPED_METADATA_TYPE,
};

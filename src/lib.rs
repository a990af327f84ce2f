#![warn(missing_docs)]
//! Runtime resource packs built in memory.
//!
//! Re-exports the identifier and content types of `runpack-core`, the pack
//! tree of `runpack-pack` and the registration table of `runpack-callbacks`,
//! and adds TOML manifests for pack identity.

pub mod manifest;

pub use manifest::PackManifest;
pub use runpack_callbacks::*;
pub use runpack_core::*;
pub use runpack_pack::*;

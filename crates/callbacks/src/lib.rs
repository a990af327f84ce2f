#![warn(missing_docs)]
//! Registration of runtime packs with a host, and the helpers a host uses to
//! splice the registered packs into its own pack list.

mod callbacks;
mod position;

pub use callbacks::{log_pack_list, PackAdder, PackCallback, PackCallbacks, SharedPack, VANILLA_PACK_ID};
pub use position::{InsertionPosition, PackPosition};

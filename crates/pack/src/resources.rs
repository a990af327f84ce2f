//! The read-only view consumers have of a pack.

use crate::entry::Resource;
use crate::metadata::{MetadataSection, PackInfo};
use runpack_core::{Identifier, PackType};
use std::collections::BTreeSet;

/// Uniform read access to a pack's contents.
///
/// Implementations are shared across threads once published, so every
/// method takes `&self`.
pub trait PackResources: Send + Sync {
    /// Identity of the pack.
    fn location(&self) -> &PackInfo;

    /// Pack id.
    fn pack_id(&self) -> &str {
        &self.location().id
    }

    /// A file at the pack root, matched exactly.
    fn get_root_resource(&self, segments: &[&str]) -> Option<Resource>;

    /// The resource stored for `id` under `pack_type`.
    fn get_resource(&self, pack_type: PackType, id: &Identifier) -> Option<Resource>;

    /// Visit every resource under `<pack_type>/<namespace>/<prefix>`.
    ///
    /// Visited identifiers are `namespace:<prefix>/<relative path>`. Paths that
    /// do not form a valid identifier are skipped.
    fn list_resources(
        &self,
        pack_type: PackType,
        namespace: &str,
        prefix: &str,
        visit: &mut dyn FnMut(Identifier, &Resource),
    );

    /// Namespaces present under `pack_type`.
    fn get_namespaces(&self, pack_type: PackType) -> BTreeSet<String>;

    /// Metadata section by name; unknown names yield `None`.
    fn metadata_section(&self, name: &str) -> Option<MetadataSection<'_>>;

    /// Release the pack. In-memory packs have nothing to release.
    fn close(&self) {}
}

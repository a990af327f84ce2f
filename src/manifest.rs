//! TOML manifests describing a runtime pack's identity and metadata.
//!
//! ```toml
//! id = "mymod:generated"
//! title = "Generated content"
//! version = "1.2.0"
//! description = "Things built at startup"
//! pack_type = "server_data"
//!
//! [supported_formats]
//! min_inclusive = 40
//! max_inclusive = 48
//!
//! [features]
//! enabled = ["minecraft:bundle"]
//!
//! [[filter.block]]
//! namespace = "minecraft"
//! path = "recipe/.*"
//!
//! [[overlays]]
//! directory = "legacy"
//! formats = [40, 45]
//! ```

use anyhow::{Context, Result};
use runpack_core::{Identifier, PackType, Text};
use runpack_pack::{
    FeatureFlagsSection, FormatRange, OverlayEntry, OverlaySection, PackInfo, PackMetadata,
    ResourceFilterSection, RuntimePack,
};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Identity and metadata of a pack, as written in a manifest file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackManifest {
    /// Pack identifier; its path becomes the pack id.
    pub id: Identifier,
    /// Display title.
    pub title: String,
    /// Version recorded in the known-pack pin.
    pub version: String,
    /// Description shown in pack lists.
    #[serde(default)]
    pub description: String,
    /// Which half of the content the pack serves.
    #[serde(default = "default_pack_type")]
    pub pack_type: PackType,
    /// Pack format override; the current format of `pack_type` otherwise.
    #[serde(default)]
    pub pack_format: Option<u32>,
    /// Other formats the pack works with.
    #[serde(default)]
    pub supported_formats: Option<FormatRange>,
    /// Required feature flags.
    #[serde(default)]
    pub features: Option<FeatureFlagsSection>,
    /// Resources to hide from lower packs.
    #[serde(default)]
    pub filter: Option<ResourceFilterSection>,
    /// Overlay directories.
    #[serde(default)]
    pub overlays: Vec<OverlayEntry>,
}

fn default_pack_type() -> PackType {
    PackType::ServerData
}

impl PackManifest {
    /// Parse a manifest from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse pack manifest")
    }

    /// Read and parse the manifest at `path`.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let manifest: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!(path = %path.display(), id = %manifest.id, "loaded pack manifest");
        Ok(manifest)
    }

    /// Runtime pack info for the manifest.
    pub fn info(&self) -> PackInfo {
        PackInfo::runtime(&self.id, Text::literal(self.title.clone()), &self.version)
    }

    /// The `pack` metadata section.
    pub fn metadata(&self) -> PackMetadata {
        let mut metadata = PackMetadata::runtime(Text::literal(self.description.clone()), self.pack_type);
        if let Some(format) = self.pack_format {
            metadata.pack_format = format;
        }
        metadata.supported_formats = self.supported_formats;
        metadata
    }

    /// Empty pack carrying every section the manifest declares.
    pub fn into_pack(self) -> RuntimePack {
        let mut pack = RuntimePack::new(self.info(), self.metadata());
        if let Some(features) = self.features {
            pack = pack.with_features(features);
        }
        if let Some(filter) = self.filter {
            pack = pack.with_filter(filter);
        }
        if !self.overlays.is_empty() {
            pack = pack.with_overlays(OverlaySection {
                entries: self.overlays,
            });
        }
        pack
    }
}

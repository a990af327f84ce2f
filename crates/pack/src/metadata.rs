//! Pack identity and the metadata sections a pack advertises.

use runpack_core::{Identifier, PackType, Text};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Where a pack came from; decides how its name is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackSource {
    /// Selected by the host.
    Default,
    /// Shipped with the host.
    BuiltIn,
    /// Tied to an experimental feature.
    Feature,
    /// Stored with a world.
    World,
    /// Sent by a server.
    Server,
    /// Generated in memory while the host runs.
    Runtime,
}

impl PackSource {
    /// Wrap a pack title with the source annotation.
    pub fn decorate(self, name: Text) -> Text {
        let source = match self {
            PackSource::Runtime => Text::literal("runtime generated"),
            PackSource::Default => return name,
            PackSource::BuiltIn => Text::translatable("pack.source.builtin"),
            PackSource::Feature => Text::translatable("pack.source.feature"),
            PackSource::World => Text::translatable("pack.source.world"),
            PackSource::Server => Text::translatable("pack.source.server"),
        };
        Text::translatable_with("pack.nameAndSource", vec![name, source])
    }

    /// Whether packs from this source are enabled without user action.
    pub fn should_add_automatically(self) -> bool {
        !matches!(self, PackSource::Feature)
    }
}

/// Version pin that keeps hosts from flagging a pack as experimental.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KnownPack {
    /// Owning namespace.
    pub namespace: String,
    /// Pack id within the namespace.
    pub id: String,
    /// Pack version, usually the producer's version.
    pub version: String,
}

/// Identity of a pack.
#[derive(Debug, Clone, PartialEq)]
pub struct PackInfo {
    /// Pack id.
    pub id: String,
    /// Display title.
    pub title: Text,
    /// Origin of the pack.
    pub source: PackSource,
    /// Optional known-pack pin.
    pub known_pack: Option<KnownPack>,
}

impl PackInfo {
    /// Info for a pack generated at runtime.
    ///
    /// The pack id is the identifier's path and the known-pack pin uses the
    /// full identifier plus `version`.
    pub fn runtime(id: &Identifier, title: Text, version: &str) -> Self {
        Self {
            id: id.path().to_string(),
            title,
            source: PackSource::Runtime,
            known_pack: Some(KnownPack {
                namespace: id.namespace().to_string(),
                id: id.path().to_string(),
                version: version.to_string(),
            }),
        }
    }

    /// Title decorated with the pack source.
    pub fn display_title(&self) -> Text {
        self.source.decorate(self.title.clone())
    }
}

/// Inclusive range of pack formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatRange {
    /// Lowest supported format.
    pub min_inclusive: u32,
    /// Highest supported format.
    pub max_inclusive: u32,
}

impl FormatRange {
    /// Range `min..=max`.
    pub fn new(min_inclusive: u32, max_inclusive: u32) -> Self {
        Self {
            min_inclusive,
            max_inclusive,
        }
    }

    /// Whether `format` falls in the range.
    pub fn contains(self, format: u32) -> bool {
        (self.min_inclusive..=self.max_inclusive).contains(&format)
    }
}

impl Serialize for FormatRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.min_inclusive == self.max_inclusive {
            serializer.serialize_u32(self.min_inclusive)
        } else {
            [self.min_inclusive, self.max_inclusive].serialize(serializer)
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFormatRange {
    Single(u32),
    Pair([u32; 2]),
    Full {
        min_inclusive: u32,
        max_inclusive: u32,
    },
}

impl<'de> Deserialize<'de> for FormatRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawFormatRange::deserialize(deserializer)? {
            RawFormatRange::Single(format) => FormatRange::new(format, format),
            RawFormatRange::Pair([min, max]) => FormatRange::new(min, max),
            RawFormatRange::Full {
                min_inclusive,
                max_inclusive,
            } => FormatRange::new(min_inclusive, max_inclusive),
        })
    }
}

/// The `pack` section: description and format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackMetadata {
    /// Pack description.
    pub description: Text,
    /// Format the pack was written for.
    pub pack_format: u32,
    /// Other formats the pack also works with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_formats: Option<FormatRange>,
}

impl PackMetadata {
    /// Metadata at the current format of `pack_type`.
    pub fn runtime(description: Text, pack_type: PackType) -> Self {
        Self {
            description,
            pack_format: pack_type.current_pack_format(),
            supported_formats: None,
        }
    }
}

/// The `features` section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureFlagsSection {
    /// Feature flags the pack requires.
    pub enabled: Vec<Identifier>,
}

/// Namespace/path patterns of a resource filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourcePattern {
    /// Namespace pattern; absent matches every namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Path pattern; absent matches every path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// The `filter` section: resources from lower packs to hide.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceFilterSection {
    /// Blocked patterns.
    pub block: Vec<ResourcePattern>,
}

/// One overlay directory and the formats it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayEntry {
    /// Formats the overlay applies to.
    pub formats: FormatRange,
    /// Overlay directory at the pack root.
    pub directory: String,
}

/// The `overlays` section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverlaySection {
    /// Overlay entries.
    pub entries: Vec<OverlayEntry>,
}

/// The closed set of metadata sections a pack can answer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKind {
    /// `pack`
    Pack,
    /// `features`
    Features,
    /// `filter`
    Filter,
    /// `overlays`
    Overlays,
}

impl MetadataKind {
    /// Every kind, in `pack.mcmeta` order.
    pub const ALL: [MetadataKind; 4] = [
        MetadataKind::Pack,
        MetadataKind::Features,
        MetadataKind::Filter,
        MetadataKind::Overlays,
    ];

    /// Section name in `pack.mcmeta`.
    pub fn name(self) -> &'static str {
        match self {
            MetadataKind::Pack => "pack",
            MetadataKind::Features => "features",
            MetadataKind::Filter => "filter",
            MetadataKind::Overlays => "overlays",
        }
    }

    /// Kind for a section name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// A borrowed metadata section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetadataSection<'a> {
    /// Description and format.
    Pack(&'a PackMetadata),
    /// Required feature flags.
    Features(&'a FeatureFlagsSection),
    /// Resource filter.
    Filter(&'a ResourceFilterSection),
    /// Overlays.
    Overlays(&'a OverlaySection),
}

impl MetadataSection<'_> {
    /// Kind of this section.
    pub fn kind(&self) -> MetadataKind {
        match self {
            MetadataSection::Pack(_) => MetadataKind::Pack,
            MetadataSection::Features(_) => MetadataKind::Features,
            MetadataSection::Filter(_) => MetadataKind::Filter,
            MetadataSection::Overlays(_) => MetadataKind::Overlays,
        }
    }

    /// JSON form of the section body.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            MetadataSection::Pack(section) => serde_json::to_value(section),
            MetadataSection::Features(section) => serde_json::to_value(section),
            MetadataSection::Filter(section) => serde_json::to_value(section),
            MetadataSection::Overlays(section) => serde_json::to_value(section),
        }
    }
}

//! Top-level resource partitions of a pack.

use serde::{Deserialize, Serialize};

/// Pack format of server data packs understood by this crate.
pub const DATA_PACK_FORMAT: u32 = 48;

/// Pack format of client resource packs understood by this crate.
pub const RESOURCE_PACK_FORMAT: u32 = 34;

/// Which half of the content a pack serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackType {
    /// Server data (tags, recipes, advancements, enchantments, loot...).
    ServerData,
    /// Client assets (textures, models, language files...).
    ClientResources,
}

impl PackType {
    /// Both pack types.
    pub const ALL: [PackType; 2] = [PackType::ServerData, PackType::ClientResources];

    /// Top-level directory holding resources of this type.
    pub const fn directory(self) -> &'static str {
        match self {
            PackType::ServerData => "data",
            PackType::ClientResources => "assets",
        }
    }

    /// Pack format a freshly generated pack of this type declares.
    pub const fn current_pack_format(self) -> u32 {
        match self {
            PackType::ServerData => DATA_PACK_FORMAT,
            PackType::ClientResources => RESOURCE_PACK_FORMAT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_are_distinct() {
        assert_eq!(PackType::ServerData.directory(), "data");
        assert_eq!(PackType::ClientResources.directory(), "assets");
    }

    #[test]
    fn deserializes_snake_case() {
        let ty: PackType = serde_json::from_str("\"client_resources\"").unwrap();
        assert_eq!(ty, PackType::ClientResources);
    }
}

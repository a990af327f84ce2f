#![warn(missing_docs)]
//! Test helpers for runtime packs: tracing setup, resource readers and a
//! deterministic dump of pack contents for snapshot tests.

mod snapshot;

use anyhow::{Context, Result};
use runpack_core::{Identifier, PackType};
use runpack_pack::{PackResources, Resource};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing_subscriber::EnvFilter;

pub use snapshot::*;

/// Install a test-friendly subscriber once per process.
///
/// Honors `RUST_LOG`, defaulting to `warn`. Later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

/// Read a resource as UTF-8 text.
pub fn read_string(resource: &Resource) -> Result<String> {
    let bytes = resource.read_to_vec().context("Failed to open resource")?;
    String::from_utf8(bytes).context("Resource is not valid UTF-8")
}

/// Read the resource at `id` and parse it as JSON.
pub fn read_json(pack: &dyn PackResources, pack_type: PackType, id: &str) -> Result<Value> {
    let id: Identifier = id.parse().with_context(|| format!("Invalid identifier {id}"))?;
    let resource = pack
        .get_resource(pack_type, &id)
        .with_context(|| format!("No resource {id} in pack {}", pack.pack_id()))?;
    let bytes = resource
        .read_to_vec()
        .with_context(|| format!("Failed to read {id}"))?;
    serde_json::from_slice(&bytes).with_context(|| format!("Failed to parse {id}"))
}

/// Identifiers listed under `namespace/prefix`, sorted.
pub fn listed_ids(
    pack: &dyn PackResources,
    pack_type: PackType,
    namespace: &str,
    prefix: &str,
) -> BTreeSet<Identifier> {
    let mut ids = BTreeSet::new();
    pack.list_resources(pack_type, namespace, prefix, &mut |id, _| {
        ids.insert(id);
    });
    ids
}

/// Every resource of one pack type, keyed by `namespace:path`.
///
/// JSON resources are stored parsed; anything else is kept as text.
#[derive(Debug, Default, Serialize)]
pub struct PackDump {
    /// Pack id.
    pub pack: String,
    /// Resources in identifier order.
    pub files: BTreeMap<String, Value>,
}

impl PackDump {
    /// Collect every resource of `pack_type` in `pack`.
    pub fn capture(pack: &dyn PackResources, pack_type: PackType) -> Result<Self> {
        let mut found = Vec::new();
        for namespace in pack.get_namespaces(pack_type) {
            pack.list_resources(pack_type, &namespace, "", &mut |id, resource| {
                found.push((id, resource.clone()));
            });
        }

        let mut files = BTreeMap::new();
        for (id, resource) in found {
            let text = read_string(&resource).with_context(|| format!("Failed to read {id}"))?;
            let value = if id.path().ends_with(".json") {
                serde_json::from_str(&text).with_context(|| format!("Failed to parse {id}"))?
            } else {
                Value::String(text)
            };
            files.insert(id.to_string(), value);
        }

        Ok(Self {
            pack: pack.pack_id().to_string(),
            files,
        })
    }

    /// Paths of the captured resources.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runpack_core::Text;
    use runpack_pack::{PackInfo, PackMetadata, RuntimePack};
    use serde_json::json;

    fn pack() -> RuntimePack {
        let id = Identifier::parse("kit:dump").unwrap();
        let mut pack = RuntimePack::new(
            PackInfo::runtime(&id, Text::literal("Dump"), "0.1.0"),
            PackMetadata::runtime(Text::literal("dump"), PackType::ServerData),
        );
        pack.add_text(PackType::ServerData, &["kit", "a", "b.json"], r#"{"x": 1}"#)
            .unwrap();
        pack.add_text(PackType::ServerData, &["kit", "notes.txt"], "plain")
            .unwrap();
        pack.add_text(PackType::ClientResources, &["kit", "lang", "en_us.json"], "{}")
            .unwrap();
        pack
    }

    #[test]
    fn dump_covers_one_pack_type() {
        let dump = PackDump::capture(&pack(), PackType::ServerData).unwrap();
        assert_eq!(dump.pack, "dump");
        assert_eq!(dump.paths().collect::<Vec<_>>(), ["kit:a/b.json", "kit:notes.txt"]);
        assert_eq!(dump.files["kit:a/b.json"], json!({"x": 1}));
        assert_eq!(dump.files["kit:notes.txt"], json!("plain"));
    }

    #[test]
    fn readers_report_missing_resources() {
        let pack = pack();
        assert_eq!(
            read_json(&pack, PackType::ServerData, "kit:a/b.json").unwrap(),
            json!({"x": 1})
        );
        let err = read_json(&pack, PackType::ServerData, "kit:missing.json").unwrap_err();
        assert!(err.to_string().contains("kit:missing.json"));
        assert_eq!(
            listed_ids(&pack, PackType::ServerData, "kit", "a"),
            BTreeSet::from([Identifier::parse("kit:a/b.json").unwrap()])
        );
    }
}

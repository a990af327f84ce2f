use proptest::prelude::*;
use runpack::{Identifier, PackInfo, PackMetadata, PackResources, PackType, RuntimePack, Text};
use runpack_testkit::{listed_ids, read_string};
use std::collections::{BTreeSet, HashSet};

fn empty_pack() -> RuntimePack {
    let id = Identifier::new("prop", "pack").unwrap();
    RuntimePack::new(
        PackInfo::runtime(&id, Text::literal("prop"), "0"),
        PackMetadata::runtime(Text::literal("prop"), PackType::ServerData),
    )
}

fn resource_path() -> impl Strategy<Value = (String, Vec<String>)> {
    (
        "[a-z]{1,6}",
        proptest::collection::vec("[a-z0-9_]{1,6}", 0..3),
        "[a-z0-9_]{1,6}",
    )
        .prop_map(|(namespace, mut dirs, file)| {
            dirs.push(format!("{file}.json"));
            (namespace, dirs)
        })
}

proptest! {
    #[test]
    fn added_resources_are_found_and_listed(
        pack_type in proptest::sample::select(PackType::ALL.to_vec()),
        paths in proptest::collection::hash_set(resource_path(), 1..24)
    ) {
        let mut pack = empty_pack();
        for (namespace, segments) in &paths {
            let mut path = vec![namespace.as_str()];
            path.extend(segments.iter().map(String::as_str));
            pack.add_text(pack_type, &path, segments.join("/")).unwrap();
        }

        let namespaces: BTreeSet<String> = paths.iter().map(|(ns, _)| ns.clone()).collect();
        for other in PackType::ALL {
            let expected = if other == pack_type { namespaces.clone() } else { BTreeSet::new() };
            prop_assert_eq!(pack.get_namespaces(other), expected);
        }

        let mut expected = HashSet::new();
        for (namespace, segments) in &paths {
            let id = Identifier::new(namespace, &segments.join("/")).unwrap();
            let resource = pack.get_resource(pack_type, &id).unwrap();
            prop_assert_eq!(read_string(&resource).unwrap(), segments.join("/"));
            expected.insert(id);
        }

        let mut listed = HashSet::new();
        for namespace in &namespaces {
            listed.extend(listed_ids(&pack, pack_type, namespace, ""));
        }
        prop_assert_eq!(listed, expected);
    }
}

use runpack::{
    Identifier, InsertionPosition, PackCallbacks, PackInfo, PackManifest, PackMetadata,
    PackPosition, PackType, RuntimePack, SharedPack, Text, VANILLA_PACK_ID,
};
use runpack_testkit::{init_tracing, read_json};
use serde_json::json;
use std::sync::Arc;
use std::thread;

fn generated(name: &str) -> RuntimePack {
    let mut pack = PackManifest::from_toml_str(&format!(
        "id = \"gen:{name}\"\ntitle = \"{name}\"\nversion = \"1\"\n"
    ))
    .unwrap()
    .into_pack();
    let file = format!("{name}.json");
    pack.add_text(
        PackType::ServerData,
        &["gen", "marker", file.as_str()],
        format!(r#"{{"from": "{name}"}}"#),
    )
    .unwrap();
    pack
}

fn host_pack(id: &str) -> SharedPack {
    let identifier = Identifier::new("host", id).unwrap();
    Arc::new(RuntimePack::new(
        PackInfo::runtime(&identifier, Text::literal(id), "1"),
        PackMetadata::runtime(Text::literal(id), PackType::ServerData),
    ))
}

fn ids(packs: &[SharedPack]) -> Vec<String> {
    packs.iter().map(|pack| pack.pack_id().to_string()).collect()
}

fn table() -> PackCallbacks {
    let mut callbacks = PackCallbacks::new();
    callbacks.register(PackPosition::BeforeAll, PackType::ServerData, |adder| {
        adder.add_pack(generated("early"));
    });
    callbacks.register(PackPosition::AfterVanilla, PackType::ServerData, |adder| {
        adder.add_pack(generated("patch_a"));
        adder.add_pack(generated("patch_b"));
    });
    callbacks.register(PackPosition::AfterAll, PackType::ServerData, |adder| {
        adder.add_pack(generated("late"));
    });
    callbacks.register(PackPosition::AfterUser, PackType::ServerData, |adder| {
        adder.add_pack(generated("user_top"));
    });
    callbacks
}

#[test]
fn assembled_list_places_generated_packs() {
    init_tracing();
    let packs = table().assemble(
        vec![host_pack(VANILLA_PACK_ID), host_pack("world")],
        PackType::ServerData,
    );
    assert_eq!(
        ids(&packs),
        ["early", "vanilla", "patch_a", "patch_b", "world", "late"]
    );

    let patch = &packs[2];
    assert_eq!(
        read_json(patch.as_ref(), PackType::ServerData, "gen:marker/patch_a.json").unwrap(),
        json!({"from": "patch_a"})
    );
}

#[test]
fn missing_builtin_pack_skips_after_vanilla_packs() {
    let packs = table().assemble(vec![host_pack("world")], PackType::ServerData);
    assert_eq!(ids(&packs), ["early", "world", "late"]);
}

#[test]
fn other_pack_type_is_left_alone() {
    let packs = table().assemble(vec![host_pack(VANILLA_PACK_ID)], PackType::ClientResources);
    assert_eq!(ids(&packs), ["vanilla"]);
    assert!(table().user_packs(PackType::ClientResources).is_empty());
}

#[test]
fn user_packs_go_to_the_top() {
    let user = table().user_packs(PackType::ServerData);
    assert_eq!(user.len(), 1);
    assert_eq!(user[0].0.pack_id(), "user_top");
    assert_eq!(user[0].1, InsertionPosition::Top);
}

#[test]
fn assembled_packs_are_read_from_many_threads() {
    let packs = table().assemble(vec![host_pack(VANILLA_PACK_ID)], PackType::ServerData);
    let handles: Vec<_> = packs
        .iter()
        .filter(|pack| pack.pack_id() != VANILLA_PACK_ID)
        .map(|pack| {
            let pack = Arc::clone(pack);
            thread::spawn(move || {
                let path = format!("gen:marker/{}.json", pack.pack_id());
                read_json(pack.as_ref(), PackType::ServerData, &path).unwrap()
            })
        })
        .collect();
    let mut seen: Vec<String> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap()["from"].as_str().unwrap().to_string())
        .collect();
    seen.sort();
    assert_eq!(seen, ["early", "late", "patch_a", "patch_b"]);
}

#[test]
fn every_position_has_a_key() {
    let mut callbacks = PackCallbacks::new();
    for position in PackPosition::ALL {
        callbacks.register(position, PackType::ServerData, |_| {});
        assert_eq!(callbacks.callback_count(position, PackType::ServerData), 1);
    }
    assert!(!callbacks.is_empty());
}

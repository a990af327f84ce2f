//! Path derivation for pack entries.
//!
//! Element documents live at `<namespace>/<elements dir...>/<local...>.json`,
//! tag documents at `<namespace>/<tags dir...>/<local...>.json`. Both paths are
//! relative to the pack-type directory (`data` or `assets`).

use crate::category::Category;
use crate::identifier::{Identifier, PATH_SEPARATOR};
use crate::key::TagKey;

/// Extension appended to every generated JSON document.
pub const JSON_EXTENSION: &str = ".json";

/// Directory segments holding the plain elements of `category`.
pub fn element_path(category: &Category) -> Vec<String> {
    split_dir(category.elements_dir())
}

/// Directory segments holding the tags of `category`.
pub fn tag_path(category: &Category) -> Vec<String> {
    split_dir(category.tags_dir())
}

/// The identifier's path, split on `/`.
pub fn split_local_path(id: &Identifier) -> Vec<String> {
    id.path_segments().map(str::to_string).collect()
}

/// Append `.json` to the final segment only.
pub fn with_json_extension(mut segments: Vec<String>) -> Vec<String> {
    if let Some(last) = segments.last_mut() {
        last.push_str(JSON_EXTENSION);
    }
    segments
}

/// `<namespace>/<base...>/<local...>.json`.
pub fn namespaced_file_path(base: &[String], id: &Identifier) -> Vec<String> {
    let mut path = Vec::with_capacity(base.len() + 2);
    path.push(id.namespace().to_string());
    path.extend(base.iter().cloned());
    path.extend(with_json_extension(split_local_path(id)));
    path
}

/// Full element path for `id` within `category`.
pub fn element_file_path(category: &Category, id: &Identifier) -> Vec<String> {
    namespaced_file_path(&element_path(category), id)
}

/// Full tag document path for `key`.
pub fn tag_file_path(key: &TagKey) -> Vec<String> {
    namespaced_file_path(&tag_path(key.category()), key.id())
}

fn split_dir(dir: &str) -> Vec<String> {
    dir.split(PATH_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Identifier {
        Identifier::parse(s).unwrap()
    }

    #[test]
    fn element_paths_follow_category_dir() {
        assert_eq!(element_path(&Category::recipe()), ["recipe"]);
        let modded = Category::new(id("mymod:gadget"));
        assert_eq!(element_path(&modded), ["mymod", "gadget"]);
        assert_eq!(tag_path(&modded), ["tags", "mymod", "gadget"]);
    }

    #[test]
    fn json_extension_only_touches_last_segment() {
        let segments = vec!["a".to_string(), "b".to_string()];
        assert_eq!(with_json_extension(segments), ["a", "b.json"]);
        assert!(with_json_extension(Vec::new()).is_empty());
    }

    #[test]
    fn composes_element_file_path() {
        let path = element_file_path(&Category::recipe(), &id("mymod:tools/hammer"));
        assert_eq!(path, ["mymod", "recipe", "tools", "hammer.json"]);
    }

    #[test]
    fn composes_tag_file_path() {
        let key = TagKey::item(id("minecraft:logs/oak"));
        assert_eq!(
            tag_file_path(&key),
            ["minecraft", "tags", "item", "logs", "oak.json"]
        );
    }

    #[test]
    fn legacy_dirs_compose_the_same_way() {
        let legacy = Category::with_dirs(id("minecraft:item"), "items", "tags/items");
        let key = TagKey::new(legacy, id("mymod:gems"));
        assert_eq!(tag_file_path(&key), ["mymod", "tags", "items", "gems.json"]);
    }
}

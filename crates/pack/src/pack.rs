//! [`RuntimePack`]: a pack assembled in memory.

use crate::entry::{PackEntry, Resource};
use crate::error::{display_path, PackError};
use crate::metadata::{
    FeatureFlagsSection, MetadataKind, MetadataSection, OverlaySection, PackInfo, PackMetadata,
    ResourceFilterSection,
};
use crate::recipe::{unlock_advancement_builder, PackRecipeOutput, RecipeBuilder, RecipeExport};
use crate::resources::PackResources;
use runpack_core::path::{element_path, namespaced_file_path, split_local_path, tag_file_path};
use runpack_core::{
    Advancement, AdvancementBuilder, AdvancementHolder, Category, Codec, Enchantment,
    EnchantmentBuilder, EnchantmentDefinition, Identifier, IntrinsicTagBuilder, PackType, Recipe,
    ResourceKey, SerdeCodec, TagBuilder, TagEntry, TagFile, TagKey,
};
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, trace, warn};

/// A pack whose contents are generated at runtime and kept in memory.
///
/// Built by a single producer through the `add_*` methods, then shared
/// read-only through [`PackResources`].
#[derive(Debug, Clone)]
pub struct RuntimePack {
    info: PackInfo,
    metadata: PackMetadata,
    features: Option<FeatureFlagsSection>,
    filter: Option<ResourceFilterSection>,
    overlays: Option<OverlaySection>,
    extra_files: HashMap<Vec<String>, Resource>,
    root: PackEntry,
}

impl RuntimePack {
    /// Empty pack with the given identity and `pack` section.
    pub fn new(info: PackInfo, metadata: PackMetadata) -> Self {
        Self {
            info,
            metadata,
            features: None,
            filter: None,
            overlays: None,
            extra_files: HashMap::new(),
            root: PackEntry::directory(),
        }
    }

    /// Attach a `features` section.
    pub fn with_features(mut self, features: FeatureFlagsSection) -> Self {
        self.features = Some(features);
        self
    }

    /// Attach a `filter` section.
    pub fn with_filter(mut self, filter: ResourceFilterSection) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Attach an `overlays` section.
    pub fn with_overlays(mut self, overlays: OverlaySection) -> Self {
        self.overlays = Some(overlays);
        self
    }

    /// Add a file at the pack root (e.g. `pack.png`).
    pub fn with_extra_file<I, S>(mut self, segments: I, resource: Resource) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_files
            .insert(segments.into_iter().map(Into::into).collect(), resource);
        self
    }

    /// Pack identity.
    pub fn info(&self) -> &PackInfo {
        &self.info
    }

    /// The `pack` section.
    pub fn metadata(&self) -> &PackMetadata {
        &self.metadata
    }

    /// Root of the resource tree.
    pub fn root(&self) -> &PackEntry {
        &self.root
    }

    /// Section of the given kind, if the pack has one.
    pub fn section(&self, kind: MetadataKind) -> Option<MetadataSection<'_>> {
        match kind {
            MetadataKind::Pack => Some(MetadataSection::Pack(&self.metadata)),
            MetadataKind::Features => self.features.as_ref().map(MetadataSection::Features),
            MetadataKind::Filter => self.filter.as_ref().map(MetadataSection::Filter),
            MetadataKind::Overlays => self.overlays.as_ref().map(MetadataSection::Overlays),
        }
    }

    /// The `pack.mcmeta` document describing this pack.
    pub fn mcmeta_json(&self) -> Result<Value, serde_json::Error> {
        let mut document = Map::new();
        for section in MetadataKind::ALL.into_iter().filter_map(|kind| self.section(kind)) {
            document.insert(section.kind().name().to_string(), section.to_json()?);
        }
        Ok(Value::Object(document))
    }

    /// Store `resource` at `<pack type dir>/<path...>`.
    pub fn add_raw<S: AsRef<str>>(
        &mut self,
        pack_type: PackType,
        path: &[S],
        resource: Resource,
    ) -> Result<(), PackError> {
        if path.is_empty() {
            return Err(PackError::EmptyPath);
        }
        let mut full_path = Vec::with_capacity(path.len() + 1);
        full_path.push(pack_type.directory());
        full_path.extend(path.iter().map(AsRef::as_ref));
        self.root.insert_resource(&full_path, resource)
    }

    /// Store UTF-8 text at `<pack type dir>/<path...>`.
    pub fn add_text<S: AsRef<str>>(
        &mut self,
        pack_type: PackType,
        path: &[S],
        text: impl Into<String>,
    ) -> Result<(), PackError> {
        self.add_raw(pack_type, path, Resource::from_string(text))
    }

    /// Encode `value` with `codec` and store it at
    /// `<namespace>/<base_dir...>/<local path>.json`.
    ///
    /// Nothing is written when encoding fails.
    pub fn add_resource_at<T, C: Codec<T>>(
        &mut self,
        pack_type: PackType,
        base_dir: &[String],
        codec: &C,
        id: &Identifier,
        value: &T,
    ) -> Result<(), PackError> {
        let path = namespaced_file_path(base_dir, id);
        let json = encode_json(codec, value, &path)?;
        debug!(pack = %self.info.id, path = %display_path(&path), "adding resource");
        trace!(%json);
        self.add_text(pack_type, &path, json)
    }

    /// Encode `value` as an element of `category`.
    pub fn add_resource<T, C: Codec<T>>(
        &mut self,
        pack_type: PackType,
        category: &Category,
        codec: &C,
        id: &Identifier,
        value: &T,
    ) -> Result<ResourceKey, PackError> {
        self.add_resource_at(pack_type, &element_path(category), codec, id, value)?;
        Ok(ResourceKey::new(category.clone(), id.clone()))
    }

    /// Store a tag file, replacing any previous file for the same tag.
    pub fn add_tag(&mut self, key: &TagKey, file: &TagFile) -> Result<TagKey, PackError> {
        let path = tag_file_path(key);
        let json = encode_json(&SerdeCodec::<TagFile>::new(), file, &path)?;
        debug!(pack = %self.info.id, path = %display_path(&path), "adding tag");
        trace!(%json);
        self.add_text(PackType::ServerData, &path, json)?;
        Ok(key.clone())
    }

    /// Store a tag from its entries.
    pub fn add_tag_entries(
        &mut self,
        key: &TagKey,
        entries: Vec<TagEntry>,
        replace: bool,
    ) -> Result<TagKey, PackError> {
        self.add_tag(key, &TagFile::new(entries, replace))
    }

    /// Store the current state of `builder`.
    pub fn add_tag_from_builder(
        &mut self,
        key: &TagKey,
        builder: &TagBuilder,
    ) -> Result<TagKey, PackError> {
        self.add_tag(key, &builder.build())
    }

    /// Store a tag filled in by `build`.
    pub fn add_tag_with(
        &mut self,
        key: &TagKey,
        build: impl FnOnce(&mut TagBuilder),
    ) -> Result<TagKey, PackError> {
        let mut builder = TagBuilder::new();
        build(&mut builder);
        self.add_tag_from_builder(key, &builder)
    }

    /// Store a tag filled in by `build` with domain objects, identified
    /// through `key_of`.
    pub fn add_intrinsic_tag<T>(
        &mut self,
        key: &TagKey,
        key_of: impl Fn(&T) -> Identifier + 'static,
        build: impl FnOnce(&mut IntrinsicTagBuilder<T>),
    ) -> Result<TagKey, PackError> {
        let mut builder = IntrinsicTagBuilder::new(key_of);
        build(&mut builder);
        self.add_tag_from_builder(key, &builder)
    }

    /// Item tag shorthand for [`add_tag_with`](Self::add_tag_with).
    pub fn add_item_tag(
        &mut self,
        id: &Identifier,
        build: impl FnOnce(&mut TagBuilder),
    ) -> Result<TagKey, PackError> {
        self.add_tag_with(&TagKey::new(Category::item(), id.clone()), build)
    }

    /// Block tag shorthand for [`add_tag_with`](Self::add_tag_with).
    pub fn add_block_tag(
        &mut self,
        id: &Identifier,
        build: impl FnOnce(&mut TagBuilder),
    ) -> Result<TagKey, PackError> {
        self.add_tag_with(&TagKey::new(Category::block(), id.clone()), build)
    }

    /// Fluid tag shorthand for [`add_tag_with`](Self::add_tag_with).
    pub fn add_fluid_tag(
        &mut self,
        id: &Identifier,
        build: impl FnOnce(&mut TagBuilder),
    ) -> Result<TagKey, PackError> {
        self.add_tag_with(&TagKey::new(Category::fluid(), id.clone()), build)
    }

    /// Entity type tag shorthand for [`add_tag_with`](Self::add_tag_with).
    pub fn add_entity_type_tag(
        &mut self,
        id: &Identifier,
        build: impl FnOnce(&mut TagBuilder),
    ) -> Result<TagKey, PackError> {
        self.add_tag_with(&TagKey::new(Category::entity_type(), id.clone()), build)
    }

    /// Append `file` to the tag already stored for `key`, if any.
    ///
    /// Entries of the stored file come first and the `replace` flags are
    /// OR-ed. Without a stored file this behaves like [`add_tag`](Self::add_tag).
    pub fn merge_tag(&mut self, key: &TagKey, file: TagFile) -> Result<TagKey, PackError> {
        let merged = match self.stored_tag(key)? {
            Some(mut existing) => {
                existing.merge(file);
                existing
            }
            None => file,
        };
        self.add_tag(key, &merged)
    }

    fn stored_tag(&self, key: &TagKey) -> Result<Option<TagFile>, PackError> {
        let path = tag_file_path(key);
        let mut full_path = vec![PackType::ServerData.directory().to_string()];
        full_path.extend(path.iter().cloned());
        let Some(resource) = self.root.find(&full_path).and_then(PackEntry::as_resource) else {
            return Ok(None);
        };
        let bytes = resource.read_to_vec().map_err(|source| PackError::Io {
            path: display_path(&full_path),
            source,
        })?;
        let decode_error = |source| PackError::Decoding {
            path: display_path(&full_path),
            source,
        };
        let value: Value = serde_json::from_slice(&bytes).map_err(|err| decode_error(err.into()))?;
        SerdeCodec::<TagFile>::new()
            .decode(&value)
            .map(Some)
            .map_err(decode_error)
    }

    /// Store a recipe.
    pub fn add_recipe(&mut self, id: &Identifier, recipe: &Recipe) -> Result<ResourceKey, PackError> {
        self.add_resource(
            PackType::ServerData,
            &Category::recipe(),
            &SerdeCodec::new(),
            id,
            recipe,
        )
    }

    /// Store an advancement.
    pub fn add_advancement(
        &mut self,
        id: &Identifier,
        advancement: &Advancement,
    ) -> Result<ResourceKey, PackError> {
        self.add_resource(
            PackType::ServerData,
            &Category::advancement(),
            &SerdeCodec::new(),
            id,
            advancement,
        )
    }

    /// Store an advancement under its own identifier.
    pub fn add_advancement_holder(
        &mut self,
        holder: &AdvancementHolder,
    ) -> Result<ResourceKey, PackError> {
        self.add_advancement(&holder.id, &holder.value)
    }

    /// Build and store an advancement.
    pub fn add_advancement_from_builder(
        &mut self,
        id: &Identifier,
        builder: AdvancementBuilder,
    ) -> Result<ResourceKey, PackError> {
        self.add_advancement_holder(&builder.build(id.clone()))
    }

    /// Store an enchantment.
    pub fn add_enchantment(
        &mut self,
        id: &Identifier,
        enchantment: &Enchantment,
    ) -> Result<ResourceKey, PackError> {
        self.add_resource(
            PackType::ServerData,
            &Category::enchantment(),
            &SerdeCodec::new(),
            id,
            enchantment,
        )
    }

    /// Store an enchantment with no exclusive set or effects.
    pub fn add_enchantment_definition(
        &mut self,
        id: &Identifier,
        definition: EnchantmentDefinition,
    ) -> Result<ResourceKey, PackError> {
        self.add_enchantment_from_builder(id, EnchantmentBuilder::new(definition))
    }

    /// Build and store an enchantment.
    pub fn add_enchantment_from_builder(
        &mut self,
        id: &Identifier,
        builder: EnchantmentBuilder,
    ) -> Result<ResourceKey, PackError> {
        let enchantment = builder.build(id);
        self.add_enchantment(id, &enchantment)
    }

    /// Recipe output writing into this pack.
    pub fn recipe_output(&mut self, mode: RecipeExport) -> PackRecipeOutput<'_> {
        PackRecipeOutput::new(self, mode)
    }

    /// Save both the recipe and its unlock advancement.
    pub fn add_recipe_and_advancement(
        &mut self,
        id: &Identifier,
        builder: &dyn RecipeBuilder,
    ) -> Result<(), PackError> {
        builder.save(&mut self.recipe_output(RecipeExport::RecipeAndAdvancement), id)
    }

    /// Save only the recipe.
    pub fn add_built_recipe(
        &mut self,
        id: &Identifier,
        builder: &dyn RecipeBuilder,
    ) -> Result<ResourceKey, PackError> {
        builder.save(&mut self.recipe_output(RecipeExport::RecipeOnly), id)?;
        Ok(ResourceKey::new(Category::recipe(), id.clone()))
    }

    /// Save only the unlock advancement.
    pub fn add_recipe_advancement(
        &mut self,
        id: &Identifier,
        builder: &dyn RecipeBuilder,
    ) -> Result<(), PackError> {
        builder.save(&mut self.recipe_output(RecipeExport::AdvancementOnly), id)
    }

    /// Advancement builder unlocking `recipe_id` once the player knows it.
    pub fn advancement_builder_for_recipe(recipe_id: &Identifier) -> AdvancementBuilder {
        unlock_advancement_builder(AdvancementBuilder::recipe_advancement(), recipe_id)
    }
}

fn encode_json<T, C: Codec<T>>(codec: &C, value: &T, path: &[String]) -> Result<String, PackError> {
    let encoding_error = |source| PackError::Encoding {
        path: display_path(path),
        source,
    };
    let tree = codec.encode(value).map_err(encoding_error)?;
    serde_json::to_string(&tree).map_err(|err| encoding_error(err.into()))
}

impl PackResources for RuntimePack {
    fn location(&self) -> &PackInfo {
        &self.info
    }

    fn get_root_resource(&self, segments: &[&str]) -> Option<Resource> {
        let key: Vec<String> = segments.iter().map(|segment| segment.to_string()).collect();
        self.extra_files.get(&key).cloned()
    }

    fn get_resource(&self, pack_type: PackType, id: &Identifier) -> Option<Resource> {
        let mut path = vec![pack_type.directory().to_string(), id.namespace().to_string()];
        path.extend(split_local_path(id));
        self.root
            .find(&path)
            .and_then(PackEntry::as_resource)
            .cloned()
    }

    fn list_resources(
        &self,
        pack_type: PackType,
        namespace: &str,
        prefix: &str,
        visit: &mut dyn FnMut(Identifier, &Resource),
    ) {
        let prefix: Vec<&str> = prefix
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        let mut base = vec![pack_type.directory(), namespace];
        base.extend(&prefix);

        self.root.enumerate(&base, |relative, resource| {
            let path = prefix
                .iter()
                .copied()
                .chain(relative.iter().map(String::as_str))
                .collect::<Vec<_>>()
                .join("/");
            match Identifier::try_build(namespace, &path) {
                Some(id) => visit(id, resource),
                None => warn!(
                    pack = %self.info.id,
                    namespace,
                    path = %path,
                    "invalid path in pack, ignoring"
                ),
            }
        });
    }

    fn get_namespaces(&self, pack_type: PackType) -> BTreeSet<String> {
        self.root
            .find(&[pack_type.directory()])
            .and_then(PackEntry::as_directory)
            .map(|children| {
                children
                    .iter()
                    .filter(|(_, child)| child.is_directory())
                    .map(|(name, _)| name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn metadata_section(&self, name: &str) -> Option<MetadataSection<'_>> {
        self.section(MetadataKind::from_name(name)?)
    }
}

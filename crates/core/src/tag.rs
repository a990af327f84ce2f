//! Tag files and the builders that assemble them.
//!
//! A tag file is an ordered list of membership entries plus a `replace` flag.
//! On disk it looks like:
//!
//! ```json
//! {"replace": false, "values": ["minecraft:stick", {"id": "#mymod:gems", "required": false}]}
//! ```
//!
//! Required entries are bare strings, optional ones are objects, and nested tag
//! references carry a leading `#`.

use crate::identifier::Identifier;
use crate::key::{ResourceKey, TagKey};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Prefix marking a nested tag reference.
pub const TAG_REFERENCE_PREFIX: char = '#';

/// One membership entry of a tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagEntry {
    id: Identifier,
    tag: bool,
    required: bool,
}

impl TagEntry {
    /// Required element.
    pub fn element(id: Identifier) -> Self {
        Self {
            id,
            tag: false,
            required: true,
        }
    }

    /// Optional element; consumers skip it when it does not exist.
    pub fn optional_element(id: Identifier) -> Self {
        Self {
            id,
            tag: false,
            required: false,
        }
    }

    /// Required nested tag.
    pub fn tag(id: Identifier) -> Self {
        Self {
            id,
            tag: true,
            required: true,
        }
    }

    /// Optional nested tag.
    pub fn optional_tag(id: Identifier) -> Self {
        Self {
            id,
            tag: true,
            required: false,
        }
    }

    /// Identifier of the element or nested tag.
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Whether this entry references another tag.
    pub fn is_tag(&self) -> bool {
        self.tag
    }

    /// Whether consumers must fail when the entry cannot be resolved.
    pub fn is_required(&self) -> bool {
        self.required
    }

    fn parse_reference(reference: &str, required: bool) -> Result<Self, String> {
        let (tag, raw) = match reference.strip_prefix(TAG_REFERENCE_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, reference),
        };
        let id = Identifier::parse(raw).map_err(|err| err.to_string())?;
        Ok(Self { id, tag, required })
    }
}

impl fmt::Display for TagEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tag {
            write!(f, "{TAG_REFERENCE_PREFIX}{}", self.id)
        } else {
            write!(f, "{}", self.id)
        }
    }
}

impl Serialize for TagEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let reference = self.to_string();
        if self.required {
            return serializer.serialize_str(&reference);
        }
        let mut entry = serializer.serialize_struct("TagEntry", 2)?;
        entry.serialize_field("id", &reference)?;
        entry.serialize_field("required", &false)?;
        entry.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTagEntry {
    Short(String),
    Full {
        id: String,
        #[serde(default = "required_by_default")]
        required: bool,
    },
}

fn required_by_default() -> bool {
    true
}

impl<'de> Deserialize<'de> for TagEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (reference, required) = match RawTagEntry::deserialize(deserializer)? {
            RawTagEntry::Short(reference) => (reference, true),
            RawTagEntry::Full { id, required } => (id, required),
        };
        TagEntry::parse_reference(&reference, required).map_err(de::Error::custom)
    }
}

/// A complete tag definition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TagFile {
    /// Whether this definition overrides definitions from lower-priority packs.
    #[serde(default)]
    pub replace: bool,
    /// Membership entries, in order.
    pub values: Vec<TagEntry>,
}

impl TagFile {
    /// Create a tag file.
    pub fn new(values: Vec<TagEntry>, replace: bool) -> Self {
        Self { replace, values }
    }

    /// Append `other`'s entries; the result replaces if either side did.
    pub fn merge(&mut self, other: TagFile) {
        self.replace |= other.replace;
        self.values.extend(other.values);
    }
}

/// Fluent accumulator of tag entries.
#[derive(Debug, Clone, Default)]
pub struct TagBuilder {
    entries: Vec<TagEntry>,
    replace: bool,
}

impl TagBuilder {
    /// Empty builder with `replace = false`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `replace` flag of the resulting tag file.
    pub fn set_replace(&mut self, replace: bool) -> &mut Self {
        self.replace = replace;
        self
    }

    /// Current value of the `replace` flag.
    pub fn replace(&self) -> bool {
        self.replace
    }

    /// Append a prebuilt entry.
    pub fn add_entry(&mut self, entry: TagEntry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    /// Append a required element.
    pub fn add(&mut self, id: Identifier) -> &mut Self {
        self.add_entry(TagEntry::element(id))
    }

    /// Append a required element by key.
    pub fn add_key(&mut self, key: &ResourceKey) -> &mut Self {
        self.add(key.id().clone())
    }

    /// Append an optional element.
    pub fn add_optional(&mut self, id: Identifier) -> &mut Self {
        self.add_entry(TagEntry::optional_element(id))
    }

    /// Append a required nested tag.
    pub fn add_tag(&mut self, id: Identifier) -> &mut Self {
        self.add_entry(TagEntry::tag(id))
    }

    /// Append a required nested tag by key.
    pub fn add_tag_key(&mut self, key: &TagKey) -> &mut Self {
        self.add_tag(key.id().clone())
    }

    /// Append an optional nested tag.
    pub fn add_optional_tag(&mut self, id: Identifier) -> &mut Self {
        self.add_entry(TagEntry::optional_tag(id))
    }

    /// Entries accumulated so far.
    pub fn entries(&self) -> &[TagEntry] {
        &self.entries
    }

    /// Snapshot the accumulated state as a tag file.
    pub fn build(&self) -> TagFile {
        TagFile::new(self.entries.clone(), self.replace)
    }
}

/// [`TagBuilder`] that also accepts domain objects, deriving their identifier
/// through a caller-supplied extraction function.
pub struct IntrinsicTagBuilder<T> {
    builder: TagBuilder,
    key_of: Box<dyn Fn(&T) -> Identifier>,
}

impl<T> IntrinsicTagBuilder<T> {
    /// Builder extracting element identifiers with `key_of`.
    pub fn new(key_of: impl Fn(&T) -> Identifier + 'static) -> Self {
        Self {
            builder: TagBuilder::new(),
            key_of: Box::new(key_of),
        }
    }

    /// Append `element` as a required entry.
    pub fn add_element(&mut self, element: &T) -> &mut Self {
        let id = (self.key_of)(element);
        self.builder.add(id);
        self
    }

    /// Append `element` as an optional entry.
    pub fn add_optional_element(&mut self, element: &T) -> &mut Self {
        let id = (self.key_of)(element);
        self.builder.add_optional(id);
        self
    }

    /// Unwrap into the underlying builder.
    pub fn into_inner(self) -> TagBuilder {
        self.builder
    }
}

impl<T> Deref for IntrinsicTagBuilder<T> {
    type Target = TagBuilder;

    fn deref(&self) -> &TagBuilder {
        &self.builder
    }
}

impl<T> DerefMut for IntrinsicTagBuilder<T> {
    fn deref_mut(&mut self) -> &mut TagBuilder {
        &mut self.builder
    }
}

impl<T> fmt::Debug for IntrinsicTagBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntrinsicTagBuilder")
            .field("builder", &self.builder)
            .finish_non_exhaustive()
    }
}

//! The in-memory resource tree backing a pack.

use crate::error::{display_path, PackError};
use std::collections::HashMap;
use std::fmt;
use std::io::{self, Cursor, Read};
use std::sync::Arc;
use tracing::warn;

/// Reader handed out by [`Resource::open`].
pub type ResourceReader = Box<dyn Read + Send>;

type Producer = dyn Fn() -> io::Result<ResourceReader> + Send + Sync;

/// A deferred byte producer.
///
/// Every [`open`](Resource::open) re-invokes the producer; nothing is cached.
#[derive(Clone)]
pub struct Resource {
    producer: Arc<Producer>,
}

impl Resource {
    /// Wrap a producer closure.
    pub fn new<F>(producer: F) -> Self
    where
        F: Fn() -> io::Result<ResourceReader> + Send + Sync + 'static,
    {
        Self {
            producer: Arc::new(producer),
        }
    }

    /// Resource serving a fixed byte buffer.
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes: Arc<[u8]> = bytes.into();
        Self::new(move || Ok(Box::new(Cursor::new(Arc::clone(&bytes))) as ResourceReader))
    }

    /// Resource serving UTF-8 text.
    pub fn from_string(text: impl Into<String>) -> Self {
        Self::from_bytes(text.into().into_bytes())
    }

    /// Run the producer and return a fresh reader.
    pub fn open(&self) -> io::Result<ResourceReader> {
        (self.producer)()
    }

    /// Run the producer and collect everything it yields.
    pub fn read_to_vec(&self) -> io::Result<Vec<u8>> {
        let mut reader = self.open()?;
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource").finish_non_exhaustive()
    }
}

/// A node of the resource tree.
#[derive(Debug, Clone)]
pub enum PackEntry {
    /// Named children.
    Directory(HashMap<String, PackEntry>),
    /// A leaf producing bytes.
    Resource(Resource),
}

impl Default for PackEntry {
    fn default() -> Self {
        Self::directory()
    }
}

impl PackEntry {
    /// Empty directory.
    pub fn directory() -> Self {
        PackEntry::Directory(HashMap::new())
    }

    /// The leaf resource, if this is one.
    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            PackEntry::Resource(resource) => Some(resource),
            PackEntry::Directory(_) => None,
        }
    }

    /// The children, if this is a directory.
    pub fn as_directory(&self) -> Option<&HashMap<String, PackEntry>> {
        match self {
            PackEntry::Directory(children) => Some(children),
            PackEntry::Resource(_) => None,
        }
    }

    /// Whether this node is a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self, PackEntry::Directory(_))
    }

    /// Follow `path` from this node.
    ///
    /// Returns `None` when a segment is missing or the walk reaches a resource
    /// before the path is exhausted. An empty path yields `self`.
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&PackEntry> {
        path.iter().try_fold(self, |node, segment| match node {
            PackEntry::Directory(children) => children.get(segment.as_ref()),
            PackEntry::Resource(_) => None,
        })
    }

    /// Store `resource` at `path`, creating directories on the way.
    ///
    /// An existing leaf at `path` is replaced. Directories are only created
    /// past the last existing node, so a failed insert never leaves a partial
    /// path behind.
    pub fn insert_resource<S: AsRef<str>>(
        &mut self,
        path: &[S],
        resource: Resource,
    ) -> Result<(), PackError> {
        let (leaf, parents) = path.split_last().ok_or(PackError::EmptyPath)?;

        let mut node = self;
        for (depth, segment) in parents.iter().enumerate() {
            let children = match node {
                PackEntry::Directory(children) => children,
                PackEntry::Resource(_) => {
                    return Err(PackError::PathConflict {
                        path: display_path(&path[..depth]),
                    })
                }
            };
            node = children
                .entry(segment.as_ref().to_owned())
                .or_insert_with(PackEntry::directory);
        }

        match node {
            PackEntry::Directory(children) => {
                let previous =
                    children.insert(leaf.as_ref().to_owned(), PackEntry::Resource(resource));
                if matches!(previous, Some(PackEntry::Directory(_))) {
                    warn!(path = %display_path(path), "resource replaced a directory");
                }
                Ok(())
            }
            PackEntry::Resource(_) => Err(PackError::PathConflict {
                path: display_path(parents),
            }),
        }
    }

    /// Visit every resource below this node with its path relative to it.
    ///
    /// Order is unspecified. A resource node visits nothing.
    pub fn for_each_resource(&self, mut visit: impl FnMut(&[String], &Resource)) {
        let mut path = Vec::new();
        self.walk(&mut path, &mut visit);
    }

    /// Visit every resource below `prefix`, with paths relative to `prefix`.
    ///
    /// A missing prefix, or one naming a resource, visits nothing.
    pub fn enumerate<S: AsRef<str>>(&self, prefix: &[S], visit: impl FnMut(&[String], &Resource)) {
        if let Some(start @ PackEntry::Directory(_)) = self.find(prefix) {
            start.for_each_resource(visit);
        }
    }

    fn walk(&self, path: &mut Vec<String>, visit: &mut dyn FnMut(&[String], &Resource)) {
        let PackEntry::Directory(children) = self else {
            return;
        };
        for (name, child) in children {
            path.push(name.clone());
            match child {
                PackEntry::Resource(resource) => visit(path, resource),
                PackEntry::Directory(_) => child.walk(path, visit),
            }
            path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn read(entry: &PackEntry, path: &[&str]) -> String {
        let resource = entry.find(path).and_then(PackEntry::as_resource).unwrap();
        String::from_utf8(resource.read_to_vec().unwrap()).unwrap()
    }

    #[test]
    fn siblings_are_isolated_and_last_write_wins() {
        let mut root = PackEntry::directory();
        root.insert_resource(&["a", "b", "c"], Resource::from_string("first"))
            .unwrap();
        root.insert_resource(&["a", "b", "d"], Resource::from_string("sibling"))
            .unwrap();
        assert_eq!(read(&root, &["a", "b", "c"]), "first");
        assert_eq!(read(&root, &["a", "b", "d"]), "sibling");

        root.insert_resource(&["a", "b", "c"], Resource::from_string("second"))
            .unwrap();
        assert_eq!(read(&root, &["a", "b", "c"]), "second");
        assert_eq!(read(&root, &["a", "b", "d"]), "sibling");
    }

    #[test]
    fn inserting_through_a_resource_conflicts() {
        let mut root = PackEntry::directory();
        root.insert_resource(&["a", "b"], Resource::from_string("leaf"))
            .unwrap();

        let err = root
            .insert_resource(&["a", "b", "c"], Resource::from_string("child"))
            .unwrap_err();
        match err {
            PackError::PathConflict { path } => assert_eq!(path, "a/b"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(read(&root, &["a", "b"]), "leaf");
        assert!(root.find(&["a", "b", "c"]).is_none());

        let err = root
            .insert_resource(&["a", "b", "c", "d"], Resource::from_string("deep"))
            .unwrap_err();
        assert!(matches!(err, PackError::PathConflict { ref path } if path == "a/b"));
        assert_eq!(read(&root, &["a", "b"]), "leaf");
    }

    #[test]
    fn empty_path_is_rejected() {
        let mut root = PackEntry::directory();
        let empty: [&str; 0] = [];
        assert!(matches!(
            root.insert_resource(&empty, Resource::from_string("x")),
            Err(PackError::EmptyPath)
        ));
        assert!(root.find(&empty).unwrap().is_directory());
    }

    #[test]
    fn leaf_may_replace_a_directory() {
        let mut root = PackEntry::directory();
        root.insert_resource(&["a", "b"], Resource::from_string("nested"))
            .unwrap();
        root.insert_resource(&["a"], Resource::from_string("flat"))
            .unwrap();
        assert_eq!(read(&root, &["a"]), "flat");
        assert!(root.find(&["a", "b"]).is_none());
    }

    #[test]
    fn enumerate_visits_every_leaf_relative_to_prefix() {
        let mut root = PackEntry::directory();
        for path in [
            ["ns", "x", "y.json"],
            ["ns", "x", "z.json"],
            ["other", "x", "q.json"],
        ] {
            root.insert_resource(&path, Resource::from_string("{}"))
                .unwrap();
        }
        root.insert_resource(&["ns", "w.json"], Resource::from_string("{}"))
            .unwrap();

        let mut seen = HashSet::new();
        root.enumerate(&["ns"], |path, _| {
            seen.insert(path.join("/"));
        });
        let expected: HashSet<String> = ["x/y.json", "x/z.json", "w.json"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn enumerate_missing_or_leaf_prefix_visits_nothing() {
        let mut root = PackEntry::directory();
        root.insert_resource(&["a", "b"], Resource::from_string("x"))
            .unwrap();
        let mut count = 0;
        root.enumerate(&["missing"], |_, _| count += 1);
        root.enumerate(&["a", "b"], |_, _| count += 1);
        root.enumerate(&["a", "b", "c"], |_, _| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn producers_run_on_every_open() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let resource = Resource::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(Cursor::new(b"data".to_vec())) as ResourceReader)
        });
        assert_eq!(resource.read_to_vec().unwrap(), b"data");
        assert_eq!(resource.read_to_vec().unwrap(), b"data");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    proptest! {
        #[test]
        fn every_inserted_leaf_is_found(
            paths in proptest::collection::hash_set(
                proptest::collection::vec("[a-c]{1,2}", 3),
                1..16,
            )
        ) {
            let mut root = PackEntry::directory();
            for path in &paths {
                root.insert_resource(path, Resource::from_string(path.join("/"))).unwrap();
            }
            let mut visited = 0;
            root.for_each_resource(|_, _| visited += 1);
            prop_assert_eq!(visited, paths.len());
            for path in &paths {
                let resource = root.find(path).and_then(PackEntry::as_resource).unwrap();
                prop_assert_eq!(resource.read_to_vec().unwrap(), path.join("/").into_bytes());
            }
        }
    }
}

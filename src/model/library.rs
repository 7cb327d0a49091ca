//! Resolved packages and the keyed collection that holds them.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use fnv::FnvBuildHasher;

use super::version::Version;
use crate::error::{LockError, LockResult};

/// One resolved package or project reference.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Library {
    /// Package id
    pub name: String,
    /// Resolved version; absent for unversioned references
    pub version: Option<Version>,
    /// Kind tag such as `package` or `project`
    pub library_type: Option<String>,
    /// Relative path inside the package folder
    pub path: Option<String>,
    /// Path of the project file for project references
    pub msbuild_project: Option<String>,
    /// Content hash of the package archive
    pub sha512: Option<String>,
    /// Whether the package is marked serviceable
    pub is_serviceable: bool,
    /// Whether the package ships tools
    pub has_tools: bool,
    /// Files contained in the package, in file order
    pub files: Vec<String>,
}

impl Library {
    /// Create a library with every optional field at its default.
    pub fn new(name: impl Into<String>, version: Option<Version>) -> Self {
        Self {
            name: name.into(),
            version,
            ..Self::default()
        }
    }

    /// The composite `name/version` key used on the wire.
    pub fn key(&self) -> String {
        composite_key(&self.name, self.version.as_ref())
    }

    /// Identity used for uniqueness and lookup.
    pub fn id(&self) -> LibraryId {
        LibraryId::new(&self.name, self.version.clone())
    }
}

/// Build a `name` or `name/version` key.
pub(crate) fn composite_key(name: &str, version: Option<&Version>) -> String {
    match version {
        Some(version) => format!("{name}/{version}"),
        None => name.to_string(),
    }
}

/// Identity of a library: name (ASCII case-insensitive) and version
/// without build metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LibraryId {
    name: String,
    version: Option<Version>,
}

impl LibraryId {
    /// Create an identity from a name and version.
    pub fn new(name: &str, version: Option<Version>) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            version: version.map(|version| version.without_build()),
        }
    }
}

/// Libraries in file order with constant-time lookup by identity.
#[derive(Debug, Clone, Default)]
pub struct Libraries {
    entries: Vec<Library>,
    index: HashMap<LibraryId, usize, FnvBuildHasher>,
}

impl Libraries {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a library. Fails if one with the same identity exists.
    pub fn insert(&mut self, library: Library) -> LockResult<()> {
        match self.index.entry(library.id()) {
            Entry::Occupied(_) => Err(LockError::DuplicateLibrary(library.key())),
            Entry::Vacant(slot) => {
                slot.insert(self.entries.len());
                self.entries.push(library);
                Ok(())
            }
        }
    }

    /// Look up a library by name and version.
    pub fn get(&self, name: &str, version: Option<&Version>) -> Option<&Library> {
        let id = LibraryId::new(name, version.cloned());
        self.index.get(&id).and_then(|&i| self.entries.get(i))
    }

    /// Returns true if a library with this identity exists.
    pub fn contains(&self, name: &str, version: Option<&Version>) -> bool {
        self.get(name, version).is_some()
    }

    /// Keep only the libraries for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(&Library) -> bool) {
        self.entries.retain(keep);
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, library)| (library.id(), i))
            .collect();
    }

    /// Number of libraries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no libraries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, Library> {
        self.entries.iter()
    }
}

impl PartialEq for Libraries {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Libraries {}

impl<'a> IntoIterator for &'a Libraries {
    type Item = &'a Library;
    type IntoIter = std::slice::Iter<'a, Library>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<Vec<Library>> for Libraries {
    type Error = LockError;

    fn try_from(libraries: Vec<Library>) -> LockResult<Self> {
        let mut collection = Self::new();
        for library in libraries {
            collection.insert(library)?;
        }
        Ok(collection)
    }
}

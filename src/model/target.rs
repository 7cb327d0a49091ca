//! Per-framework resolved closures.

use super::library::composite_key;
use super::version::Version;

/// The closure resolved for one target framework and optional runtime.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Target {
    /// Target framework name
    pub framework: String,
    /// Runtime identifier, for runtime-specific targets
    pub runtime_identifier: Option<String>,
    /// Libraries used by this target, in resolution order
    pub libraries: Vec<TargetLibrary>,
}

impl Target {
    /// Create an empty target.
    pub fn new(framework: impl Into<String>, runtime_identifier: Option<String>) -> Self {
        Self {
            framework: framework.into(),
            runtime_identifier,
            libraries: Vec::new(),
        }
    }

    /// The `framework` or `framework/rid` key used on the wire.
    pub fn key(&self) -> String {
        match &self.runtime_identifier {
            Some(rid) => format!("{}/{}", self.framework, rid),
            None => self.framework.clone(),
        }
    }

    /// Find a library by name, ignoring ASCII case.
    pub fn get_library(&self, name: &str) -> Option<&TargetLibrary> {
        self.libraries
            .iter()
            .find(|library| library.name.eq_ignore_ascii_case(name))
    }
}

/// How one library participates in one target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetLibrary {
    /// Package id
    pub name: String,
    /// Resolved version
    pub version: Option<Version>,
    /// Kind tag such as `package` or `project`
    pub library_type: Option<String>,
    /// Framework the library's assets were selected for
    pub framework: Option<String>,
    /// Direct dependencies of this library
    pub dependencies: Vec<PackageDependency>,
    /// Framework assemblies referenced
    pub framework_assemblies: Vec<String>,
    /// Shared frameworks referenced
    pub framework_references: Vec<String>,
    /// Compile-time reference assemblies
    pub compile: Vec<LockFileItem>,
    /// Runtime assemblies
    pub runtime: Vec<LockFileItem>,
    /// Satellite resource assemblies
    pub resource: Vec<LockFileItem>,
    /// Native libraries
    pub native: Vec<LockFileItem>,
    /// Build props/targets imports
    pub build: Vec<LockFileItem>,
    /// Multi-targeting build imports
    pub build_multi_targeting: Vec<LockFileItem>,
    /// Content files
    pub content_files: Vec<LockFileItem>,
    /// Runtime-specific assets
    pub runtime_targets: Vec<LockFileItem>,
    /// Tool assemblies
    pub tools: Vec<LockFileItem>,
    /// Assemblies embedded into the consumer
    pub embed: Vec<LockFileItem>,
}

impl TargetLibrary {
    /// Create a target library with every optional field at its default.
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
}

/// A dependency edge: package id and the version range requested.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageDependency {
    /// Package id
    pub id: String,
    /// Version range text, kept verbatim
    pub version_range: Option<String>,
}

impl PackageDependency {
    /// Create a dependency.
    pub fn new(id: impl Into<String>, version_range: Option<String>) -> Self {
        Self {
            id: id.into(),
            version_range,
        }
    }
}

/// An asset path and its properties.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LockFileItem {
    /// Path relative to the package root
    pub path: String,
    /// Properties such as `locale` or `assetType`, in file order
    pub properties: Vec<(String, ItemPropertyValue)>,
}

impl LockFileItem {
    /// Create an item without properties.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            properties: Vec::new(),
        }
    }

    /// Append a property, builder style.
    pub fn with_property(mut self, name: impl Into<String>, value: ItemPropertyValue) -> Self {
        self.properties.push((name.into(), value));
        self
    }

    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&ItemPropertyValue> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

/// Value of an asset property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemPropertyValue {
    /// String property, e.g. `"locale": "de"`
    String(String),
    /// Boolean property, e.g. `"copyToOutput": true`
    Bool(bool),
}

impl From<&str> for ItemPropertyValue {
    fn from(value: &str) -> Self {
        ItemPropertyValue::String(value.to_string())
    }
}

impl From<bool> for ItemPropertyValue {
    fn from(value: bool) -> Self {
        ItemPropertyValue::Bool(value)
    }
}

//! Lock file object model.
//!
//! The root [`LockFile`] owns every entity. Collections keep file order:
//! target and dependency order affect resolution precedence and asset
//! probing, so they are never sorted.

pub mod library;
pub mod target;
pub mod version;

pub use library::{Libraries, Library, LibraryId};
pub use target::{ItemPropertyValue, LockFileItem, PackageDependency, Target, TargetLibrary};
pub use version::{parse_version, Version};

/// A resolved dependency closure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LockFile {
    /// Format version number
    pub version: Option<u32>,
    /// Per-framework closures
    pub targets: Vec<Target>,
    /// Every library referenced by any target
    pub libraries: Libraries,
    /// Direct dependencies declared by the project, per framework
    pub project_file_dependency_groups: Vec<ProjectFileDependencyGroup>,
    /// Folders packages were restored into
    pub package_folders: Vec<PackageFolder>,
}

impl LockFile {
    /// Format version written by this crate.
    pub const CURRENT_VERSION: u32 = 3;

    /// Create an empty lock file at the current format version.
    pub fn new() -> Self {
        Self {
            version: Some(Self::CURRENT_VERSION),
            ..Self::default()
        }
    }

    /// Find a target by framework and runtime identifier.
    pub fn get_target(&self, framework: &str, runtime_identifier: Option<&str>) -> Option<&Target> {
        self.targets.iter().find(|target| {
            target.framework == framework && target.runtime_identifier.as_deref() == runtime_identifier
        })
    }

    /// Find a library by name and version.
    pub fn get_library(&self, name: &str, version: Option<&Version>) -> Option<&Library> {
        self.libraries.get(name, version)
    }
}

/// Direct dependencies the project declares for one framework.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectFileDependencyGroup {
    /// Framework name; empty for dependencies shared by all frameworks
    pub framework_name: String,
    /// Dependency specifications such as `Serilog >= 3.1.1`
    pub dependencies: Vec<String>,
}

impl ProjectFileDependencyGroup {
    /// Create a group.
    pub fn new(framework_name: impl Into<String>, dependencies: Vec<String>) -> Self {
        Self {
            framework_name: framework_name.into(),
            dependencies,
        }
    }
}

/// A folder packages were restored into.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageFolder {
    /// Absolute folder path
    pub path: String,
}

impl PackageFolder {
    /// Create a package folder entry.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_current_version() {
        let lock_file = LockFile::new();
        assert_eq!(lock_file.version, Some(3));
        assert!(lock_file.targets.is_empty());
        assert!(lock_file.libraries.is_empty());
    }

    #[test]
    fn test_get_target_matches_runtime() {
        let mut lock_file = LockFile::new();
        lock_file.targets.push(Target::new("net8.0", None));
        lock_file
            .targets
            .push(Target::new("net8.0", Some("win-x64".to_string())));

        let portable = lock_file.get_target("net8.0", None).unwrap();
        assert_eq!(portable.runtime_identifier, None);
        let windows = lock_file.get_target("net8.0", Some("win-x64")).unwrap();
        assert_eq!(windows.key(), "net8.0/win-x64");
        assert!(lock_file.get_target("net8.0", Some("osx-arm64")).is_none());
    }
}

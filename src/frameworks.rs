//! Read-only view of the targets in a lock file, for hosts that enumerate
//! frameworks by index or by name.

use crate::model::{LockFile, Target};

/// How to select a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameworkKey<'a> {
    /// The target's wire key, `framework` or `framework/rid`, ignoring ASCII
    /// case
    Name(&'a str),
    /// Position in file order
    Index(usize),
}

/// Summary of one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFrameworkInfo {
    /// Target framework name
    pub framework: String,
    /// Runtime identifier, for runtime-specific targets
    pub runtime_identifier: Option<String>,
    /// Number of libraries resolved for the target
    pub library_count: usize,
}

impl From<&Target> for TargetFrameworkInfo {
    fn from(target: &Target) -> Self {
        Self {
            framework: target.framework.clone(),
            runtime_identifier: target.runtime_identifier.clone(),
            library_count: target.libraries.len(),
        }
    }
}

/// The targets of a lock file.
#[derive(Debug, Clone, Copy)]
pub struct TargetFrameworks<'a> {
    targets: &'a [Target],
}

impl<'a> TargetFrameworks<'a> {
    /// View the targets of `lock_file`.
    pub fn new(lock_file: &'a LockFile) -> Self {
        Self {
            targets: &lock_file.targets,
        }
    }

    /// Number of targets.
    pub fn count(&self) -> usize {
        self.targets.len()
    }

    /// Look up a target. Returns `None` for an unknown name or an index past
    /// the end.
    pub fn item(&self, key: FrameworkKey<'_>) -> Option<TargetFrameworkInfo> {
        let target = match key {
            FrameworkKey::Index(index) => self.targets.get(index),
            FrameworkKey::Name(name) => self
                .targets
                .iter()
                .find(|target| target.key().eq_ignore_ascii_case(name)),
        };
        target.map(TargetFrameworkInfo::from)
    }

    /// Iterate in file order.
    pub fn iter(&self) -> impl Iterator<Item = TargetFrameworkInfo> + 'a {
        self.targets.iter().map(TargetFrameworkInfo::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TargetLibrary, Version};

    fn lock_file() -> LockFile {
        let mut lock_file = LockFile::new();
        let mut portable = Target::new("net8.0", None);
        portable
            .libraries
            .push(TargetLibrary::new("Serilog", Some(Version::new(3, 1, 1))));
        lock_file.targets.push(portable);
        lock_file
            .targets
            .push(Target::new("net8.0", Some("win-x64".to_string())));
        lock_file
    }

    #[test]
    fn test_count_and_index() {
        let lock_file = lock_file();
        let frameworks = TargetFrameworks::new(&lock_file);
        assert_eq!(frameworks.count(), 2);

        let first = frameworks.item(FrameworkKey::Index(0)).unwrap();
        assert_eq!(first.framework, "net8.0");
        assert_eq!(first.runtime_identifier, None);
        assert_eq!(first.library_count, 1);
        assert!(frameworks.item(FrameworkKey::Index(2)).is_none());
    }

    #[test]
    fn test_lookup_by_name() {
        let lock_file = lock_file();
        let frameworks = TargetFrameworks::new(&lock_file);

        let windows = frameworks.item(FrameworkKey::Name("NET8.0/win-x64")).unwrap();
        assert_eq!(windows.runtime_identifier.as_deref(), Some("win-x64"));
        assert_eq!(windows.library_count, 0);
        assert!(frameworks.item(FrameworkKey::Name("net6.0")).is_none());
    }

    #[test]
    fn test_iter_in_file_order() {
        let lock_file = lock_file();
        let keys: Vec<_> = TargetFrameworks::new(&lock_file)
            .iter()
            .map(|info| info.runtime_identifier)
            .collect();
        assert_eq!(keys, vec![None, Some("win-x64".to_string())]);
    }
}

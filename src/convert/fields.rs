//! Wire names of every known lock file member.
//!
//! Converters dispatch by comparing the cursor's raw property-name bytes
//! against these literals, so reading a known field never allocates.

// Root
pub const VERSION: &[u8] = b"version";
pub const TARGETS: &[u8] = b"targets";
pub const LIBRARIES: &[u8] = b"libraries";
pub const PROJECT_FILE_DEPENDENCY_GROUPS: &[u8] = b"projectFileDependencyGroups";
pub const PACKAGE_FOLDERS: &[u8] = b"packageFolders";

// Library
pub const TYPE: &[u8] = b"type";
pub const PATH: &[u8] = b"path";
pub const MSBUILD_PROJECT: &[u8] = b"msbuildProject";
pub const SHA512: &[u8] = b"sha512";
/// Spelled without the "c" on the wire. Files in the wild depend on it.
pub const SERVICEABLE: &[u8] = b"servicable";
pub const HAS_TOOLS: &[u8] = b"hasTools";
pub const FILES: &[u8] = b"files";

// Target library
pub const FRAMEWORK: &[u8] = b"framework";
pub const DEPENDENCIES: &[u8] = b"dependencies";
pub const FRAMEWORK_ASSEMBLIES: &[u8] = b"frameworkAssemblies";
pub const FRAMEWORK_REFERENCES: &[u8] = b"frameworkReferences";
pub const COMPILE: &[u8] = b"compile";
pub const RUNTIME: &[u8] = b"runtime";
pub const RESOURCE: &[u8] = b"resource";
pub const NATIVE: &[u8] = b"native";
pub const BUILD: &[u8] = b"build";
pub const BUILD_MULTI_TARGETING: &[u8] = b"buildMultiTargeting";
pub const CONTENT_FILES: &[u8] = b"contentFiles";
pub const RUNTIME_TARGETS: &[u8] = b"runtimeTargets";
pub const TOOLS: &[u8] = b"tools";
pub const EMBED: &[u8] = b"embed";

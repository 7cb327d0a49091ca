//! Lock file format conformance tests.
//!
//! Whole-document behaviour of the reader and canonical writer: round trips,
//! byte stability, default omission, forward compatibility, key handling
//! and rejection of malformed documents.

use lockfile_codec::format::{self, WriteOutcome};
use lockfile_codec::json::TokenKind;
use lockfile_codec::model::{ItemPropertyValue, Version};
use lockfile_codec::{Library, Limits, LockError, LockFile, PackageDependency, Target};
use pretty_assertions::assert_eq;

const CANONICAL: &[u8] = include_bytes!("fixtures/project.assets.json");

/// A file as a restore run might leave it: extra sections, loose
/// whitespace, short and four-part versions, nulls.
const RESTORE_OUTPUT: &str = r#"
{
  "version": 3,
  "targets": {
    "net8.0": {
      "Polly/8.0": {
        "type": "package",
        "dependencies": { "Polly.Core": "8.0.0", "Legacy.Shim": null },
        "frameworkReferences": [ "Microsoft.AspNetCore.App" ],
        "compile": { "lib/net6.0/Polly.dll": { "related": ".pdb;.xml" } },
        "runtime": { "lib/net6.0/Polly.dll": { "weight": 1, "related": ".pdb;.xml" } }
      },
      "Polly.Core/8.0.0.0": { "type": "package", "futureAssets": { "x": [ {}, [] ] } }
    }
  },
  "libraries": {
    "Polly/8.0": { "type": "package", "sha512": null, "files": null, "servicable": false },
    "Polly.Core/8.0.0.0": { "type": "package", "path": "polly.core/8.0.0" }
  },
  "projectFileDependencyGroups": { "net8.0": [ "Polly >= 8.0.0" ], "": [] },
  "packageFolders": { "C:\\Users\\build\\.nuget\\packages\\": {} },
  "project": {
    "version": "1.0.0",
    "restore": { "projectName": "App", "sources": { "https://api.nuget.org/v3/index.json": {} } },
    "frameworks": { "net8.0": { "targetAlias": "net8.0", "dependencies": { "Polly": { "target": "Package", "version": "[8.0.0, )" } } } }
  },
  "logs": [ { "code": "NU1603", "level": "Warning", "message": "approximate best match" } ]
}
"#;

// ============================================================================
// Round trip and stability
// ============================================================================

#[test]
fn canonical_fixture_round_trips_byte_for_byte() {
    let lock_file = format::read_slice(CANONICAL).unwrap();
    let written = format::to_vec(&lock_file).unwrap();
    assert_eq!(
        String::from_utf8(written).unwrap(),
        String::from_utf8(CANONICAL.to_vec()).unwrap()
    );
}

#[test]
fn canonical_fixture_contents() {
    let lock_file = format::read_slice(CANONICAL).unwrap();

    assert_eq!(lock_file.version, Some(3));
    assert_eq!(lock_file.targets.len(), 2);
    assert_eq!(lock_file.libraries.len(), 4);
    assert_eq!(lock_file.package_folders[0].path, "/home/build/.nuget/packages/");

    let target = lock_file.get_target("net8.0", Some("win-x64")).unwrap();
    let sqlite = target.get_library("sqlitepclraw.lib.e_sqlite3").unwrap();
    assert_eq!(
        sqlite.content_files[0].property("copyToOutput"),
        Some(&ItemPropertyValue::Bool(true))
    );
    assert_eq!(
        sqlite.runtime_targets[0].property("rid"),
        Some(&ItemPropertyValue::String("win-x64".to_string()))
    );

    let serilog = lock_file
        .get_library("serilog", Some(&Version::new(3, 1, 1)))
        .unwrap();
    assert!(serilog.has_tools);
    assert!(!serilog.is_serviceable);
}

#[test]
fn write_is_stable() {
    let lock_file = format::read_slice(RESTORE_OUTPUT.as_bytes()).unwrap();
    let first = format::to_vec(&lock_file).unwrap();
    let second = format::to_vec(&lock_file).unwrap();
    assert_eq!(first, second);

    // Output of the writer is a fixed point
    let reread = format::read_slice(&first).unwrap();
    assert_eq!(reread, lock_file);
    assert_eq!(format::to_vec(&reread).unwrap(), first);
}

#[test]
fn restore_output_normalizes() {
    let lock_file = format::read_slice(RESTORE_OUTPUT.as_bytes()).unwrap();

    let target = lock_file.get_target("net8.0", None).unwrap();
    let polly = target.get_library("Polly").unwrap();
    assert_eq!(polly.version, Some(Version::new(8, 0, 0)));
    assert_eq!(
        polly.dependencies,
        vec![
            PackageDependency::new("Polly.Core", Some("8.0.0".to_string())),
            PackageDependency::new("Legacy.Shim", None),
        ]
    );
    assert_eq!(polly.framework_references, vec!["Microsoft.AspNetCore.App"]);
    // Numeric item properties are dropped
    assert_eq!(polly.runtime[0].properties.len(), 1);

    let core = lock_file
        .get_library("Polly.Core", Some(&Version::new(8, 0, 0)))
        .unwrap();
    assert_eq!(core.path.as_deref(), Some("polly.core/8.0.0"));

    let groups = &lock_file.project_file_dependency_groups;
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].framework_name, "");
    assert!(groups[1].dependencies.is_empty());

    let text = String::from_utf8(format::to_vec(&lock_file).unwrap()).unwrap();
    assert!(text.contains("\"Polly/8.0.0\": {"));
    assert!(text.contains("\"Polly.Core/8.0.0\": {"));
    assert!(text.contains("\"Legacy.Shim\": null"));
    assert!(text.contains("\"C:\\\\Users\\\\build\\\\.nuget\\\\packages\\\\\": {}"));
    assert!(!text.contains("\"project\""));
    assert!(!text.contains("\"logs\""));
    assert!(!text.contains("weight"));
}

// ============================================================================
// Default omission
// ============================================================================

#[test]
fn default_library_fields_are_omitted() {
    let mut lock_file = LockFile::new();
    lock_file
        .libraries
        .insert(Library::new("SomeTool", None))
        .unwrap();

    let text = String::from_utf8(format::to_vec(&lock_file).unwrap()).unwrap();
    assert!(text.contains("\"SomeTool\": {}"));
    for field in ["type", "path", "msbuildProject", "sha512", "servicable", "hasTools", "files"] {
        assert!(!text.contains(&format!("\"{field}\"")), "{field} was written");
    }

    let reread = format::read_slice(text.as_bytes()).unwrap();
    let library = reread.get_library("SomeTool", None).unwrap();
    assert_eq!(library, &Library::new("SomeTool", None));
}

#[test]
fn explicit_defaults_read_like_absent_fields() {
    let explicit = format::read_slice(
        br#"{"libraries": {"A/1.0.0": {"servicable": false, "hasTools": false, "files": [], "type": null}}}"#,
    )
    .unwrap();
    let absent = format::read_slice(br#"{"libraries": {"A/1.0.0": {}}}"#).unwrap();
    assert_eq!(explicit, absent);
}

// ============================================================================
// Forward compatibility
// ============================================================================

#[test]
fn unknown_library_member_is_ignored() {
    let lock_file = format::read_slice(
        br#"{"libraries": {"A/1.0.0": {"futureField": 42, "type": "package"}}}"#,
    )
    .unwrap();
    let library = lock_file.libraries.iter().next().unwrap();
    assert_eq!(library.library_type.as_deref(), Some("package"));

    let text = String::from_utf8(format::to_vec(&lock_file).unwrap()).unwrap();
    assert!(!text.contains("futureField"));
}

#[test]
fn unknown_members_of_any_shape_are_ignored() {
    for value in [
        "null",
        "true",
        "-1.5e3",
        r#""text""#,
        "[]",
        "{}",
        r#"[[{"a": [1, {"b": null}]}], {"c": {"d": []}}]"#,
    ] {
        let input = format!(r#"{{"libraries": {{"A/1.0.0": {{"future": {value}, "hasTools": true}}}}}}"#);
        let lock_file = format::read_slice(input.as_bytes()).unwrap();
        assert!(lock_file.libraries.iter().next().unwrap().has_tools, "{value}");
    }
}

// ============================================================================
// Composite keys
// ============================================================================

#[test]
fn composite_key_split() {
    let lock_file = format::read_slice(
        br#"{"libraries": {"Newtonsoft.Json/13.0.1": {}, "SomeTool": {}}}"#,
    )
    .unwrap();
    let libraries: Vec<_> = lock_file.libraries.iter().collect();

    assert_eq!(libraries[0].name, "Newtonsoft.Json");
    assert_eq!(libraries[0].version, Some(Version::new(13, 0, 1)));
    assert_eq!(libraries[1].name, "SomeTool");
    assert_eq!(libraries[1].version, None);
}

#[test]
fn malformed_keys_rejected() {
    assert!(matches!(
        format::read_slice(br#"{"libraries": {"/1.0.0": {}}}"#),
        Err(LockError::MalformedKey { .. })
    ));
    assert!(matches!(
        format::read_slice(br#"{"libraries": {"A/one": {}}}"#),
        Err(LockError::InvalidVersion { .. })
    ));
    assert!(matches!(
        format::read_slice(br#"{"libraries": {"A/1.2.3.4.5": {}}}"#),
        Err(LockError::InvalidVersion { .. })
    ));
}

#[test]
fn four_part_versions_round_trip() {
    let input = br#"{"targets": {"net48": {"Antlr/3.5.0.2": {"type": "package"}}}, "libraries": {"Antlr/3.5.0.2": {"type": "package"}}}"#;
    let lock_file = format::read_slice(input).unwrap();
    let revision = Version::new(3, 5, 0).with_revision(2);
    assert!(lock_file.get_library("antlr", Some(&revision)).is_some());
    assert!(lock_file.get_library("antlr", Some(&Version::new(3, 5, 0))).is_none());

    let written = String::from_utf8(format::to_vec(&lock_file).unwrap()).unwrap();
    assert!(written.contains("\"Antlr/3.5.0.2\": {"));
    assert_eq!(format::read_slice(written.as_bytes()).unwrap(), lock_file);
}

#[test]
fn unreadable_keys_are_not_written() {
    let mut lock_file = LockFile::new();
    lock_file.libraries.insert(Library::new("a/b", None)).unwrap();
    assert!(matches!(
        format::to_vec(&lock_file),
        Err(LockError::MalformedKey { .. })
    ));

    let mut lock_file = LockFile::new();
    lock_file
        .targets
        .push(Target::new("net8.0", Some(String::new())));
    assert!(matches!(
        format::to_vec(&lock_file),
        Err(LockError::MalformedKey { .. })
    ));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project.assets.json");
    assert!(format::write_path(&lock_file, &path).is_err());
    assert!(!path.exists());
}

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn library_array_instead_of_object_rejected() {
    let input = br#"{"libraries": {"A/1.0.0": ["a.dll"]}}"#;
    let err = format::read_slice(input).unwrap_err();

    assert!(err.is_format_error());
    match err {
        LockError::UnexpectedToken {
            expected,
            found,
            position,
        } => {
            assert_eq!(expected, TokenKind::StartObject);
            assert_eq!(found, TokenKind::StartArray);
            assert_eq!(position, 26);
        }
        other => panic!("expected UnexpectedToken, got {other:?}"),
    }
}

#[test]
fn section_of_wrong_kind_rejected() {
    let err = format::read_slice(br#"{"libraries": []}"#).unwrap_err();
    assert!(matches!(
        err,
        LockError::UnexpectedToken {
            expected: TokenKind::StartObject,
            found: TokenKind::StartArray,
            ..
        }
    ));
}

#[test]
fn truncated_fixture_always_fails() {
    // A prefix of a valid document never parses, whatever its length.
    for len in (0..CANONICAL.len()).step_by(7) {
        let err = format::read_slice(&CANONICAL[..len]).unwrap_err();
        assert!(err.is_format_error(), "prefix {len}: {err}");
    }
}

// ============================================================================
// Identity
// ============================================================================

#[test]
fn duplicate_identity_rejected() {
    let err = format::read_slice(
        br#"{"libraries": {"Serilog/3.1.1": {}, "serilog/3.1.1": {"type": "package"}}}"#,
    )
    .unwrap_err();
    assert!(matches!(err, LockError::DuplicateLibrary(key) if key == "serilog/3.1.1"));
}

#[test]
fn normalized_versions_collide() {
    let err = format::read_slice(br#"{"libraries": {"A/1.0": {}, "A/1.0.0.0": {}}}"#).unwrap_err();
    assert!(matches!(err, LockError::DuplicateLibrary(_)));
}

#[test]
fn build_metadata_does_not_distinguish_libraries() {
    let err = format::read_slice(br#"{"libraries": {"A/1.0.0+abc": {}, "A/1.0.0+def": {}}}"#)
        .unwrap_err();
    assert!(matches!(err, LockError::DuplicateLibrary(key) if key == "A/1.0.0+def"));
}

#[test]
fn same_name_different_versions_coexist() {
    let lock_file =
        format::read_slice(br#"{"libraries": {"A/1.0.0": {}, "A/2.0.0": {}, "A": {}}}"#).unwrap();
    assert_eq!(lock_file.libraries.len(), 3);
}

// ============================================================================
// Limits and files
// ============================================================================

#[test]
fn strict_limits_reject_long_strings() {
    let sha = "a".repeat(128 * 1024);
    let input = format!(r#"{{"libraries": {{"A/1.0.0": {{"sha512": "{sha}"}}}}}}"#);

    assert!(format::read_slice(input.as_bytes()).is_ok());
    assert!(matches!(
        format::read_with_limits(input.as_bytes(), Limits::strict()),
        Err(LockError::StringTooLong { .. })
    ));
}

#[test]
fn write_path_preserves_unchanged_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project.assets.json");
    std::fs::write(&path, CANONICAL).unwrap();

    let lock_file = format::read_path(&path, Limits::standard()).unwrap();
    assert_eq!(
        format::write_path(&lock_file, &path).unwrap(),
        WriteOutcome::Unchanged
    );

    let loose = format::read_slice(RESTORE_OUTPUT.as_bytes()).unwrap();
    assert_eq!(format::write_path(&loose, &path).unwrap(), WriteOutcome::Written);
    assert_eq!(format::read_path(&path, Limits::standard()).unwrap(), loose);
}

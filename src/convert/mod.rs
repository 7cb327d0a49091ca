//! Entity converters.
//!
//! Each lock file entity has one converter that reads exactly the tokens
//! belonging to it and writes them back in canonical form. Every converter
//! has the same shape:
//!
//! 1. read the entity's key (a composite property name) or start token
//! 2. loop over members, comparing each name against the literals in
//!    [`fields`] and reading the matching typed value
//! 3. skip any member that matches nothing, whatever its nesting
//! 4. stop on the closing token, leaving the cursor on it
//!
//! Writers emit members in the same order the readers dispatch on, and omit
//! members holding their default value.

use std::io::{Read, Write};

use crate::error::{LockError, LockResult};
use crate::json::{Cursor, JsonWriter, TokenKind};
use crate::model::{parse_version, Version};

pub(crate) mod fields;
mod group;
mod library;
mod lock_file;
mod target;

pub use group::{PackageFolderConverter, ProjectFileDependencyGroupConverter};
pub use library::LibraryConverter;
pub use lock_file::LockFileConverter;
pub use target::{
    LockFileItemConverter, PackageDependencyConverter, TargetConverter, TargetLibraryConverter,
};

/// Reads and writes one entity type.
///
/// `read` is called with the cursor on the token that begins the entity: its
/// property name for map-keyed entities, or `StartObject` for the root. It
/// returns with the cursor on the entity's last token.
pub trait Converter {
    /// The entity this converter produces.
    type Entity;

    /// Read one entity.
    fn read<R: Read>(cursor: &mut Cursor<R>) -> LockResult<Self::Entity>;

    /// Write one entity, including its key for map-keyed entities.
    fn write<W: Write>(writer: &mut JsonWriter<W>, entity: &Self::Entity) -> LockResult<()>;
}

/// Loop over the members of the object the cursor is on.
///
/// `member` is called with the cursor on each property name and must consume
/// the member's value.
pub(crate) fn read_members<R, F>(cursor: &mut Cursor<R>, mut member: F) -> LockResult<()>
where
    R: Read,
    F: FnMut(&mut Cursor<R>) -> LockResult<()>,
{
    cursor.expect(TokenKind::StartObject)?;
    loop {
        match cursor.advance()? {
            TokenKind::EndObject => return Ok(()),
            TokenKind::PropertyName => member(cursor)?,
            _ => return Err(cursor.unexpected(TokenKind::PropertyName)),
        }
    }
}

/// Advance to the next value, require an object, and loop over its members.
pub(crate) fn read_object<R, F>(cursor: &mut Cursor<R>, member: F) -> LockResult<()>
where
    R: Read,
    F: FnMut(&mut Cursor<R>) -> LockResult<()>,
{
    cursor.advance()?;
    read_members(cursor, member)
}

/// Skip the value of a member no converter knows about.
pub(crate) fn skip_unknown<R: Read>(cursor: &mut Cursor<R>) -> LockResult<()> {
    tracing::trace!(
        member = cursor.current_str().unwrap_or("<invalid utf-8>"),
        position = cursor.position(),
        "skipping unknown member"
    );
    cursor.skip_subtree()
}

/// Split a composite key once on `/`.
pub(crate) fn split_key(key: &str) -> LockResult<(&str, Option<&str>)> {
    let (name, rest) = match key.split_once('/') {
        Some((name, rest)) => (name, Some(rest)),
        None => (key, None),
    };
    if name.is_empty() {
        return Err(LockError::MalformedKey {
            key: key.to_string(),
            reason: "empty name",
        });
    }
    Ok((name, rest))
}

/// Parse a `name` or `name/version` key.
pub(crate) fn parse_library_key(key: &str) -> LockResult<(String, Option<Version>)> {
    let (name, version) = split_key(key)?;
    let version = version.map(parse_version).transpose()?;
    Ok((name.to_string(), version))
}

/// Check that the name part of a composite key reads back unchanged.
///
/// The reader splits on the first `/` and needs a non-empty name before it.
pub(crate) fn check_key_name(key: &str, name: &str) -> LockResult<()> {
    let reason = if name.is_empty() {
        "empty name"
    } else if name.contains('/') {
        "name contains '/'"
    } else {
        return Ok(());
    };
    Err(LockError::MalformedKey {
        key: key.to_string(),
        reason,
    })
}

/// Write `"field": "value"` when the value is present.
pub(crate) fn write_optional_string<W: Write>(
    writer: &mut JsonWriter<W>,
    field: &[u8],
    value: Option<&str>,
) -> LockResult<()> {
    match value {
        Some(value) => writer.write_string_field(field, value),
        None => Ok(()),
    }
}

/// Write `"field": true` when the flag is set.
pub(crate) fn write_flag<W: Write>(
    writer: &mut JsonWriter<W>,
    field: &[u8],
    value: bool,
) -> LockResult<()> {
    if value {
        writer.write_field(field)?;
        writer.write_bool(true)?;
    }
    Ok(())
}

/// Write a string array member when it is non-empty.
pub(crate) fn write_string_list<W: Write>(
    writer: &mut JsonWriter<W>,
    field: &[u8],
    values: &[String],
) -> LockResult<()> {
    if values.is_empty() {
        return Ok(());
    }
    writer.write_string_array_field(field, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_key() {
        assert_eq!(
            split_key("Newtonsoft.Json/13.0.1").unwrap(),
            ("Newtonsoft.Json", Some("13.0.1"))
        );
        assert_eq!(split_key("SomeTool").unwrap(), ("SomeTool", None));
        // Only the first slash splits
        assert_eq!(
            split_key("net8.0/linux/x64").unwrap(),
            ("net8.0", Some("linux/x64"))
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            split_key("/1.0.0"),
            Err(LockError::MalformedKey { .. })
        ));
        assert!(matches!(split_key(""), Err(LockError::MalformedKey { .. })));
    }

    #[test]
    fn test_check_key_name() {
        assert!(check_key_name("A/1.0.0", "A").is_ok());
        assert!(matches!(
            check_key_name("/1.0.0", ""),
            Err(LockError::MalformedKey { reason: "empty name", .. })
        ));
        assert!(matches!(
            check_key_name("a/b", "a/b"),
            Err(LockError::MalformedKey { ref key, .. }) if key == "a/b"
        ));
    }

    #[test]
    fn test_parse_library_key() {
        let (name, version) = parse_library_key("Newtonsoft.Json/13.0.1").unwrap();
        assert_eq!(name, "Newtonsoft.Json");
        assert_eq!(version, Some(Version::new(13, 0, 1)));

        let (name, version) = parse_library_key("SomeTool").unwrap();
        assert_eq!(name, "SomeTool");
        assert_eq!(version, None);

        assert!(matches!(
            parse_library_key("Broken/not.a.version"),
            Err(LockError::InvalidVersion { .. })
        ));
    }
}

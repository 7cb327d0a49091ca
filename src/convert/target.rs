//! Targets and everything nested inside them.

use std::io::{Read, Write};

use super::{
    check_key_name, fields, parse_library_key, read_members, read_object, skip_unknown,
    split_key, write_optional_string, write_string_list, Converter,
};
use crate::error::{LockError, LockResult};
use crate::json::{Cursor, JsonWriter, TokenKind};
use crate::model::{ItemPropertyValue, LockFileItem, PackageDependency, Target, TargetLibrary};

/// Converter for [`Target`], keyed by `framework` or `framework/rid`.
pub struct TargetConverter;

impl Converter for TargetConverter {
    type Entity = Target;

    fn read<R: Read>(cursor: &mut Cursor<R>) -> LockResult<Target> {
        cursor.expect(TokenKind::PropertyName)?;
        let key = cursor.current_str()?;
        let (framework, runtime_identifier) = split_key(key)?;
        if runtime_identifier == Some("") {
            return Err(LockError::MalformedKey {
                key: key.to_string(),
                reason: "empty runtime identifier",
            });
        }
        let mut target = Target::new(framework, runtime_identifier.map(str::to_string));

        read_object(cursor, |cursor| {
            target.libraries.push(TargetLibraryConverter::read(cursor)?);
            Ok(())
        })?;

        Ok(target)
    }

    fn write<W: Write>(writer: &mut JsonWriter<W>, target: &Target) -> LockResult<()> {
        let key = target.key();
        check_key_name(&key, &target.framework)?;
        if target.runtime_identifier.as_deref() == Some("") {
            return Err(LockError::MalformedKey {
                key,
                reason: "empty runtime identifier",
            });
        }
        writer.write_property_name(&key)?;
        writer.write_start_object()?;
        for library in &target.libraries {
            TargetLibraryConverter::write(writer, library)?;
        }
        writer.write_end_object()
    }
}

/// Converter for [`TargetLibrary`], keyed by `name/version`.
pub struct TargetLibraryConverter;

impl Converter for TargetLibraryConverter {
    type Entity = TargetLibrary;

    fn read<R: Read>(cursor: &mut Cursor<R>) -> LockResult<TargetLibrary> {
        cursor.expect(TokenKind::PropertyName)?;
        let (name, version) = parse_library_key(cursor.current_str()?)?;
        let mut library = TargetLibrary::new(name, version);

        read_object(cursor, |cursor| {
            if cursor.property_name_equals(fields::TYPE) {
                library.library_type = cursor.read_nullable_string()?;
            } else if cursor.property_name_equals(fields::FRAMEWORK) {
                library.framework = cursor.read_nullable_string()?;
            } else if cursor.property_name_equals(fields::DEPENDENCIES) {
                read_object(cursor, |cursor| {
                    library
                        .dependencies
                        .push(PackageDependencyConverter::read(cursor)?);
                    Ok(())
                })?;
            } else if cursor.property_name_equals(fields::FRAMEWORK_ASSEMBLIES) {
                cursor.read_string_array_into(&mut library.framework_assemblies)?;
            } else if cursor.property_name_equals(fields::FRAMEWORK_REFERENCES) {
                cursor.read_string_array_into(&mut library.framework_references)?;
            } else if cursor.property_name_equals(fields::COMPILE) {
                read_items(cursor, &mut library.compile)?;
            } else if cursor.property_name_equals(fields::RUNTIME) {
                read_items(cursor, &mut library.runtime)?;
            } else if cursor.property_name_equals(fields::RESOURCE) {
                read_items(cursor, &mut library.resource)?;
            } else if cursor.property_name_equals(fields::NATIVE) {
                read_items(cursor, &mut library.native)?;
            } else if cursor.property_name_equals(fields::BUILD) {
                read_items(cursor, &mut library.build)?;
            } else if cursor.property_name_equals(fields::BUILD_MULTI_TARGETING) {
                read_items(cursor, &mut library.build_multi_targeting)?;
            } else if cursor.property_name_equals(fields::CONTENT_FILES) {
                read_items(cursor, &mut library.content_files)?;
            } else if cursor.property_name_equals(fields::RUNTIME_TARGETS) {
                read_items(cursor, &mut library.runtime_targets)?;
            } else if cursor.property_name_equals(fields::TOOLS) {
                read_items(cursor, &mut library.tools)?;
            } else if cursor.property_name_equals(fields::EMBED) {
                read_items(cursor, &mut library.embed)?;
            } else {
                skip_unknown(cursor)?;
            }
            Ok(())
        })?;

        Ok(library)
    }

    fn write<W: Write>(writer: &mut JsonWriter<W>, library: &TargetLibrary) -> LockResult<()> {
        let key = library.key();
        check_key_name(&key, &library.name)?;
        writer.write_property_name(&key)?;
        writer.write_start_object()?;
        write_optional_string(writer, fields::TYPE, library.library_type.as_deref())?;
        write_optional_string(writer, fields::FRAMEWORK, library.framework.as_deref())?;
        if !library.dependencies.is_empty() {
            writer.write_field(fields::DEPENDENCIES)?;
            writer.write_start_object()?;
            for dependency in &library.dependencies {
                PackageDependencyConverter::write(writer, dependency)?;
            }
            writer.write_end_object()?;
        }
        write_string_list(
            writer,
            fields::FRAMEWORK_ASSEMBLIES,
            &library.framework_assemblies,
        )?;
        write_string_list(
            writer,
            fields::FRAMEWORK_REFERENCES,
            &library.framework_references,
        )?;
        write_items(writer, fields::COMPILE, &library.compile)?;
        write_items(writer, fields::RUNTIME, &library.runtime)?;
        write_items(writer, fields::RESOURCE, &library.resource)?;
        write_items(writer, fields::NATIVE, &library.native)?;
        write_items(writer, fields::BUILD, &library.build)?;
        write_items(
            writer,
            fields::BUILD_MULTI_TARGETING,
            &library.build_multi_targeting,
        )?;
        write_items(writer, fields::CONTENT_FILES, &library.content_files)?;
        write_items(writer, fields::RUNTIME_TARGETS, &library.runtime_targets)?;
        write_items(writer, fields::TOOLS, &library.tools)?;
        write_items(writer, fields::EMBED, &library.embed)?;
        writer.write_end_object()
    }
}

/// Read an item group object into `items`.
fn read_items<R: Read>(cursor: &mut Cursor<R>, items: &mut Vec<LockFileItem>) -> LockResult<()> {
    read_object(cursor, |cursor| {
        items.push(LockFileItemConverter::read(cursor)?);
        Ok(())
    })
}

/// Write an item group when it is non-empty.
fn write_items<W: Write>(
    writer: &mut JsonWriter<W>,
    field: &[u8],
    items: &[LockFileItem],
) -> LockResult<()> {
    if items.is_empty() {
        return Ok(());
    }
    writer.write_field(field)?;
    writer.write_start_object()?;
    for item in items {
        LockFileItemConverter::write(writer, item)?;
    }
    writer.write_end_object()
}

/// Converter for [`PackageDependency`]: `"id": "range"` or `"id": null`.
pub struct PackageDependencyConverter;

impl Converter for PackageDependencyConverter {
    type Entity = PackageDependency;

    fn read<R: Read>(cursor: &mut Cursor<R>) -> LockResult<PackageDependency> {
        cursor.expect(TokenKind::PropertyName)?;
        let id = cursor.current_str()?.to_owned();
        let version_range = cursor.read_nullable_string()?;
        Ok(PackageDependency { id, version_range })
    }

    fn write<W: Write>(writer: &mut JsonWriter<W>, dependency: &PackageDependency) -> LockResult<()> {
        writer.write_property_name(&dependency.id)?;
        match &dependency.version_range {
            Some(range) => writer.write_string(range),
            None => writer.write_null(),
        }
    }
}

/// Converter for [`LockFileItem`]: the asset path mapped to its properties.
///
/// Only string and boolean properties are kept; values of any other kind
/// are skipped.
pub struct LockFileItemConverter;

impl Converter for LockFileItemConverter {
    type Entity = LockFileItem;

    fn read<R: Read>(cursor: &mut Cursor<R>) -> LockResult<LockFileItem> {
        cursor.expect(TokenKind::PropertyName)?;
        let mut item = LockFileItem::new(cursor.current_str()?);

        cursor.advance()?;
        read_members(cursor, |cursor| {
            let name = cursor.current_str()?.to_owned();
            let value = match cursor.advance()? {
                TokenKind::String => ItemPropertyValue::String(cursor.current_str()?.to_owned()),
                TokenKind::True => ItemPropertyValue::Bool(true),
                TokenKind::False => ItemPropertyValue::Bool(false),
                _ => {
                    tracing::trace!(property = %name, "skipping non-scalar item property");
                    return cursor.skip_subtree();
                }
            };
            item.properties.push((name, value));
            Ok(())
        })?;

        Ok(item)
    }

    fn write<W: Write>(writer: &mut JsonWriter<W>, item: &LockFileItem) -> LockResult<()> {
        writer.write_property_name(&item.path)?;
        writer.write_start_object()?;
        for (name, value) in &item.properties {
            writer.write_property_name(name)?;
            match value {
                ItemPropertyValue::String(text) => writer.write_string(text)?,
                ItemPropertyValue::Bool(flag) => writer.write_bool(*flag)?,
            }
        }
        writer.write_end_object()
    }
}

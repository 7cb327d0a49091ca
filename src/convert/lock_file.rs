//! The root object.

use std::io::{Read, Write};

use super::{
    fields, read_members, read_object, skip_unknown, Converter, LibraryConverter,
    PackageFolderConverter, ProjectFileDependencyGroupConverter, TargetConverter,
};
use crate::error::{LockError, LockResult};
use crate::json::{Cursor, JsonWriter};
use crate::model::LockFile;

/// Converter for the root [`LockFile`] object.
///
/// Unlike the map-keyed entities it starts on `StartObject`. The four root
/// collections are always written, empty or not; `version` is written when
/// present.
pub struct LockFileConverter;

impl Converter for LockFileConverter {
    type Entity = LockFile;

    fn read<R: Read>(cursor: &mut Cursor<R>) -> LockResult<LockFile> {
        let mut lock_file = LockFile::default();

        read_members(cursor, |cursor| {
            if cursor.property_name_equals(fields::VERSION) {
                let value = cursor.read_i64()?;
                let version = u32::try_from(value).map_err(|_| LockError::NumberOutOfRange {
                    position: cursor.position(),
                })?;
                lock_file.version = Some(version);
            } else if cursor.property_name_equals(fields::TARGETS) {
                read_object(cursor, |cursor| {
                    lock_file.targets.push(TargetConverter::read(cursor)?);
                    Ok(())
                })?;
            } else if cursor.property_name_equals(fields::LIBRARIES) {
                read_object(cursor, |cursor| {
                    lock_file.libraries.insert(LibraryConverter::read(cursor)?)
                })?;
            } else if cursor.property_name_equals(fields::PROJECT_FILE_DEPENDENCY_GROUPS) {
                read_object(cursor, |cursor| {
                    lock_file
                        .project_file_dependency_groups
                        .push(ProjectFileDependencyGroupConverter::read(cursor)?);
                    Ok(())
                })?;
            } else if cursor.property_name_equals(fields::PACKAGE_FOLDERS) {
                read_object(cursor, |cursor| {
                    lock_file
                        .package_folders
                        .push(PackageFolderConverter::read(cursor)?);
                    Ok(())
                })?;
            } else {
                skip_unknown(cursor)?;
            }
            Ok(())
        })?;

        Ok(lock_file)
    }

    fn write<W: Write>(writer: &mut JsonWriter<W>, lock_file: &LockFile) -> LockResult<()> {
        writer.write_start_object()?;

        if let Some(version) = lock_file.version {
            writer.write_field(fields::VERSION)?;
            writer.write_i64(i64::from(version))?;
        }

        writer.write_field(fields::TARGETS)?;
        writer.write_start_object()?;
        for target in &lock_file.targets {
            TargetConverter::write(writer, target)?;
        }
        writer.write_end_object()?;

        writer.write_field(fields::LIBRARIES)?;
        writer.write_start_object()?;
        for library in &lock_file.libraries {
            LibraryConverter::write(writer, library)?;
        }
        writer.write_end_object()?;

        writer.write_field(fields::PROJECT_FILE_DEPENDENCY_GROUPS)?;
        writer.write_start_object()?;
        for group in &lock_file.project_file_dependency_groups {
            ProjectFileDependencyGroupConverter::write(writer, group)?;
        }
        writer.write_end_object()?;

        writer.write_field(fields::PACKAGE_FOLDERS)?;
        writer.write_start_object()?;
        for folder in &lock_file.package_folders {
            PackageFolderConverter::write(writer, folder)?;
        }
        writer.write_end_object()?;

        writer.write_end_object()
    }
}

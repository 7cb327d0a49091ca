//! Project dependency groups and package folders.

use std::io::{Read, Write};

use super::{read_object, skip_unknown, Converter};
use crate::error::LockResult;
use crate::json::{Cursor, JsonWriter, TokenKind};
use crate::model::{PackageFolder, ProjectFileDependencyGroup};

/// Converter for [`ProjectFileDependencyGroup`]: a framework name mapped to
/// an array of dependency specifications.
pub struct ProjectFileDependencyGroupConverter;

impl Converter for ProjectFileDependencyGroupConverter {
    type Entity = ProjectFileDependencyGroup;

    fn read<R: Read>(cursor: &mut Cursor<R>) -> LockResult<ProjectFileDependencyGroup> {
        cursor.expect(TokenKind::PropertyName)?;
        let mut group = ProjectFileDependencyGroup::new(cursor.current_str()?, Vec::new());
        cursor.read_string_array_into(&mut group.dependencies)?;
        Ok(group)
    }

    fn write<W: Write>(
        writer: &mut JsonWriter<W>,
        group: &ProjectFileDependencyGroup,
    ) -> LockResult<()> {
        writer.write_property_name(&group.framework_name)?;
        writer.write_string_array(&group.dependencies)
    }
}

/// Converter for [`PackageFolder`]: a path mapped to an object with no
/// known members.
pub struct PackageFolderConverter;

impl Converter for PackageFolderConverter {
    type Entity = PackageFolder;

    fn read<R: Read>(cursor: &mut Cursor<R>) -> LockResult<PackageFolder> {
        cursor.expect(TokenKind::PropertyName)?;
        let folder = PackageFolder::new(cursor.current_str()?);
        read_object(cursor, skip_unknown)?;
        Ok(folder)
    }

    fn write<W: Write>(writer: &mut JsonWriter<W>, folder: &PackageFolder) -> LockResult<()> {
        writer.write_property_name(&folder.path)?;
        writer.write_start_object()?;
        writer.write_end_object()
    }
}

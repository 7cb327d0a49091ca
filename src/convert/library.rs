//! Library entries of the `libraries` section.

use std::io::{Read, Write};

use super::{
    check_key_name, fields, parse_library_key, read_object, skip_unknown, write_flag,
    write_optional_string, write_string_list, Converter,
};
use crate::error::LockResult;
use crate::json::{Cursor, JsonWriter, TokenKind};
use crate::model::Library;

/// Converter for [`Library`], keyed by `name` or `name/version`.
pub struct LibraryConverter;

impl Converter for LibraryConverter {
    type Entity = Library;

    fn read<R: Read>(cursor: &mut Cursor<R>) -> LockResult<Library> {
        cursor.expect(TokenKind::PropertyName)?;
        let (name, version) = parse_library_key(cursor.current_str()?)?;
        let mut library = Library::new(name, version);

        read_object(cursor, |cursor| {
            if cursor.property_name_equals(fields::TYPE) {
                library.library_type = cursor.read_nullable_string()?;
            } else if cursor.property_name_equals(fields::PATH) {
                library.path = cursor.read_nullable_string()?;
            } else if cursor.property_name_equals(fields::MSBUILD_PROJECT) {
                library.msbuild_project = cursor.read_nullable_string()?;
            } else if cursor.property_name_equals(fields::SHA512) {
                library.sha512 = cursor.read_nullable_string()?;
            } else if cursor.property_name_equals(fields::SERVICEABLE) {
                library.is_serviceable = cursor.read_boolean()?;
            } else if cursor.property_name_equals(fields::HAS_TOOLS) {
                library.has_tools = cursor.read_boolean()?;
            } else if cursor.property_name_equals(fields::FILES) {
                cursor.read_string_array_into(&mut library.files)?;
            } else {
                skip_unknown(cursor)?;
            }
            Ok(())
        })?;

        Ok(library)
    }

    fn write<W: Write>(writer: &mut JsonWriter<W>, library: &Library) -> LockResult<()> {
        let key = library.key();
        check_key_name(&key, &library.name)?;
        writer.write_property_name(&key)?;
        writer.write_start_object()?;
        write_optional_string(writer, fields::TYPE, library.library_type.as_deref())?;
        write_optional_string(writer, fields::PATH, library.path.as_deref())?;
        write_optional_string(
            writer,
            fields::MSBUILD_PROJECT,
            library.msbuild_project.as_deref(),
        )?;
        write_optional_string(writer, fields::SHA512, library.sha512.as_deref())?;
        write_flag(writer, fields::SERVICEABLE, library.is_serviceable)?;
        write_flag(writer, fields::HAS_TOOLS, library.has_tools)?;
        write_string_list(writer, fields::FILES, &library.files)?;
        writer.write_end_object()
    }
}

//! Reading and writing whole lock files.
//!
//! # Example
//!
//! ```
//! use lockfile_codec::format;
//!
//! let lock_file = format::read_slice(br#"{"version": 3, "targets": {"net8.0": {}}}"#)?;
//! assert_eq!(lock_file.targets[0].framework, "net8.0");
//!
//! let text = format::to_vec(&lock_file)?;
//! assert_eq!(format::read_slice(&text)?, lock_file);
//! # Ok::<(), lockfile_codec::LockError>(())
//! ```

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::convert::{Converter, LockFileConverter};
use crate::error::LockResult;
use crate::json::{Cursor, JsonWriter, Limits, TokenKind};
use crate::model::LockFile;

/// Result of [`write_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file already held exactly these bytes and was left untouched.
    Unchanged,
    /// The file was created or replaced.
    Written,
}

/// Read a lock file from a byte stream with the standard limits.
pub fn read<R: Read>(reader: R) -> LockResult<LockFile> {
    read_with_limits(reader, Limits::standard())
}

/// Read a lock file from memory with the standard limits.
pub fn read_slice(input: &[u8]) -> LockResult<LockFile> {
    read_with_limits(input, Limits::standard())
}

/// Read a lock file from a byte stream.
///
/// The document must be a single object; anything but whitespace after it
/// is an error.
pub fn read_with_limits<R: Read>(reader: R, limits: Limits) -> LockResult<LockFile> {
    let mut cursor = Cursor::new(reader, limits);
    cursor.advance_expecting(TokenKind::StartObject)?;
    let lock_file = LockFileConverter::read(&mut cursor)?;
    cursor.finish()?;

    tracing::debug!(
        targets = lock_file.targets.len(),
        libraries = lock_file.libraries.len(),
        "read lock file"
    );
    Ok(lock_file)
}

/// Read a lock file from disk.
pub fn read_path(path: impl AsRef<Path>, limits: Limits) -> LockResult<LockFile> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_with_limits(file, limits).inspect_err(|err| {
        tracing::debug!(path = %path.display(), error = %err, "failed to read lock file");
    })
}

/// Write the canonical form of `lock_file`.
pub fn write<W: Write>(lock_file: &LockFile, out: W) -> LockResult<()> {
    let mut writer = JsonWriter::new(out);
    LockFileConverter::write(&mut writer, lock_file)?;
    writer.flush()
}

/// Serialize the canonical form into memory.
pub fn to_vec(lock_file: &LockFile) -> LockResult<Vec<u8>> {
    let mut out = Vec::new();
    write(lock_file, &mut out)?;
    Ok(out)
}

/// Write `lock_file` to `path` unless the file already holds the same bytes.
///
/// The new content goes to a temporary file in the same directory, which is
/// then renamed over `path`.
pub fn write_path(lock_file: &LockFile, path: impl AsRef<Path>) -> LockResult<WriteOutcome> {
    let path = path.as_ref();
    let content = to_vec(lock_file)?;

    match fs::read(path) {
        Ok(existing) if existing == content => {
            tracing::debug!(path = %path.display(), "lock file unchanged");
            return Ok(WriteOutcome::Unchanged);
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err.into()),
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&content)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| err.error)?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote lock file");
    Ok(WriteOutcome::Written)
}

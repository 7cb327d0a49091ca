//! Indented JSON emitter used by the canonical lock file writer.
//!
//! Output is fully determined by the sequence of calls: two-space
//! indentation, `"name": value` members, `{}`/`[]` for empty containers and
//! no trailing newline. The writer never reorders anything; converters are
//! responsible for emitting members in their fixed order.

use std::io::Write;

use crate::error::LockResult;

const INDENT: &[u8] = b"  ";

/// Streaming JSON writer.
pub struct JsonWriter<W> {
    out: W,
    /// One entry per open container: whether it has members yet
    has_items: Vec<bool>,
    /// A property name was just written and its value is pending
    after_name: bool,
}

impl<W: Write> JsonWriter<W> {
    /// Create a writer over `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            has_items: Vec::new(),
            after_name: false,
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> LockResult<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Write a member name whose text is arbitrary (escaped as needed).
    pub fn write_property_name(&mut self, name: &str) -> LockResult<()> {
        self.write_field(name.as_bytes())
    }

    /// Write a member name given as raw UTF-8 bytes.
    pub fn write_field(&mut self, name: &[u8]) -> LockResult<()> {
        self.separate()?;
        write_escaped(&mut self.out, name)?;
        self.out.write_all(b": ")?;
        self.after_name = true;
        Ok(())
    }

    /// Open an object.
    pub fn write_start_object(&mut self) -> LockResult<()> {
        self.begin_value()?;
        self.out.write_all(b"{")?;
        self.has_items.push(false);
        Ok(())
    }

    /// Close the innermost object.
    pub fn write_end_object(&mut self) -> LockResult<()> {
        self.end_container(b"}")
    }

    /// Open an array.
    pub fn write_start_array(&mut self) -> LockResult<()> {
        self.begin_value()?;
        self.out.write_all(b"[")?;
        self.has_items.push(false);
        Ok(())
    }

    /// Close the innermost array.
    pub fn write_end_array(&mut self) -> LockResult<()> {
        self.end_container(b"]")
    }

    /// Write a string value.
    pub fn write_string(&mut self, value: &str) -> LockResult<()> {
        self.begin_value()?;
        write_escaped(&mut self.out, value.as_bytes())?;
        Ok(())
    }

    /// Write a boolean value.
    pub fn write_bool(&mut self, value: bool) -> LockResult<()> {
        self.begin_value()?;
        self.out
            .write_all(if value { b"true" as &[u8] } else { b"false" })?;
        Ok(())
    }

    /// Write an integer value.
    pub fn write_i64(&mut self, value: i64) -> LockResult<()> {
        self.begin_value()?;
        write!(self.out, "{value}")?;
        Ok(())
    }

    /// Write `null`.
    pub fn write_null(&mut self) -> LockResult<()> {
        self.begin_value()?;
        self.out.write_all(b"null")?;
        Ok(())
    }

    /// Write `"field": "value"`.
    pub fn write_string_field(&mut self, field: &[u8], value: &str) -> LockResult<()> {
        self.write_field(field)?;
        self.write_string(value)
    }

    /// Write `"field": [ ... ]` with one string per element.
    pub fn write_string_array_field(&mut self, field: &[u8], values: &[String]) -> LockResult<()> {
        self.write_field(field)?;
        self.write_string_array(values)
    }

    /// Write an array of strings.
    pub fn write_string_array(&mut self, values: &[String]) -> LockResult<()> {
        self.write_start_array()?;
        for value in values {
            self.write_string(value)?;
        }
        self.write_end_array()
    }

    /// Prepare for a value: either it follows a member name, or it is an
    /// array element (or the document root).
    fn begin_value(&mut self) -> LockResult<()> {
        if self.after_name {
            self.after_name = false;
            return Ok(());
        }
        self.separate()
    }

    /// Emit the comma and line break before a new member or element.
    fn separate(&mut self) -> LockResult<()> {
        let Some(has_items) = self.has_items.last_mut() else {
            return Ok(());
        };
        let had_items = std::mem::replace(has_items, true);
        if had_items {
            self.out.write_all(b",")?;
        }
        self.newline()
    }

    fn end_container(&mut self, close: &[u8]) -> LockResult<()> {
        if self.has_items.pop() == Some(true) {
            self.newline()?;
        }
        self.out.write_all(close)?;
        Ok(())
    }

    fn newline(&mut self) -> LockResult<()> {
        self.out.write_all(b"\n")?;
        for _ in 0..self.has_items.len() {
            self.out.write_all(INDENT)?;
        }
        Ok(())
    }
}

/// Write a JSON string literal with escaping.
///
/// Only `"`, `\` and control characters are escaped; everything else is
/// copied through as UTF-8.
fn write_escaped<W: Write>(out: &mut W, value: &[u8]) -> LockResult<()> {
    out.write_all(b"\"")?;
    let mut start = 0;
    for (i, &b) in value.iter().enumerate() {
        let escape: &[u8] = match b {
            b'"' => b"\\\"",
            b'\\' => b"\\\\",
            0x08 => b"\\b",
            0x0C => b"\\f",
            b'\n' => b"\\n",
            b'\r' => b"\\r",
            b'\t' => b"\\t",
            b if b < 0x20 => {
                out.write_all(&value[start..i])?;
                write!(out, "\\u{:04x}", b)?;
                start = i + 1;
                continue;
            }
            _ => continue,
        };
        out.write_all(&value[start..i])?;
        out.write_all(escape)?;
        start = i + 1;
    }
    out.write_all(&value[start..])?;
    out.write_all(b"\"")?;
    Ok(())
}

//! Forward-only JSON token cursor.
//!
//! Reads any [`std::io::Read`] through a fixed refill buffer and exposes one
//! token at a time. Commas and colons are consumed internally, so callers see
//! only structural and value tokens. String and property-name bytes are
//! unescaped into a scratch buffer that is reused for every token; nothing is
//! allocated unless a converter asks for an owned value.
//!
//! Structure is validated while scanning: a document that is not valid JSON
//! fails at the first offending byte. Skipped strings are checked for
//! structure only; UTF-8 validity is checked when a string is materialized.

use std::io::{ErrorKind, Read};

use super::limits::Limits;
use super::types::TokenKind;
use crate::error::{LockError, LockResult};

/// Size of the refill buffer.
const BUFFER_SIZE: usize = 8 * 1024;

/// UTF-8 byte order mark, tolerated before the first token.
const BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

/// What the grammar allows next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// Any value: before the document, after `:`, after `,` in an array
    Value,
    /// A value or `]`, right after `[`
    ValueOrEnd,
    /// A property name or `}`, right after `{`
    NameOrEnd,
    /// A property name, after `,` in an object
    Name,
    /// `,` or the closing bracket of the current container
    CommaOrEnd,
    /// The top-level value is complete
    Done,
}

/// Pull parser positioned on one token at a time.
pub struct Cursor<R> {
    reader: R,
    buffer: Box<[u8]>,
    pos: usize,
    filled: usize,
    /// Stream offset of `buffer[0]`
    offset: u64,
    eof: bool,
    token: TokenKind,
    token_start: u64,
    scratch: Vec<u8>,
    stack: Vec<Container>,
    expect: Expect,
    limits: Limits,
}

impl<'a> Cursor<&'a [u8]> {
    /// Create a cursor over an in-memory document.
    pub fn from_slice(input: &'a [u8], limits: Limits) -> Self {
        Self::new(input, limits)
    }
}

impl<R: Read> Cursor<R> {
    /// Create a cursor over a byte stream.
    pub fn new(reader: R, limits: Limits) -> Self {
        Self {
            reader,
            buffer: vec![0; BUFFER_SIZE].into_boxed_slice(),
            pos: 0,
            filled: 0,
            offset: 0,
            eof: false,
            token: TokenKind::None,
            token_start: 0,
            scratch: Vec::new(),
            stack: Vec::new(),
            expect: Expect::Value,
            limits,
        }
    }

    /// Kind of the current token.
    pub fn token_kind(&self) -> TokenKind {
        self.token
    }

    /// Byte offset of the first byte of the current token.
    pub fn position(&self) -> u64 {
        self.token_start
    }

    /// Number of containers currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Move to the next token.
    pub fn advance(&mut self) -> LockResult<TokenKind> {
        if self.token == TokenKind::None && self.offset() == 0 {
            self.skip_bom()?;
        }

        loop {
            self.skip_whitespace()?;
            self.token_start = self.offset();

            let Some(b) = self.peek()? else {
                return Err(LockError::UnexpectedEof {
                    position: self.token_start,
                });
            };

            match self.expect {
                Expect::Done => return Err(self.invalid("unexpected content after document")),
                Expect::Value => return self.read_value(b),
                Expect::ValueOrEnd if b == b']' => return self.end_container(Container::Array),
                Expect::ValueOrEnd => return self.read_value(b),
                Expect::NameOrEnd if b == b'}' => return self.end_container(Container::Object),
                Expect::NameOrEnd | Expect::Name => return self.read_name(b),
                Expect::CommaOrEnd => match (b, self.stack.last()) {
                    (b',', Some(Container::Object)) => {
                        self.pos += 1;
                        self.expect = Expect::Name;
                    }
                    (b',', Some(Container::Array)) => {
                        self.pos += 1;
                        self.expect = Expect::Value;
                    }
                    (b'}', Some(Container::Object)) => {
                        return self.end_container(Container::Object)
                    }
                    (b']', Some(Container::Array)) => {
                        return self.end_container(Container::Array)
                    }
                    _ => return Err(self.invalid("expected ',' or closing bracket")),
                },
            }
        }
    }

    /// Advance and require the new token to be `expected`.
    pub fn advance_expecting(&mut self, expected: TokenKind) -> LockResult<()> {
        self.advance()?;
        self.expect(expected)
    }

    /// Require the current token to be `expected`.
    pub fn expect(&self, expected: TokenKind) -> LockResult<()> {
        if self.token == expected {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Build the error for finding the current token where `expected` was
    /// required.
    pub fn unexpected(&self, expected: TokenKind) -> LockError {
        LockError::UnexpectedToken {
            expected,
            found: self.token,
            position: self.token_start,
        }
    }

    /// Compare the current property name against a known field literal.
    ///
    /// Returns false when the cursor is not on a property name.
    pub fn property_name_equals(&self, literal: &[u8]) -> bool {
        self.token == TokenKind::PropertyName && self.scratch == literal
    }

    /// Borrow the text of the current property name, string, or number.
    pub fn current_str(&self) -> LockResult<&str> {
        match self.token {
            TokenKind::PropertyName | TokenKind::String | TokenKind::Number => {
                std::str::from_utf8(&self.scratch).map_err(|_| LockError::InvalidUtf8 {
                    position: self.token_start,
                })
            }
            _ => Err(self.unexpected(TokenKind::String)),
        }
    }

    /// Advance to the next value and read it as a string.
    pub fn read_string(&mut self) -> LockResult<String> {
        self.advance_expecting(TokenKind::String)?;
        Ok(self.current_str()?.to_owned())
    }

    /// Advance to the next value and read it as a string, mapping `null` to
    /// `None`.
    pub fn read_nullable_string(&mut self) -> LockResult<Option<String>> {
        match self.advance()? {
            TokenKind::Null => Ok(None),
            TokenKind::String => Ok(Some(self.current_str()?.to_owned())),
            _ => Err(self.unexpected(TokenKind::String)),
        }
    }

    /// Advance to the next value and read it as a boolean.
    pub fn read_boolean(&mut self) -> LockResult<bool> {
        match self.advance()? {
            TokenKind::True => Ok(true),
            TokenKind::False => Ok(false),
            _ => Err(self.unexpected(TokenKind::True)),
        }
    }

    /// Advance to the next value and read it as an integer.
    pub fn read_i64(&mut self) -> LockResult<i64> {
        self.advance_expecting(TokenKind::Number)?;
        self.current_str()?
            .parse()
            .map_err(|_| LockError::NumberOutOfRange {
                position: self.token_start,
            })
    }

    /// Advance to the next value and append its strings to `target`.
    ///
    /// `null` is read as an empty array.
    pub fn read_string_array_into(&mut self, target: &mut Vec<String>) -> LockResult<()> {
        match self.advance()? {
            TokenKind::Null => return Ok(()),
            TokenKind::StartArray => {}
            _ => return Err(self.unexpected(TokenKind::StartArray)),
        }

        loop {
            match self.advance()? {
                TokenKind::EndArray => return Ok(()),
                TokenKind::String => target.push(self.current_str()?.to_owned()),
                _ => return Err(self.unexpected(TokenKind::String)),
            }
        }
    }

    /// Consume and discard one whole value.
    ///
    /// On a property name, skips the member's value. On a start token, skips
    /// to its matching end token. On a scalar, does nothing.
    pub fn skip_subtree(&mut self) -> LockResult<()> {
        if self.token == TokenKind::PropertyName {
            self.advance()?;
        }
        if !self.token.is_start() {
            return Ok(());
        }

        let mut depth = 1usize;
        while depth > 0 {
            let kind = self.advance()?;
            if kind.is_start() {
                depth += 1;
            } else if kind.is_end() {
                depth -= 1;
            }
        }
        Ok(())
    }

    /// Check that the top-level value is complete and only whitespace
    /// follows it.
    pub fn finish(&mut self) -> LockResult<()> {
        if self.expect != Expect::Done {
            return Err(self.invalid("document is incomplete"));
        }
        self.skip_whitespace()?;
        if self.peek()?.is_some() {
            return Err(self.invalid("unexpected content after document"));
        }
        Ok(())
    }

    fn offset(&self) -> u64 {
        self.offset + self.pos as u64
    }

    fn invalid(&self, reason: &'static str) -> LockError {
        LockError::InvalidJson {
            position: self.offset(),
            reason,
        }
    }

    fn eof(&self) -> LockError {
        LockError::UnexpectedEof {
            position: self.offset(),
        }
    }

    fn fill(&mut self) -> LockResult<()> {
        self.offset += self.filled as u64;
        self.pos = 0;
        self.filled = 0;

        loop {
            match self.reader.read(&mut self.buffer) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.filled = n;
                    break;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        if self.offset + self.filled as u64 > self.limits.max_input_size {
            return Err(LockError::InputTooLarge {
                limit: self.limits.max_input_size,
            });
        }
        Ok(())
    }

    /// Peek at the current byte without consuming it.
    fn peek(&mut self) -> LockResult<Option<u8>> {
        if self.pos == self.filled {
            if self.eof {
                return Ok(None);
            }
            self.fill()?;
        }
        Ok(self.buffer[..self.filled].get(self.pos).copied())
    }

    /// Consume and return the current byte.
    fn next_byte(&mut self) -> LockResult<Option<u8>> {
        let b = self.peek()?;
        if b.is_some() {
            self.pos += 1;
        }
        Ok(b)
    }

    fn skip_whitespace(&mut self) -> LockResult<()> {
        while let Some(b) = self.peek()? {
            match b {
                b' ' | b'\t' | b'\n' | b'\r' => self.pos += 1,
                _ => break,
            }
        }
        Ok(())
    }

    fn skip_bom(&mut self) -> LockResult<()> {
        if self.peek()? != Some(BOM[0]) {
            return Ok(());
        }
        for &b in BOM {
            if self.next_byte()? != Some(b) {
                return Err(self.invalid("unexpected character"));
            }
        }
        Ok(())
    }

    fn set(&mut self, kind: TokenKind) -> LockResult<TokenKind> {
        self.token = kind;
        Ok(kind)
    }

    fn after_value(&mut self) {
        self.expect = if self.stack.is_empty() {
            Expect::Done
        } else {
            Expect::CommaOrEnd
        };
    }

    fn push(&mut self, container: Container) -> LockResult<()> {
        let depth = self.stack.len() as u64 + 1;
        if depth > self.limits.max_nesting_depth {
            return Err(LockError::NestingTooDeep {
                depth,
                limit: self.limits.max_nesting_depth,
            });
        }
        self.stack.push(container);
        Ok(())
    }

    fn end_container(&mut self, container: Container) -> LockResult<TokenKind> {
        self.pos += 1;
        self.stack.pop();
        self.after_value();
        match container {
            Container::Object => self.set(TokenKind::EndObject),
            Container::Array => self.set(TokenKind::EndArray),
        }
    }

    fn read_value(&mut self, b: u8) -> LockResult<TokenKind> {
        match b {
            b'{' => {
                self.pos += 1;
                self.push(Container::Object)?;
                self.expect = Expect::NameOrEnd;
                self.set(TokenKind::StartObject)
            }
            b'[' => {
                self.pos += 1;
                self.push(Container::Array)?;
                self.expect = Expect::ValueOrEnd;
                self.set(TokenKind::StartArray)
            }
            b'"' => {
                self.read_string_bytes()?;
                self.after_value();
                self.set(TokenKind::String)
            }
            b'-' | b'0'..=b'9' => {
                self.read_number()?;
                self.after_value();
                self.set(TokenKind::Number)
            }
            b't' => {
                self.expect_literal(b"true")?;
                self.after_value();
                self.set(TokenKind::True)
            }
            b'f' => {
                self.expect_literal(b"false")?;
                self.after_value();
                self.set(TokenKind::False)
            }
            b'n' => {
                self.expect_literal(b"null")?;
                self.after_value();
                self.set(TokenKind::Null)
            }
            _ => Err(self.invalid("unexpected character")),
        }
    }

    fn read_name(&mut self, b: u8) -> LockResult<TokenKind> {
        if b != b'"' {
            return Err(self.invalid("expected property name"));
        }
        self.read_string_bytes()?;

        self.skip_whitespace()?;
        match self.next_byte()? {
            Some(b':') => {}
            Some(_) => return Err(self.invalid("expected ':' after property name")),
            None => return Err(self.eof()),
        }

        self.expect = Expect::Value;
        self.set(TokenKind::PropertyName)
    }

    /// Read a string token into the scratch buffer, handling escape sequences.
    fn read_string_bytes(&mut self) -> LockResult<()> {
        // Consume opening quote
        self.pos += 1;
        self.scratch.clear();

        loop {
            if self.peek()?.is_none() {
                return Err(self.eof());
            }

            // Copy the unescaped run straight out of the buffer
            let available = &self.buffer[self.pos..self.filled];
            let run = available
                .iter()
                .position(|&b| b == b'"' || b == b'\\' || b < 0x20)
                .unwrap_or(available.len());
            self.scratch.extend_from_slice(&available[..run]);
            self.pos += run;
            self.check_string_length()?;

            match self.next_byte()? {
                None => return Err(self.eof()),
                Some(b'"') => return Ok(()),
                Some(b'\\') => self.read_escape_sequence()?,
                Some(b) if b < 0x20 => {
                    return Err(self.invalid("control character in string"));
                }
                // Run ended at the buffer boundary; put the byte back
                Some(_) => self.pos -= 1,
            }
        }
    }

    fn check_string_length(&self) -> LockResult<()> {
        let length = self.scratch.len() as u64;
        if length > self.limits.max_string_length {
            return Err(LockError::StringTooLong {
                length,
                limit: self.limits.max_string_length,
            });
        }
        Ok(())
    }

    /// Read an escape sequence after a backslash.
    fn read_escape_sequence(&mut self) -> LockResult<()> {
        let unescaped = match self.next_byte()? {
            None => return Err(self.eof()),
            Some(b'"') => b'"',
            Some(b'\\') => b'\\',
            Some(b'/') => b'/',
            Some(b'b') => 0x08,
            Some(b'f') => 0x0C,
            Some(b'n') => b'\n',
            Some(b'r') => b'\r',
            Some(b't') => b'\t',
            Some(b'u') => {
                let ch = self.read_unicode_escape()?;
                let mut utf8 = [0u8; 4];
                self.scratch
                    .extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
                return Ok(());
            }
            Some(_) => return Err(self.invalid("invalid escape sequence")),
        };
        self.scratch.push(unescaped);
        Ok(())
    }

    /// Read a \uXXXX escape, combining surrogate pairs.
    fn read_unicode_escape(&mut self) -> LockResult<char> {
        let unpaired = LockError::InvalidUtf8 {
            position: self.token_start,
        };
        let codepoint = self.read_hex4()?;

        if (0xD800..=0xDBFF).contains(&codepoint) {
            if self.next_byte()? != Some(b'\\') || self.next_byte()? != Some(b'u') {
                return Err(unpaired);
            }
            let low = self.read_hex4()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(unpaired);
            }
            let combined = 0x10000 + ((codepoint - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(combined).ok_or(unpaired);
        }

        if (0xDC00..=0xDFFF).contains(&codepoint) {
            return Err(unpaired);
        }

        char::from_u32(codepoint).ok_or(unpaired)
    }

    /// Read 4 hex digits and return the value.
    fn read_hex4(&mut self) -> LockResult<u32> {
        let mut value = 0u32;
        for _ in 0..4 {
            let digit = match self.next_byte()? {
                Some(b @ b'0'..=b'9') => b - b'0',
                Some(b @ b'a'..=b'f') => b - b'a' + 10,
                Some(b @ b'A'..=b'F') => b - b'A' + 10,
                Some(_) => return Err(self.invalid("invalid unicode escape")),
                None => return Err(self.eof()),
            };
            value = (value << 4) | u32::from(digit);
        }
        Ok(value)
    }

    /// Read a number token into the scratch buffer, validating its grammar.
    fn read_number(&mut self) -> LockResult<()> {
        self.scratch.clear();

        if self.peek()? == Some(b'-') {
            self.take()?;
        }

        match self.peek()? {
            Some(b'0') => {
                self.take()?;
                if let Some(b'0'..=b'9') = self.peek()? {
                    return Err(self.invalid("leading zero in number"));
                }
            }
            Some(b'1'..=b'9') => self.take_digits()?,
            _ => return Err(self.invalid("expected digit")),
        }

        if self.peek()? == Some(b'.') {
            self.take()?;
            self.take_required_digits()?;
        }

        if let Some(b'e' | b'E') = self.peek()? {
            self.take()?;
            if let Some(b'+' | b'-') = self.peek()? {
                self.take()?;
            }
            self.take_required_digits()?;
        }

        self.check_string_length()
    }

    /// Move the current byte into the scratch buffer.
    fn take(&mut self) -> LockResult<()> {
        if let Some(b) = self.next_byte()? {
            self.scratch.push(b);
        }
        Ok(())
    }

    fn take_digits(&mut self) -> LockResult<()> {
        while let Some(b'0'..=b'9') = self.peek()? {
            self.take()?;
        }
        Ok(())
    }

    fn take_required_digits(&mut self) -> LockResult<()> {
        match self.peek()? {
            Some(b'0'..=b'9') => self.take_digits(),
            Some(_) => Err(self.invalid("expected digit")),
            None => Err(self.eof()),
        }
    }

    /// Expect specific bytes at the current position.
    fn expect_literal(&mut self, expected: &[u8]) -> LockResult<()> {
        for &b in expected {
            match self.next_byte()? {
                Some(found) if found == b => {}
                Some(_) => return Err(self.invalid("invalid literal")),
                None => return Err(self.eof()),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reader that hands out one byte per call, to exercise buffer refills
    /// in the middle of every token.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match (self.0.split_first(), buf.first_mut()) {
                (Some((&b, rest)), Some(slot)) => {
                    *slot = b;
                    self.0 = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    fn tokens<R: Read>(mut cursor: Cursor<R>) -> LockResult<Vec<TokenKind>> {
        let mut kinds = vec![cursor.advance()?];
        while cursor.depth() > 0 {
            kinds.push(cursor.advance()?);
        }
        cursor.finish()?;
        Ok(kinds)
    }

    fn lex(input: &str) -> LockResult<Vec<TokenKind>> {
        tokens(Cursor::from_slice(input.as_bytes(), Limits::standard()))
    }

    #[test]
    fn test_structural_tokens() {
        use TokenKind::*;
        let kinds = lex(r#"{"a": [1, "x", true, false, null], "b": {}}"#).unwrap();
        assert_eq!(
            kinds,
            vec![
                StartObject,
                PropertyName,
                StartArray,
                Number,
                String,
                True,
                False,
                Null,
                EndArray,
                PropertyName,
                StartObject,
                EndObject,
                EndObject,
            ]
        );
    }

    #[test]
    fn test_trickled_input_matches_slice() {
        let input = concat!(
            r#"{"nameA": ["a\"b", -12.5e+3, {"deep": [[]]}], "z": ""#,
            "\u{1F600}",
            r#""}"#
        )
        .as_bytes();
        let from_slice = tokens(Cursor::from_slice(input, Limits::standard())).unwrap();
        let trickled = tokens(Cursor::new(Trickle(input), Limits::standard())).unwrap();
        assert_eq!(from_slice, trickled);
    }

    #[test]
    fn test_property_name_equals() {
        let mut cursor = Cursor::from_slice(br#"{"sha512": "x"}"#, Limits::standard());
        cursor.advance().unwrap();
        assert!(!cursor.property_name_equals(b"sha512"));
        cursor.advance().unwrap();
        assert!(cursor.property_name_equals(b"sha512"));
        assert!(!cursor.property_name_equals(b"sha51"));
        cursor.advance().unwrap();
        // Same bytes, but a value rather than a name
        assert!(!cursor.property_name_equals(b"x"));
    }

    #[test]
    fn test_escaped_property_name_compares_unescaped() {
        let mut cursor = Cursor::from_slice(br#"{"\u0074ype": 1}"#, Limits::standard());
        cursor.advance().unwrap();
        cursor.advance().unwrap();
        assert!(cursor.property_name_equals(b"type"));
    }

    #[test]
    fn test_read_helpers() {
        let input = br#"["s", null, true, 42, ["a", "b"], null]"#;
        let mut cursor = Cursor::from_slice(input, Limits::standard());
        cursor.advance().unwrap();
        assert_eq!(cursor.read_string().unwrap(), "s");
        assert_eq!(cursor.read_nullable_string().unwrap(), None);
        assert!(cursor.read_boolean().unwrap());
        assert_eq!(cursor.read_i64().unwrap(), 42);
        let mut items = Vec::new();
        cursor.read_string_array_into(&mut items).unwrap();
        assert_eq!(items, vec!["a".to_string(), "b".to_string()]);
        cursor.read_string_array_into(&mut items).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(cursor.advance().unwrap(), TokenKind::EndArray);
        cursor.finish().unwrap();
    }

    #[test]
    fn test_read_boolean_wrong_kind() {
        let mut cursor = Cursor::from_slice(br#"["yes"]"#, Limits::standard());
        cursor.advance().unwrap();
        let err = cursor.read_boolean().unwrap_err();
        assert!(matches!(
            err,
            LockError::UnexpectedToken {
                expected: TokenKind::True,
                found: TokenKind::String,
                position: 1,
            }
        ));
    }

    #[test]
    fn test_skip_subtree_leaves_cursor_after_value() {
        let input = br#"{"skip": {"a": [1, {"b": []}], "c": "d"}, "keep": 1}"#;
        let mut cursor = Cursor::from_slice(input, Limits::standard());
        cursor.advance().unwrap();
        cursor.advance().unwrap();
        cursor.skip_subtree().unwrap();
        assert_eq!(cursor.token_kind(), TokenKind::EndObject);
        assert_eq!(cursor.depth(), 1);
        cursor.advance().unwrap();
        assert!(cursor.property_name_equals(b"keep"));
    }

    #[test]
    fn test_skip_subtree_scalar() {
        let mut cursor = Cursor::from_slice(br#"{"n": 42, "m": 1}"#, Limits::standard());
        cursor.advance().unwrap();
        cursor.advance().unwrap();
        cursor.skip_subtree().unwrap();
        assert_eq!(cursor.token_kind(), TokenKind::Number);
        cursor.advance().unwrap();
        assert!(cursor.property_name_equals(b"m"));
    }

    #[test]
    fn test_bom_is_skipped() {
        let kinds = tokens(Cursor::from_slice(b"\xEF\xBB\xBF{}", Limits::standard())).unwrap();
        assert_eq!(kinds, vec![TokenKind::StartObject, TokenKind::EndObject]);
    }

    #[test]
    fn test_advance_past_document_is_eof() {
        let mut cursor = Cursor::from_slice(b"{}", Limits::standard());
        cursor.advance().unwrap();
        cursor.advance().unwrap();
        assert!(matches!(
            cursor.advance(),
            Err(LockError::UnexpectedEof { position: 2 })
        ));
    }

    #[test]
    fn test_truncated_input_rejected_at_every_length() {
        let input = br#"{"a": ["b", 1.5, true], "c": {"d": null}}"#;
        for end in 0..input.len() {
            let result = tokens(Cursor::from_slice(&input[..end], Limits::standard()));
            assert!(result.is_err(), "prefix of length {end} was accepted");
        }
        assert!(tokens(Cursor::from_slice(input, Limits::standard())).is_ok());
    }

    #[test]
    fn test_malformed_documents_rejected() {
        for input in [
            "[1, 2,]",
            r#"{"a": 1,}"#,
            r#"{"a" 1}"#,
            r#"{a: 1}"#,
            "[1 2]",
            "[01]",
            "[1.]",
            "[1e]",
            "[tru]",
            r#"["a\qb"]"#,
            "[\"a\nb\"]",
            r#"["\uD800"]"#,
            r#"["\uDC00"]"#,
            "{]",
            "[}",
            "{} {}",
        ] {
            assert!(lex(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_number_text_is_kept() {
        let mut cursor = Cursor::from_slice(b"[-0.5E-7]", Limits::standard());
        cursor.advance().unwrap();
        cursor.advance().unwrap();
        assert_eq!(cursor.current_str().unwrap(), "-0.5E-7");
    }

    #[test]
    fn test_nesting_limit() {
        let limits = Limits {
            max_nesting_depth: 2,
            ..Limits::standard()
        };
        assert!(tokens(Cursor::from_slice(b"[[1]]", limits)).is_ok());
        assert!(matches!(
            tokens(Cursor::from_slice(b"[[[1]]]", limits)),
            Err(LockError::NestingTooDeep { depth: 3, limit: 2 })
        ));
    }

    #[test]
    fn test_string_limit() {
        let limits = Limits {
            max_string_length: 4,
            ..Limits::standard()
        };
        assert!(tokens(Cursor::from_slice(br#"["abcd"]"#, limits)).is_ok());
        assert!(matches!(
            tokens(Cursor::from_slice(br#"["abcde"]"#, limits)),
            Err(LockError::StringTooLong { .. })
        ));
    }

    #[test]
    fn test_input_limit() {
        let limits = Limits {
            max_input_size: 10,
            ..Limits::standard()
        };
        assert!(matches!(
            tokens(Cursor::from_slice(b"[1, 2, 3, 4, 5]", limits)),
            Err(LockError::InputTooLarge { limit: 10 })
        ));
    }

    #[test]
    fn test_invalid_utf8_reported_on_materialize() {
        let mut cursor = Cursor::from_slice(b"[\"\xFF\xFE\"]", Limits::standard());
        cursor.advance().unwrap();
        assert!(matches!(
            cursor.read_string(),
            Err(LockError::InvalidUtf8 { position: 1 })
        ));
    }
}

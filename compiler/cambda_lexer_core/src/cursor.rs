//! Line/column cursor over a sentinel-terminated buffer.
//!
//! The cursor moves one character at a time and keeps the 1-based line and
//! column of the current position. `\n`, a lone `\r` and the pair `\r\n` each
//! count as exactly one line break.
//!
//! EOF is the sentinel byte at `pos >= source_len`. A `0x00` byte inside the
//! source is an ordinary (invalid) character, told apart by comparing `pos`
//! against the source length.

use std::fmt;

/// Line and column of a character, both 1-based.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

impl Position {
    /// Position of the first character of a source.
    pub const START: Position = Position { line: 1, col: 1 };

    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Position { line, col }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Whether `byte` may appear in an identifier: `[a-zA-Z_?/\-+*%]`.
#[inline]
pub const fn is_ident_byte(byte: u8) -> bool {
    matches!(
        byte,
        b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'?' | b'/' | b'-' | b'+' | b'*' | b'%'
    )
}

/// Cursor over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
/// The cursor is [`Copy`], so a snapshot is a plain copy.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of actual source content (excludes sentinel and padding).
    source_len: u32,
    line: u32,
    col: u32,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of a sentinel-terminated buffer.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
            line: 1,
            col: 1,
        }
    }

    /// Returns the byte at the current position (`0x00` at EOF).
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Returns the byte one position ahead of current.
    ///
    /// Safe at any position: the sentinel and padding back every read.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf.get(self.pos as usize + 1).copied().unwrap_or(0)
    }

    /// Returns `true` if the cursor has reached EOF.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Line and column of the current character.
    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }

    /// The full character at the current position, or `None` at EOF.
    pub fn current_char(&self) -> Option<char> {
        if self.is_eof() {
            return None;
        }
        let start = self.pos as usize;
        let end = (start + utf8_char_width(self.current())).min(self.source_len as usize);
        std::str::from_utf8(&self.buf[start..end])
            .ok()
            .and_then(|text| text.chars().next())
    }

    /// Consume one character.
    ///
    /// Returns `true` exactly when the cursor lands on EOF. At EOF the cursor
    /// stays put.
    pub fn advance(&mut self) -> bool {
        if self.is_eof() {
            return true;
        }
        match self.current() {
            b'\r' => {
                self.pos += 1;
                if self.current() == b'\n' && !self.is_eof() {
                    self.pos += 1;
                }
                self.newline();
            }
            b'\n' => {
                self.pos += 1;
                self.newline();
            }
            byte => {
                self.pos = (self.pos + width_u32(byte)).min(self.source_len);
                self.col += 1;
            }
        }
        self.is_eof()
    }

    #[inline]
    fn newline(&mut self) {
        self.line += 1;
        self.col = 1;
    }

    /// Skip spaces, tabs and line breaks. Returns `true` on EOF.
    pub fn skip_whitespace(&mut self) -> bool {
        while !self.is_eof() && matches!(self.current(), b' ' | b'\t' | b'\n' | b'\r') {
            self.advance();
        }
        self.is_eof()
    }

    /// Consume the maximal run of identifier bytes, possibly empty.
    pub fn eat_ident(&mut self) -> &'a str {
        self.eat_ascii_while(is_ident_byte)
    }

    /// Consume the maximal run of ASCII digits, possibly empty.
    pub fn eat_digits(&mut self) -> &'a str {
        self.eat_ascii_while(|byte| byte.is_ascii_digit())
    }

    /// Advance while `pred` holds for the current byte.
    ///
    /// `pred` must reject `0x00` and only accept ASCII bytes other than line
    /// breaks, so every step is exactly one column.
    fn eat_ascii_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
            self.col += 1;
        }
        self.slice(start, self.pos)
    }

    /// Extract a source substring as `&str`.
    ///
    /// Returns `""` if `start..end` is out of range or not on character
    /// boundaries.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        let end = end.min(self.source_len) as usize;
        let start = (start as usize).min(end);
        std::str::from_utf8(&self.buf[start..end]).unwrap_or_default()
    }

    /// Extract a source substring from `start` to the current position.
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }
}

/// Number of bytes in the UTF-8 character starting with `byte`.
#[inline]
fn utf8_char_width(byte: u8) -> usize {
    match byte {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

#[inline]
#[expect(
    clippy::cast_possible_truncation,
    reason = "a UTF-8 character is at most 4 bytes"
)]
fn width_u32(byte: u8) -> u32 {
    utf8_char_width(byte) as u32
}

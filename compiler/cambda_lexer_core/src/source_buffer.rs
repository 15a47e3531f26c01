//! Sentinel-terminated source buffer.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content, so
//! the cursor can look at the current and next byte without bounds checks
//! near the end. The total size is rounded up to the next 64-byte boundary.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Sentinel-terminated source buffer.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: u32,
}

impl SourceBuffer {
    /// Create a new sentinel-terminated buffer from source code.
    ///
    /// Sources larger than `u32::MAX` bytes are truncated to that length.
    pub fn new(source: &str) -> Self {
        let source_bytes = source.as_bytes();
        let source_len = u32::try_from(source_bytes.len()).unwrap_or(u32::MAX);
        let content = &source_bytes[..source_len as usize];

        // Round up to next 64-byte boundary (minimum: source + 1 sentinel byte).
        let padded_len = (content.len() + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        // The sentinel and padding are already 0x00.
        let mut buf = vec![0u8; padded_len];
        buf[..content.len()].copy_from_slice(content);

        Self { buf, source_len }
    }

    /// Returns the source bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Returns the source text.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    /// Returns the full buffer including sentinel and cache-line padding.
    pub fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Create a [`Cursor`] at line 1, column 1.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Length of the source content in bytes (excludes sentinel and padding).
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Text of the 1-based `line`, without its line break.
    ///
    /// Line breaks are counted the way the cursor counts them: `\n`, lone
    /// `\r` and `\r\n` each end one line.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        if line == 0 {
            return None;
        }
        let bytes = self.as_bytes();
        let mut start = 0;
        for _ in 1..line {
            let brk = start + memchr::memchr2(b'\n', b'\r', &bytes[start..])?;
            start = if bytes[brk] == b'\r' && bytes.get(brk + 1) == Some(&b'\n') {
                brk + 2
            } else {
                brk + 1
            };
        }
        let end = memchr::memchr2(b'\n', b'\r', &bytes[start..]).map_or(bytes.len(), |o| start + o);
        std::str::from_utf8(&bytes[start..end]).ok()
    }
}

/// `SourceBuffer` is a `Vec<u8>` plus a `u32` on 64-bit platforms.
const _: () = assert!(std::mem::size_of::<SourceBuffer>() <= 32);

//! Byte cursor over the source text.
//!
//! Reads past the end return `0x00`, which matches no token rule, so the
//! scanner can peek freely without bounds checks of its own. Positions are
//! byte offsets. Every method that moves the cursor stops on a UTF-8 char
//! boundary: single-byte moves only happen over ASCII, and
//! [`Cursor::advance_char`] steps over a whole code point.

/// Cursor over a source string.
///
/// [`Copy`] so callers can snapshot a position and rewind to it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor { source, pos: 0 }
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Byte at the cursor, or `0x00` at end of input.
    #[inline]
    pub(crate) fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    /// Byte after the cursor, or `0x00` past the end.
    #[inline]
    pub(crate) fn peek(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        self.source.as_bytes().get(index).copied().unwrap_or(0)
    }

    /// Step over one ASCII byte.
    #[inline]
    pub(crate) fn advance(&mut self) {
        debug_assert!(self.current().is_ascii(), "advance() over a multi-byte char");
        if !self.is_eof() {
            self.pos += 1;
        }
    }

    /// Step over one full character and return it.
    pub(crate) fn advance_char(&mut self) -> Option<char> {
        let c = self.source[self.pos..].chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume `expected` if it is the current byte.
    #[inline]
    pub(crate) fn eat(&mut self, expected: u8) -> bool {
        if !self.is_eof() && self.current() == expected {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume ASCII bytes while `pred` holds.
    #[inline]
    pub(crate) fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Move to the next `\n` without consuming it, or to the end of input.
    pub(crate) fn skip_to_newline(&mut self) {
        self.pos = memchr::memchr(b'\n', self.rest()).map_or(self.source.len(), |i| self.pos + i);
    }

    /// Offset from the cursor to the next occurrence of any of three bytes.
    pub(crate) fn find3(&self, a: u8, b: u8, c: u8) -> Option<usize> {
        memchr::memchr3(a, b, c, self.rest())
    }

    /// Offset from the cursor to the next occurrence of `needle`.
    pub(crate) fn find(&self, needle: &[u8]) -> Option<usize> {
        memchr::memmem::find(self.rest(), needle)
    }

    /// Advance `len` bytes, returning how many newlines were skipped.
    ///
    /// `len` must land on a char boundary.
    pub(crate) fn skip_counting_newlines(&mut self, len: usize) -> u32 {
        let end = (self.pos + len).min(self.source.len());
        let skipped = &self.source.as_bytes()[self.pos..end];
        self.pos = end;
        u32::try_from(memchr::memchr_iter(b'\n', skipped).count()).unwrap_or(u32::MAX)
    }

    /// Jump to the end of input, returning how many newlines were skipped.
    pub(crate) fn skip_to_end(&mut self) -> u32 {
        self.skip_counting_newlines(self.source.len() - self.pos)
    }

    /// Move back to an earlier position.
    pub(crate) fn rewind_to(&mut self, pos: usize) {
        debug_assert!(pos <= self.pos, "rewind_to() must move backwards");
        self.pos = pos;
    }

    /// Source text between two positions.
    #[inline]
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }

    /// Source text from `start` up to the cursor.
    #[inline]
    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        self.slice(start, self.pos)
    }

    fn rest(&self) -> &'a [u8] {
        &self.source.as_bytes()[self.pos..]
    }
}

/// A cursor for byte-by-byte scanning with position tracking.
///
/// Operates over a string slice while tracking the absolute byte position
/// in the original document (via `base` offset).
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Base offset in the document (added to local index for absolute positions).
    pub base: usize,
    /// Current local index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s` with the given base offset.
    pub fn new(s: &'a str, base: usize) -> Self {
        Self { s, base, i: 0 }
    }

    /// Returns the current absolute byte position (base + local index).
    pub fn pos(&self) -> usize {
        self.base + self.i
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s
            .as_bytes()
            .get(self.i..)
            .is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.s.as_bytes().get(self.i).copied()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Consumes bytes until `stop` is next (or EOF), returning how many were eaten.
    ///
    /// `stop` is always ASCII, so the cursor never lands inside a multi-byte
    /// character.
    pub fn eat_until(&mut self, stop: u8) -> usize {
        let rest = self.s.as_bytes().get(self.i..).unwrap_or_default();
        let n = rest.iter().position(|&b| b == stop).unwrap_or(rest.len());
        self.i += n;
        n
    }

    /// Jumps to the next occurrence of `b`, or to EOF if there is none.
    pub fn seek(&mut self, b: u8) {
        self.eat_until(b);
    }

    /// Local slice between two absolute positions.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.s[start - self.base..end - self.base]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello", 10);
        assert_eq!(cur.pos(), 10);
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some(b'h'));
        assert_eq!(cur.bump(), Some(b'h'));
        assert_eq!(cur.pos(), 11);
    }

    #[test]
    fn cursor_starts_with() {
        let cur = Cursor::new("![[link]]", 0);
        assert!(cur.starts_with(b"![["));
        assert!(!cur.starts_with(b"]]"));
    }

    #[test]
    fn empty_string_input() {
        let cur = Cursor::new("", 0);
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn starts_with_past_end_is_false() {
        let mut cur = Cursor::new("hi", 0);
        cur.bump_n(10);
        assert!(cur.eof());
        assert!(!cur.starts_with(b"a"));
        assert_eq!(cur.peek(), None);
    }

    #[test]
    fn bump_at_eof_returns_none() {
        let mut cur = Cursor::new("x", 0);
        assert_eq!(cur.bump(), Some(b'x'));
        assert_eq!(cur.bump(), None);
        assert_eq!(cur.bump(), None);
    }

    #[test]
    fn eat_until_stops_before_delimiter() {
        let mut cur = Cursor::new("abc]def", 0);
        assert_eq!(cur.eat_until(b']'), 3);
        assert_eq!(cur.peek(), Some(b']'));
    }

    #[test]
    fn eat_until_runs_to_eof_without_delimiter() {
        let mut cur = Cursor::new("añb", 4);
        assert_eq!(cur.eat_until(b')'), "añb".len());
        assert!(cur.eof());
        assert_eq!(cur.pos(), 4 + "añb".len());
    }

    #[test]
    fn slice_uses_absolute_positions() {
        let mut cur = Cursor::new("xx![[a]]", 100);
        cur.seek(b'!');
        assert_eq!(cur.pos(), 102);
        assert_eq!(cur.slice(102, 108), "![[a]]");
    }
}

//! Fixed-capacity text buffers for mnemonics and operand strings.
//!
//! Downstream listing consumers expect fixed-width columns, so overflow is
//! defined as silent truncation, never an error.

use std::fmt;

use serde::{Serialize, Serializer};

/// An inline string holding at most `N` bytes. Writes past capacity are
/// dropped at the last full character boundary.
#[derive(Clone, Copy)]
pub struct FixedStr<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> FixedStr<N> {
    pub const fn new() -> Self {
        Self { buf: [0; N], len: 0 }
    }

    /// Build from `s`, truncating whatever does not fit.
    pub fn from_str_lossy(s: &str) -> Self {
        let mut out = Self::new();
        let _ = fmt::Write::write_str(&mut out, s);
        out
    }

    pub fn as_str(&self) -> &str {
        // only whole UTF-8 characters are ever appended
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<const N: usize> fmt::Write for FixedStr<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            let mut enc = [0u8; 4];
            let bytes = ch.encode_utf8(&mut enc).as_bytes();
            if self.len + bytes.len() > N {
                break;
            }
            self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
            self.len += bytes.len();
        }
        Ok(())
    }
}

impl<const N: usize> Default for FixedStr<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> std::ops::Deref for FixedStr<N> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl<const N: usize> fmt::Display for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const N: usize> PartialEq for FixedStr<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<const N: usize> Eq for FixedStr<N> {}

impl<const N: usize> PartialEq<&str> for FixedStr<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<const N: usize> Serialize for FixedStr<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fmt::Write;

    #[test]
    fn append_and_read_back() {
        let mut s = FixedStr::<8>::new();
        write!(s, "r{}, r{}", 1, 2).unwrap();
        assert_eq!(s.as_str(), "r1, r2");
        assert_eq!(s.len(), 6);
    }

    #[test]
    fn overflow_truncates_silently() {
        let s = FixedStr::<5>::from_str_lossy("push ea, pc");
        assert_eq!(s.as_str(), "push ");
        let mut t = FixedStr::<4>::from_str_lossy("abc");
        write!(t, "defg").unwrap(); // keeps writing without error
        assert_eq!(t.as_str(), "abcd");
    }

    #[test]
    fn empty_by_default() {
        let s: FixedStr<19> = Default::default();
        assert!(s.is_empty());
        assert_eq!(s.as_str(), "");
    }
}

//! Interned identifier names.
//!
//! A [`Name`] is the 64-bit FNV-1a hash of an identifier's text. Equal text
//! always hashes to the same `Name`, so identifier equality downstream is a
//! single integer compare. The hash is a `const fn`, which lets reserved
//! keywords be compile-time constants (see [`crate::keywords`]).

use std::fmt;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Hashed identifier.
///
/// Hash `0` is the empty-slot marker of [`HashTable`](crate::HashTable) and
/// never names anything: a text whose FNV-1a hash is `0` is mapped to `1`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u64);

impl Name {
    /// Hash identifier text.
    #[inline]
    pub const fn of(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    /// Hash raw identifier bytes with FNV-1a.
    pub const fn from_bytes(bytes: &[u8]) -> Self {
        let mut hash = FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash = (hash ^ bytes[i] as u64).wrapping_mul(FNV_PRIME);
            i += 1;
        }
        if hash == 0 {
            hash = 1;
        }
        Name(hash)
    }

    /// Get the raw hash value.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Rebuild a name from a raw hash, rejecting the reserved `0`.
    #[inline]
    pub const fn from_raw(raw: u64) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(Name(raw))
        }
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:#018x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_reference_values() {
        // Empty input is the offset basis.
        assert_eq!(Name::of("").raw(), FNV_OFFSET_BASIS);
        assert_eq!(Name::of("a").raw(), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(Name::of("foobar").raw(), 0x8594_4171_f739_67e8);
    }

    #[test]
    fn test_name_is_deterministic() {
        assert_eq!(Name::of("lambda"), Name::of("lambda"));
        assert_ne!(Name::of("lambda"), Name::of("lambdas"));
    }

    #[test]
    fn test_const_evaluation() {
        const LET: Name = Name::of("let");
        assert_eq!(LET, Name::of("let"));
    }

    #[test]
    fn test_from_raw_rejects_zero() {
        assert_eq!(Name::from_raw(0), None);
        let name = Name::of("x");
        assert_eq!(Name::from_raw(name.raw()), Some(name));
    }
}

//! Parser tolerance flags.

use core::ops::{BitOr, BitOrAssign};

/// Default cap on reported errors and on reported warnings.
pub const DEFAULT_MAX_ERRORS: usize = 30;

/// Bit set selecting which extensions the parser accepts with a warning
/// instead of an error.
///
/// Each extension warning is keyed by one of these bits; when the bit is
/// not set the warning is upgraded to an error, so [`ParseFlags::STRICT`]
/// (the empty set) rejects every extension while still recovering and
/// continuing the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseFlags(u32);

impl ParseFlags {
    /// All extensions are errors.
    pub const STRICT: Self = Self(0);
    /// C/C++ comments are accepted.
    pub const ALLOW_COMMENTS: Self = Self(1);
    /// Comments are bound to the value they refer to.
    pub const STORE_COMMENTS: Self = Self(1 << 1);
    /// Mixed-case `null` / `true` / `false` literals are accepted.
    pub const CASE: Self = Self(1 << 2);
    /// Wrong or missing close-object / close-array characters are accepted.
    pub const MISSING: Self = Self(1 << 3);
    /// Adjacent string literals concatenate into one string.
    pub const MULTISTRING: Self = Self(1 << 4);
    /// Non-inline comments bind AFTER the preceding value instead of
    /// BEFORE the following one.
    pub const COMMENTS_AFTER: Self = Self(1 << 5);
    /// Single-quoted hex byte buffers are accepted.
    pub const MEMORYBUFF: Self = Self(1 << 6);
    /// Treat string bytes as opaque locale bytes instead of UTF-8 (legacy
    /// interface compatibility; bytes are taken 1:1).
    pub const NOUTF8_STREAM: Self = Self(1 << 7);
    /// `ALLOW_COMMENTS | CASE | MISSING | MULTISTRING`.
    pub const TOLERANT: Self = Self(1 | 1 << 2 | 1 << 3 | 1 << 4);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Const-friendly `|`.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for ParseFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for ParseFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerant_is_the_documented_combination() {
        assert_eq!(
            ParseFlags::TOLERANT,
            ParseFlags::ALLOW_COMMENTS
                | ParseFlags::CASE
                | ParseFlags::MISSING
                | ParseFlags::MULTISTRING
        );
        assert!(!ParseFlags::TOLERANT.contains(ParseFlags::STORE_COMMENTS));
    }
}

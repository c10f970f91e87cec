//! The tri-state cell value stored in truth table columns.

use std::fmt;

/// A single truth table cell: a closed tri-state truth value.
///
/// `DontCare` is an ordinary value with ordinary equality --- it is *not* a
/// wildcard that matches `Zero` or `One`. It marks a cell whose value is
/// unconstrained (or unknown), and it is the default fill for columns that
/// have never been written.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Entry {
    /// Logic low.
    Zero,
    /// Logic high.
    One,
    /// Unconstrained / unknown.
    #[default]
    DontCare,
}

impl Entry {
    /// The entry corresponding to a concrete boolean value.
    pub fn from_bool(value: bool) -> Self {
        if value {
            Entry::One
        } else {
            Entry::Zero
        }
    }

    /// The concrete boolean value, or `None` for `DontCare`.
    pub fn to_bool(self) -> Option<bool> {
        match self {
            Entry::Zero => Some(false),
            Entry::One => Some(true),
            Entry::DontCare => None,
        }
    }

    /// Whether the entry carries a concrete value.
    pub fn is_care(self) -> bool {
        self != Entry::DontCare
    }
}

impl From<bool> for Entry {
    fn from(value: bool) -> Self {
        Entry::from_bool(value)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Zero => write!(f, "0"),
            Entry::One => write!(f, "1"),
            Entry::DontCare => write!(f, "x"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dont_care() {
        assert_eq!(Entry::default(), Entry::DontCare);
    }

    #[test]
    fn test_bool_conversion() {
        assert_eq!(Entry::from_bool(false), Entry::Zero);
        assert_eq!(Entry::from_bool(true), Entry::One);
        assert_eq!(Entry::Zero.to_bool(), Some(false));
        assert_eq!(Entry::One.to_bool(), Some(true));
        assert_eq!(Entry::DontCare.to_bool(), None);
    }

    #[test]
    fn test_dont_care_is_distinct() {
        assert_ne!(Entry::DontCare, Entry::Zero);
        assert_ne!(Entry::DontCare, Entry::One);
        assert!(!Entry::DontCare.is_care());
        assert!(Entry::Zero.is_care());
    }

    #[test]
    fn test_display() {
        assert_eq!(Entry::Zero.to_string(), "0");
        assert_eq!(Entry::One.to_string(), "1");
        assert_eq!(Entry::DontCare.to_string(), "x");
    }
}

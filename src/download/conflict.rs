//! What to do when a working file from an earlier download already exists.

use crate::error::Error;

use std::fmt;
use std::str::FromStr;

/// Rule applied once, before allocation, when `<filename>.part` exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Delete the working file and start over.
    Overwrite,
    /// Return the destination path without downloading anything.
    #[default]
    Skip,
    /// Pick another name. Not supported yet.
    Rename,
    /// Fail with [`Error::AlreadyInProgress`].
    Raise,
}

impl ConflictPolicy {
    /// All policies, in their canonical order.
    pub const ALL: [ConflictPolicy; 4] = [
        ConflictPolicy::Overwrite,
        ConflictPolicy::Skip,
        ConflictPolicy::Rename,
        ConflictPolicy::Raise,
    ];

    /// The policy's lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictPolicy::Overwrite => "overwrite",
            ConflictPolicy::Skip => "skip",
            ConflictPolicy::Rename => "rename",
            ConflictPolicy::Raise => "raise",
        }
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConflictPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConflictPolicy::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidConflictPolicy(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for p in ConflictPolicy::ALL {
            assert_eq!(p.to_string().parse::<ConflictPolicy>().unwrap(), p);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("RAISE".parse::<ConflictPolicy>().unwrap(), ConflictPolicy::Raise);
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            "merge".parse::<ConflictPolicy>(),
            Err(Error::InvalidConflictPolicy(name)) if name == "merge"
        ));
    }

    #[test]
    fn test_default_is_skip() {
        assert_eq!(ConflictPolicy::default(), ConflictPolicy::Skip);
    }
}

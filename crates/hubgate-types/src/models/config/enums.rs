//! Configuration enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which responses get the declared-vs-actual content-length check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LengthCheckPolicy {
    /// Never check
    #[default]
    Off,
    /// Only blob downloads (`/blobs/` paths)
    Blobs,
    /// Every forwarded response
    All,
}

impl fmt::Display for LengthCheckPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Off => write!(f, "off"),
            Self::Blobs => write!(f, "blobs"),
            Self::All => write!(f, "all"),
        }
    }
}

impl LengthCheckPolicy {
    /// Parse from string. Unknown values disable the check.
    pub fn from_string(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "blobs" => Self::Blobs,
            "all" => Self::All,
            _ => Self::Off,
        }
    }

    /// Whether a response for `path` is subject to the check.
    pub fn applies_to(self, path: &str) -> bool {
        match self {
            Self::Off => false,
            Self::Blobs => path.contains("/blobs/"),
            Self::All => true,
        }
    }
}

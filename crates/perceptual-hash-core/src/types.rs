use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A 64-bit DCT perceptual hash of one image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHash(pub u64);

impl ImageHash {
    /// Get the underlying 64-bit hash value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ImageHash {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<ImageHash> for u64 {
    fn from(hash: ImageHash) -> Self {
        hash.0
    }
}

impl fmt::Display for ImageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for ImageHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        let digits = digits.strip_prefix("0x").unwrap_or(digits);
        if digits.is_empty() || digits.len() > 16 {
            return Err(Error::InvalidHash(s.to_string()));
        }
        u64::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| Error::InvalidHash(s.to_string()))
    }
}

/// A DCT video hash: one 64-bit hash per sampled frame, in the order the
/// native library produced them
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoHash(Vec<u64>);

impl VideoHash {
    pub fn new(frames: Vec<u64>) -> Self {
        Self(frames)
    }

    pub fn frames(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ImageHash> + '_ {
        self.0.iter().copied().map(ImageHash)
    }

    pub fn into_inner(self) -> Vec<u64> {
        self.0
    }
}

impl From<Vec<u64>> for VideoHash {
    fn from(frames: Vec<u64>) -> Self {
        Self(frames)
    }
}

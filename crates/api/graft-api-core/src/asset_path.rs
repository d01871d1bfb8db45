//! AssetPath parsing and formatting.
//!
//! Grammar (store-agnostic):
//!   root/folder/.../name[.ext]
//! - '/' separates segments, '\' is accepted and normalized to '/'
//! - the last segment is the file name; its final '.' splits stem and extension
//!   Examples:
//!   "Assets/Avatars/Fox/FX.controller" -> parent="Assets/Avatars/Fox", stem="FX", ext="controller"
//!   "Assets/Avatar Setting" -> a folder; segments may contain inner spaces
//!   "Packages/com.vendor.shaders/Toon.shader" -> dots inside folder names are fine
//!
//! Paths are the natural key of an asset: the clone mapping, exclusion sets and
//! dependency deduplication all compare `AssetPath`s, never raw strings.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Reasons a string is rejected as an [`AssetPath`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("empty asset path")]
    Empty,
    #[error("invalid asset path '{0}': empty segment")]
    EmptySegment(String),
    #[error("invalid asset path '{0}': relative segment")]
    RelativeSegment(String),
    #[error("invalid asset path '{0}': segment has leading or trailing whitespace")]
    PaddedSegment(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetPath {
    /// Normalized form, '/'-joined, no trailing slash.
    raw: String,
}

impl AssetPath {
    /// Parse a path string according to the grammar described above.
    /// A single trailing '/' is tolerated so folder strings like
    /// `"Assets/Avatar Setting/"` parse to the folder itself.
    pub fn parse(s: &str) -> Result<Self, PathError> {
        let normalized = s.replace('\\', "/");
        let trimmed = normalized.strip_suffix('/').unwrap_or(&normalized);
        if trimmed.is_empty() {
            return Err(PathError::Empty);
        }
        for seg in trimmed.split('/') {
            if seg.is_empty() {
                return Err(PathError::EmptySegment(s.to_string()));
            }
            if seg == "." || seg == ".." {
                return Err(PathError::RelativeSegment(s.to_string()));
            }
            if seg.trim() != seg {
                return Err(PathError::PaddedSegment(s.to_string()));
            }
        }
        Ok(AssetPath {
            raw: trimmed.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Iterate over the '/'-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw.split('/')
    }

    /// Last segment, including the extension.
    pub fn file_name(&self) -> &str {
        self.raw.rsplit('/').next().unwrap_or(&self.raw)
    }

    /// File name without its extension. A leading dot does not start an extension.
    pub fn stem(&self) -> &str {
        let name = self.file_name();
        match name.rfind('.') {
            Some(0) | None => name,
            Some(idx) => &name[..idx],
        }
    }

    /// Extension without the dot, if any.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        match name.rfind('.') {
            Some(0) | None => None,
            Some(idx) => Some(&name[idx + 1..]),
        }
    }

    /// Containing folder, or `None` for a single-segment path.
    pub fn parent(&self) -> Option<AssetPath> {
        self.raw.rfind('/').map(|idx| AssetPath {
            raw: self.raw[..idx].to_string(),
        })
    }

    /// Append one or more segments (`child` may itself contain '/').
    pub fn join(&self, child: &str) -> Result<AssetPath, PathError> {
        AssetPath::parse(&format!("{}/{}", self.raw, child))
    }

    /// Segment-wise prefix test: `Assets/Foo` starts with `Assets` but not with `Ass`.
    pub fn starts_with(&self, prefix: &AssetPath) -> bool {
        self.raw == prefix.raw
            || (self.raw.starts_with(&prefix.raw)
                && self.raw.as_bytes().get(prefix.raw.len()) == Some(&b'/'))
    }

    /// Same folder and extension with a different stem.
    pub fn with_stem(&self, stem: &str) -> Result<AssetPath, PathError> {
        let name = match self.extension() {
            Some(ext) => format!("{stem}.{ext}"),
            None => stem.to_string(),
        };
        match self.parent() {
            Some(parent) => parent.join(&name),
            None => AssetPath::parse(&name),
        }
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for AssetPath {
    type Err = PathError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetPath::parse(s)
    }
}

impl AsRef<str> for AssetPath {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

// Serde support: serialize as string, deserialize from string
impl Serialize for AssetPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for AssetPath {
    fn deserialize<D>(deserializer: D) -> Result<AssetPath, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AssetPath::parse(&s).map_err(de::Error::custom)
    }
}

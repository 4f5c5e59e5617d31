//! Field path representation for locating values in nested payloads.
//!
//! This module provides [`FieldPath`], the dot-joined chain of field names
//! from the payload root to a value (e.g. `address.zip`). Array elements are
//! reported at their field's path, so paths carry no index segments.

use std::fmt::{self, Display};

/// A path to a field in a nested payload.
///
/// `FieldPath` represents locations like `address.zip` and provides methods
/// for building paths incrementally. Root-level paths render with no leading
/// dot.
///
/// # Example
///
/// ```rust
/// use lockstep::FieldPath;
///
/// let path = FieldPath::root().push("address").push("zip");
/// assert_eq!(path.to_string(), "address.zip");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Creates an empty path representing the payload root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field name.
    pub fn from_name(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    /// Returns a new path with a field name appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of field names in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the field names.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Returns the parent path (all names except the last), or None at root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last field name, or None at root.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

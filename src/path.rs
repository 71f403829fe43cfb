//! Locations of violations inside a record.
//!
//! A [`JsonPath`] names where a failing value sits: the top-level field, an
//! element of an array-valued field, or a field of a nested sub-record
//! (`address.city`, `tags[2]`).

use std::fmt::{self, Display};

/// One step in a [`JsonPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named field of a record.
    Field(String),
    /// An element position inside an array-valued field.
    Index(usize),
}

/// A path from the record root to a value.
///
/// Paths are values: every `push_*`/`join` returns a new path and leaves the
/// receiver untouched, so one prefix can be shared by all fields of a record.
///
/// # Example
///
/// ```rust
/// use fieldcheck::JsonPath;
///
/// let path = JsonPath::from_field("address").push_field("lines").push_index(1);
/// assert_eq!(path.to_string(), "address.lines[1]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// The empty path, i.e. the record itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// A single-segment path naming a top-level field.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.with_segment(PathSegment::Field(name.into()))
    }

    pub fn push_index(&self, index: usize) -> Self {
        self.with_segment(PathSegment::Index(index))
    }

    /// Appends every segment of `suffix` to this path.
    ///
    /// Used to re-root violations reported by a nested schema under the
    /// field that holds the sub-record.
    pub fn join(&self, suffix: &JsonPath) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + suffix.segments.len());
        segments.extend(self.segments.iter().cloned());
        segments.extend(suffix.segments.iter().cloned());
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// The top-level field this path starts at, if any.
    pub fn field_name(&self) -> Option<&str> {
        match self.segments.first() {
            Some(PathSegment::Field(name)) => Some(name),
            _ => None,
        }
    }

    fn with_segment(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_renders_empty() {
        let path = JsonPath::root();
        assert!(path.is_root());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
        assert_eq!(path.field_name(), None);
    }

    #[test]
    fn test_field_and_index_rendering() {
        let path = JsonPath::from_field("tags").push_index(3);
        assert_eq!(path.to_string(), "tags[3]");
        assert_eq!(path.field_name(), Some("tags"));
    }

    #[test]
    fn test_push_leaves_original_untouched() {
        let base = JsonPath::from_field("user");
        let child = base.push_field("email");

        assert_eq!(base.to_string(), "user");
        assert_eq!(child.to_string(), "user.email");
    }

    #[test]
    fn test_join_reroots_nested_path() {
        let nested = JsonPath::from_field("city");
        let joined = JsonPath::from_field("address").join(&nested);

        assert_eq!(joined.to_string(), "address.city");
        assert_eq!(joined.len(), 2);
        assert_eq!(
            joined.segments().collect::<Vec<_>>(),
            vec![
                &PathSegment::Field("address".to_string()),
                &PathSegment::Field("city".to_string())
            ]
        );
    }

    #[test]
    fn test_join_with_root_is_identity() {
        let path = JsonPath::from_field("name");
        assert_eq!(path.join(&JsonPath::root()), path);
        assert_eq!(JsonPath::root().join(&path), path);
    }
}

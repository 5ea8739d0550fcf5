//! Dot-separated path into a value, e.g. `user.address.city`.
use super::super::Value;

use std::borrow::Cow;

/// Path to a value inside the context.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    path: String,
}

impl Path {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }

    /// Path segments, i.e. the names between dots.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('.')
    }

    /// Follow the path starting at `context`.
    ///
    /// Each segment reads a hash key or a record field from the value found
    /// by the previous segment. If any segment can't be read, the path doesn't
    /// resolve and `None` is returned. The context is never modified.
    pub fn resolve<'a>(&self, context: &'a Value) -> Option<Cow<'a, Value>> {
        let mut current = Cow::Borrowed(context);

        for segment in self.segments() {
            current = match current {
                Cow::Borrowed(value) => value.get(segment)?,
                // Owned values come from records, so nothing can borrow from them
                // past this step.
                Cow::Owned(value) => Cow::Owned(value.get(segment)?.into_owned()),
            };
        }

        Some(current)
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.path)
    }
}

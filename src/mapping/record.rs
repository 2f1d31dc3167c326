//! The `{path, url}` record shared by every source format.

/// One decoded redirect entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathUrl {
    pub path: String,
    pub url: String,
}

impl PathUrl {
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}

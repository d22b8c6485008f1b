//! Document identity and source positions.

use serde::{Deserialize, Serialize};

/// Identifies one document in one repository at one revision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRef {
    /// Code host, e.g. `github.com`
    pub host: String,
    /// Repository name within the host
    pub repository: String,
    /// Commit or revision identifier
    pub revision: String,
    /// File path within the repository
    pub path: String,
}

impl DocumentRef {
    pub fn new(
        host: impl Into<String>,
        repository: impl Into<String>,
        revision: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            repository: repository.into(),
            revision: revision.into(),
            path: path.into(),
        }
    }

    /// The "same file" fingerprint: host, repository and path.
    ///
    /// Revision is deliberately excluded so that results for the same file
    /// at different commits deduplicate against each other.
    pub fn file_key(&self) -> FileKey {
        FileKey {
            host: self.host.clone(),
            repository: self.repository.clone(),
            path: self.path.clone(),
        }
    }
}

/// Dedup key for "is this the same file" comparisons (see [`DocumentRef::file_key`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileKey {
    pub host: String,
    pub repository: String,
    pub path: String,
}

/// A zero-based line/character pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A half-open range inside one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// A range inside one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeLocation {
    pub document: DocumentRef,
    pub range: Range,
}

impl CodeLocation {
    pub fn new(document: DocumentRef, range: Range) -> Self {
        Self { document, range }
    }

    /// The containing document's "same file" fingerprint.
    pub fn file_key(&self) -> FileKey {
        self.document.file_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_key_ignores_revision() {
        let a = DocumentRef::new("github.com", "acme/widget", "deadbeef", "src/lib.rs");
        let b = DocumentRef::new("github.com", "acme/widget", "cafef00d", "src/lib.rs");
        assert_eq!(a.file_key(), b.file_key());
    }

    #[test]
    fn file_key_distinguishes_paths() {
        let a = DocumentRef::new("github.com", "acme/widget", "deadbeef", "src/lib.rs");
        let b = DocumentRef::new("github.com", "acme/widget", "deadbeef", "src/main.rs");
        assert_ne!(a.file_key(), b.file_key());
    }
}

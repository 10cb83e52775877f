//! In-memory file snapshots.
//!
//! A [`Snapshot`] is the ordered set of `{path, content}` records analyzed in
//! one pass. Paths are unique; insertion order is the "file order" used
//! whenever an analysis stage needs a first-match rule.

mod seed;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Errors that can occur while building a snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Duplicate path in snapshot: {0}")]
    DuplicatePath(String),

    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Result type for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// A single source file: its snapshot-relative path and full text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub content: String,
}

impl FileRecord {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Returns the last path segment (`src/api/client.ts` -> `client.ts`).
    pub fn file_name(&self) -> &str {
        basename(&self.path)
    }
}

/// Returns the last `/`-separated segment of a snapshot path.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// An ordered collection of [`FileRecord`]s with unique paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    files: Vec<FileRecord>,
}

impl Snapshot {
    /// Builds a snapshot, rejecting duplicate paths.
    ///
    /// # Example
    ///
    /// ```
    /// use modscope::snapshot::{FileRecord, Snapshot};
    ///
    /// let snapshot = Snapshot::new(vec![
    ///     FileRecord::new("src/a.ts", "export const a = 1;"),
    ///     FileRecord::new("src/b.ts", "import { a } from './a';"),
    /// ])
    /// .unwrap();
    /// assert_eq!(snapshot.len(), 2);
    ///
    /// let dup = Snapshot::new(vec![
    ///     FileRecord::new("src/a.ts", ""),
    ///     FileRecord::new("src/a.ts", ""),
    /// ]);
    /// assert!(dup.is_err());
    /// ```
    pub fn new(files: Vec<FileRecord>) -> SnapshotResult<Self> {
        for (i, file) in files.iter().enumerate() {
            if files[..i].iter().any(|f| f.path == file.path) {
                return Err(SnapshotError::DuplicatePath(file.path.clone()));
            }
        }
        Ok(Self { files })
    }

    /// The six-file demo codebase (two mutually importing services, two
    /// components, a formatter module and an unused legacy module).
    pub fn seed() -> Self {
        Self {
            files: seed::seed_files(),
        }
    }

    /// Loads every JavaScript/TypeScript file below `root`.
    ///
    /// Paths are stored relative to `root` with `/` separators and sorted so
    /// repeated loads produce the same file order.
    pub fn from_directory(root: &Path) -> SnapshotResult<Self> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| !is_ignored_dir(e))
        {
            let entry = entry?;
            if !entry.file_type().is_file() || !is_source_file(entry.path()) {
                continue;
            }

            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            let path = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let content = fs::read_to_string(entry.path())?;
            files.push(FileRecord { path, content });
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        debug!(root = %root.display(), files = files.len(), "Loaded snapshot from directory");
        Ok(Self { files })
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.iter()
    }

    pub fn get(&self, path: &str) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns a new snapshot with `file` replacing the record at the same
    /// path, or appended when the path is new.
    pub fn with_file(&self, file: FileRecord) -> Self {
        let mut files = self.files.clone();
        match files.iter_mut().find(|f| f.path == file.path) {
            Some(existing) => *existing = file,
            None => files.push(file),
        }
        Self { files }
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a FileRecord;
    type IntoIter = std::slice::Iter<'a, FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

fn is_source_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("ts" | "tsx" | "mts" | "cts" | "js" | "jsx" | "mjs" | "cjs")
    )
}

fn is_ignored_dir(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() || entry.depth() == 0 {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    matches!(
        name.as_ref(),
        "node_modules" | ".git" | "dist" | "build" | ".next" | "coverage" | ".turbo"
    )
}

//! Relative import resolution.
//!
//! Only same-snapshot relative imports resolve. Package imports and paths
//! with no matching file are dropped without an error.

use serde::{Deserialize, Serialize};

use crate::parser::Module;
use crate::snapshot::Snapshot;

/// A directed import edge between two snapshot files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    /// Path of the importing file.
    pub from: String,
    /// Path of the imported file.
    pub to: String,
}

impl Dependency {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Builds the `.ts` candidate path for `source` imported from `importer`.
///
/// A trailing `.ts`/`.tsx` is stripped from the specifier, the remaining
/// segments are applied to the importer's directory (`..` pops, `.` is a
/// no-op, anything else is pushed) and `.ts` is appended.
///
/// # Example
///
/// ```
/// use modscope::analysis::imports::candidate_path;
///
/// assert_eq!(
///     candidate_path("src/components/Settings.tsx", "../api/client.ts"),
///     "src/api/client.ts"
/// );
/// assert_eq!(candidate_path("src/a.ts", "./b"), "src/b.ts");
/// ```
pub fn candidate_path(importer: &str, source: &str) -> String {
    let specifier = source
        .strip_suffix(".tsx")
        .or_else(|| source.strip_suffix(".ts"))
        .unwrap_or(source);

    let mut segments: Vec<&str> = match importer.rfind('/') {
        Some(idx) => importer[..idx].split('/').collect(),
        None => Vec::new(),
    };

    for part in specifier.split('/') {
        match part {
            ".." => {
                segments.pop();
            }
            "." => {}
            _ => segments.push(part),
        }
    }

    format!("{}.ts", segments.join("/"))
}

/// Resolves an import specifier to a snapshot path (`.ts` or `.tsx`).
pub fn resolve_import<'a>(importer: &str, source: &str, snapshot: &'a Snapshot) -> Option<&'a str> {
    let candidate = candidate_path(importer, source);
    let tsx = format!("{candidate}x");

    snapshot
        .iter()
        .find(|f| f.path == candidate || f.path == tsx)
        .map(|f| f.path.as_str())
}

/// One edge per resolvable import statement; repeated imports of the same
/// file produce repeated edges.
pub fn extract_dependencies(path: &str, module: &Module, snapshot: &Snapshot) -> Vec<Dependency> {
    module
        .imports()
        .filter_map(|import| resolve_import(path, &import.source, snapshot))
        .map(|target| Dependency::new(path, target))
        .collect()
}

/// Every `{ name }` specifier of every import, resolved or not.
pub fn imported_names(module: &Module) -> Vec<String> {
    module
        .imports()
        .flat_map(|import| import.named_imports())
        .map(str::to_string)
        .collect()
}

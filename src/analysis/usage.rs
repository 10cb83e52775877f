//! Cross-file symbol usage counting.

use indexmap::IndexMap;
use serde::Serialize;

use super::symbols::SymbolTable;

/// Named imports per importing file, in snapshot order.
pub type ImportedNames = IndexMap<String, Vec<String>>;

/// Usage counts keyed by `(exporting path, symbol name)`.
///
/// A key is present only once its count reaches 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsageCounts {
    counts: IndexMap<String, usize>,
}

impl UsageCounts {
    /// The `path::name` key form.
    pub fn key(path: &str, name: &str) -> String {
        format!("{path}::{name}")
    }

    pub fn get(&self, path: &str, name: &str) -> usize {
        self.counts.get(&Self::key(path, name)).copied().unwrap_or(0)
    }

    pub fn contains(&self, path: &str, name: &str) -> bool {
        self.counts.contains_key(&Self::key(path, name))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn increment(&mut self, path: &str, name: &str) {
        *self.counts.entry(Self::key(path, name)).or_insert(0) += 1;
    }
}

/// Attributes every named import to the first file (in snapshot order) that
/// exports a symbol with that name, and counts it once per occurrence.
///
/// Names exported by several files are not disambiguated: the earliest
/// exporter receives every use.
pub fn count_usages(imported: &ImportedNames, symbols: &SymbolTable) -> UsageCounts {
    let mut usages = UsageCounts::default();

    for names in imported.values() {
        for name in names {
            let exporter = symbols.iter().find(|(_, file_symbols)| {
                file_symbols.iter().any(|s| s.exported && s.name == *name)
            });

            if let Some((path, _)) = exporter {
                usages.increment(path, name);
            }
        }
    }

    usages
}

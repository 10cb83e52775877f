//! Dead export detection.

use serde::Serialize;

use super::symbols::SymbolTable;
use super::usage::UsageCounts;

/// An exported symbol that nothing imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadSymbol {
    pub path: String,
    pub symbol_name: String,
}

impl DeadSymbol {
    pub fn new(path: impl Into<String>, symbol_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            symbol_name: symbol_name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeadCode {
    pub symbols: Vec<DeadSymbol>,
    /// Files exporting at least one symbol, all of them dead.
    pub files: Vec<String>,
}

/// Flags exported symbols with no usage entry, then files whose every
/// exported symbol is dead. Files exporting nothing are never dead.
pub fn find_dead_code(symbols: &SymbolTable, usages: &UsageCounts) -> DeadCode {
    let mut dead = DeadCode::default();

    for (path, file_symbols) in symbols {
        let exported: Vec<_> = file_symbols.iter().filter(|s| s.exported).collect();
        let mut all_dead = true;

        for symbol in &exported {
            if usages.contains(path, &symbol.name) {
                all_dead = false;
            } else {
                dead.symbols.push(DeadSymbol::new(path, &symbol.name));
            }
        }

        if !exported.is_empty() && all_dead {
            dead.files.push(path.clone());
        }
    }

    dead
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::symbols::{Symbol, SymbolKind};
    use crate::analysis::usage::{count_usages, ImportedNames};
    use pretty_assertions::assert_eq;

    fn fixture() -> (SymbolTable, UsageCounts) {
        let mut symbols = SymbolTable::new();
        symbols.insert(
            "client.ts".to_string(),
            vec![Symbol::exported("ApiClient", SymbolKind::Class)],
        );
        symbols.insert(
            "formatters.ts".to_string(),
            vec![
                Symbol::exported("formatDate", SymbolKind::Function),
                Symbol::exported("formatTime", SymbolKind::Function),
            ],
        );
        symbols.insert(
            "old.ts".to_string(),
            vec![
                Symbol::exported("a", SymbolKind::Function),
                Symbol::exported("b", SymbolKind::Variable),
            ],
        );
        symbols.insert("main.ts".to_string(), vec![]);

        let mut imported = ImportedNames::new();
        imported.insert(
            "main.ts".to_string(),
            vec!["ApiClient".to_string(), "formatDate".to_string()],
        );

        let usages = count_usages(&imported, &symbols);
        (symbols, usages)
    }

    #[test]
    fn test_dead_symbols() {
        let (symbols, usages) = fixture();
        let dead = find_dead_code(&symbols, &usages);

        assert_eq!(
            dead.symbols,
            vec![
                DeadSymbol::new("formatters.ts", "formatTime"),
                DeadSymbol::new("old.ts", "a"),
                DeadSymbol::new("old.ts", "b"),
            ]
        );
    }

    #[test]
    fn test_dead_files_require_all_symbols_dead() {
        let (symbols, usages) = fixture();
        let dead = find_dead_code(&symbols, &usages);

        // formatters.ts is partially used, main.ts exports nothing
        assert_eq!(dead.files, vec!["old.ts".to_string()]);
    }

    #[test]
    fn test_non_exported_symbols_ignored() {
        let mut symbols = SymbolTable::new();
        symbols.insert(
            "private.ts".to_string(),
            vec![Symbol {
                name: "helper".to_string(),
                kind: SymbolKind::Function,
                exported: false,
            }],
        );

        let dead = find_dead_code(&symbols, &UsageCounts::default());
        assert!(dead.symbols.is_empty());
        assert!(dead.files.is_empty());
    }
}

//! Exported symbol extraction.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::parser::{Binding, Declaration, Module};

/// What kind of declaration an exported symbol came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Class,
    Variable,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function => write!(f, "function"),
            Self::Class => write!(f, "class"),
            Self::Variable => write!(f, "variable"),
        }
    }
}

/// A named top-level declaration of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub exported: bool,
}

impl Symbol {
    pub fn exported(name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
            exported: true,
        }
    }
}

/// Exported symbols per file path, in snapshot order.
pub type SymbolTable = IndexMap<String, Vec<Symbol>>;

/// Lists the exported named declarations at the top level of a module.
///
/// Only `export function`, `export class` and `export const/let/var` count.
/// For variable statements only the first declarator is tracked, and only
/// when it binds a plain identifier.
pub fn extract_symbols(module: &Module) -> Vec<Symbol> {
    module
        .named_exports()
        .filter_map(|export| match export.declaration.as_ref()? {
            Declaration::Function { name } => Some(Symbol::exported(name, SymbolKind::Function)),
            Declaration::Class { name } => Some(Symbol::exported(name, SymbolKind::Class)),
            Declaration::Variable { bindings } => match bindings.first()? {
                Binding::Identifier(name) => Some(Symbol::exported(name, SymbolKind::Variable)),
                Binding::Pattern => None,
            },
            Declaration::Other => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ExportNamedDeclaration, Statement};
    use pretty_assertions::assert_eq;

    fn export(declaration: Option<Declaration>) -> Statement {
        Statement::ExportNamed(ExportNamedDeclaration { declaration })
    }

    #[test]
    fn test_extracts_each_declaration_kind() {
        let module = Module {
            body: vec![
                export(Some(Declaration::Function {
                    name: "formatDate".to_string(),
                })),
                export(Some(Declaration::Class {
                    name: "ApiClient".to_string(),
                })),
                export(Some(Declaration::Variable {
                    bindings: vec![Binding::Identifier("UserProfile".to_string())],
                })),
            ],
        };

        assert_eq!(
            extract_symbols(&module),
            vec![
                Symbol::exported("formatDate", SymbolKind::Function),
                Symbol::exported("ApiClient", SymbolKind::Class),
                Symbol::exported("UserProfile", SymbolKind::Variable),
            ]
        );
    }

    #[test]
    fn test_only_first_declarator_tracked() {
        let module = Module {
            body: vec![export(Some(Declaration::Variable {
                bindings: vec![
                    Binding::Identifier("a".to_string()),
                    Binding::Identifier("b".to_string()),
                ],
            }))],
        };

        let symbols = extract_symbols(&module);
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].name, "a");
    }

    #[test]
    fn test_untracked_statements() {
        let module = Module {
            body: vec![
                export(None),
                export(Some(Declaration::Other)),
                export(Some(Declaration::Variable {
                    bindings: vec![Binding::Pattern, Binding::Identifier("late".to_string())],
                })),
                Statement::ExportDefault,
                Statement::Other,
            ],
        };

        assert!(extract_symbols(&module).is_empty());
    }
}

//! tree-sitter backed parser adapter.
//!
//! Parses JavaScript/TypeScript source into the closed [`Module`] model. A
//! file that fails to parse never aborts an analysis pass: callers use
//! [`ParserAdapter::parse_or_empty`] to get an empty module plus a recorded
//! [`ParseFailure`] instead.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;
use tree_sitter::{Language, Node, Parser};

use super::ast::{
    Binding, Declaration, ExportNamedDeclaration, ImportDeclaration, ImportSpecifier, Module,
    Statement,
};
use crate::snapshot::FileRecord;

/// Errors that can occur while parsing a single file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Tree-sitter language initialization failed")]
    LanguageInit,

    #[error("Parser produced no tree for {path}")]
    NoTree { path: String },

    #[error("Syntax error in {path} at {line}:{column}")]
    Syntax {
        path: String,
        line: usize,
        column: usize,
    },
}

/// Result type for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// A file whose source could not be parsed; it contributed an empty module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseFailure {
    pub path: String,
    pub message: String,
}

/// Grammar selection by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    JavaScript,
    TypeScript,
    Tsx,
}

impl SourceLanguage {
    /// Determine language from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" | "jsx" => Some(SourceLanguage::JavaScript),
            "ts" | "mts" | "cts" => Some(SourceLanguage::TypeScript),
            "tsx" => Some(SourceLanguage::Tsx),
            _ => None,
        }
    }

    /// Determine language from a snapshot path, defaulting to TypeScript.
    pub fn from_path(path: &str) -> Self {
        path.rsplit_once('.')
            .and_then(|(_, ext)| Self::from_extension(ext))
            .unwrap_or(SourceLanguage::TypeScript)
    }

    pub fn tree_sitter_language(&self) -> Language {
        match self {
            SourceLanguage::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            SourceLanguage::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceLanguage::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Holds one configured tree-sitter parser per grammar.
pub struct ParserAdapter {
    js_parser: Parser,
    ts_parser: Parser,
    tsx_parser: Parser,
}

impl ParserAdapter {
    pub fn new() -> ParseResult<Self> {
        Ok(Self {
            js_parser: parser_for(SourceLanguage::JavaScript)?,
            ts_parser: parser_for(SourceLanguage::TypeScript)?,
            tsx_parser: parser_for(SourceLanguage::Tsx)?,
        })
    }

    /// Parse one file's source into its top-level statements.
    pub fn parse(&mut self, path: &str, source: &str) -> ParseResult<Module> {
        let parser = match SourceLanguage::from_path(path) {
            SourceLanguage::JavaScript => &mut self.js_parser,
            SourceLanguage::TypeScript => &mut self.ts_parser,
            SourceLanguage::Tsx => &mut self.tsx_parser,
        };

        let tree = parser.parse(source, None).ok_or_else(|| ParseError::NoTree {
            path: path.to_string(),
        })?;

        let root = tree.root_node();
        if root.has_error() {
            let (line, column) = first_error_position(root).unwrap_or((1, 1));
            return Err(ParseError::Syntax {
                path: path.to_string(),
                line,
                column,
            });
        }

        let mut cursor = root.walk();
        let body = root
            .named_children(&mut cursor)
            .map(|node| lower_statement(node, source))
            .collect();

        Ok(Module { body })
    }

    /// Parse a file, substituting an empty module on failure.
    pub fn parse_or_empty(&mut self, file: &FileRecord) -> (Module, Option<ParseFailure>) {
        match self.parse(&file.path, &file.content) {
            Ok(module) => (module, None),
            Err(e) => {
                warn!(path = %file.path, error = %e, "Failed to parse file; analysis may be incomplete");
                let failure = ParseFailure {
                    path: file.path.clone(),
                    message: e.to_string(),
                };
                (Module::empty(), Some(failure))
            }
        }
    }
}

fn parser_for(language: SourceLanguage) -> ParseResult<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&language.tree_sitter_language())
        .map_err(|_| ParseError::LanguageInit)?;
    Ok(parser)
}

/// 1-indexed position of the first error or missing node.
fn first_error_position(node: Node) -> Option<(usize, usize)> {
    if node.is_error() || node.is_missing() {
        let pos = node.start_position();
        return Some((pos.row + 1, pos.column + 1));
    }

    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error_position)
}

fn lower_statement(node: Node, source: &str) -> Statement {
    match node.kind() {
        "import_statement" => lower_import(node, source)
            .map(Statement::Import)
            .unwrap_or(Statement::Other),
        "export_statement" => lower_export(node, source),
        _ => Statement::Other,
    }
}

fn lower_import(node: Node, source: &str) -> Option<ImportDeclaration> {
    // `import x = require('y')` has no source field
    let source_node = node.child_by_field_name("source")?;
    let module_source = string_value(source_node, source)?;

    let mut specifiers = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "import_clause" {
            lower_import_clause(child, source, &mut specifiers);
        }
    }

    Some(ImportDeclaration {
        source: module_source,
        specifiers,
        line: node.start_position().row + 1,
    })
}

fn lower_import_clause(node: Node, source: &str, specifiers: &mut Vec<ImportSpecifier>) {
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        match child.kind() {
            "identifier" => {
                if let Some(name) = node_text(child, source) {
                    specifiers.push(ImportSpecifier::Default(name.to_string()));
                }
            }
            "namespace_import" => {
                let mut inner = child.walk();
                let local = child
                    .children(&mut inner)
                    .find(|c| c.kind() == "identifier")
                    .and_then(|c| node_text(c, source));
                if let Some(local) = local {
                    specifiers.push(ImportSpecifier::Namespace(local.to_string()));
                }
            }
            "named_imports" => {
                let mut inner = child.walk();
                for spec in child.children(&mut inner) {
                    if spec.kind() == "import_specifier" {
                        if let Some(named) = lower_import_specifier(spec, source) {
                            specifiers.push(named);
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

/// `name` or `name as alias`; `name` may be a string literal.
fn lower_import_specifier(node: Node, source: &str) -> Option<ImportSpecifier> {
    let name_node = node.child_by_field_name("name")?;
    let imported = match name_node.kind() {
        "string" => string_value(name_node, source)?,
        _ => node_text(name_node, source)?.to_string(),
    };
    let local = node
        .child_by_field_name("alias")
        .and_then(|alias| node_text(alias, source))
        .map(str::to_string)
        .unwrap_or_else(|| imported.clone());

    Some(ImportSpecifier::Named { imported, local })
}

fn lower_export(node: Node, source: &str) -> Statement {
    let mut cursor = node.walk();
    let mut is_default = false;
    let mut is_star = false;
    for child in node.children(&mut cursor) {
        match child.kind() {
            "default" => is_default = true,
            "*" | "namespace_export" => is_star = true,
            _ => {}
        }
    }

    if is_default {
        return Statement::ExportDefault;
    }
    if is_star {
        return Statement::Other;
    }

    let declaration = node
        .child_by_field_name("declaration")
        .map(|decl| lower_declaration(decl, source));
    Statement::ExportNamed(ExportNamedDeclaration { declaration })
}

fn lower_declaration(node: Node, source: &str) -> Declaration {
    let name = || {
        node.child_by_field_name("name")
            .and_then(|n| node_text(n, source))
            .map(str::to_string)
    };

    match node.kind() {
        "function_declaration" | "generator_function_declaration" => match name() {
            Some(name) => Declaration::Function { name },
            None => Declaration::Other,
        },
        "class_declaration" | "abstract_class_declaration" => match name() {
            Some(name) => Declaration::Class { name },
            None => Declaration::Other,
        },
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = node.walk();
            let bindings = node
                .named_children(&mut cursor)
                .filter(|child| child.kind() == "variable_declarator")
                .filter_map(|declarator| declarator.child_by_field_name("name"))
                .map(|target| match target.kind() {
                    "identifier" => node_text(target, source)
                        .map(|s| Binding::Identifier(s.to_string()))
                        .unwrap_or(Binding::Pattern),
                    _ => Binding::Pattern,
                })
                .collect();
            Declaration::Variable { bindings }
        }
        _ => Declaration::Other,
    }
}

fn node_text<'a>(node: Node, source: &'a str) -> Option<&'a str> {
    source.get(node.start_byte()..node.end_byte())
}

/// Extract a string literal's value (removes quotes).
fn string_value(node: Node, source: &str) -> Option<String> {
    let text = node_text(node, source)?;
    let trimmed = text
        .trim_start_matches(['"', '\''])
        .trim_end_matches(['"', '\'']);
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(path: &str, source: &str) -> Module {
        let mut adapter = ParserAdapter::new().unwrap();
        adapter.parse(path, source).unwrap()
    }

    #[test]
    fn test_language_from_path() {
        assert_eq!(SourceLanguage::from_path("a/b.ts"), SourceLanguage::TypeScript);
        assert_eq!(SourceLanguage::from_path("a/b.tsx"), SourceLanguage::Tsx);
        assert_eq!(SourceLanguage::from_path("a/b.mjs"), SourceLanguage::JavaScript);
        assert_eq!(SourceLanguage::from_path("Makefile"), SourceLanguage::TypeScript);
    }

    #[test]
    fn test_named_default_and_namespace_imports() {
        let module = parse(
            "src/a.ts",
            "import React, { useState, useEffect as effect } from 'react';\nimport * as path from 'path';\n",
        );

        let imports: Vec<_> = module.imports().collect();
        assert_eq!(imports.len(), 2);
        assert_eq!(imports[0].source, "react");
        assert_eq!(imports[0].line, 1);
        assert_eq!(
            imports[0].specifiers,
            vec![
                ImportSpecifier::Default("React".to_string()),
                ImportSpecifier::Named {
                    imported: "useState".to_string(),
                    local: "useState".to_string(),
                },
                ImportSpecifier::Named {
                    imported: "useEffect".to_string(),
                    local: "effect".to_string(),
                },
            ]
        );
        assert_eq!(
            imports[0].named_imports().collect::<Vec<_>>(),
            vec!["useState", "useEffect"]
        );
        assert_eq!(
            imports[1].specifiers,
            vec![ImportSpecifier::Namespace("path".to_string())]
        );
    }

    #[test]
    fn test_side_effect_import_has_no_specifiers() {
        let module = parse("src/a.ts", "import './polyfills.ts';");
        let import = module.imports().next().unwrap();
        assert_eq!(import.source, "./polyfills.ts");
        assert!(import.specifiers.is_empty());
    }

    #[test]
    fn test_type_only_import() {
        let module = parse("src/a.ts", "import type { Props } from './types';");
        let import = module.imports().next().unwrap();
        assert_eq!(import.named_imports().collect::<Vec<_>>(), vec!["Props"]);
    }

    #[test]
    fn test_export_declarations() {
        let module = parse(
            "src/a.ts",
            r#"
export function run() {}
export class Runner {}
export const a = 1, b = 2;
export const { x, y } = obj;
export interface Shape { size: number }
export { run as go };
export default function main() {}
function hidden() {}
"#,
        );

        let declarations: Vec<_> = module
            .named_exports()
            .map(|export| export.declaration.clone())
            .collect();

        assert_eq!(
            declarations,
            vec![
                Some(Declaration::Function {
                    name: "run".to_string()
                }),
                Some(Declaration::Class {
                    name: "Runner".to_string()
                }),
                Some(Declaration::Variable {
                    bindings: vec![
                        Binding::Identifier("a".to_string()),
                        Binding::Identifier("b".to_string()),
                    ]
                }),
                Some(Declaration::Variable {
                    bindings: vec![Binding::Pattern]
                }),
                Some(Declaration::Other),
                None,
            ]
        );
        assert!(module.body.contains(&Statement::ExportDefault));
    }

    #[test]
    fn test_javascript_grammar_handles_jsx() {
        let module = parse(
            "src/App.jsx",
            "import { Button } from './Button';\nexport const App = () => <Button />;\n",
        );
        assert_eq!(module.imports().count(), 1);
        assert_eq!(module.named_exports().count(), 1);
    }

    #[test]
    fn test_syntax_error_reported() {
        let mut adapter = ParserAdapter::new().unwrap();
        let err = adapter
            .parse("src/broken.ts", "export function (\n")
            .unwrap_err();
        assert!(matches!(err, ParseError::Syntax { ref path, .. } if path == "src/broken.ts"));
    }

    #[test]
    fn test_parse_or_empty_recovers() {
        let mut adapter = ParserAdapter::new().unwrap();
        let file = FileRecord::new("src/broken.ts", "import { from ;;; {{");
        let (module, failure) = adapter.parse_or_empty(&file);

        assert!(module.body.is_empty());
        let failure = failure.unwrap();
        assert_eq!(failure.path, "src/broken.ts");
        assert!(failure.message.contains("src/broken.ts"));
    }
}

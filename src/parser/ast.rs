//! Closed syntax model for the top level of an ECMAScript module.
//!
//! Only the statement shapes the analysis stages care about get their own
//! variant; everything else collapses into `Other`.

/// A parsed module: its ordered top-level statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    pub body: Vec<Statement>,
}

impl Module {
    /// The module substituted for a file that failed to parse.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn imports(&self) -> impl Iterator<Item = &ImportDeclaration> {
        self.body.iter().filter_map(|stmt| match stmt {
            Statement::Import(import) => Some(import),
            _ => None,
        })
    }

    pub fn named_exports(&self) -> impl Iterator<Item = &ExportNamedDeclaration> {
        self.body.iter().filter_map(|stmt| match stmt {
            Statement::ExportNamed(export) => Some(export),
            _ => None,
        })
    }
}

/// A top-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `import ... from 'source'` or `import 'source'`
    Import(ImportDeclaration),
    /// `export <declaration>`, `export { a, b }` or `export { a } from 'source'`
    ExportNamed(ExportNamedDeclaration),
    /// `export default ...`
    ExportDefault,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    /// The module specifier with quotes removed.
    pub source: String,
    pub specifiers: Vec<ImportSpecifier>,
    /// 1-indexed line of the statement.
    pub line: usize,
}

impl ImportDeclaration {
    /// Names imported with `{ name }` or `{ name as alias }`, by their
    /// exported (not local) name.
    pub fn named_imports(&self) -> impl Iterator<Item = &str> {
        self.specifiers.iter().filter_map(|spec| match spec {
            ImportSpecifier::Named { imported, .. } => Some(imported.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSpecifier {
    /// `import { imported as local }`
    Named { imported: String, local: String },
    /// `import local from ...`
    Default(String),
    /// `import * as local from ...`
    Namespace(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportNamedDeclaration {
    /// `None` for export lists such as `export { a }`.
    pub declaration: Option<Declaration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Function { name: String },
    Class { name: String },
    Variable { bindings: Vec<Binding> },
    /// Interfaces, type aliases, enums, ambient declarations.
    Other,
}

/// The left-hand side of one variable declarator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Identifier(String),
    /// Object or array destructuring.
    Pattern,
}

//! Source parsing.
//!
//! Wraps tree-sitter's JavaScript and TypeScript grammars and lowers each
//! file's top level into the closed [`ast::Statement`] model, so the analysis
//! stages pattern-match on variants instead of grammar node names.
//!
//! # Example
//!
//! ```
//! use modscope::parser::{ParserAdapter, Statement};
//!
//! let mut adapter = ParserAdapter::new().unwrap();
//! let module = adapter
//!     .parse("src/a.ts", "import { b } from './b';\nexport function a() {}\n")
//!     .unwrap();
//!
//! assert!(matches!(module.body[0], Statement::Import(_)));
//! assert!(matches!(module.body[1], Statement::ExportNamed(_)));
//! ```

pub mod adapter;
pub mod ast;

pub use adapter::{ParseError, ParseFailure, ParseResult, ParserAdapter, SourceLanguage};
pub use ast::{
    Binding, Declaration, ExportNamedDeclaration, ImportDeclaration, ImportSpecifier, Module,
    Statement,
};

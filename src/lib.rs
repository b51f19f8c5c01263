//! `lang-pc` is a minimal, self-contained parser-combinator engine for
//! line-oriented, user-defined grammars.
//!
//! # Overview
//!
//! An embedder supplies a regex-driven token table, an optional token
//! filter, and a grammar built from eight composable expression primitives
//! ([`Expr`]). Feeding one line plus a line number to a built [`Parser`]
//! produces either a single abstract syntax tree ([`AstNode`]) aligned with
//! the grammar, or a list of furthest-progress failure diagnostics suitable
//! for pointing a user at exactly where their input went wrong.
//!
//! # Design
//!
//! The engine does recursive-descent parsing with backtracking: ambiguous
//! grammars are allowed, and the evaluator ([`expr::eval`], crate-private)
//! explores every alternative lazily rather than committing early. It does
//! not memoize (no packrat parsing) and does not support left recursion.
//! See the module docs on [`Expr`] for the eight operators this buys.
//!
//! # Example
//!
//! ```
//! use lang_pc::expr::{and, mute, named, star, token};
//! use lang_pc::{build_grammar, GrammarConfig, TokenDesc, TokenTable};
//!
//! let tokens = TokenTable::new(vec![
//!     TokenDesc::new("Space", r"\s+").unwrap(),
//!     TokenDesc::new("Name", r"[a-zA-Z_][a-zA-Z0-9_]*").unwrap(),
//!     TokenDesc::new("Comma", r",").unwrap(),
//! ])
//! .with_filter(|id, _| id != "Space");
//!
//! // `Name (, Name)*`
//! let root = and(
//!     named("Head", token("Name")),
//!     star(and(mute(token("Comma")), named("Item", token("Name")))),
//! );
//!
//! let parser = build_grammar(GrammarConfig::new(tokens, root)).unwrap();
//! let results = parser.parse_line("a, b, c", 1).unwrap();
//! assert_eq!(results.len(), 1);
//! assert!(results[0].success);
//! ```
//!
//! # License
//! Dual-licensed under MIT or Apache-2.0, at your option.

mod ast;
pub mod demo;
mod driver;
mod error;
pub mod expr;
mod lexer;
mod token;

pub use ast::AstNode;
pub use driver::{build_grammar, GrammarConfig, ParseResult, Parser};
pub use error::{ConstructionError, LexError, ParseErrorRecord};
pub use expr::Expr;
pub use lexer::{IdentifiedToken, Log};
pub use token::{TokenDesc, TokenTable, END_OF_INPUT};

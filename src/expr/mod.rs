mod eval;

pub(crate) use eval::{eval, ParseContext};

use crate::error::ConstructionError;
use std::collections::HashSet;
use std::rc::Rc;

/// A node in the parser expression tree: one of the eight grammar operators
/// Expressions are immutable once built and are cheaply shared
/// (`Rc`) both across parses of the same grammar and across multiple parent
/// sites within one grammar.
///
/// The furthest-progress counter of the evaluator is deliberately
/// *not* a field here; see `expr::eval::ParseContext`, which keys it by node
/// identity instead, so this tree carries no mutable state at all.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Consumes one token whose id equals the given string; emits a `Leaf`.
    Token(String),
    /// Parses the left child, then the right child from the resulting position.
    And(Rc<Expr>, Rc<Expr>),
    /// Tries both children independently from the same start position.
    Or(Rc<Expr>, Rc<Expr>),
    /// Always succeeds, consumes nothing, emits no AST.
    Epsilon,
    /// Parses the child, discarding whatever AST fragments it produced.
    Mute(Rc<Expr>),
    /// Zero-or-one of the child: a zero-consumption success, then the child's results.
    Optional(Rc<Expr>),
    /// Zero-or-more of the child, accumulating AST across repetitions.
    Star(Rc<Expr>),
    /// Wraps the child's successful AST fragments in one `Structure` node.
    Named(String, Rc<Expr>),
}

/// A node identity used to key the per-parse furthest-progress map. Two
/// `Expr` values compare equal under this id iff they are the same heap
/// allocation (i.e. reached via the same `Rc`, possibly from different parent
/// sites), so a subexpression reused at several grammar sites still gets one
/// shared failure counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

pub(crate) fn node_id(expr: &Rc<Expr>) -> NodeId {
    NodeId(Rc::as_ptr(expr) as usize)
}

/// Coerces constructor arguments into a shared `Expr` node: an idiomatic,
/// explicitly-typed substitute for an untyped string-or-expression union. A
/// bare `&str`/`String` in expression position becomes `Expr::Token`.
///
/// Accepting (and returning) `Rc<Expr>` rather than `Expr` lets a grammar
/// author reuse a previously-built subexpression from several parent sites:
/// passing `&existing` clones the `Rc`, not the tree, so the reused node keeps
/// a single identity for the furthest-progress map.
pub trait IntoExpr {
    fn into_expr(self) -> Rc<Expr>;
}

impl IntoExpr for Expr {
    fn into_expr(self) -> Rc<Expr> {
        Rc::new(self)
    }
}

impl IntoExpr for Rc<Expr> {
    fn into_expr(self) -> Rc<Expr> {
        self
    }
}

impl IntoExpr for &Rc<Expr> {
    fn into_expr(self) -> Rc<Expr> {
        self.clone()
    }
}

impl IntoExpr for &str {
    fn into_expr(self) -> Rc<Expr> {
        Rc::new(Expr::Token(self.to_string()))
    }
}

impl IntoExpr for String {
    fn into_expr(self) -> Rc<Expr> {
        Rc::new(Expr::Token(self))
    }
}

fn rc_of(e: impl IntoExpr) -> Rc<Expr> {
    e.into_expr()
}

pub fn token(id: impl Into<String>) -> Expr {
    Expr::Token(id.into())
}

pub fn epsilon() -> Expr {
    Expr::Epsilon
}

pub fn and(a: impl IntoExpr, b: impl IntoExpr) -> Expr {
    Expr::And(rc_of(a), rc_of(b))
}

pub fn or(a: impl IntoExpr, b: impl IntoExpr) -> Expr {
    Expr::Or(rc_of(a), rc_of(b))
}

pub fn mute(x: impl IntoExpr) -> Expr {
    Expr::Mute(rc_of(x))
}

pub fn optional(x: impl IntoExpr) -> Expr {
    Expr::Optional(rc_of(x))
}

pub fn star(x: impl IntoExpr) -> Expr {
    Expr::Star(rc_of(x))
}

pub fn named(name: impl Into<String>, x: impl IntoExpr) -> Expr {
    Expr::Named(name.into(), rc_of(x))
}

/// Right-fold a sequence of two-or-more expressions with `and`; a sequence of
/// one is the child itself. Rejects an empty sequence at construction time,
/// per the sequence-folding convention used throughout this module.
pub fn seq(items: Vec<Expr>) -> Result<Expr, ConstructionError> {
    fold_right(items, "seq", |a, b| Expr::And(Rc::new(a), Rc::new(b)))
}

/// Alias of `seq`, read as a concatenation rather than a generic sequence.
pub fn and_all(items: Vec<Expr>) -> Result<Expr, ConstructionError> {
    seq(items)
}

/// Right-fold a sequence of two-or-more expressions with `or`; a sequence of
/// one is the child itself. Rejects an empty sequence at construction time.
pub fn alt(items: Vec<Expr>) -> Result<Expr, ConstructionError> {
    fold_right(items, "alt", |a, b| Expr::Or(Rc::new(a), Rc::new(b)))
}

fn fold_right(
    mut items: Vec<Expr>,
    what: &'static str,
    combine: impl Fn(Expr, Expr) -> Expr,
) -> Result<Expr, ConstructionError> {
    match items.len() {
        0 => Err(ConstructionError::EmptySequence(what)),
        1 => Ok(items.pop().unwrap()),
        _ => {
            let last = items.pop().unwrap();
            let folded = items.into_iter().rev().fold(last, |acc, item| {
                // rebuild left-to-right: combine(item, acc)
                combine(item, acc)
            });
            Ok(folded)
        }
    }
}

/// Walk the expression tree, collecting every distinct token id referenced by
/// a `Token` node, for grammar validation.
pub(crate) fn collect_token_ids(expr: &Expr, out: &mut HashSet<String>) {
    match expr {
        Expr::Token(id) => {
            out.insert(id.clone());
        }
        Expr::And(a, b) | Expr::Or(a, b) => {
            collect_token_ids(a, out);
            collect_token_ids(b, out);
        }
        Expr::Epsilon => {}
        Expr::Mute(x) | Expr::Optional(x) | Expr::Star(x) | Expr::Named(_, x) => {
            collect_token_ids(x, out);
        }
    }
}

use super::{node_id, Expr, NodeId};
use crate::ast::AstNode;
use crate::error::ParseErrorRecord;
use crate::lexer::{IdentifiedToken, Log};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A successful candidate: how far the expression advanced and the AST
/// fragments it produced consuming tokens `[start, new_pos)`.
#[derive(Debug, Clone)]
pub(crate) struct Success {
    pub new_pos: usize,
    pub ast: Vec<AstNode>,
}

/// A failed candidate: how far the attempt advanced before failing, and the
/// diagnostic to report if this turns out to be a furthest-progress failure.
#[derive(Debug, Clone)]
pub(crate) struct Failure {
    pub new_pos: usize,
    pub error: ParseErrorRecord,
}

pub(crate) type Candidate = Result<Success, Failure>;

/// Per-parse evaluation state: the token stream being parsed and the
/// furthest-progress map. Keying the map by `NodeId` instead
/// of storing a counter on `Expr` itself means one grammar's `Rc`-shared tree
/// is never mutated by parsing: a fresh `ParseContext` is built for every
/// top-level `parse_line` call, so repeated or concurrent parses of the same
/// grammar never see each other's diagnostics.
pub(crate) struct ParseContext<'t> {
    tokens: &'t [IdentifiedToken],
    eof: IdentifiedToken,
    furthest: RefCell<HashMap<NodeId, isize>>,
    log: Log<&'static str>,
}

impl<'t> ParseContext<'t> {
    pub(crate) fn new(tokens: &'t [IdentifiedToken], eof: IdentifiedToken, log: Log<&'static str>) -> Self {
        Self {
            tokens,
            eof,
            furthest: RefCell::new(HashMap::new()),
            log,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tokens.len()
    }

    fn token_or_eof(&self, pos: usize) -> IdentifiedToken {
        match self.tokens.get(pos) {
            Some(t) => t.clone(),
            None => self.eof.clone(),
        }
    }

    /// `true` iff a failure at `pos` is still worth surfacing for node `id`:
    /// strictly-worse (smaller) positions than the best already seen for this
    /// node are stale and suppressed; the counter only ever moves forward.
    fn should_yield_failure(&self, id: NodeId, pos: usize) -> bool {
        let mut map = self.furthest.borrow_mut();
        let counter = map.entry(id).or_insert(-1);
        if (pos as isize) < *counter {
            false
        } else {
            *counter = pos as isize;
            true
        }
    }
}

/// Evaluate `expr` at `pos`, producing the lazy candidate sequence described
/// here. Every node, regardless of variant, filters the failures it
/// is about to yield (whether generated locally, as `Token` does, or passed
/// through from a child, as every other variant does) through its own
/// furthest-progress counter; this is what "each expression node owns a
/// counter" means in practice, and it is why And's right-branch failures are
/// filtered by the And node itself rather than passed through raw.
pub(crate) fn eval<'t>(
    expr: &'t Rc<Expr>,
    ctx: &'t ParseContext<'t>,
    pos: usize,
) -> Box<dyn Iterator<Item = Candidate> + 't> {
    let id = node_id(expr);
    let raw = eval_raw(expr, ctx, pos);
    Box::new(raw.filter_map(move |c| match c {
        Ok(s) => Some(Ok(s)),
        Err(f) => {
            if ctx.should_yield_failure(id, f.new_pos) {
                Some(Err(f))
            } else {
                None
            }
        }
    }))
}

fn eval_raw<'t>(
    expr: &'t Rc<Expr>,
    ctx: &'t ParseContext<'t>,
    pos: usize,
) -> Box<dyn Iterator<Item = Candidate> + 't> {
    match expr.as_ref() {
        Expr::Token(id_str) => {
            if pos < ctx.len() && ctx.tokens[pos].id == *id_str {
                #[cfg(debug_assertions)]
                if ctx.log.order() >= Log::Success(()).order() {
                    println!("[{}] token '{}' matched at position {}", ctx.log, id_str, pos);
                }
                Box::new(std::iter::once(Ok(Success {
                    new_pos: pos + 1,
                    ast: vec![AstNode::Leaf(ctx.tokens[pos].clone())],
                })))
            } else {
                #[cfg(debug_assertions)]
                if ctx.log.order() >= Log::Default(()).order() {
                    println!("[{}] token '{}' expected but not found at position {}", ctx.log, id_str, pos);
                }
                let actual = ctx.token_or_eof(pos);
                Box::new(std::iter::once(Err(Failure {
                    new_pos: pos,
                    error: ParseErrorRecord {
                        expected: id_str.clone(),
                        actual,
                    },
                })))
            }
        }

        Expr::Epsilon => Box::new(std::iter::once(Ok(Success {
            new_pos: pos,
            ast: Vec::new(),
        }))),

        Expr::And(a, b) => Box::new(eval(a, ctx, pos).flat_map(move |c| {
            let next: Box<dyn Iterator<Item = Candidate>> = match c {
                Ok(left) => {
                    let left_ast = left.ast;
                    Box::new(eval(b, ctx, left.new_pos).map(move |c2| match c2 {
                        Ok(right) => {
                            let mut ast = left_ast.clone();
                            ast.extend(right.ast);
                            Ok(Success {
                                new_pos: right.new_pos,
                                ast,
                            })
                        }
                        Err(fail) => Err(fail),
                    }))
                }
                Err(fail) => Box::new(std::iter::once(Err(fail))),
            };
            next
        })),

        Expr::Or(a, b) => Box::new(eval(a, ctx, pos).chain(eval(b, ctx, pos))),

        Expr::Mute(x) => Box::new(eval(x, ctx, pos).map(|c| match c {
            Ok(s) => Ok(Success {
                new_pos: s.new_pos,
                ast: Vec::new(),
            }),
            Err(f) => Err(f),
        })),

        Expr::Optional(x) => Box::new(
            std::iter::once(Ok(Success {
                new_pos: pos,
                ast: Vec::new(),
            }))
            .chain(eval(x, ctx, pos)),
        ),

        Expr::Star(x) => star_from(x, ctx, pos, Vec::new()),

        Expr::Named(name, x) => {
            let name = name.clone();
            Box::new(eval(x, ctx, pos).map(move |c| match c {
                Ok(s) => Ok(Success {
                    new_pos: s.new_pos,
                    ast: vec![AstNode::structure(name.clone(), s.ast)],
                }),
                Err(f) => Err(f),
            }))
        }
    }
}

/// Star's candidate sequence always starts with the zero-repetition success
/// before any longer repetition (a deliberately non-greedy-looking
/// behavior), accumulating AST across iterations. A repetition that makes no
/// progress is not retried, since that would recurse forever without ever
/// consuming a token.
fn star_from<'t>(
    x: &'t Rc<Expr>,
    ctx: &'t ParseContext<'t>,
    pos: usize,
    acc: Vec<AstNode>,
) -> Box<dyn Iterator<Item = Candidate> + 't> {
    let zero = std::iter::once(Ok(Success {
        new_pos: pos,
        ast: acc.clone(),
    }));
    let more = eval(x, ctx, pos).flat_map(move |c| {
        let acc = acc.clone();
        let next: Box<dyn Iterator<Item = Candidate>> = match c {
            Ok(s) if s.new_pos == pos => {
                // Zero-length repetition: yield once and stop, don't loop forever.
                let mut ast = acc;
                ast.extend(s.ast);
                Box::new(std::iter::once(Ok(Success { new_pos: pos, ast })))
            }
            Ok(s) => {
                let mut ast = acc;
                ast.extend(s.ast);
                star_from(x, ctx, s.new_pos, ast)
            }
            Err(fail) => Box::new(std::iter::once(Err(fail))),
        };
        next
    });
    Box::new(zero.chain(more))
}

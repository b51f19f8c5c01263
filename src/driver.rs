use crate::ast::AstNode;
use crate::error::{ConstructionError, LexError, ParseErrorRecord};
use crate::expr::{collect_token_ids, eval, Expr, ParseContext};
use crate::lexer::{IdentifiedToken, Lexer, Log};
use crate::token::TokenTable;
use once_cell::unsync::OnceCell;
use std::collections::HashSet;
use std::rc::Rc;

/// One candidate handed back from a parse: either the single total-coverage
/// success, or one of the (possibly several, tied) furthest-progress
/// failures.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub success: bool,
    pub ast: Vec<AstNode>,
    pub new_pos: usize,
    pub error: Option<ParseErrorRecord>,
}

impl ParseResult {
    fn success(new_pos: usize, ast: Vec<AstNode>) -> Self {
        Self {
            success: true,
            ast,
            new_pos,
            error: None,
        }
    }

    fn failure(new_pos: usize, error: ParseErrorRecord) -> Self {
        Self {
            success: false,
            ast: Vec::new(),
            new_pos,
            error: Some(error),
        }
    }
}

/// The embedder-facing configuration bundle: the token table (already
/// carrying its optional filter) and the grammar root. Kept as its own
/// struct, rather than inlined into `build_grammar`'s argument list, so
/// callers can assemble and pass it around before committing to a parser.
pub struct GrammarConfig {
    pub tokens: TokenTable,
    pub root: Expr,
}

impl GrammarConfig {
    pub fn new(tokens: TokenTable, root: Expr) -> Self {
        Self { tokens, root }
    }
}

/// A validated grammar: a token table plus an expression tree known to
/// reference only declared token ids. Immutable once built;
/// `parse_line` may be called any number of times, including repeatedly on
/// the same or different lines, without the grammar accumulating state
/// between calls (the furthest-progress map lives in a fresh `ParseContext`
/// per call; see `expr::eval`).
pub struct Parser {
    tokens: TokenTable,
    root: Rc<Expr>,
    log: OnceCell<Log<&'static str>>,
}

/// Build and validate a grammar. Fails if the root expression references any
/// token id absent from the table, or if n-ary `seq`/`alt` construction
/// upstream already failed and propagated a `ConstructionError`.
pub fn build_grammar(config: GrammarConfig) -> Result<Parser, ConstructionError> {
    Parser::new(config.tokens, config.root)
}

impl Parser {
    pub fn new(tokens: TokenTable, root: Expr) -> Result<Self, ConstructionError> {
        let mut referenced = HashSet::new();
        collect_token_ids(&root, &mut referenced);
        let mut unknown: Vec<String> = referenced
            .into_iter()
            .filter(|id| !tokens.contains(id))
            .collect();
        if !unknown.is_empty() {
            unknown.sort();
            return Err(ConstructionError::UnknownTokens(unknown));
        }
        Ok(Self {
            tokens,
            root: Rc::new(root),
            log: OnceCell::new(),
        })
    }

    /// Assign a log label once; a second call is a no-op error.
    pub fn set_log(&self, log: Log<&'static str>) -> Result<(), Log<&'static str>> {
        self.log.set(log)
    }

    /// Lex then parse one line, returning either a single success or every
    /// furthest-progress failure. Lexing failures are fatal to the call and
    /// returned as `Err`, distinct from the `Vec<ParseResult>` data describing
    /// an unsuccessful-but-well-formed-tokens parse.
    pub fn parse_line(&self, line: &str, line_number: usize) -> Result<Vec<ParseResult>, LexError> {
        let lexer = Lexer::new(&self.tokens);
        let _ = lexer.set_log(self.log.get().copied().unwrap_or(Log::None));
        let tokens = lexer.tokenize(line, line_number)?;

        let eof = match tokens.last() {
            Some(last) => IdentifiedToken::end_of_input(last.line, last.column),
            None => IdentifiedToken::end_of_input(line_number, 1),
        };

        let ctx = ParseContext::new(&tokens, eof, self.log.get().copied().unwrap_or(Log::None));
        let mut failures = Vec::new();

        for candidate in eval(&self.root, &ctx, 0) {
            match candidate {
                Ok(success) if success.new_pos == ctx.len() => {
                    return Ok(vec![ParseResult::success(success.new_pos, success.ast)]);
                }
                Ok(_) => {
                    // A success that does not cover the whole input is not a
                    // candidate winner and contributes nothing to
                    // furthest-progress failure tracking either.
                }
                Err(failure) => failures.push(failure),
            }
        }

        let max_pos = failures.iter().map(|f| f.new_pos).max().unwrap_or(0);
        let results = failures
            .into_iter()
            .filter(|f| f.new_pos == max_pos)
            .map(|f| ParseResult::failure(f.new_pos, f.error))
            .collect();
        Ok(results)
    }
}

use crate::error::LexError;
use crate::token::{TokenTable, END_OF_INPUT};
use once_cell::unsync::OnceCell;
use std::fmt::{Debug, Display, Formatter};

/// Debugging verbosity for lexer tracing, printed directly rather than routed
/// through an external logging crate. Only active in debug builds; release
/// builds compile the tracing calls away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Log<T> {
    None,
    Default(T),
    Success(T),
    Verbose(T),
}

impl<T> Log<T> {
    fn order(&self) -> u8 {
        match self {
            Log::None => 0,
            Log::Default(_) => 1,
            Log::Success(_) => 2,
            Log::Verbose(_) => 3,
        }
    }
}

impl<T: Display> Display for Log<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Log::None => Ok(()),
            Log::Default(s) | Log::Success(s) | Log::Verbose(s) => write!(f, "{}", s),
        }
    }
}

/// One lexed unit: its token id, matched text, and source coordinates.
///
/// `line` is whatever the caller supplied to `Lexer::tokenize`; `column` is
/// 1-based and computed from the cumulative length of prior matches within the
/// line, so it stays meaningful even after filtering: columns are fixed before
/// the filter predicate runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifiedToken {
    pub id: String,
    pub content: String,
    pub line: usize,
    pub column: usize,
}

impl IdentifiedToken {
    /// Build the synthetic end-of-input sentinel, positioned at the coordinates
    /// just past the last real token so diagnostics remain meaningful.
    pub fn end_of_input(line: usize, column: usize) -> Self {
        Self {
            id: END_OF_INPUT.to_string(),
            content: "EOF".to_string(),
            line,
            column,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.id == END_OF_INPUT
    }
}

/// Scans a line into a token vector by repeatedly trying each `TokenTable` entry
/// in declaration order and taking the first one that matches at the cursor.
pub struct Lexer<'t> {
    table: &'t TokenTable,
    log: OnceCell<Log<&'static str>>,
}

impl<'t> Lexer<'t> {
    pub fn new(table: &'t TokenTable) -> Self {
        Self {
            table,
            log: OnceCell::new(),
        }
    }

    /// Assign a log label once; a second call returns the rejected value.
    pub fn set_log(&self, log: Log<&'static str>) -> Result<(), Log<&'static str>> {
        self.log.set(log)
    }

    fn log_level(&self) -> Log<&'static str> {
        self.log.get().copied().unwrap_or(Log::None)
    }

    /// Tokenize `line`, returning the filtered stream in original-source column
    /// order. Fails if some remaining input matches no descriptor, or if a
    /// descriptor matches zero-length (which would never advance the cursor).
    pub fn tokenize(&self, line: &str, line_number: usize) -> Result<Vec<IdentifiedToken>, LexError> {
        let bytes = line.as_bytes();
        let mut byte_pos = 0usize;
        let mut column = 1usize;
        let mut all_tokens = Vec::new();

        #[cfg(debug_assertions)]
        if self.log_level().order() >= Log::Verbose(()).order() {
            println!("[{}] begin tokenizing line {}: {:?}", self.log_level(), line_number, line);
        }

        while byte_pos < bytes.len() {
            let remaining = &bytes[byte_pos..];
            let hit = self
                .table
                .descriptors()
                .iter()
                .find_map(|d| d.match_at_start(remaining).map(|len| (d, len)));

            match hit {
                Some((desc, 0)) => {
                    return Err(LexError::new(
                        line_number,
                        column,
                        format!(
                            "token '{}' matched an empty string at column {}",
                            desc.id, column
                        ),
                    ));
                }
                Some((desc, len)) => {
                    let content = std::str::from_utf8(&remaining[..len])
                        .expect("regex matched on a char boundary of valid utf-8 input")
                        .to_string();
                    let char_len = content.chars().count();

                    #[cfg(debug_assertions)]
                    if self.log_level().order() >= Log::Success(()).order() {
                        println!(
                            "[{}] matched '{}' -> {:?} at {}:{}",
                            self.log_level(), desc.id, content, line_number, column
                        );
                    }

                    all_tokens.push(IdentifiedToken {
                        id: desc.id.clone(),
                        content,
                        line: line_number,
                        column,
                    });
                    byte_pos += len;
                    column += char_len;
                }
                None => {
                    #[cfg(debug_assertions)]
                    if self.log_level().order() >= Log::Default(()).order() {
                        println!(
                            "[{}] lex failure at {}:{}",
                            self.log_level(), line_number, column
                        );
                    }
                    return Err(LexError::new(
                        line_number,
                        column,
                        format!(
                            "no token matches remaining input starting at column {}: {:?}",
                            column,
                            std::str::from_utf8(remaining).unwrap_or("<invalid utf-8>")
                        ),
                    ));
                }
            }
        }

        let kept: Vec<IdentifiedToken> = all_tokens
            .into_iter()
            .filter(|t| self.table.keep(&t.id, &t.content))
            .collect();

        #[cfg(debug_assertions)]
        if self.log_level().order() >= Log::Success(()).order() {
            println!(
                "[{}] tokenization success for line {}: {} token(s) kept",
                self.log_level(),
                line_number,
                kept.len()
            );
        }

        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenDesc;

    fn table(descs: Vec<(&str, &str)>) -> TokenTable {
        TokenTable::new(
            descs
                .into_iter()
                .map(|(id, pattern)| TokenDesc::new(id, pattern).unwrap())
                .collect(),
        )
    }

    #[test]
    fn positions_cover_the_whole_input_before_filtering() {
        let table = table(vec![("Word", r"[a-z]+"), ("Space", r" +")]);
        let lexer = Lexer::new(&table);
        let tokens = lexer.tokenize("foo bar baz", 1).unwrap();
        let covered: usize = tokens.iter().map(|t| t.content.chars().count()).sum();
        assert_eq!(covered, "foo bar baz".chars().count());
    }

    #[test]
    fn first_declared_descriptor_wins_on_an_overlapping_prefix() {
        let keyword_first = table(vec![("If", "if"), ("Name", r"[a-z]+")]);
        let tokens = Lexer::new(&keyword_first).tokenize("if", 1).unwrap();
        assert_eq!(tokens[0].id, "If");

        let identifier_first = table(vec![("Name", r"[a-z]+"), ("If", "if")]);
        let tokens = Lexer::new(&identifier_first).tokenize("if", 1).unwrap();
        assert_eq!(tokens[0].id, "Name");
    }

    #[test]
    fn filtering_does_not_renumber_the_surviving_columns() {
        let table = table(vec![("Word", r"[a-z]+"), ("Space", r" +")]).with_filter(|id, _| id != "Space");
        let tokens = Lexer::new(&table).tokenize("foo bar", 1).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].column, 1);
        assert_eq!(tokens[1].column, 5);
    }
}

use crate::error::ConstructionError;
use regex::bytes::Regex;

/// A single entry of the token table: an opaque id and the regex that recognizes it.
///
/// The regex is matched against the remaining input starting at the cursor; a
/// match only counts if it starts at offset 0 of that remaining slice, so the
/// anchoring described in the token table's documentation is enforced by the
/// engine rather than by requiring a leading `^` in the pattern.
pub struct TokenDesc {
    pub id: String,
    pattern: Regex,
}

impl TokenDesc {
    /// Build a token descriptor, rejecting patterns that cannot compile or that
    /// match the empty string (a zero-length match would loop the lexer forever).
    pub fn new(id: impl Into<String>, pattern: &str) -> Result<Self, ConstructionError> {
        let id = id.into();
        let regexp = Regex::new(pattern).map_err(|err| ConstructionError::BadRegex {
            id: id.clone(),
            message: err.to_string(),
        })?;
        if regexp.is_match(b"") {
            return Err(ConstructionError::NullableRegex { id });
        }
        Ok(Self {
            id,
            pattern: regexp,
        })
    }

    /// Try to match at the start of `text`. Returns the matched byte length.
    pub(crate) fn match_at_start(&self, text: &[u8]) -> Option<usize> {
        let m = self.pattern.find(text)?;
        if m.start() == 0 {
            Some(m.end())
        } else {
            None
        }
    }
}

/// The ordered, first-match-wins collection of token descriptors the lexer scans
/// against, plus an optional post-lex filter predicate.
///
/// Order is semantically significant: the embedder is responsible for placing
/// longer or more specific patterns (keywords) before shorter, more general ones
/// (identifiers) that would otherwise shadow them.
pub struct TokenTable {
    descriptors: Vec<TokenDesc>,
    filter: Option<Box<dyn Fn(&str, &str) -> bool>>,
}

/// Id of the synthetic token the driver manufactures when the grammar demands a
/// token past the end of input.
pub const END_OF_INPUT: &str = "END-OF-INPUT";

impl TokenTable {
    pub fn new(descriptors: Vec<TokenDesc>) -> Self {
        Self {
            descriptors,
            filter: None,
        }
    }

    /// Attach a filter predicate. It is invoked as `filter(id, content)` for each
    /// lexed token, after column tracking; tokens for which it returns `false`
    /// are dropped from the stream the grammar sees, but their columns were
    /// already fixed against the original input.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str, &str) -> bool + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    pub(crate) fn descriptors(&self) -> &[TokenDesc] {
        &self.descriptors
    }

    pub(crate) fn keep(&self, id: &str, content: &str) -> bool {
        match &self.filter {
            Some(f) => f(id, content),
            None => true,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.descriptors.iter().any(|d| d.id == id)
    }
}

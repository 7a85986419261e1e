use lexer::SpannedToken;
use shared_context::Span;
use shared_context::source_map::SourceMap;

/// A syntax error, rendered against the source map at the point it's
/// raised so the parser never has to keep the map alive past the call site.
#[derive(Debug)]
pub struct ParseErr {
    rendered: String,
}

impl ParseErr {
    pub fn new(message: impl Into<String>, span: Span, source_map: &SourceMap) -> Self {
        Self {
            rendered: source_map.format_message(&message.into(), span),
        }
    }

    /// Raised when `expected` was required but `found` was seen instead.
    pub fn expected(expected: &str, found: &SpannedToken, source_map: &SourceMap) -> Self {
        let message = if found.get_token() == lexer::Token::Eof {
            format!("expected {expected}, found end of input")
        } else {
            format!("expected {expected}, found '{}'", found.get_lexeme())
        };
        Self::new(message, found.get_span(), source_map)
    }
}

impl std::fmt::Display for ParseErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rendered)
    }
}

impl std::error::Error for ParseErr {}

//! Tokenizer: turns a source string into a lazy, spanned token stream.
//!
//! The parser needs up to two tokens of lookahead to tell a labeled
//! statement (`IDENT ':'`) apart from a bare expression statement, so
//! [`Lexer`] buffers a small queue rather than exposing logos' iterator
//! directly.

pub mod token;

pub use token::Token;

use logos::Logos;
use shared_context::{Location, Span};
use std::collections::VecDeque;
use std::fmt;

/// A token together with its matched text and the span it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpannedToken<'source> {
    pub token: Token,
    pub lexeme: &'source str,
    pub span: Span,
}

impl<'source> SpannedToken<'source> {
    pub fn get_token(&self) -> Token {
        self.token
    }

    pub fn get_span(&self) -> Span {
        self.span
    }

    pub fn get_lexeme(&self) -> &'source str {
        self.lexeme
    }
}

impl<'source> Default for SpannedToken<'source> {
    fn default() -> Self {
        Self {
            token: Token::Eof,
            lexeme: "",
            span: Span::default(),
        }
    }
}

/// A lexical error: an invalid numeric literal, or a byte that matches no
/// token rule at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    InvalidNumber { lexeme: String, span: Span },
    UnknownByte { lexeme: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::InvalidNumber { span, .. } => *span,
            LexError::UnknownByte { span, .. } => *span,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::InvalidNumber { lexeme, .. } => {
                write!(f, "invalid numeric constant '{lexeme}'")
            }
            LexError::UnknownByte { lexeme, .. } => {
                write!(f, "unrecognized character '{lexeme}'")
            }
        }
    }
}

impl std::error::Error for LexError {}

pub struct Lexer<'source> {
    inner: logos::Lexer<'source, Token>,
    source: &'source str,
    /// Byte offset up to which `line`/`column` have already been accounted
    /// for; advanced past each match (skipped or not) as it is scanned.
    scanned_up_to: usize,
    line: u32,
    column: u32,
    /// Lookahead buffer: `peek`/`peek_two` fill it, `next` drains it first.
    buffered: VecDeque<Result<SpannedToken<'source>, LexError>>,
    /// Set once the underlying stream is exhausted, so every later `next`
    /// keeps returning a fresh `Eof` token rather than re-polling logos.
    exhausted: bool,
    eof_loc: Location,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            inner: Token::lexer(source),
            source,
            scanned_up_to: 0,
            line: 1,
            column: 1,
            buffered: VecDeque::new(),
            exhausted: false,
            eof_loc: Location::new(1, 1),
        }
    }

    pub fn get_source_code(&self) -> &'source str {
        self.source
    }

    /// Advances `line`/`column` over `self.source[scanned_up_to..end]` and
    /// returns the location at `end`.
    fn advance_to(&mut self, end: usize) -> Location {
        for ch in self.source[self.scanned_up_to..end].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.scanned_up_to = end;
        Location::new(self.line, self.column)
    }

    /// Pulls the next real token from logos (skip rules are filtered out
    /// internally by logos itself and never reach this loop), tracking
    /// source position across both skipped and real text.
    fn pull(&mut self) -> Result<SpannedToken<'source>, LexError> {
        let Some(result) = self.inner.next() else {
            self.exhausted = true;
            let loc = self.advance_to(self.source.len());
            self.eof_loc = loc;
            return Ok(SpannedToken {
                token: Token::Eof,
                lexeme: "",
                span: Span::point(loc),
            });
        };

        let range = self.inner.span();
        let lexeme = self.inner.slice();
        let start_loc = self.advance_to(range.start);
        let end_loc = self.advance_to(range.end);
        let span = Span::new(range.start, range.end, start_loc, end_loc);

        let token = match result {
            Ok(token) => token,
            Err(()) => Token::UnknownByte,
        };

        match token {
            Token::InvalidNumber => Err(LexError::InvalidNumber {
                lexeme: lexeme.to_string(),
                span,
            }),
            Token::UnknownByte => Err(LexError::UnknownByte {
                lexeme: lexeme.to_string(),
                span,
            }),
            token => Ok(SpannedToken { token, lexeme, span }),
        }
    }

    fn fill(&mut self, n: usize) {
        while self.buffered.len() < n {
            if self.exhausted {
                self.buffered.push_back(Ok(SpannedToken {
                    token: Token::Eof,
                    lexeme: "",
                    span: Span::point(self.eof_loc),
                }));
                continue;
            }
            let result = self.pull();
            self.buffered.push_back(result);
        }
    }

    /// Consumes and returns the next token (or lexical error). Past EOF,
    /// this keeps yielding a fresh `Eof` token forever.
    pub fn next(&mut self) -> Result<SpannedToken<'source>, LexError> {
        self.fill(1);
        self.buffered.pop_front().unwrap()
    }

    /// Looks at the next token without consuming it.
    pub fn peek(&mut self) -> Result<SpannedToken<'source>, LexError> {
        self.fill(1);
        self.buffered[0].clone()
    }

    /// Looks at the token after next, without consuming either.
    pub fn peek_two(&mut self) -> Result<SpannedToken<'source>, LexError> {
        self.fill(2);
        self.buffered[1].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            match lexer.next() {
                Ok(st) if st.token == Token::Eof => break,
                Ok(st) => out.push(st.token),
                Err(e) => panic!("unexpected lex error: {e}"),
            }
        }
        out
    }

    #[test]
    fn classifies_keywords_and_punctuation() {
        assert_eq!(
            tokens("int main(void) { return 2; }"),
            vec![
                Token::Int,
                Token::Identifier,
                Token::LeftParenthesis,
                Token::Void,
                Token::RightParenthesis,
                Token::LeftCurlyBracket,
                Token::Return,
                Token::ConstantInt,
                Token::Semicolon,
                Token::RightCurlyBracket,
            ]
        );
    }

    #[test]
    fn distinguishes_compound_operators_from_their_prefixes() {
        assert_eq!(
            tokens("a <<= b; a << b; a < b; a <= b;"),
            vec![
                Token::Identifier,
                Token::ShlAssign,
                Token::Identifier,
                Token::Semicolon,
                Token::Identifier,
                Token::ShiftLeft,
                Token::Identifier,
                Token::Semicolon,
                Token::Identifier,
                Token::LessThan,
                Token::Identifier,
                Token::Semicolon,
                Token::Identifier,
                Token::LessThanOrEq,
                Token::Identifier,
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn skips_line_and_block_comments() {
        assert_eq!(
            tokens("int x; // trailing\n/* block\n spanning */ int y;"),
            vec![
                Token::Int,
                Token::Identifier,
                Token::Semicolon,
                Token::Int,
                Token::Identifier,
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn reports_digit_then_letter_as_invalid_number() {
        let mut lexer = Lexer::new("9main");
        match lexer.next() {
            Err(LexError::InvalidNumber { lexeme, .. }) => assert_eq!(lexeme, "9main"),
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn eof_repeats_forever() {
        let mut lexer = Lexer::new("int");
        assert_eq!(lexer.next().unwrap().token, Token::Int);
        assert_eq!(lexer.next().unwrap().token, Token::Eof);
        assert_eq!(lexer.next().unwrap().token, Token::Eof);
        assert_eq!(lexer.peek().unwrap().token, Token::Eof);
    }

    #[test]
    fn peek_two_distinguishes_label_from_expression_statement() {
        // `loop: ;` -> label; `loop ;` -> bare identifier expression statement.
        let mut lexer = Lexer::new("loop: ;");
        assert_eq!(lexer.peek().unwrap().token, Token::Identifier);
        assert_eq!(lexer.peek_two().unwrap().token, Token::Colon);

        let mut lexer = Lexer::new("loop ;");
        assert_eq!(lexer.peek().unwrap().token, Token::Identifier);
        assert_eq!(lexer.peek_two().unwrap().token, Token::Semicolon);
    }

    #[test]
    fn tracks_line_and_column_across_newlines() {
        let mut lexer = Lexer::new("int x;\nint y;");
        let first = lexer.next().unwrap();
        assert_eq!(first.span.start_loc, Location::new(1, 1));
        lexer.next().unwrap(); // x
        lexer.next().unwrap(); // ;
        let second_int = lexer.next().unwrap();
        assert_eq!(second_int.token, Token::Int);
        assert_eq!(second_int.span.start_loc, Location::new(2, 1));
    }
}

use logos::Logos;
use std::fmt;

#[derive(Debug, PartialEq, Eq, Logos, Clone, Copy)]
pub enum Token {
    // Identifiers and literals
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", priority = 1)]
    Identifier,
    #[regex(r"[0-9]+", priority = 2)]
    ConstantInt,
    // digits immediately followed by a letter: a lexical error, not an
    // identifier nor a constant.
    #[regex(r"[0-9]+[a-zA-Z_][a-zA-Z0-9_]*")]
    InvalidNumber,

    // Keywords
    #[token("return")]
    Return,
    #[token("int")]
    Int,
    #[token("long")]
    Long,
    #[token("void")]
    Void,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("goto")]
    Goto,
    #[token("static")]
    Static,
    #[token("extern")]
    Extern,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("for")]
    For,
    #[token("switch")]
    Switch,
    #[token("case")]
    Case,
    #[token("default")]
    Default,

    // Punctuation
    #[token("(")]
    LeftParenthesis,
    #[token(")")]
    RightParenthesis,
    #[token("{")]
    LeftCurlyBracket,
    #[token("}")]
    RightCurlyBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("?")]
    QuestionMark,

    // Compound assignment (listed explicitly so logos' longest-match wins
    // over the bare operator and over plain `=`)
    #[token("+=")]
    AddAssign,
    #[token("-=")]
    SubAssign,
    #[token("*=")]
    MulAssign,
    #[token("/=")]
    DivAssign,
    #[token("%=")]
    ModAssign,
    #[token("&=")]
    AndAssign,
    #[token("|=")]
    OrAssign,
    #[token("^=")]
    XorAssign,
    #[token("<<=")]
    ShlAssign,
    #[token(">>=")]
    ShrAssign,

    // Compound operators
    #[token("++")]
    Inc,
    #[token("--")]
    Dec,
    #[token("<<")]
    ShiftLeft,
    #[token(">>")]
    ShiftRight,
    #[token("<=")]
    LessThanOrEq,
    #[token(">=")]
    GreaterThanOrEq,
    #[token("==")]
    Equal,
    #[token("!=")]
    NotEqual,
    #[token("&&")]
    LogicalAnd,
    #[token("||")]
    LogicalOr,

    // Unary/binary operator symbols
    #[token("+")]
    Add,
    #[token("-")]
    Neg,
    #[token("*")]
    Mul,
    #[token("/")]
    Div,
    #[token("%")]
    Mod,
    #[token("~")]
    Not,
    #[token("&")]
    BitAnd,
    #[token("|")]
    BitOr,
    #[token("^")]
    BitXor,
    #[token("!")]
    LogicalNot,
    #[token("=")]
    Assignment,
    #[token("<")]
    LessThan,
    #[token(">")]
    GreaterThan,

    // Whitespace and comments are skipped; the lexer recovers line/column
    // positions afterwards by scanning the consumed byte range itself,
    // rather than threading state through logos callbacks.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    #[regex(r"//[^\n]*", logos::skip)]
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", logos::skip)]
    Skip,

    /// Sentinel for bytes logos cannot match to any rule above.
    UnknownByte,

    /// Synthesized by [`crate::Lexer`], never matched by logos itself: the
    /// token returned once the underlying character stream is exhausted,
    /// and again for every subsequent call.
    Eof,
}

impl Token {
    /// Keywords that may open a declaration's specifier list: the two type
    /// keywords plus the two storage-class keywords.
    pub fn is_specifier(&self) -> bool {
        matches!(
            self,
            Token::Int | Token::Long | Token::Static | Token::Extern
        )
    }

    pub fn is_type(&self) -> bool {
        matches!(self, Token::Int | Token::Long)
    }

    pub fn is_unary(&self) -> bool {
        matches!(self, Token::Neg | Token::Not | Token::LogicalNot)
    }

    /// Whether this token can continue a binary/assignment/conditional
    /// expression at the precedence-climbing call site (`parse_expression`).
    pub fn is_binary(&self) -> bool {
        self.precedence() > 0
    }

    /// Operator precedence, lowest to highest.
    /// Non-operators return 0 (and so never satisfy `is_binary`).
    pub fn precedence(&self) -> usize {
        match self {
            Token::Assignment
            | Token::AddAssign
            | Token::SubAssign
            | Token::MulAssign
            | Token::DivAssign
            | Token::ModAssign
            | Token::AndAssign
            | Token::OrAssign
            | Token::XorAssign
            | Token::ShlAssign
            | Token::ShrAssign => 1,
            Token::QuestionMark => 3,
            Token::LogicalOr => 5,
            Token::LogicalAnd => 10,
            Token::BitOr => 15,
            Token::BitXor => 18,
            Token::BitAnd => 20,
            Token::Equal | Token::NotEqual => 30,
            Token::LessThan | Token::LessThanOrEq | Token::GreaterThan | Token::GreaterThanOrEq => {
                35
            }
            Token::ShiftLeft | Token::ShiftRight => 40,
            Token::Add | Token::Neg => 45,
            Token::Mul | Token::Div | Token::Mod => 50,
            _ => 0,
        }
    }

    /// Is this token one of the compound-assignment operators (`+=`, …)?
    pub fn is_compound_assign(&self) -> bool {
        matches!(
            self,
            Token::AddAssign
                | Token::SubAssign
                | Token::MulAssign
                | Token::DivAssign
                | Token::ModAssign
                | Token::AndAssign
                | Token::OrAssign
                | Token::XorAssign
                | Token::ShlAssign
                | Token::ShrAssign
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Token::Identifier => "identifier",
            Token::ConstantInt => "integer constant",
            Token::InvalidNumber => "invalid number",
            Token::Return => "return",
            Token::Int => "int",
            Token::Long => "long",
            Token::Void => "void",
            Token::If => "if",
            Token::Else => "else",
            Token::Goto => "goto",
            Token::Static => "static",
            Token::Extern => "extern",
            Token::Break => "break",
            Token::Continue => "continue",
            Token::While => "while",
            Token::Do => "do",
            Token::For => "for",
            Token::Switch => "switch",
            Token::Case => "case",
            Token::Default => "default",
            Token::LeftParenthesis => "(",
            Token::RightParenthesis => ")",
            Token::LeftCurlyBracket => "{",
            Token::RightCurlyBracket => "}",
            Token::Semicolon => ";",
            Token::Comma => ",",
            Token::Colon => ":",
            Token::QuestionMark => "?",
            Token::AddAssign => "+=",
            Token::SubAssign => "-=",
            Token::MulAssign => "*=",
            Token::DivAssign => "/=",
            Token::ModAssign => "%=",
            Token::AndAssign => "&=",
            Token::OrAssign => "|=",
            Token::XorAssign => "^=",
            Token::ShlAssign => "<<=",
            Token::ShrAssign => ">>=",
            Token::Inc => "++",
            Token::Dec => "--",
            Token::ShiftLeft => "<<",
            Token::ShiftRight => ">>",
            Token::LessThanOrEq => "<=",
            Token::GreaterThanOrEq => ">=",
            Token::Equal => "==",
            Token::NotEqual => "!=",
            Token::LogicalAnd => "&&",
            Token::LogicalOr => "||",
            Token::Add => "+",
            Token::Neg => "-",
            Token::Mul => "*",
            Token::Div => "/",
            Token::Mod => "%",
            Token::Not => "~",
            Token::BitAnd => "&",
            Token::BitOr => "|",
            Token::BitXor => "^",
            Token::LogicalNot => "!",
            Token::Assignment => "=",
            Token::LessThan => "<",
            Token::GreaterThan => ">",
            Token::Skip => "<skip>",
            Token::UnknownByte => "<unknown>",
            Token::Eof => "end of file",
        };
        write!(f, "{s}")
    }
}

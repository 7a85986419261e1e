use std::fmt;

/// The top-level error every stage funnels into, tagged with which kind of
/// failure produced it so `main` can print the `"<kind> error: ..."`
/// prefix the CLI promises, while deferring to each concrete error type's
/// own source-anchored `Display` for the rest of the message.
#[derive(Debug)]
pub enum AxcError {
    Io(std::io::Error),
    Lexical(lexer::LexError),
    Parse(parser::ParseErr),
    Semantic(String),
    CodeGen(codegen::error::CodeGenErr),
}

impl fmt::Display for AxcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxcError::Io(e) => write!(f, "error: {e}"),
            AxcError::Lexical(e) => write!(f, "lexical error: {e}"),
            AxcError::Parse(e) => write!(f, "parse error: {e}"),
            AxcError::Semantic(e) => write!(f, "semantic error: {e}"),
            AxcError::CodeGen(e) => write!(f, "codegen error: {e}"),
        }
    }
}

impl std::error::Error for AxcError {}

impl From<std::io::Error> for AxcError {
    fn from(e: std::io::Error) -> Self {
        AxcError::Io(e)
    }
}

impl From<lexer::LexError> for AxcError {
    fn from(e: lexer::LexError) -> Self {
        AxcError::Lexical(e)
    }
}

impl From<parser::ParseErr> for AxcError {
    fn from(e: parser::ParseErr) -> Self {
        AxcError::Parse(e)
    }
}

impl From<codegen::error::CodeGenErr> for AxcError {
    fn from(e: codegen::error::CodeGenErr) -> Self {
        AxcError::CodeGen(e)
    }
}

impl From<emitter::EmitError> for AxcError {
    fn from(e: emitter::EmitError) -> Self {
        match e {
            emitter::EmitError::Io(io) => AxcError::Io(io),
            emitter::EmitError::CodeGen(cg) => AxcError::CodeGen(cg),
        }
    }
}

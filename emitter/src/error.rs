use codegen::error::CodeGenErr;
use std::fmt;
use std::io;

/// Everything that can go wrong while writing the finished `asm::Program`
/// out as text: either a plain I/O failure, or a back end invariant that
/// should have been impossible after register allocation and fix-up (a
/// surviving `Pseudo`) surfacing here instead of silently miscompiling.
#[derive(Debug)]
pub enum EmitError {
    Io(io::Error),
    CodeGen(CodeGenErr),
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitError::Io(e) => write!(f, "{e}"),
            EmitError::CodeGen(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EmitError {}

impl From<io::Error> for EmitError {
    fn from(e: io::Error) -> Self {
        EmitError::Io(e)
    }
}

impl From<CodeGenErr> for EmitError {
    fn from(e: CodeGenErr) -> Self {
        EmitError::CodeGen(e)
    }
}

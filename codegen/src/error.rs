use core::fmt;

/// Everything that can go wrong once code generation itself runs (as
/// opposed to an earlier stage's `LexError`/`ParseErr`/`SemanticErr`).
///
/// A surviving `Pseudo` or an unresolved jump target after the fix-up pass
/// means the back end has a bug; `Invariant` reports that as a normal
/// diagnostic rather than panicking, so a pipeline regression shows up as
/// an ordinary exit-non-zero run instead of an abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeGenErr {
    /// A construct the selected machine's back end has no lowering rule
    /// for yet (used by the AArch64 skeleton for everything beyond its
    /// handful of supported cases).
    Unsupported(String),
    Invariant(String),
}

impl fmt::Display for CodeGenErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeGenErr::Unsupported(what) => write!(f, "unsupported: {what}"),
            CodeGenErr::Invariant(what) => write!(f, "internal error: {what}"),
        }
    }
}

impl std::error::Error for CodeGenErr {}

//! Types and infrastructure shared across every compiler stage: source
//! locations, the arena-backed string/type interners, the symbol table and
//! its post-analysis registries, and the CLI-facing `Stage`/`Machine`
//! options enums.
//!
//! Stages thread the pieces they need as explicit `&`/`&mut` fields rather
//! than through one bundled context object, so each stage only borrows what
//! it actually touches (the parser, for instance, needs the interners and
//! the source map but not the symbol table).

pub use bumpalo::Bump;

pub mod asm_symbol_table;
pub mod options;
pub mod source_map;
pub mod span;
pub mod symbol_interner;
pub mod symbol_registry;
pub mod symbol_table;
pub mod type_interner;
pub mod types;

pub use span::{Location, Span};
pub use symbol_interner::{Symbol, SymbolInterner};
pub use symbol_registry::SymbolRegistery;
pub use types::{convert_type_to_operand_size, OperandSize, Type};

/// A name, already disambiguated by the semantic analyser.
///
/// `symbol` is the interned spelling; `id` distinguishes otherwise-identical
/// spellings introduced by shadowing (`int x` in two nested scopes) or by
/// the TAC generator's own temp/label minting. Two `Identifier`s compare
/// equal only if both fields match, so a `HashMap<Identifier, _>` symbol
/// table is never confused by shadowed source names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier {
    symbol: Symbol,
    id: usize,
}

impl Identifier {
    pub fn new(symbol: Symbol, id: usize) -> Self {
        Self { symbol, id }
    }

    pub fn get_symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn get_id(&self) -> usize {
        self.id
    }

    pub fn into_parts(self) -> (Symbol, usize) {
        (self.symbol, self.id)
    }
}

impl Default for Identifier {
    fn default() -> Self {
        Self {
            symbol: Symbol(0),
            id: 0,
        }
    }
}

/// An [`Identifier`] paired with the source span of the token it was parsed
/// from, used anywhere a diagnostic needs to point back at a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpannedIdentifier {
    identifier: Identifier,
    span: Span,
}

impl SpannedIdentifier {
    pub fn new(identifier: Identifier, span: Span) -> Self {
        Self { identifier, span }
    }

    pub fn get_identifier(&self) -> Identifier {
        self.identifier
    }

    pub fn get_span(&self) -> Span {
        self.span
    }

    pub fn into_parts(self) -> (Identifier, Span) {
        (self.identifier, self.span)
    }
}

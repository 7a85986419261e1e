use crate::type_interner::TypeID;
use crate::types::Type;
use crate::{Identifier, SpannedIdentifier};
use std::collections::HashMap;

/// A scalar value a `static`-storage-duration object can be initialized
/// with, already narrowed/widened to its declared [`Type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticInit {
    Int(i32),
    Long(i64),
}

/// Whether an `entry_type` names a plain scalar or a function, and with
/// which concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    Scalar(Type),
    Func(TypeID),
}

/// Metadata about a static-storage-duration initializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitValue {
    /// No initializer was given and the declaration isn't `extern`: the
    /// object is zero-initialized, but placement in `.data` vs `.bss` is
    /// deferred until every declaration of the name has been seen.
    Tentative,
    Initial(StaticInit),
    /// An `extern` declaration with no initializer of its own.
    NoInitializer,
}

impl InitValue {
    pub fn is_constant(&self) -> bool {
        matches!(self, InitValue::Initial(_))
    }
}

/// Metadata attached to a symbol-table entry, describing storage and
/// linkage rather than type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdenAttrs {
    FunAttrs { defined: bool, external: bool },
    StaticAttrs { init: InitValue, external: bool },
    LocalAttrs,
}

impl IdenAttrs {
    pub fn is_external(&self) -> bool {
        match self {
            IdenAttrs::FunAttrs { external, .. } => *external,
            IdenAttrs::StaticAttrs { external, .. } => *external,
            IdenAttrs::LocalAttrs => false,
        }
    }

    pub fn is_defined(&self) -> bool {
        match self {
            IdenAttrs::FunAttrs { defined, .. } => *defined,
            IdenAttrs::StaticAttrs { .. } => true,
            IdenAttrs::LocalAttrs => true,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, IdenAttrs::StaticAttrs { .. })
    }

    pub fn get_init_value(&self) -> Option<InitValue> {
        match self {
            IdenAttrs::StaticAttrs { init, .. } => Some(*init),
            _ => None,
        }
    }
}

/// One entry in the symbol table: an identifier's declared type plus its
/// storage/linkage metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolEntry {
    pub sp_iden: SpannedIdentifier,
    pub entry_type: EntryType,
    pub attributes: IdenAttrs,
}

impl SymbolEntry {
    pub fn is_static(&self) -> bool {
        self.attributes.is_static()
    }
}

/// The final, flat symbol table produced by semantic analysis: one entry
/// per unique (already-resolved) name, keyed by [`Identifier`].
///
/// Scoped lookup during identifier resolution is handled separately by a
/// stack of scope frames (see `semantic_analysis::identifier_resolution`);
/// this table only holds the final, disambiguated picture consumed by the
/// TAC generator and back end.
pub struct SymbolTable {
    table: HashMap<Identifier, SymbolEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    pub fn get(&self, key: Identifier) -> Option<SymbolEntry> {
        self.table.get(&key).cloned()
    }

    pub fn add(&mut self, sp_iden: SpannedIdentifier, entry_type: EntryType, attributes: IdenAttrs) {
        self.table.insert(
            sp_iden.get_identifier(),
            SymbolEntry {
                sp_iden,
                entry_type,
                attributes,
            },
        );
    }

    pub fn get_table_ref(&self) -> &HashMap<Identifier, SymbolEntry> {
        &self.table
    }

    /// Consumes the table, handing ownership of its entries to the caller
    /// (used by [`crate::symbol_registry::SymbolRegistery::build`]).
    pub fn get_table(self) -> HashMap<Identifier, SymbolEntry> {
        self.table
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

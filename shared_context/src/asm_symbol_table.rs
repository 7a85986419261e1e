use std::collections::HashMap;

use crate::symbol_table::{EntryType, IdenAttrs, SymbolTable};
use crate::types::{OperandSize, convert_type_to_operand_size};
use crate::Identifier;

/// What the x86-64 back end needs to know about a name it sees in a
/// `Pseudo`/`Call`/`Data` operand: whether it is an object (and at what
/// width, and whether it is `static`-backed) or a function (and whether a
/// definition for it lives in this translation unit, which decides whether
/// `@PLT` is needed on a call).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsmSymbolEntry {
    Obj { size: OperandSize, is_static: bool },
    Fun { is_defined: bool },
}

pub struct AsmSymbolTable {
    table: HashMap<Identifier, AsmSymbolEntry>,
}

impl AsmSymbolTable {
    pub fn new(symbol_table: &SymbolTable) -> Self {
        let mut table = HashMap::new();

        for (iden, entry) in symbol_table.get_table_ref().iter() {
            if let EntryType::Scalar(var_type) = entry.entry_type {
                table.insert(
                    *iden,
                    AsmSymbolEntry::Obj {
                        size: convert_type_to_operand_size(var_type),
                        is_static: entry.is_static(),
                    },
                );
            } else if let IdenAttrs::FunAttrs { defined, .. } = entry.attributes {
                table.insert(*iden, AsmSymbolEntry::Fun { is_defined: defined });
            }
        }

        Self { table }
    }

    /// # Panics
    /// Panics if there is no entry for `key`; every name reaching codegen
    /// was installed into the symbol table during semantic analysis.
    pub fn get(&self, key: Identifier) -> &AsmSymbolEntry {
        self.table.get(&key).unwrap()
    }
}

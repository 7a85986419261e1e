use crate::symbol_table::{EntryType, IdenAttrs, SymbolTable};
use crate::type_interner::TypeID;
use crate::{Identifier, Type};
use std::collections::HashMap;

/// A registry of symbols split into distinct immutable tables by category:
/// variables and functions.
///
/// Built once from the unified, mutable [`SymbolTable`] the semantic
/// analyser produces, so later stages get fast, infallible access without
/// repeated pattern matching on `EntryType`/`IdenAttrs`.
pub struct SymbolRegistery {
    var_table: HashMap<Identifier, VarSy>,
    fun_table: HashMap<Identifier, FunSy>,
}

impl SymbolRegistery {
    /// Consumes a `SymbolTable`, partitioning it into separate, immutable
    /// maps for variables and functions.
    pub fn build(sytab: SymbolTable) -> Self {
        let mut var_table = HashMap::new();
        let mut fun_table = HashMap::new();

        for (iden, entry) in sytab.get_table().into_iter() {
            match (entry.entry_type, entry.attributes) {
                (EntryType::Scalar(ty), IdenAttrs::LocalAttrs) => {
                    var_table.insert(iden, VarSy::new(ty, false));
                }
                (EntryType::Scalar(ty), IdenAttrs::StaticAttrs { .. }) => {
                    var_table.insert(iden, VarSy::new(ty, true));
                }
                (EntryType::Func(ty_id), IdenAttrs::FunAttrs { defined, .. }) => {
                    fun_table.insert(iden, FunSy::new(ty_id, defined));
                }
                _ => (),
            }
        }

        Self {
            var_table,
            fun_table,
        }
    }

    /// # Panics
    /// Panics if `iden` does not name a function; the semantic analyser
    /// guarantees call targets have already been resolved to a function
    /// symbol by the time this is consulted.
    pub fn get_function(&self, iden: &Identifier) -> &FunSy {
        &self.fun_table[iden]
    }

    /// # Panics
    /// Panics if `iden` does not name a variable, for the same reason as
    /// [`Self::get_function`].
    pub fn get_variable(&self, iden: &Identifier) -> &VarSy {
        &self.var_table[iden]
    }
}

/// Symbol data for a variable: its declared scalar type and whether it has
/// `static` storage duration (file-scope or function-local `static`).
pub struct VarSy {
    ty: Type,
    is_static: bool,
}

impl VarSy {
    pub fn new(ty: Type, is_static: bool) -> Self {
        Self { ty, is_static }
    }

    pub fn get_type(&self) -> Type {
        self.ty
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }
}

/// Symbol data for a function: its interned signature and whether a
/// definition (not just a declaration) was seen in this translation unit.
pub struct FunSy {
    ty_id: TypeID,
    def: bool,
}

impl FunSy {
    pub fn new(ty_id: TypeID, def: bool) -> Self {
        Self { ty_id, def }
    }

    pub fn get_type_id(&self) -> TypeID {
        self.ty_id
    }

    pub fn is_def(&self) -> bool {
        self.def
    }
}

use crate::{TypeChecker, semantic_error::ErrorType};
use parser::ast::*;
use shared_context::{
    SpannedIdentifier,
    symbol_table::{EntryType, IdenAttrs},
    type_interner::TypeID,
};

impl<'src, 'ctx> TypeChecker<'src, 'ctx> {
    /// Type checks a function declaration or definition.
    ///
    /// Looks up any previous declaration of the same name to inherit its
    /// linkage and defined-ness, rejecting a conflicting signature, a
    /// conflicting storage class, or a second body. Installs the final
    /// entry in the symbol table and, if a body is present, type checks it
    /// with the parameters registered as locals.
    pub(super) fn typecheck_function_declaration(
        &mut self,
        function: FunctionDecl,
    ) -> Result<FunctionDecl, ErrorType> {
        let has_body = function.body.is_some();
        let mut external = function.storage_class != StorageClass::Static;
        let mut defined = false;

        if let Some((prev_external, prev_defined)) =
            self.check_previous_function_decl(&function, has_body)?
        {
            external = prev_external;
            defined = prev_defined;
        }

        self.register_function(function.name, function.type_id, external, defined || has_body);

        let body = match function.body {
            Some(block) => {
                self.register_function_params(&function.params, function.type_id);
                Some(self.typecheck_block(block, function.type_id)?)
            }
            None => None,
        };

        Ok(FunctionDecl { body, ..function })
    }

    /// Returns `Some((external, defined))` inherited from a previous
    /// declaration of this name, or `None` if this is the first one.
    fn check_previous_function_decl(
        &self,
        function: &FunctionDecl,
        has_body: bool,
    ) -> Result<Option<(bool, bool)>, ErrorType> {
        let Some(prev_entry) = self.symbol_table.get(function.name.get_identifier()) else {
            return Ok(None);
        };

        if prev_entry.entry_type != EntryType::Func(function.type_id) {
            return Err(ErrorType::ConflictingTypes {
                first: prev_entry.sp_iden.get_span(),
                second: function.span,
            });
        }

        let external = prev_entry.attributes.is_external();
        let defined = prev_entry.attributes.is_defined();

        if defined && has_body {
            return Err(ErrorType::RedefinedFunction {
                first: prev_entry.sp_iden.get_span(),
                second: function.name.get_span(),
            });
        }

        let new_external = function.storage_class != StorageClass::Static;
        if external != new_external {
            return Err(ErrorType::ConflictingLinkage {
                first: prev_entry.sp_iden.get_span(),
                second: function.span,
            });
        }

        Ok(Some((external, defined)))
    }

    fn register_function(
        &mut self,
        sp_iden: SpannedIdentifier,
        ty_id: TypeID,
        external: bool,
        defined: bool,
    ) {
        self.symbol_table
            .add(sp_iden, EntryType::Func(ty_id), IdenAttrs::FunAttrs { defined, external });
    }

    /// Registers a function's parameters as local variables in the symbol
    /// table, typed according to the function's interned signature.
    fn register_function_params(&mut self, params: &[SpannedIdentifier], ty_id: TypeID) {
        let param_types = self.ty_interner.get(ty_id).params;
        for (sp_iden, param_type) in params.iter().zip(param_types) {
            self.symbol_table
                .add(*sp_iden, EntryType::Scalar(*param_type), IdenAttrs::LocalAttrs);
        }
    }
}

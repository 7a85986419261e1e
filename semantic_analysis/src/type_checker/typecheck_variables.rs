use crate::{TypeChecker, semantic_error::ErrorType};
use parser::ast::*;
use shared_context::{
    Span, Type,
    symbol_table::{EntryType, IdenAttrs, InitValue, StaticInit, SymbolEntry},
};

impl<'src, 'ctx> TypeChecker<'src, 'ctx> {
    /// A local, non-`static` variable: installed as a plain local, no
    /// constant-initializer restriction (its initializer is ordinary code
    /// run at block entry, not a link-time value).
    pub(super) fn typecheck_local_variable(
        &mut self,
        var_decl: VariableDecl,
    ) -> Result<VariableDecl, ErrorType> {
        if var_decl.storage_class == StorageClass::None {
            self.symbol_table.add(
                var_decl.name,
                EntryType::Scalar(var_decl.var_type),
                IdenAttrs::LocalAttrs,
            );
            let init = match var_decl.init {
                Some(expr) => Some(self.typecheck_expression(expr)?),
                None => None,
            };
            return Ok(VariableDecl { init, ..var_decl });
        }

        // `static`/`extern` locals have static storage duration and go
        // through the same constant-initializer rule as file-scope
        // variables.
        let external = var_decl.storage_class == StorageClass::Extern;
        let init_value = self.resolve_static_init(&var_decl)?;
        self.install_static(&var_decl, init_value, external)?;
        Ok(var_decl)
    }

    /// A file-scope variable: always static storage duration. Default
    /// (no storage class) linkage is external; `static` is internal;
    /// `extern` refers to a definition elsewhere (or, if this is the only
    /// declaration seen, a tentative external definition).
    pub(super) fn typecheck_file_scope_variable(
        &mut self,
        var_decl: VariableDecl,
    ) -> Result<VariableDecl, ErrorType> {
        let external = var_decl.storage_class != StorageClass::Static;
        let init_value = self.resolve_static_init(&var_decl)?;
        self.install_static(&var_decl, init_value, external)?;
        Ok(var_decl)
    }

    /// Folds a variable's initializer (if any) to the `InitValue` the
    /// symbol table and, later, the TAC generator need: `Initial` for a
    /// genuine compile-time constant, `Tentative` for an uninitialized
    /// non-`extern` declaration, `NoInitializer` for a bare `extern`.
    fn resolve_static_init(&self, var_decl: &VariableDecl) -> Result<InitValue, ErrorType> {
        match &var_decl.init {
            Some(expr) => {
                let Some(value) = fold_static_init(expr, var_decl.var_type) else {
                    return Err(ErrorType::InvalidStaticInitializer(expr.span));
                };
                Ok(InitValue::Initial(value))
            }
            None if var_decl.storage_class == StorageClass::Extern => Ok(InitValue::NoInitializer),
            None => Ok(InitValue::Tentative),
        }
    }

    /// Installs a static-storage-duration entry, merging with any previous
    /// declaration of the same name (taking the more-defined of the two
    /// initializers, and rejecting a type or linkage conflict).
    fn install_static(
        &mut self,
        var_decl: &VariableDecl,
        init_value: InitValue,
        external: bool,
    ) -> Result<(), ErrorType> {
        let (external, init_value) = match self.symbol_table.get(var_decl.name.get_identifier()) {
            Some(prev) => merge_static(prev, var_decl, external, init_value)?,
            None => (external, init_value),
        };

        self.symbol_table.add(
            var_decl.name,
            EntryType::Scalar(var_decl.var_type),
            IdenAttrs::StaticAttrs {
                init: init_value,
                external,
            },
        );
        Ok(())
    }
}

fn merge_static(
    prev: SymbolEntry,
    var_decl: &VariableDecl,
    external: bool,
    init_value: InitValue,
) -> Result<(bool, InitValue), ErrorType> {
    let second: Span = var_decl.span;
    if prev.entry_type != EntryType::Scalar(var_decl.var_type) {
        return Err(ErrorType::ConflictingTypes {
            first: prev.sp_iden.get_span(),
            second,
        });
    }
    if prev.attributes.is_external() != external {
        return Err(ErrorType::ConflictingLinkage {
            first: prev.sp_iden.get_span(),
            second,
        });
    }

    let prev_init = prev.attributes.get_init_value().unwrap_or(InitValue::NoInitializer);
    let merged = match (prev_init, init_value) {
        (InitValue::Initial(v), _) | (_, InitValue::Initial(v)) => InitValue::Initial(v),
        (InitValue::Tentative, _) | (_, InitValue::Tentative) => InitValue::Tentative,
        (InitValue::NoInitializer, InitValue::NoInitializer) => InitValue::NoInitializer,
    };
    Ok((external, merged))
}

/// Restricted compile-time evaluator for static-storage-duration
/// initializers: integer literals and the arithmetic/bitwise/unary
/// operators applied to them, narrowed or widened to `ty`. Returns `None`
/// for anything depending on a variable, a call, or increment/decrement,
/// none of which are constant expressions in this language.
fn fold_static_init(expr: &Expression, ty: Type) -> Option<StaticInit> {
    let value = fold(expr)?;
    Some(match ty {
        Type::Int => StaticInit::Int(value as i32),
        Type::Long => StaticInit::Long(value),
    })
}

fn fold(expr: &Expression) -> Option<i64> {
    match &expr.kind {
        ExpressionType::Constant(n) => Some(*n),
        ExpressionType::Cast { operand, .. } => fold(operand),
        ExpressionType::Unary { operator, operand } => {
            let v = fold(operand)?;
            Some(match operator {
                UnaryOP::Negate => v.wrapping_neg(),
                UnaryOP::Complement => !v,
                UnaryOP::Not => (v == 0) as i64,
                UnaryOP::PreInc | UnaryOP::PreDec => return None,
            })
        }
        ExpressionType::Binary {
            operator,
            operand1,
            operand2,
        } => {
            let a = fold(operand1)?;
            let b = fold(operand2)?;
            Some(match operator {
                BinaryOP::Add => a.wrapping_add(b),
                BinaryOP::Sub => a.wrapping_sub(b),
                BinaryOP::Mul => a.wrapping_mul(b),
                BinaryOP::Div => a.checked_div(b)?,
                BinaryOP::Mod => a.checked_rem(b)?,
                BinaryOP::BitAnd => a & b,
                BinaryOP::BitOr => a | b,
                BinaryOP::BitXor => a ^ b,
                BinaryOP::ShiftLeft => a.wrapping_shl(b as u32),
                BinaryOP::ShiftRight => a.wrapping_shr(b as u32),
                BinaryOP::LogicalAnd => (a != 0 && b != 0) as i64,
                BinaryOP::LogicalOr => (a != 0 || b != 0) as i64,
                BinaryOP::Equal => (a == b) as i64,
                BinaryOP::NotEqual => (a != b) as i64,
                BinaryOP::LessThan => (a < b) as i64,
                BinaryOP::GreaterThan => (a > b) as i64,
                BinaryOP::LessThanOrEq => (a <= b) as i64,
                BinaryOP::GreaterThanOrEq => (a >= b) as i64,
            })
        }
        _ => None,
    }
}

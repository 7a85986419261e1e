use super::{IdentifierResolver, ResolverContext};
use crate::semantic_error::ErrorType;
use parser::ast::*;
use shared_context::SpannedIdentifier;

impl<'src, 'ctx> IdentifierResolver<'src, 'ctx> {
    /// Resolves an expression by recursively resolving all sub-expressions:
    /// variables, assignments, unary/binary/postfix operations, conditional
    /// expressions, constants, casts and function calls.
    pub(super) fn resolve_expression(
        &mut self,
        expr: Expression,
        resolver_ctx: &mut ResolverContext,
    ) -> Result<Expression, ErrorType> {
        let span = expr.span;

        let resolved_kind = match expr.kind {
            ExpressionType::Constant(n) => ExpressionType::Constant(n),
            ExpressionType::Var(name) => self.resolve_variable(name, resolver_ctx)?,
            ExpressionType::Unary { operator, operand } => {
                self.resolve_unary(operator, *operand, resolver_ctx)?
            }
            ExpressionType::PostOp { operator, operand } => {
                self.resolve_post_op(operator, *operand, resolver_ctx)?
            }
            ExpressionType::Binary {
                operator,
                operand1,
                operand2,
            } => self.resolve_binary(operator, *operand1, *operand2, resolver_ctx)?,
            ExpressionType::Conditional { cond, cons, alt } => {
                self.resolve_conditional(*cond, *cons, *alt, resolver_ctx)?
            }
            ExpressionType::Assignment { op, lvalue, rvalue } => {
                self.resolve_assignment(op, *lvalue, *rvalue, resolver_ctx)?
            }
            ExpressionType::FunctionCall { name, args } => {
                self.resolve_function_call(name, args, resolver_ctx)?
            }
            ExpressionType::Cast { target, operand } => ExpressionType::Cast {
                target,
                operand: Box::new(self.resolve_expression(*operand, resolver_ctx)?),
            },
        };

        Ok(Expression::new(resolved_kind, span))
    }

    /// Resolves an optional expression (may be `None`), returning a resolved `Option`.
    pub(super) fn resolve_optional_expr(
        &mut self,
        optional_expr: Option<Expression>,
        resolver_ctx: &mut ResolverContext,
    ) -> Result<Option<Expression>, ErrorType> {
        match optional_expr {
            Some(expr) => Ok(Some(self.resolve_expression(expr, resolver_ctx)?)),
            None => Ok(None),
        }
    }

    fn resolve_variable(
        &mut self,
        name: SpannedIdentifier,
        resolver_ctx: &ResolverContext,
    ) -> Result<ExpressionType, ErrorType> {
        let symbol = name.get_identifier().get_symbol();

        if let Some(prev_entry) = resolver_ctx.search_scope(&symbol) {
            Ok(ExpressionType::Var(prev_entry.get_sp_identifier()))
        } else {
            Err(ErrorType::UseOfUndeclared(name.get_span()))
        }
    }

    fn resolve_unary(
        &mut self,
        operator: UnaryOP,
        operand: Expression,
        resolver_ctx: &mut ResolverContext,
    ) -> Result<ExpressionType, ErrorType> {
        let operand = self.resolve_expression(operand, resolver_ctx)?;

        if matches!(operator, UnaryOP::PreInc | UnaryOP::PreDec) {
            self.require_lvalue(&operand)?;
        }

        Ok(ExpressionType::Unary {
            operator,
            operand: Box::new(operand),
        })
    }

    fn resolve_post_op(
        &mut self,
        operator: PostOP,
        operand: Expression,
        resolver_ctx: &mut ResolverContext,
    ) -> Result<ExpressionType, ErrorType> {
        let operand = self.resolve_expression(operand, resolver_ctx)?;
        self.require_lvalue(&operand)?;

        Ok(ExpressionType::PostOp {
            operator,
            operand: Box::new(operand),
        })
    }

    fn resolve_binary(
        &mut self,
        operator: BinaryOP,
        operand1: Expression,
        operand2: Expression,
        resolver_ctx: &mut ResolverContext,
    ) -> Result<ExpressionType, ErrorType> {
        Ok(ExpressionType::Binary {
            operator,
            operand1: Box::new(self.resolve_expression(operand1, resolver_ctx)?),
            operand2: Box::new(self.resolve_expression(operand2, resolver_ctx)?),
        })
    }

    fn resolve_conditional(
        &mut self,
        cond: Expression,
        cons: Expression,
        alt: Expression,
        resolver_ctx: &mut ResolverContext,
    ) -> Result<ExpressionType, ErrorType> {
        let cond = Box::new(self.resolve_expression(cond, resolver_ctx)?);
        let cons = Box::new(self.resolve_expression(cons, resolver_ctx)?);
        let alt = Box::new(self.resolve_expression(alt, resolver_ctx)?);

        Ok(ExpressionType::Conditional { cond, cons, alt })
    }

    /// Resolves `lvalue op= rvalue` (or plain `lvalue = rvalue` when `op` is
    /// `None`), rejecting anything but a variable on the left.
    fn resolve_assignment(
        &mut self,
        op: Option<BinaryOP>,
        lvalue: Expression,
        rvalue: Expression,
        resolver_ctx: &mut ResolverContext,
    ) -> Result<ExpressionType, ErrorType> {
        let lvalue = self.resolve_expression(lvalue, resolver_ctx)?;
        self.require_lvalue(&lvalue)?;
        let rvalue = self.resolve_expression(rvalue, resolver_ctx)?;

        Ok(ExpressionType::Assignment {
            op,
            lvalue: Box::new(lvalue),
            rvalue: Box::new(rvalue),
        })
    }

    /// Every lvalue-requiring position (`=`, `<op>=`, prefix/postfix `++`/`--`)
    /// only ever accepts a bare variable in this subset of C.
    fn require_lvalue(&self, expr: &Expression) -> Result<(), ErrorType> {
        match expr.kind {
            ExpressionType::Var(_) => Ok(()),
            _ => Err(ErrorType::InvalidLeftValue(expr.span)),
        }
    }

    /// Resolves a function call. Uses the name of the declaration the call
    /// resolves to (not the raw call-site spelling) so later passes can
    /// catch errors like calling through a variable.
    fn resolve_function_call(
        &mut self,
        name: SpannedIdentifier,
        args: Vec<Expression>,
        resolver_ctx: &mut ResolverContext,
    ) -> Result<ExpressionType, ErrorType> {
        let symbol = name.get_identifier().get_symbol();

        let Some(prev_entry) = resolver_ctx.search_scope(&symbol) else {
            return Err(ErrorType::UseOfUndeclared(name.get_span()));
        };

        let mut resolved_args = Vec::new();
        for arg in args {
            resolved_args.push(self.resolve_expression(arg, resolver_ctx)?);
        }

        Ok(ExpressionType::FunctionCall {
            name: prev_entry.get_sp_identifier(),
            args: resolved_args,
        })
    }
}

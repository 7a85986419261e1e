use crate::{TypeChecker, semantic_error::ErrorType};
use parser::ast::*;
use shared_context::{SpannedIdentifier, Type, symbol_table::EntryType};

impl<'src, 'ctx> TypeChecker<'src, 'ctx> {
    /// Wraps `expr` in a `Cast` node if its type differs from `target`,
    /// otherwise returns it unchanged. This is the only place a `Cast` node
    /// is ever introduced.
    pub(crate) fn convert_to(expr: Expression, target: Type) -> Expression {
        if expr.get_type() == target {
            return expr;
        }
        let span = expr.span;
        let mut cast = Expression::new(
            ExpressionType::Cast {
                target,
                operand: Box::new(expr),
            },
            span,
        );
        cast.expr_type = Some(target);
        cast
    }

    /// Casts both operands to their common type (`Long` if either is
    /// `Long`, else `Int`), returning the converted pair and that type.
    fn equalize(op1: Expression, op2: Expression) -> (Expression, Expression, Type) {
        let common = Type::common_type(op1.get_type(), op2.get_type());
        (Self::convert_to(op1, common), Self::convert_to(op2, common), common)
    }

    /// Type checks an expression recursively, filling in `expr_type` on
    /// every node and inserting `Cast`s where the common-type rule demands
    /// one.
    pub(crate) fn typecheck_expression(&mut self, expr: Expression) -> Result<Expression, ErrorType> {
        let span = expr.span;

        let (kind, ty) = match expr.kind {
            ExpressionType::Constant(n) => (ExpressionType::Constant(n), Type::Int),
            ExpressionType::Var(name) => {
                let ty = self.lookup_variable_type(&name)?;
                (ExpressionType::Var(name), ty)
            }
            ExpressionType::Unary { operator, operand } => self.typecheck_unary(operator, *operand)?,
            ExpressionType::PostOp { operator, operand } => {
                let operand = self.typecheck_expression(*operand)?;
                let ty = operand.get_type();
                (
                    ExpressionType::PostOp {
                        operator,
                        operand: Box::new(operand),
                    },
                    ty,
                )
            }
            ExpressionType::Binary {
                operator,
                operand1,
                operand2,
            } => self.typecheck_binary(operator, *operand1, *operand2)?,
            ExpressionType::Conditional { cond, cons, alt } => {
                let cond = Box::new(self.typecheck_expression(*cond)?);
                let cons = self.typecheck_expression(*cons)?;
                let alt = self.typecheck_expression(*alt)?;
                let (cons, alt, ty) = Self::equalize(cons, alt);
                (
                    ExpressionType::Conditional {
                        cond,
                        cons: Box::new(cons),
                        alt: Box::new(alt),
                    },
                    ty,
                )
            }
            ExpressionType::Assignment { op, lvalue, rvalue } => {
                self.typecheck_assignment(op, *lvalue, *rvalue)?
            }
            ExpressionType::FunctionCall { name, args } => self.typecheck_call(name, args)?,
            ExpressionType::Cast { target, operand } => {
                let operand = Box::new(self.typecheck_expression(*operand)?);
                (ExpressionType::Cast { target, operand }, target)
            }
        };

        let mut checked = Expression::new(kind, span);
        checked.expr_type = Some(ty);
        Ok(checked)
    }

    fn lookup_variable_type(&self, name: &SpannedIdentifier) -> Result<Type, ErrorType> {
        match self.symbol_table.get(name.get_identifier()) {
            Some(entry) => match entry.entry_type {
                EntryType::Scalar(ty) => Ok(ty),
                EntryType::Func(_) => Err(ErrorType::FunctionUsedAsVariable(name.get_span())),
            },
            None => Err(ErrorType::UseOfUndeclared(name.get_span())),
        }
    }

    fn typecheck_unary(
        &mut self,
        operator: UnaryOP,
        operand: Expression,
    ) -> Result<(ExpressionType, Type), ErrorType> {
        let operand = self.typecheck_expression(operand)?;
        let ty = match operator {
            UnaryOP::Not => Type::Int,
            UnaryOP::Negate | UnaryOP::Complement | UnaryOP::PreInc | UnaryOP::PreDec => operand.get_type(),
        };
        Ok((
            ExpressionType::Unary {
                operator,
                operand: Box::new(operand),
            },
            ty,
        ))
    }

    fn typecheck_binary(
        &mut self,
        operator: BinaryOP,
        operand1: Expression,
        operand2: Expression,
    ) -> Result<(ExpressionType, Type), ErrorType> {
        let operand1 = self.typecheck_expression(operand1)?;
        let operand2 = self.typecheck_expression(operand2)?;

        let (operand1, operand2, ty) = match operator {
            // Short-circuit operators evaluate each side for truthiness;
            // no common-type conversion is needed and the result is Int.
            BinaryOP::LogicalAnd | BinaryOP::LogicalOr => (operand1, operand2, Type::Int),
            // The shift count is evaluated independently of the value
            // being shifted; only the left operand's type survives.
            BinaryOP::ShiftLeft | BinaryOP::ShiftRight => {
                let ty = operand1.get_type();
                (operand1, operand2, ty)
            }
            BinaryOP::Equal
            | BinaryOP::NotEqual
            | BinaryOP::LessThan
            | BinaryOP::GreaterThan
            | BinaryOP::LessThanOrEq
            | BinaryOP::GreaterThanOrEq => {
                let (operand1, operand2, _) = Self::equalize(operand1, operand2);
                (operand1, operand2, Type::Int)
            }
            BinaryOP::Add
            | BinaryOP::Sub
            | BinaryOP::Mul
            | BinaryOP::Div
            | BinaryOP::Mod
            | BinaryOP::BitAnd
            | BinaryOP::BitOr
            | BinaryOP::BitXor => {
                let (operand1, operand2, common) = Self::equalize(operand1, operand2);
                (operand1, operand2, common)
            }
        };

        Ok((
            ExpressionType::Binary {
                operator,
                operand1: Box::new(operand1),
                operand2: Box::new(operand2),
            },
            ty,
        ))
    }

    fn typecheck_assignment(
        &mut self,
        op: Option<BinaryOP>,
        lvalue: Expression,
        rvalue: Expression,
    ) -> Result<(ExpressionType, Type), ErrorType> {
        let lvalue = self.typecheck_expression(lvalue)?;
        let target = lvalue.get_type();
        let rvalue = self.typecheck_expression(rvalue)?;
        let rvalue = Self::convert_to(rvalue, target);

        Ok((
            ExpressionType::Assignment {
                op,
                lvalue: Box::new(lvalue),
                rvalue: Box::new(rvalue),
            },
            target,
        ))
    }

    fn typecheck_call(
        &mut self,
        name: SpannedIdentifier,
        args: Vec<Expression>,
    ) -> Result<(ExpressionType, Type), ErrorType> {
        let Some(entry) = self.symbol_table.get(name.get_identifier()) else {
            return Err(ErrorType::UseOfUndeclared(name.get_span()));
        };
        let EntryType::Func(ty_id) = entry.entry_type else {
            return Err(ErrorType::VariableUsedAsFunction(name.get_span()));
        };
        let fun_ty = self.ty_interner.get(ty_id);

        if args.len() != fun_ty.params.len() {
            return Err(ErrorType::ArityMismatch {
                expected: fun_ty.params.len(),
                found: args.len(),
                span: name.get_span(),
            });
        }

        let mut checked_args = Vec::with_capacity(args.len());
        for (arg, param_ty) in args.into_iter().zip(fun_ty.params) {
            let arg = self.typecheck_expression(arg)?;
            checked_args.push(Self::convert_to(arg, *param_ty));
        }

        Ok((
            ExpressionType::FunctionCall {
                name,
                args: checked_args,
            },
            fun_ty.ret,
        ))
    }
}

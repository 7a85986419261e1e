//! Expression lowering: turns a (type-checked) `ast::Expression` tree into
//! a flat sequence of `tacky::Instruction`s plus the `tacky::Value` holding
//! its result.

use crate::IRgen;
use crate::tacky;
use parser::ast::{self, Expression, ExpressionType};

mod gen_logical_expressions;

impl<'src, 'ctx> IRgen<'src, 'ctx> {
    /// Lowers one expression, emitting whatever instructions are needed as
    /// a side effect and returning the `Value` holding its result.
    pub(crate) fn gen_expression(
        &mut self,
        expr: Expression,
        instructions: &mut Vec<tacky::Instruction>,
    ) -> tacky::Value {
        let ty = expr.get_type();

        match expr.kind {
            ExpressionType::Constant(n) => tacky::Value::Constant(n),

            ExpressionType::Var(name) => tacky::Value::Variable(name.get_identifier()),

            ExpressionType::Unary { operator, operand } => {
                self.gen_unary_expr(operator, *operand, ty, instructions)
            }

            ExpressionType::PostOp { operator, operand } => {
                self.gen_post_op(operator, *operand, instructions)
            }

            ExpressionType::Binary {
                operator,
                operand1,
                operand2,
            } => self.gen_binary_expr(operator, *operand1, *operand2, ty, instructions),

            ExpressionType::Conditional { cond, cons, alt } => {
                self.gen_conditional(*cond, *cons, *alt, ty, instructions)
            }

            ExpressionType::Assignment { op, lvalue, rvalue } => {
                self.gen_assignment(op, *lvalue, *rvalue, instructions)
            }

            ExpressionType::FunctionCall { name, args } => self.gen_function_call(name, args, ty, instructions),

            ExpressionType::Cast { target, operand } => self.gen_cast(target, *operand, instructions),
        }
    }

    /// Lowers a binary expression. `&&`/`||` are short-circuiting and are
    /// handled by a dedicated submodule; every other operator evaluates
    /// both operands unconditionally, left-to-right.
    fn gen_binary_expr(
        &mut self,
        operator: ast::BinaryOP,
        operand1: Expression,
        operand2: Expression,
        ty: shared_context::Type,
        instructions: &mut Vec<tacky::Instruction>,
    ) -> tacky::Value {
        use ast::BinaryOP;

        match operator {
            BinaryOP::LogicalAnd => self.gen_logical_and(operand1, operand2, instructions),
            BinaryOP::LogicalOr => self.gen_logical_or(operand1, operand2, instructions),
            _ => {
                let src1 = self.gen_expression(operand1, instructions);
                let src2 = self.gen_expression(operand2, instructions);
                let dst = self.make_temp_var(ty);

                instructions.push(tacky::Instruction::Binary {
                    op: convert_binary_op(operator),
                    src1,
                    src2,
                    dst,
                });

                dst
            }
        }
    }

    /// Lowers a prefix unary expression: `-x`, `~x`, `!x`, `++x`, `--x`.
    ///
    /// `++x`/`--x` mutate the operand in place and evaluate to its *new*
    /// value, so they're lowered as a binary add/sub straight into the
    /// operand's own slot rather than through a fresh temporary.
    fn gen_unary_expr(
        &mut self,
        operator: ast::UnaryOP,
        operand: Expression,
        ty: shared_context::Type,
        instructions: &mut Vec<tacky::Instruction>,
    ) -> tacky::Value {
        match operator {
            ast::UnaryOP::PreInc => self.gen_incr_decr(operand, tacky::BinaryOP::Add, instructions),
            ast::UnaryOP::PreDec => self.gen_incr_decr(operand, tacky::BinaryOP::Sub, instructions),
            ast::UnaryOP::Negate | ast::UnaryOP::Complement | ast::UnaryOP::Not => {
                let src = self.gen_expression(operand, instructions);
                let dst = self.make_temp_var(ty);

                instructions.push(tacky::Instruction::Unary {
                    op: convert_unary_op(operator),
                    src,
                    dst,
                });

                dst
            }
        }
    }

    /// `++x`/`--x` as a prefix op: mutate `x` in place, evaluate to the new
    /// value.
    fn gen_incr_decr(
        &mut self,
        operand: Expression,
        op: tacky::BinaryOP,
        instructions: &mut Vec<tacky::Instruction>,
    ) -> tacky::Value {
        let lval = self.gen_expression(operand, instructions);
        instructions.push(tacky::Instruction::Binary {
            op,
            src1: lval,
            src2: tacky::Value::Constant(1),
            dst: lval,
        });
        lval
    }

    /// Lowers a postfix `x++`/`x--`: saves `x`'s current value, mutates `x`
    /// in place, and evaluates to the *saved* (old) value.
    fn gen_post_op(
        &mut self,
        operator: ast::PostOP,
        operand: Expression,
        instructions: &mut Vec<tacky::Instruction>,
    ) -> tacky::Value {
        let ty = operand.get_type();
        let lval = self.gen_expression(operand, instructions);
        let old = self.make_temp_var(ty);
        instructions.push(tacky::Instruction::Copy { src: lval, dst: old });

        let op = match operator {
            ast::PostOP::Inc => tacky::BinaryOP::Add,
            ast::PostOP::Dec => tacky::BinaryOP::Sub,
        };
        instructions.push(tacky::Instruction::Binary {
            op,
            src1: lval,
            src2: tacky::Value::Constant(1),
            dst: lval,
        });

        old
    }

    /// Lowers an assignment, plain (`a = b`) or compound (`a += b`, ...).
    ///
    /// The compound form is `a = a <op> b`: the type checker already
    /// converted `b` to `a`'s type, so this lowers straight to a `Binary`
    /// writing back into `a`'s own slot, with no extra conversion needed
    /// here.
    fn gen_assignment(
        &mut self,
        op: Option<ast::BinaryOP>,
        lvalue: Expression,
        rvalue: Expression,
        instructions: &mut Vec<tacky::Instruction>,
    ) -> tacky::Value {
        let lval = self.gen_expression(lvalue, instructions);
        let rval = self.gen_expression(rvalue, instructions);

        match op {
            None => {
                instructions.push(tacky::Instruction::Copy { src: rval, dst: lval });
            }
            Some(binop) => {
                instructions.push(tacky::Instruction::Binary {
                    op: convert_binary_op(binop),
                    src1: lval,
                    src2: rval,
                    dst: lval,
                });
            }
        }

        lval
    }

    /// Lowers `cond ? cons : alt`.
    fn gen_conditional(
        &mut self,
        cond: Expression,
        cons: Expression,
        alt: Expression,
        ty: shared_context::Type,
        instructions: &mut Vec<tacky::Instruction>,
    ) -> tacky::Value {
        let result = self.make_temp_var(ty);
        let else_label = self.make_label();
        let end_label = self.make_label();

        let cond_val = self.gen_expression(cond, instructions);
        instructions.push(tacky::Instruction::JumpIfZero {
            cond: cond_val,
            target: else_label,
        });

        let cons_val = self.gen_expression(cons, instructions);
        instructions.push(tacky::Instruction::Copy {
            src: cons_val,
            dst: result,
        });
        instructions.push(tacky::Instruction::Jump(end_label));

        instructions.push(tacky::Instruction::Label(else_label));
        let alt_val = self.gen_expression(alt, instructions);
        instructions.push(tacky::Instruction::Copy {
            src: alt_val,
            dst: result,
        });

        instructions.push(tacky::Instruction::Label(end_label));
        result
    }

    /// Lowers a call: every argument is evaluated left-to-right before the
    /// `FunCall` instruction itself, which the back end later spreads over
    /// the calling convention's registers/stack.
    fn gen_function_call(
        &mut self,
        name: shared_context::SpannedIdentifier,
        args: Vec<Expression>,
        ty: shared_context::Type,
        instructions: &mut Vec<tacky::Instruction>,
    ) -> tacky::Value {
        let dst = self.make_temp_var(ty);

        let tacky_args = args
            .into_iter()
            .map(|arg| self.gen_expression(arg, instructions))
            .collect();

        instructions.push(tacky::Instruction::FunCall {
            name: name.get_identifier(),
            args: tacky_args,
            dst,
        });

        dst
    }

    /// Lowers a `Cast`. A cast to the operand's own type never appears (the
    /// type checker only inserts one when the types actually differ), so
    /// this always emits exactly one `SignExtend` (widening `Int` to
    /// `Long`) or `Truncate` (narrowing `Long` to `Int`).
    fn gen_cast(
        &mut self,
        target: shared_context::Type,
        operand: Expression,
        instructions: &mut Vec<tacky::Instruction>,
    ) -> tacky::Value {
        let from = operand.get_type();
        let src = self.gen_expression(operand, instructions);

        if from == target {
            return src;
        }

        let dst = self.make_temp_var(target);
        let instr = if target.is_long() {
            tacky::Instruction::SignExtend { src, dst }
        } else {
            tacky::Instruction::Truncate { src, dst }
        };
        instructions.push(instr);
        dst
    }
}

fn convert_binary_op(op: ast::BinaryOP) -> tacky::BinaryOP {
    use ast::BinaryOP as A;
    use tacky::BinaryOP as T;

    match op {
        A::Add => T::Add,
        A::Sub => T::Sub,
        A::Mul => T::Mul,
        A::Div => T::Div,
        A::Mod => T::Mod,
        A::BitAnd => T::BitAnd,
        A::BitOr => T::BitOr,
        A::BitXor => T::BitXor,
        A::ShiftLeft => T::ShiftLeft,
        A::ShiftRight => T::ShiftRight,
        A::Equal => T::Equal,
        A::NotEqual => T::NotEqual,
        A::LessThan => T::Less,
        A::LessThanOrEq => T::LessEqual,
        A::GreaterThan => T::Greater,
        A::GreaterThanOrEq => T::GreaterEqual,
        A::LogicalAnd | A::LogicalOr => {
            unreachable!("short-circuit operators are lowered by gen_binary_expr directly")
        }
    }
}

fn convert_unary_op(op: ast::UnaryOP) -> tacky::UnaryOP {
    match op {
        ast::UnaryOP::Negate => tacky::UnaryOP::Negate,
        ast::UnaryOP::Complement => tacky::UnaryOP::Complement,
        ast::UnaryOP::Not => tacky::UnaryOP::Not,
        ast::UnaryOP::PreInc | ast::UnaryOP::PreDec => {
            unreachable!("PreInc/PreDec are lowered by gen_incr_decr directly")
        }
    }
}

//! Short-circuiting lowering for `&&` and `||`.
//!
//! - `a && b`: `b` is only evaluated if `a` is non-zero.
//! - `a || b`: `b` is only evaluated if `a` is zero.

use crate::IRgen;
use crate::tacky;
use parser::ast::Expression;
use shared_context::Type;

impl<'src, 'ctx> IRgen<'src, 'ctx> {
    /// ```text
    ///   v1 = <a>
    ///   jump_if_zero v1, false_label
    ///   v2 = <b>
    ///   jump_if_zero v2, false_label
    ///   result = 1
    ///   jump end_label
    /// false_label:
    ///   result = 0
    /// end_label:
    /// ```
    pub(super) fn gen_logical_and(
        &mut self,
        operand1: Expression,
        operand2: Expression,
        instructions: &mut Vec<tacky::Instruction>,
    ) -> tacky::Value {
        let result = self.make_temp_var(Type::Int);
        let false_label = self.make_label();
        let end_label = self.make_label();

        let v1 = self.gen_expression(operand1, instructions);
        instructions.push(tacky::Instruction::JumpIfZero {
            cond: v1,
            target: false_label,
        });

        let v2 = self.gen_expression(operand2, instructions);
        instructions.push(tacky::Instruction::JumpIfZero {
            cond: v2,
            target: false_label,
        });

        instructions.push(tacky::Instruction::Copy {
            src: tacky::Value::Constant(1),
            dst: result,
        });
        instructions.push(tacky::Instruction::Jump(end_label));

        instructions.push(tacky::Instruction::Label(false_label));
        instructions.push(tacky::Instruction::Copy {
            src: tacky::Value::Constant(0),
            dst: result,
        });

        instructions.push(tacky::Instruction::Label(end_label));
        result
    }

    /// ```text
    ///   v1 = <a>
    ///   jump_if_not_zero v1, true_label
    ///   v2 = <b>
    ///   jump_if_not_zero v2, true_label
    ///   result = 0
    ///   jump end_label
    /// true_label:
    ///   result = 1
    /// end_label:
    /// ```
    pub(super) fn gen_logical_or(
        &mut self,
        operand1: Expression,
        operand2: Expression,
        instructions: &mut Vec<tacky::Instruction>,
    ) -> tacky::Value {
        let result = self.make_temp_var(Type::Int);
        let true_label = self.make_label();
        let end_label = self.make_label();

        let v1 = self.gen_expression(operand1, instructions);
        instructions.push(tacky::Instruction::JumpIfNotZero {
            cond: v1,
            target: true_label,
        });

        let v2 = self.gen_expression(operand2, instructions);
        instructions.push(tacky::Instruction::JumpIfNotZero {
            cond: v2,
            target: true_label,
        });

        instructions.push(tacky::Instruction::Copy {
            src: tacky::Value::Constant(0),
            dst: result,
        });
        instructions.push(tacky::Instruction::Jump(end_label));

        instructions.push(tacky::Instruction::Label(true_label));
        instructions.push(tacky::Instruction::Copy {
            src: tacky::Value::Constant(1),
            dst: result,
        });

        instructions.push(tacky::Instruction::Label(end_label));
        result
    }
}

//! Selection for unary and binary `tacky` operations. Division/modulo and
//! comparisons each need their own instruction shape; every other binary
//! operator (arithmetic, bitwise, shifts) shares one straightforward
//! `Mov` + `Binary` pattern, left fully general here and made legal later
//! by `crate::fix_instructions`.

use crate::asm::{self, Operand, Register};
use crate::asm_gen::AsmGen;
use ir_gen::tacky;
use shared_context::OperandSize;

impl<'ctx, 'src> AsmGen<'ctx, 'src> {
    pub(super) fn gen_unary(
        &self,
        op: tacky::UnaryOP,
        src: tacky::Value,
        dst: tacky::Value,
        out: &mut Vec<asm::Instruction>,
    ) {
        match op {
            tacky::UnaryOP::Not => self.gen_logical_not(src, dst, out),
            tacky::UnaryOP::Complement | tacky::UnaryOP::Negate => {
                let ty = self.value_size(&src);
                let d = Self::convert_val(&dst);
                out.push(asm::Instruction::Mov {
                    ty,
                    src: Self::convert_val(&src),
                    dst: d,
                });
                out.push(asm::Instruction::Unary {
                    op: convert_unary_op(op),
                    ty,
                    dst: d,
                });
            }
        }
    }

    /// `!x`: x86 has no "logical not" instruction, so this is a compare
    /// against zero followed by `sete`. The result is always `Int`
    /// regardless of `x`'s own width.
    fn gen_logical_not(&self, src: tacky::Value, dst: tacky::Value, out: &mut Vec<asm::Instruction>) {
        let ty = self.value_size(&src);
        let d = Self::convert_val(&dst);

        out.push(asm::Instruction::Cmp {
            ty,
            src: Operand::Immediate(0),
            dst: Self::convert_val(&src),
        });
        out.push(asm::Instruction::Mov {
            ty: OperandSize::Long,
            src: Operand::Immediate(0),
            dst: d,
        });
        out.push(asm::Instruction::SetCC(asm::Cond::E, d));
    }

    pub(super) fn gen_binary(
        &self,
        op: tacky::BinaryOP,
        src1: tacky::Value,
        src2: tacky::Value,
        dst: tacky::Value,
        out: &mut Vec<asm::Instruction>,
    ) {
        use tacky::BinaryOP as T;

        match op {
            T::Div | T::Mod => self.gen_div_mod(op, src1, src2, dst, out),
            T::Equal | T::NotEqual | T::Less | T::LessEqual | T::Greater | T::GreaterEqual => {
                self.gen_comparison(op, src1, src2, dst, out)
            }
            _ => self.gen_regular_binary(op, src1, src2, dst, out),
        }
    }

    /// Every arithmetic/bitwise/shift operator lowers the same way: move
    /// the left operand into `dst`, then apply the op with the right
    /// operand as `src`. Valid for shifts too — the count's own width
    /// never matters, since `fix_instructions` routes it through `%cl`.
    fn gen_regular_binary(
        &self,
        op: tacky::BinaryOP,
        src1: tacky::Value,
        src2: tacky::Value,
        dst: tacky::Value,
        out: &mut Vec<asm::Instruction>,
    ) {
        let ty = self.value_size(&dst);
        let d = Self::convert_val(&dst);

        out.push(asm::Instruction::Mov {
            ty,
            src: Self::convert_val(&src1),
            dst: d,
        });
        out.push(asm::Instruction::Binary {
            op: convert_binary_op(op),
            ty,
            src: Self::convert_val(&src2),
            dst: d,
        });
    }

    fn gen_div_mod(
        &self,
        op: tacky::BinaryOP,
        src1: tacky::Value,
        src2: tacky::Value,
        dst: tacky::Value,
        out: &mut Vec<asm::Instruction>,
    ) {
        let ty = self.value_size(&src1);

        out.push(asm::Instruction::Mov {
            ty,
            src: Self::convert_val(&src1),
            dst: Operand::Reg(Register::new(asm::RegName::AX, ty)),
        });
        out.push(asm::Instruction::Cdq { ty });
        out.push(asm::Instruction::Idiv {
            ty,
            src: Self::convert_val(&src2),
        });

        let result_reg = if op == tacky::BinaryOP::Mod {
            asm::RegName::DX
        } else {
            asm::RegName::AX
        };
        out.push(asm::Instruction::Mov {
            ty,
            src: Operand::Reg(Register::new(result_reg, ty)),
            dst: Self::convert_val(&dst),
        });
    }

    fn gen_comparison(
        &self,
        op: tacky::BinaryOP,
        src1: tacky::Value,
        src2: tacky::Value,
        dst: tacky::Value,
        out: &mut Vec<asm::Instruction>,
    ) {
        let ty = self.value_size(&src1);
        let d = Self::convert_val(&dst);

        out.push(asm::Instruction::Cmp {
            ty,
            src: Self::convert_val(&src2),
            dst: Self::convert_val(&src1),
        });
        out.push(asm::Instruction::Mov {
            ty: OperandSize::Long,
            src: Operand::Immediate(0),
            dst: d,
        });
        out.push(asm::Instruction::SetCC(convert_cond(op), d));
    }
}

fn convert_unary_op(op: tacky::UnaryOP) -> asm::UnaryOP {
    match op {
        tacky::UnaryOP::Complement => asm::UnaryOP::Not,
        tacky::UnaryOP::Negate => asm::UnaryOP::Neg,
        tacky::UnaryOP::Not => unreachable!("logical not is lowered by gen_logical_not directly"),
    }
}

fn convert_binary_op(op: tacky::BinaryOP) -> asm::BinaryOP {
    use tacky::BinaryOP as T;
    match op {
        T::Add => asm::BinaryOP::Add,
        T::Sub => asm::BinaryOP::Sub,
        T::Mul => asm::BinaryOP::Mul,
        T::BitAnd => asm::BinaryOP::And,
        T::BitOr => asm::BinaryOP::Or,
        T::BitXor => asm::BinaryOP::Xor,
        T::ShiftLeft => asm::BinaryOP::Shl,
        T::ShiftRight => asm::BinaryOP::Shr,
        T::Div | T::Mod | T::Equal | T::NotEqual | T::Less | T::LessEqual | T::Greater | T::GreaterEqual => {
            unreachable!("routed to a dedicated handler by gen_binary")
        }
    }
}

fn convert_cond(op: tacky::BinaryOP) -> asm::Cond {
    use tacky::BinaryOP as T;
    match op {
        T::Equal => asm::Cond::E,
        T::NotEqual => asm::Cond::NE,
        T::Greater => asm::Cond::G,
        T::GreaterEqual => asm::Cond::GE,
        T::Less => asm::Cond::L,
        T::LessEqual => asm::Cond::LE,
        _ => unreachable!("gen_comparison is only called for comparison operators"),
    }
}

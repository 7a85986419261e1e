//! Selection for conditional jumps: x86 has no direct "jump if this value
//! is zero", so both forms lower to a comparison against zero followed by
//! the matching conditional jump. Plain `Jump`/`Label` are selected
//! directly in `gen_instruction`, with no dedicated helper needed.

use crate::asm;
use crate::asm_gen::AsmGen;
use ir_gen::tacky;
use shared_context::Identifier;

impl<'ctx, 'src> AsmGen<'ctx, 'src> {
    pub(super) fn gen_jump_if_zero(&self, cond: tacky::Value, target: Identifier, out: &mut Vec<asm::Instruction>) {
        let ty = self.value_size(&cond);
        out.push(asm::Instruction::Cmp {
            ty,
            src: asm::Operand::Immediate(0),
            dst: Self::convert_val(&cond),
        });
        out.push(asm::Instruction::JmpCC(asm::Cond::E, target));
    }

    pub(super) fn gen_jump_if_not_zero(
        &self,
        cond: tacky::Value,
        target: Identifier,
        out: &mut Vec<asm::Instruction>,
    ) {
        let ty = self.value_size(&cond);
        out.push(asm::Instruction::Cmp {
            ty,
            src: asm::Operand::Immediate(0),
            dst: Self::convert_val(&cond),
        });
        out.push(asm::Instruction::JmpCC(asm::Cond::NE, target));
    }
}

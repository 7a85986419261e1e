//! Legalizes the straight-line, operand-unrestricted output of `asm_gen`
//! (after `reg_alloc` has replaced every `Pseudo` with a `Stack`/`Data`
//! location) into instructions real x86-64 can actually encode: no
//! instruction may read two memory operands at once, `idiv`'s operand and
//! a shift's count each have their own register restriction, and so on.

use crate::asm::{self, Operand, Register};
use shared_context::OperandSize;

const R10: asm::RegName = asm::RegName::R10;
const R11: asm::RegName = asm::RegName::R11;

pub struct InstructionFix;

impl InstructionFix {
    /// Rewrites every function's instruction stream in place. Runs after
    /// register allocation, since only then do operands carry the concrete
    /// `Stack`/`Data` locations whose combinations need checking.
    pub fn fix_instructions(program: &mut asm::Program) {
        for item in &mut program.items {
            if let asm::TopLevel::Function(function) = item {
                Self::fix_function(function);
            }
        }
    }

    fn fix_function(function: &mut asm::FunctionDef) {
        let mut fixed = Vec::with_capacity(function.instructions.len());

        for instr in function.instructions.drain(..) {
            match instr {
                asm::Instruction::Mov { ty, src, dst } => Self::fix_mov(ty, src, dst, &mut fixed),
                asm::Instruction::Movsx { src, dst } => Self::fix_movsx(src, dst, &mut fixed),
                asm::Instruction::Binary { op, ty, src, dst } => match op {
                    asm::BinaryOP::Add
                    | asm::BinaryOP::Sub
                    | asm::BinaryOP::And
                    | asm::BinaryOP::Or
                    | asm::BinaryOP::Xor => Self::fix_binary_mem_mem(op, ty, src, dst, &mut fixed),
                    asm::BinaryOP::Mul => Self::fix_mul(ty, src, dst, &mut fixed),
                    asm::BinaryOP::Shl | asm::BinaryOP::Shr => Self::fix_shift(op, ty, src, dst, &mut fixed),
                },
                asm::Instruction::Cmp { ty, src, dst } => Self::fix_cmp(ty, src, dst, &mut fixed),
                asm::Instruction::Idiv { ty, src } => Self::fix_idiv(ty, src, &mut fixed),

                other => fixed.push(other),
            }
        }

        function.instructions = fixed;
    }

    /// A 64-bit immediate too wide for `movq`'s 32-bit sign-extended form
    /// has to be loaded into a register first; a mem-to-mem move always
    /// needs a register waypoint too. The two never both apply to the
    /// same instruction (the first already leaves `src` in a register),
    /// so this is a plain `if`/`else if`, not a rewrite-then-rewrite.
    fn fix_mov(ty: OperandSize, src: Operand, dst: Operand, out: &mut Vec<asm::Instruction>) {
        if ty == OperandSize::Qword && is_oversized_imm(&src) {
            out.push(asm::Instruction::Mov { ty, src, dst: reg(R10, ty) });
            out.push(asm::Instruction::Mov { ty, src: reg(R10, ty), dst });
        } else if is_memory(&src) && is_memory(&dst) {
            out.push(asm::Instruction::Mov { ty, src, dst: reg(R10, ty) });
            out.push(asm::Instruction::Mov { ty, src: reg(R10, ty), dst });
        } else {
            out.push(asm::Instruction::Mov { ty, src, dst });
        }
    }

    /// `movslq` can neither read an immediate nor write to memory, unlike
    /// the `Mov` it otherwise resembles, so it always needs both ends
    /// routed through a register regardless of what `reg_alloc` handed it.
    fn fix_movsx(src: Operand, dst: Operand, out: &mut Vec<asm::Instruction>) {
        let src = if is_immediate(&src) {
            out.push(asm::Instruction::Mov {
                ty: OperandSize::Long,
                src,
                dst: reg(R10, OperandSize::Long),
            });
            reg(R10, OperandSize::Long)
        } else {
            src
        };

        out.push(asm::Instruction::Movsx { src, dst: reg(R11, OperandSize::Qword) });
        out.push(asm::Instruction::Mov {
            ty: OperandSize::Qword,
            src: reg(R11, OperandSize::Qword),
            dst,
        });
    }

    fn fix_binary_mem_mem(
        op: asm::BinaryOP,
        ty: OperandSize,
        src: Operand,
        dst: Operand,
        out: &mut Vec<asm::Instruction>,
    ) {
        if is_memory(&src) && is_memory(&dst) {
            out.push(asm::Instruction::Mov { ty, src, dst: reg(R10, ty) });
            out.push(asm::Instruction::Binary { op, ty, src: reg(R10, ty), dst });
        } else {
            out.push(asm::Instruction::Binary { op, ty, src, dst });
        }
    }

    /// `imul` refuses a memory destination outright (unlike `add`/`sub`,
    /// which only choke when *both* operands are memory), so this
    /// fix-up triggers on the destination alone.
    fn fix_mul(ty: OperandSize, src: Operand, dst: Operand, out: &mut Vec<asm::Instruction>) {
        if is_memory(&dst) {
            out.push(asm::Instruction::Mov { ty, src: dst.clone(), dst: reg(R11, ty) });
            out.push(asm::Instruction::Binary {
                op: asm::BinaryOP::Mul,
                ty,
                src,
                dst: reg(R11, ty),
            });
            out.push(asm::Instruction::Mov { ty, src: reg(R11, ty), dst });
        } else {
            out.push(asm::Instruction::Binary { op: asm::BinaryOP::Mul, ty, src, dst });
        }
    }

    /// `shl`/`shr` take their count in `%cl`, never through any other
    /// register. The count moves into `%cl` in place; the shifted
    /// value's own width and location are untouched.
    fn fix_shift(op: asm::BinaryOP, ty: OperandSize, src: Operand, dst: Operand, out: &mut Vec<asm::Instruction>) {
        if is_immediate(&src) {
            out.push(asm::Instruction::Binary { op, ty, src, dst });
            return;
        }

        out.push(asm::Instruction::Mov {
            ty: OperandSize::Byte,
            src,
            dst: reg(asm::RegName::CX, OperandSize::Byte),
        });
        out.push(asm::Instruction::Binary {
            op,
            ty,
            src: reg(asm::RegName::CX, OperandSize::Byte),
            dst,
        });
    }

    /// `cmp`'s two operands can't both be memory, and its second
    /// (destination) operand can't be an immediate. Neither condition
    /// overlaps the other, so these are two independent branches rather
    /// than a rewrite applied twice.
    fn fix_cmp(ty: OperandSize, src: Operand, dst: Operand, out: &mut Vec<asm::Instruction>) {
        if is_memory(&src) && is_memory(&dst) {
            out.push(asm::Instruction::Mov { ty, src, dst: reg(R10, ty) });
            out.push(asm::Instruction::Cmp { ty, src: reg(R10, ty), dst });
        } else if is_immediate(&dst) {
            out.push(asm::Instruction::Mov { ty, src: dst, dst: reg(R11, ty) });
            out.push(asm::Instruction::Cmp { ty, src, dst: reg(R11, ty) });
        } else {
            out.push(asm::Instruction::Cmp { ty, src, dst });
        }
    }

    /// `idiv` refuses an immediate operand outright.
    fn fix_idiv(ty: OperandSize, src: Operand, out: &mut Vec<asm::Instruction>) {
        if is_immediate(&src) {
            out.push(asm::Instruction::Mov { ty, src, dst: reg(R10, ty) });
            out.push(asm::Instruction::Idiv { ty, src: reg(R10, ty) });
        } else {
            out.push(asm::Instruction::Idiv { ty, src });
        }
    }
}

fn reg(name: asm::RegName, size: OperandSize) -> Operand {
    Operand::Reg(Register::new(name, size))
}

fn is_memory(op: &Operand) -> bool {
    matches!(op, Operand::Stack(_) | Operand::Data(_))
}

fn is_immediate(op: &Operand) -> bool {
    matches!(op, Operand::Immediate(_))
}

fn is_oversized_imm(op: &Operand) -> bool {
    matches!(op, Operand::Immediate(n) if i32::try_from(*n).is_err())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use shared_context::{Identifier, SymbolInterner};

    fn function_with(instructions: Vec<asm::Instruction>) -> asm::FunctionDef {
        let arena = Bump::new();
        let mut interner = SymbolInterner::new(&arena);
        let name = Identifier::new(interner.intern("f"), 0);
        asm::FunctionDef::new(name, true, instructions)
    }

    #[test]
    fn mem_to_mem_mov_routes_through_r10() {
        let mut function = function_with(vec![asm::Instruction::Mov {
            ty: OperandSize::Long,
            src: Operand::Stack(-4),
            dst: Operand::Stack(-8),
        }]);
        InstructionFix::fix_function(&mut function);

        assert_eq!(function.instructions.len(), 2);
        assert!(matches!(
            function.instructions[0],
            asm::Instruction::Mov { dst: Operand::Reg(_), .. }
        ));
        assert!(matches!(
            function.instructions[1],
            asm::Instruction::Mov { src: Operand::Reg(_), dst: Operand::Stack(-8), .. }
        ));
    }

    #[test]
    fn register_to_memory_mov_is_untouched() {
        let mut function = function_with(vec![asm::Instruction::Mov {
            ty: OperandSize::Long,
            src: Operand::Reg(Register::new(asm::RegName::AX, OperandSize::Long)),
            dst: Operand::Stack(-8),
        }]);
        InstructionFix::fix_function(&mut function);
        assert_eq!(function.instructions.len(), 1);
    }

    #[test]
    fn oversized_immediate_mov_routes_through_r10() {
        let mut function = function_with(vec![asm::Instruction::Mov {
            ty: OperandSize::Qword,
            src: Operand::Immediate(1_i64 << 40),
            dst: Operand::Stack(-8),
        }]);
        InstructionFix::fix_function(&mut function);
        assert_eq!(function.instructions.len(), 2);
    }

    #[test]
    fn shift_count_moves_into_cl_in_place() {
        let mut function = function_with(vec![asm::Instruction::Binary {
            op: asm::BinaryOP::Shl,
            ty: OperandSize::Long,
            src: Operand::Stack(-4),
            dst: Operand::Stack(-8),
        }]);
        InstructionFix::fix_function(&mut function);

        assert_eq!(function.instructions.len(), 2);
        match &function.instructions[0] {
            asm::Instruction::Mov { ty, dst, .. } => {
                assert_eq!(*ty, OperandSize::Byte);
                assert_eq!(*dst, Operand::Reg(Register::new(asm::RegName::CX, OperandSize::Byte)));
            }
            _ => panic!("expected a mov into %cl"),
        }
        match &function.instructions[1] {
            asm::Instruction::Binary { src, dst, .. } => {
                assert_eq!(*src, Operand::Reg(Register::new(asm::RegName::CX, OperandSize::Byte)));
                assert_eq!(*dst, Operand::Stack(-8));
            }
            _ => panic!("expected the shift to act on %cl"),
        }
    }

    #[test]
    fn shift_by_immediate_is_untouched() {
        let mut function = function_with(vec![asm::Instruction::Binary {
            op: asm::BinaryOP::Shr,
            ty: OperandSize::Long,
            src: Operand::Immediate(2),
            dst: Operand::Stack(-8),
        }]);
        InstructionFix::fix_function(&mut function);
        assert_eq!(function.instructions.len(), 1);
    }

    #[test]
    fn cmp_with_both_memory_operands_routes_through_r10() {
        let mut function = function_with(vec![asm::Instruction::Cmp {
            ty: OperandSize::Long,
            src: Operand::Stack(-4),
            dst: Operand::Stack(-8),
        }]);
        InstructionFix::fix_function(&mut function);
        assert_eq!(function.instructions.len(), 2);
    }

    #[test]
    fn cmp_with_immediate_destination_routes_through_r11() {
        let mut function = function_with(vec![asm::Instruction::Cmp {
            ty: OperandSize::Long,
            src: Operand::Stack(-4),
            dst: Operand::Immediate(5),
        }]);
        InstructionFix::fix_function(&mut function);

        assert_eq!(function.instructions.len(), 2);
        match &function.instructions[1] {
            asm::Instruction::Cmp { dst, .. } => {
                assert_eq!(*dst, Operand::Reg(Register::new(R11, OperandSize::Long)));
            }
            _ => panic!("expected the cmp to land in r11"),
        }
    }

    #[test]
    fn idiv_with_immediate_operand_routes_through_r10() {
        let mut function = function_with(vec![asm::Instruction::Idiv {
            ty: OperandSize::Long,
            src: Operand::Immediate(3),
        }]);
        InstructionFix::fix_function(&mut function);
        assert_eq!(function.instructions.len(), 2);
    }

    #[test]
    fn movsx_from_immediate_into_memory_routes_through_both_scratch_registers() {
        let mut function = function_with(vec![asm::Instruction::Movsx {
            src: Operand::Immediate(7),
            dst: Operand::Stack(-8),
        }]);
        InstructionFix::fix_function(&mut function);
        assert_eq!(function.instructions.len(), 3);
    }

    #[test]
    fn setcc_is_left_alone() {
        let mut function = function_with(vec![asm::Instruction::SetCC(asm::Cond::E, Operand::Stack(-4))]);
        InstructionFix::fix_function(&mut function);
        assert_eq!(function.instructions.len(), 1);
    }
}

//! Replaces every `Pseudo` operand with a concrete location: a `static`
//! variable becomes a `Data` reference, everything else becomes a `Stack`
//! slot in the current function's frame. Run once per function, since the
//! slot assignment (and the frame size it produces) is local to each one.

use std::collections::HashMap;

use crate::asm;
use shared_context::{Identifier, OperandSize, SymbolRegistery, convert_type_to_operand_size};

pub struct RegisterAllocation<'ctx> {
    symbol_reg: &'ctx SymbolRegistery,
    pseudo_map: HashMap<Identifier, i64>,
    sp_offset: i64,
}

impl<'ctx> RegisterAllocation<'ctx> {
    pub fn new(symbol_reg: &'ctx SymbolRegistery) -> Self {
        Self {
            symbol_reg,
            pseudo_map: HashMap::new(),
            sp_offset: 0,
        }
    }

    pub fn allocate_registers(&mut self, program: &mut asm::Program) {
        for item in &mut program.items {
            if let asm::TopLevel::Function(function) = item {
                self.allocate_function(function);
            }
        }
    }

    fn allocate_function(&mut self, function: &mut asm::FunctionDef) {
        self.pseudo_map.clear();
        self.sp_offset = 0;

        for instruction in &mut function.instructions {
            self.replace_pseudo_reg(instruction);
        }

        // Patch in the real frame size now that every local has a slot,
        // rounded up to keep %rsp 16-byte aligned across calls.
        function.instructions[0] = asm::Instruction::AllocateStack(Self::round_up_16(-self.sp_offset));
    }

    fn replace_pseudo_reg(&mut self, instruction: &mut asm::Instruction) {
        match instruction {
            asm::Instruction::Mov { src, dst, .. } => {
                self.to_stack(src);
                self.to_stack(dst);
            }
            asm::Instruction::Movsx { src, dst } => {
                self.to_stack(src);
                self.to_stack(dst);
            }
            asm::Instruction::Unary { dst, .. } => self.to_stack(dst),
            asm::Instruction::Binary { src, dst, .. } => {
                self.to_stack(src);
                self.to_stack(dst);
            }
            asm::Instruction::Cmp { src, dst, .. } => {
                self.to_stack(src);
                self.to_stack(dst);
            }
            asm::Instruction::Idiv { src, .. } => self.to_stack(src),
            asm::Instruction::SetCC(_, dst) => self.to_stack(dst),
            asm::Instruction::Push(op) => self.to_stack(op),

            // No operands, or operands that are never pseudo-registers.
            asm::Instruction::Cdq { .. }
            | asm::Instruction::Jmp(_)
            | asm::Instruction::JmpCC(_, _)
            | asm::Instruction::Label(_)
            | asm::Instruction::AllocateStack(_)
            | asm::Instruction::DeallocateStack(_)
            | asm::Instruction::Call(_)
            | asm::Instruction::Ret => (),
        }
    }

    fn to_stack(&mut self, operand: &mut asm::Operand) {
        let asm::Operand::Pseudo(id) = operand else {
            return;
        };
        let id = *id;

        if self.symbol_reg.get_variable(&id).is_static() {
            *operand = asm::Operand::Data(id);
            return;
        }

        if let Some(offset) = self.pseudo_map.get(&id) {
            *operand = asm::Operand::Stack(*offset);
            return;
        }

        let size = Self::size_bytes(convert_type_to_operand_size(self.symbol_reg.get_variable(&id).get_type()));
        self.sp_offset -= size;
        self.sp_offset = Self::align_down(self.sp_offset, size);

        self.pseudo_map.insert(id, self.sp_offset);
        *operand = asm::Operand::Stack(self.sp_offset);
    }

    fn size_bytes(size: OperandSize) -> i64 {
        match size {
            OperandSize::Byte => 1,
            OperandSize::Long => 4,
            OperandSize::Qword => 8,
        }
    }

    /// Rounds a negative offset further negative so its magnitude is a
    /// multiple of `align`, keeping an 8-byte local from straddling the
    /// boundary a 4-byte one left behind.
    fn align_down(offset: i64, align: i64) -> i64 {
        let rem = offset.rem_euclid(align);
        if rem == 0 { offset } else { offset - (align - rem) }
    }

    fn round_up_16(n: i64) -> i64 {
        if n % 16 == 0 { n } else { n + (16 - n % 16) }
    }
}

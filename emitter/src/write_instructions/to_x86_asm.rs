use codegen::asm;
use codegen::error::CodeGenErr;
use shared_context::OperandSize;

use crate::Emitter;

impl<'a> Emitter<'a> {
    /// Converts an operand to its AT&T-syntax text. A register's own
    /// `size` already picks the right name (`%eax` vs `%rax`); every other
    /// operand kind's text is width-independent.
    ///
    /// A surviving `Pseudo` means register allocation missed it; that's a
    /// back-end bug, reported as `CodeGenErr::Invariant` rather than a
    /// panic so it surfaces as a normal diagnostic.
    pub(crate) fn convert_operand(&self, operand: asm::Operand) -> Result<String, CodeGenErr> {
        Ok(match operand {
            asm::Operand::Immediate(n) => format!("${n}"),
            asm::Operand::Stack(offset) => format!("{offset}(%rbp)"),
            asm::Operand::Data(name) => format!("{}(%rip)", self.format_identifier(name)),
            asm::Operand::Reg(reg) => Self::convert_register(reg),
            asm::Operand::Pseudo(_) => {
                return Err(CodeGenErr::Invariant(
                    "pseudo-register survived register allocation".to_string(),
                ));
            }
        })
    }

    fn convert_register(register: asm::Register) -> String {
        match register.size {
            OperandSize::Byte => Self::convert_1_byte_reg(register.name),
            OperandSize::Long => Self::convert_4_byte_reg(register.name),
            OperandSize::Qword => Self::convert_8_byte_reg(register.name),
        }
    }

    fn convert_8_byte_reg(name: asm::RegName) -> String {
        match name {
            asm::RegName::AX => "%rax".to_string(),
            asm::RegName::CX => "%rcx".to_string(),
            asm::RegName::DX => "%rdx".to_string(),
            asm::RegName::SI => "%rsi".to_string(),
            asm::RegName::DI => "%rdi".to_string(),
            asm::RegName::R8 => "%r8".to_string(),
            asm::RegName::R9 => "%r9".to_string(),
            asm::RegName::R10 => "%r10".to_string(),
            asm::RegName::R11 => "%r11".to_string(),
        }
    }

    fn convert_4_byte_reg(name: asm::RegName) -> String {
        match name {
            asm::RegName::AX => "%eax".to_string(),
            asm::RegName::CX => "%ecx".to_string(),
            asm::RegName::DX => "%edx".to_string(),
            asm::RegName::SI => "%esi".to_string(),
            asm::RegName::DI => "%edi".to_string(),
            asm::RegName::R8 => "%r8d".to_string(),
            asm::RegName::R9 => "%r9d".to_string(),
            asm::RegName::R10 => "%r10d".to_string(),
            asm::RegName::R11 => "%r11d".to_string(),
        }
    }

    fn convert_1_byte_reg(name: asm::RegName) -> String {
        match name {
            asm::RegName::AX => "%al".to_string(),
            asm::RegName::CX => "%cl".to_string(),
            asm::RegName::DX => "%dl".to_string(),
            asm::RegName::SI => "%sil".to_string(),
            asm::RegName::DI => "%dil".to_string(),
            asm::RegName::R8 => "%r8b".to_string(),
            asm::RegName::R9 => "%r9b".to_string(),
            asm::RegName::R10 => "%r10b".to_string(),
            asm::RegName::R11 => "%r11b".to_string(),
        }
    }

    pub(crate) fn unary_mnemonic(op: asm::UnaryOP) -> &'static str {
        match op {
            asm::UnaryOP::Neg => "neg",
            asm::UnaryOP::Not => "not",
        }
    }

    /// Bitwise operators and `Add`/`Sub` share their AT&T mnemonic with
    /// their C spelling; `Mul` always means the signed form (`imul`) since
    /// this language has no unsigned types, and a right shift of a signed
    /// value is always arithmetic (`sar`), never logical (`shr`).
    pub(crate) fn binary_mnemonic(op: asm::BinaryOP) -> &'static str {
        match op {
            asm::BinaryOP::Add => "add",
            asm::BinaryOP::Sub => "sub",
            asm::BinaryOP::Mul => "imul",
            asm::BinaryOP::And => "and",
            asm::BinaryOP::Or => "or",
            asm::BinaryOP::Xor => "xor",
            asm::BinaryOP::Shl => "shl",
            asm::BinaryOP::Shr => "sar",
        }
    }
}

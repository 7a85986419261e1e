use crate::{Emitter, EmitError};
use codegen::asm;
use shared_context::asm_symbol_table::AsmSymbolEntry;
use shared_context::options::HostOs;
use shared_context::{Identifier, OperandSize};
use std::io;

mod to_x86_asm;

impl<'a> Emitter<'a> {
    /// Writes a single `asm::Instruction` to the output buffer.
    pub(crate) fn write_instruction(
        &self,
        instr: asm::Instruction,
        out: &mut impl io::Write,
    ) -> Result<(), EmitError> {
        match instr {
            asm::Instruction::Mov { ty, src, dst } => self.write_mov(ty, src, dst, out),
            asm::Instruction::Movsx { src, dst } => self.write_movsx(src, dst, out),
            asm::Instruction::Unary { op, ty, dst } => self.write_unary_instruction(op, ty, dst, out),
            asm::Instruction::Binary { op, ty, src, dst } => {
                self.write_binary_instruction(op, ty, src, dst, out)
            }
            asm::Instruction::Cmp { ty, src, dst } => self.write_cmp_instruction(ty, src, dst, out),
            asm::Instruction::Idiv { ty, src } => self.write_div_instruction(ty, src, out),
            asm::Instruction::Cdq { ty } => Ok(self.write_cdq_instruction(ty, out)?),
            asm::Instruction::Jmp(label) => Ok(self.write_jmp_instruction(label, out)?),
            asm::Instruction::JmpCC(cond, label) => self.write_jmpcc_instruction(cond, label, out),
            asm::Instruction::SetCC(cond, dst) => self.write_setcc_instruction(cond, dst, out),
            asm::Instruction::Label(label) => Ok(self.write_label(label, out)?),
            asm::Instruction::AllocateStack(size) => {
                Ok(self.write_stack_allocate_instruction(size, out)?)
            }
            asm::Instruction::DeallocateStack(size) => {
                Ok(self.write_stack_deallocate_instruction(size, out)?)
            }
            asm::Instruction::Push(src) => self.write_push_instruction(src, out),
            asm::Instruction::Call(name) => Ok(self.write_call_instruction(name, out)?),
            asm::Instruction::Ret => Ok(self.write_return_instruction(out)?),
        }
    }

    fn write_mov(
        &self,
        ty: OperandSize,
        src: asm::Operand,
        dst: asm::Operand,
        out: &mut impl io::Write,
    ) -> Result<(), EmitError> {
        let op = format!("mov{}", ty.suffix());
        let src = self.convert_operand(src)?;
        let dst = self.convert_operand(dst)?;
        Ok(self.format_two_operand_instruction(&op, &src, &dst, out)?)
    }

    /// `movslq`: the only cast this language ever emits, always 4 bytes
    /// sign-extended into 8.
    fn write_movsx(
        &self,
        src: asm::Operand,
        dst: asm::Operand,
        out: &mut impl io::Write,
    ) -> Result<(), EmitError> {
        let src = self.convert_operand(src)?;
        let dst = self.convert_operand(dst)?;
        Ok(self.format_two_operand_instruction("movslq", &src, &dst, out)?)
    }

    fn write_unary_instruction(
        &self,
        op: asm::UnaryOP,
        ty: OperandSize,
        dst: asm::Operand,
        out: &mut impl io::Write,
    ) -> Result<(), EmitError> {
        let op = format!("{}{}", Self::unary_mnemonic(op), ty.suffix());
        let dst = self.convert_operand(dst)?;
        Ok(self.format_one_operand_instruction(&op, &dst, out)?)
    }

    fn write_binary_instruction(
        &self,
        op: asm::BinaryOP,
        ty: OperandSize,
        src: asm::Operand,
        dst: asm::Operand,
        out: &mut impl io::Write,
    ) -> Result<(), EmitError> {
        let op = format!("{}{}", Self::binary_mnemonic(op), ty.suffix());
        let src = self.convert_operand(src)?;
        let dst = self.convert_operand(dst)?;
        Ok(self.format_two_operand_instruction(&op, &src, &dst, out)?)
    }

    fn write_div_instruction(
        &self,
        ty: OperandSize,
        src: asm::Operand,
        out: &mut impl io::Write,
    ) -> Result<(), EmitError> {
        let op = format!("idiv{}", ty.suffix());
        let src = self.convert_operand(src)?;
        Ok(self.format_one_operand_instruction(&op, &src, out)?)
    }

    /// `cltd`/`cqto` sign-extend `%eax`/`%rax` into `%edx:%eax`/`%rdx:%rax`
    /// ahead of `idiv`; AT&T spells what Intel calls `cdq`/`cqo` this way.
    fn write_cdq_instruction(&self, ty: OperandSize, out: &mut impl io::Write) -> io::Result<()> {
        let op = match ty {
            OperandSize::Qword => "cqto",
            _ => "cltd",
        };
        writeln!(out, "\t{op}")
    }

    fn write_stack_allocate_instruction(&self, size: i64, out: &mut impl io::Write) -> io::Result<()> {
        let src = format!("${size}");
        self.format_two_operand_instruction("subq", &src, "%rsp", out)
    }

    fn write_stack_deallocate_instruction(&self, size: i64, out: &mut impl io::Write) -> io::Result<()> {
        let src = format!("${size}");
        self.format_two_operand_instruction("addq", &src, "%rsp", out)
    }

    fn write_return_instruction(&self, out: &mut impl io::Write) -> io::Result<()> {
        self.format_two_operand_instruction("movq", "%rbp", "%rsp", out)?;
        self.format_one_operand_instruction("popq", "%rbp", out)?;
        out.write_all(b"\tret\n")
    }

    fn write_cmp_instruction(
        &self,
        ty: OperandSize,
        src: asm::Operand,
        dst: asm::Operand,
        out: &mut impl io::Write,
    ) -> Result<(), EmitError> {
        let op = format!("cmp{}", ty.suffix());
        let src = self.convert_operand(src)?;
        let dst = self.convert_operand(dst)?;
        Ok(self.format_two_operand_instruction(&op, &src, &dst, out)?)
    }

    fn write_jmp_instruction(&self, label: Identifier, out: &mut impl io::Write) -> io::Result<()> {
        let target = self.format_label(label);
        self.format_one_operand_instruction("jmp", &target, out)
    }

    fn write_jmpcc_instruction(
        &self,
        cond: asm::Cond,
        label: Identifier,
        out: &mut impl io::Write,
    ) -> Result<(), EmitError> {
        let op = format!("j{}", Self::cond_suffix(cond));
        let target = self.format_label(label);
        Ok(self.format_one_operand_instruction(&op, &target, out)?)
    }

    fn write_setcc_instruction(
        &self,
        cond: asm::Cond,
        dst: asm::Operand,
        out: &mut impl io::Write,
    ) -> Result<(), EmitError> {
        let op = format!("set{}", Self::cond_suffix(cond));
        let dst = self.convert_operand(dst)?;
        Ok(self.format_one_operand_instruction(&op, &dst, out)?)
    }

    fn write_push_instruction(
        &self,
        src: asm::Operand,
        out: &mut impl io::Write,
    ) -> Result<(), EmitError> {
        let src = self.convert_operand(src)?;
        Ok(self.format_one_operand_instruction("pushq", &src, out)?)
    }

    fn write_call_instruction(&self, name: Identifier, out: &mut impl io::Write) -> io::Result<()> {
        let mut fun_name = self.format_identifier(name);
        if let AsmSymbolEntry::Fun { is_defined } = self.asm_symbols.get(name) {
            // `@PLT` is an ELF-linker convention (Linux/FreeBSD); Mach-O
            // resolves undefined calls through its own lazy stubs without
            // any assembly-level annotation.
            if !is_defined && self.host_os != HostOs::MacOs {
                fun_name.push_str("@PLT");
            }
        }
        self.format_one_operand_instruction("call", &fun_name, out)
    }

    fn write_label(&self, label: Identifier, out: &mut impl io::Write) -> io::Result<()> {
        writeln!(out, "{}:", self.format_label(label))
    }

    fn cond_suffix(cond: asm::Cond) -> &'static str {
        match cond {
            asm::Cond::E => "e",
            asm::Cond::NE => "ne",
            asm::Cond::G => "g",
            asm::Cond::GE => "ge",
            asm::Cond::L => "l",
            asm::Cond::LE => "le",
        }
    }

    /// format a two-operand instruction and write it into out
    pub(crate) fn format_two_operand_instruction(
        &self,
        op: &str,
        src: &str,
        dst: &str,
        out: &mut impl io::Write,
    ) -> io::Result<()> {
        writeln!(out, "\t{}\t{}, {}", op, src, dst)
    }

    /// format a single-operand instruction and write it into out
    pub(crate) fn format_one_operand_instruction(
        &self,
        op: &str,
        dst: &str,
        out: &mut impl io::Write,
    ) -> io::Result<()> {
        writeln!(out, "\t{}\t{}", op, dst)
    }
}

//! Text emission: walks the finished x86-64 `asm::Program` and writes GAS
//! syntax, adapting symbol names, local-label spelling, and the trailing
//! section directive to whichever host assembler is going to read it.

use codegen::asm;
use shared_context::asm_symbol_table::AsmSymbolTable;
use shared_context::options::HostOs;
use shared_context::{Identifier, SymbolInterner};
use std::io;

pub mod error;
mod write_instructions;
mod write_static_variables;

pub use error::EmitError;

/// Everything emission needs beyond the `asm::Program` tree itself: name
/// resolution for `Identifier`s, and which host's assembler conventions to
/// follow.
pub struct Emitter<'a> {
    sy_interner: &'a SymbolInterner<'a>,
    asm_symbols: &'a AsmSymbolTable,
    host_os: HostOs,
}

impl<'a> Emitter<'a> {
    pub fn new(
        sy_interner: &'a SymbolInterner<'a>,
        asm_symbols: &'a AsmSymbolTable,
        host_os: HostOs,
    ) -> Self {
        Self {
            sy_interner,
            asm_symbols,
            host_os,
        }
    }

    /// Writes the full program, in order, followed by the host-appropriate
    /// trailer.
    pub fn write_program(&self, program: asm::Program, out: &mut impl io::Write) -> Result<(), EmitError> {
        for item in program.items {
            match item {
                asm::TopLevel::Function(function) => self.write_function_def(function, out)?,
                asm::TopLevel::StaticVariable(var) => self.write_static_variable(var, out)?,
            }
        }
        Ok(self.write_trailer(out)?)
    }

    fn write_function_def(&self, function: asm::FunctionDef, out: &mut impl io::Write) -> Result<(), EmitError> {
        writeln!(out, "\t.text")?;
        if function.global {
            writeln!(out, "\t.globl {}", self.format_identifier(function.name))?;
        }
        writeln!(out, "{}:", self.format_identifier(function.name))?;
        writeln!(out, "\tpushq\t%rbp")?;
        writeln!(out, "\tmovq\t%rsp, %rbp")?;

        for instr in function.instructions {
            self.write_instruction(instr, out)?;
        }
        Ok(())
    }

    /// `.note.GNU-stack` tells the linker this object needs no executable
    /// stack; ELF-based hosts expect it on every object or fall back to an
    /// executable stack by default, but Mach-O has no such section.
    fn write_trailer(&self, out: &mut impl io::Write) -> io::Result<()> {
        match self.host_os {
            HostOs::MacOs => Ok(()),
            HostOs::Linux | HostOs::FreeBsd => {
                writeln!(out, "\t.section .note.GNU-stack,\"\",@progbits")
            }
        }
    }

    /// Resolves a global (function or static-storage-duration) name,
    /// applying macOS's leading-underscore convention.
    fn format_identifier(&self, name: Identifier) -> String {
        let spelling = self.sy_interner.lookup(name.get_symbol());
        match self.host_os {
            HostOs::MacOs => format!("_{spelling}"),
            HostOs::Linux | HostOs::FreeBsd => spelling.to_string(),
        }
    }

    /// Resolves a compiler-generated, function-local label: no underscore
    /// prefix (it's never a linker-visible symbol), just the OS's local
    /// label marker.
    fn format_label(&self, label: Identifier) -> String {
        format!(
            "{}{}",
            self.local_label_prefix(),
            self.sy_interner.lookup(label.get_symbol())
        )
    }

    /// `.L` is the traditional ELF local-label prefix (stripped from the
    /// symbol table, so it never collides with a real linker symbol);
    /// Mach-O assemblers use a bare `L` instead.
    fn local_label_prefix(&self) -> &'static str {
        match self.host_os {
            HostOs::MacOs => "L",
            HostOs::Linux | HostOs::FreeBsd => ".L",
        }
    }
}

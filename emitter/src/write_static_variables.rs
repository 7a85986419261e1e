use crate::{Emitter, EmitError};
use codegen::asm::StaticVariable;
use shared_context::symbol_table::{InitValue, StaticInit};
use shared_context::Identifier;
use std::io;

impl<'a> Emitter<'a> {
    /// Writes a static variable with the proper section, alignment, and
    /// initializer; `reg_alloc` already settled its final `alignment`, so
    /// this only has to pick `.data` vs `.bss` and format the value.
    pub(crate) fn write_static_variable(
        &self,
        var: StaticVariable,
        out: &mut impl io::Write,
    ) -> Result<(), EmitError> {
        if var.global {
            writeln!(out, "\t.globl {}", self.format_identifier(var.name))?;
        }

        match var.init {
            InitValue::Initial(init) if !Self::is_zero(init) => {
                Ok(self.emit_data(out, var.name, var.alignment, init)?)
            }
            // A zero initializer is indistinguishable from a tentative
            // definition once placement is decided: both are zero-filled
            // storage, so both go in `.bss`.
            InitValue::Initial(_) | InitValue::Tentative | InitValue::NoInitializer => {
                Ok(self.emit_bss(out, var.name, var.alignment)?)
            }
        }
    }

    fn is_zero(init: StaticInit) -> bool {
        match init {
            StaticInit::Int(i) => i == 0,
            StaticInit::Long(l) => l == 0,
        }
    }

    /// `long`/`quad` track the two sizes this language's static objects can
    /// have (4-byte `int`, 8-byte `long`); alignment and size coincide for
    /// both, per `Type::align_bytes`.
    fn directive_for(alignment: usize) -> &'static str {
        if alignment >= 8 { "quad" } else { "long" }
    }

    fn static_init_value(init: StaticInit) -> i64 {
        match init {
            StaticInit::Int(i) => i as i64,
            StaticInit::Long(l) => l,
        }
    }

    fn emit_bss(&self, out: &mut impl io::Write, name: Identifier, alignment: usize) -> io::Result<()> {
        writeln!(
            out,
            "\t.bss\n\t.align {}\n{}:\n\t.zero {}",
            alignment,
            self.format_identifier(name),
            alignment,
        )
    }

    fn emit_data(
        &self,
        out: &mut impl io::Write,
        name: Identifier,
        alignment: usize,
        init: StaticInit,
    ) -> io::Result<()> {
        writeln!(
            out,
            "\t.data\n\t.align {}\n{}:\n\t.{} {}",
            alignment,
            self.format_identifier(name),
            Self::directive_for(alignment),
            Self::static_init_value(init),
        )
    }
}

//! Human-readable dump of the final assembly tree, with every `Identifier`
//! resolved back to its spelling. Useful from the driver's `--codegen`
//! stage, since a bare `{:?}` derive would only ever show raw symbol ids.

use crate::DebuggingPrinter;
use crate::asm;

impl<'a> DebuggingPrinter<'a> {
    pub fn print(&self, program: &asm::Program) {
        println!("Program");
        for item in &program.items {
            match item {
                asm::TopLevel::Function(function) => self.print_function(function),
                asm::TopLevel::StaticVariable(var) => self.print_static_variable(var),
            }
        }
    }

    fn name(&self, iden: shared_context::Identifier) -> &str {
        self.sy_interner.lookup(iden.get_symbol())
    }

    fn print_function(&self, function: &asm::FunctionDef) {
        let indent = " ".repeat(2);
        println!(
            "{}FunctionDef {} (global: {})",
            indent,
            self.name(function.name),
            function.global
        );

        for instr in &function.instructions {
            self.print_instruction(instr);
        }
    }

    fn print_static_variable(&self, var: &asm::StaticVariable) {
        let indent = " ".repeat(2);
        println!(
            "{}StaticVariable {} (global: {}, align: {})",
            indent,
            self.name(var.name),
            var.global,
            var.alignment
        );
    }

    fn print_instruction(&self, instr: &asm::Instruction) {
        let indent = " ".repeat(4);

        match *instr {
            asm::Instruction::Mov { ty, src, dst } => {
                println!("{indent}Mov{{ty: {ty:?}, src: {src:?}, dst: {dst:?}}}");
            }
            asm::Instruction::Movsx { src, dst } => {
                println!("{indent}Movsx{{src: {src:?}, dst: {dst:?}}}");
            }
            asm::Instruction::Unary { op, ty, dst } => {
                println!("{indent}Unary{{op: {op:?}, ty: {ty:?}, dst: {dst:?}}}");
            }
            asm::Instruction::Binary { op, ty, src, dst } => {
                println!("{indent}Binary{{op: {op:?}, ty: {ty:?}, src: {src:?}, dst: {dst:?}}}");
            }
            asm::Instruction::Cmp { ty, src, dst } => {
                println!("{indent}Cmp{{ty: {ty:?}, src: {src:?}, dst: {dst:?}}}");
            }
            asm::Instruction::Idiv { ty, src } => {
                println!("{indent}Idiv{{ty: {ty:?}, src: {src:?}}}");
            }
            asm::Instruction::Cdq { ty } => {
                println!("{indent}Cdq{{ty: {ty:?}}}");
            }
            asm::Instruction::Jmp(label) => {
                println!("{indent}Jmp({})", self.name(label));
            }
            asm::Instruction::JmpCC(cond, label) => {
                println!("{indent}JmpCC(cond: {cond:?}, label: {})", self.name(label));
            }
            asm::Instruction::SetCC(cond, dst) => {
                println!("{indent}SetCC(cond: {cond:?}, dst: {dst:?})");
            }
            asm::Instruction::Label(label) => {
                println!("{indent}Label({})", self.name(label));
            }
            asm::Instruction::AllocateStack(size) => {
                println!("{indent}AllocateStack({size})");
            }
            asm::Instruction::DeallocateStack(size) => {
                println!("{indent}DeallocateStack({size})");
            }
            asm::Instruction::Push(src) => {
                println!("{indent}Push({src:?})");
            }
            asm::Instruction::Call(name) => {
                println!("{indent}Call({})", self.name(name));
            }
            asm::Instruction::Ret => {
                println!("{indent}Ret");
            }
        }
    }
}

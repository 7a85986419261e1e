//! A minimal, parallel machine-IR shape for AArch64.
//!
//! Enough to show where a second target would live, not a working back
//! end: only `return <constant>;` and an empty-bodied function lower to
//! anything. Everything else reports [`CodeGenErr::Unsupported`] rather
//! than silently miscompiling. There is no register allocation or fix-up
//! pass here, since the handful of supported constructs never produce a
//! `Pseudo` operand in the first place.

use crate::error::CodeGenErr;
use ir_gen::tacky;
use shared_context::SymbolInterner;
use shared_context::Identifier;

pub struct Program {
    pub functions: Vec<FunctionDef>,
}

pub struct FunctionDef {
    pub name: Identifier,
    pub global: bool,
    pub instructions: Vec<Instruction>,
}

/// A representative handful of AArch64 mnemonics, plus a catch-all for
/// everything the skeleton doesn't lower.
pub enum Instruction {
    Mov { imm: i64 },
    Ret,
    Label(Identifier),
    Unimplemented(&'static str),
}

/// Lowers a `tacky::Program` to the AArch64 skeleton, or the first
/// construct it has no rule for.
pub fn lower(program: tacky::Program) -> Result<Program, CodeGenErr> {
    let mut functions = Vec::new();
    for item in program.items {
        match item {
            tacky::TopLevel::Function(f) => functions.push(lower_function(f)?),
            tacky::TopLevel::StaticVariable(_) => {
                return Err(CodeGenErr::Unsupported(
                    "aarch64: static-storage-duration variables".to_string(),
                ));
            }
        }
    }
    Ok(Program { functions })
}

fn lower_function(function: tacky::FunctionDef) -> Result<FunctionDef, CodeGenErr> {
    if !function.params.is_empty() {
        return Err(CodeGenErr::Unsupported("aarch64: function parameters".to_string()));
    }

    let mut instructions = Vec::new();
    for instr in function.instructions {
        match instr {
            tacky::Instruction::Return(tacky::Value::Constant(n)) => {
                instructions.push(Instruction::Mov { imm: n });
                instructions.push(Instruction::Ret);
            }
            tacky::Instruction::Label(label) => instructions.push(Instruction::Label(label)),
            other => return Err(CodeGenErr::Unsupported(format!("aarch64: {}", instr_kind(&other)))),
        }
    }

    Ok(FunctionDef {
        name: function.name,
        global: function.global,
        instructions,
    })
}

/// `tacky::Instruction` carries no `Debug` impl, so name each variant by
/// hand for this diagnostic.
fn instr_kind(instr: &tacky::Instruction) -> &'static str {
    match instr {
        tacky::Instruction::Return(_) => "a non-constant return",
        tacky::Instruction::Unary { .. } => "a unary operator",
        tacky::Instruction::Binary { .. } => "a binary operator",
        tacky::Instruction::Copy { .. } => "a copy",
        tacky::Instruction::SignExtend { .. } => "a sign-extension",
        tacky::Instruction::Truncate { .. } => "a truncation",
        tacky::Instruction::Jump(_) => "an unconditional jump",
        tacky::Instruction::JumpIfZero { .. } => "a conditional jump",
        tacky::Instruction::JumpIfNotZero { .. } => "a conditional jump",
        tacky::Instruction::Label(_) => "a label",
        tacky::Instruction::FunCall { .. } => "a function call",
    }
}

/// Direct-to-text printer for the supported subset; there is nothing to
/// fix up or allocate first.
pub fn print_program(program: &Program, sy_interner: &SymbolInterner) -> String {
    let mut out = String::new();
    for function in &program.functions {
        let name = sy_interner.lookup(function.name.get_symbol());
        if function.global {
            out.push_str(&format!("\t.globl {name}\n"));
        }
        out.push_str(&format!("{name}:\n"));
        for instr in &function.instructions {
            match instr {
                Instruction::Mov { imm } => out.push_str(&format!("\tmov\tw0, #{imm}\n")),
                Instruction::Ret => out.push_str("\tret\n"),
                Instruction::Label(label) => {
                    out.push_str(&format!("{}:\n", sy_interner.lookup(label.get_symbol())));
                }
                Instruction::Unimplemented(what) => {
                    out.push_str(&format!("\t// unimplemented: {what}\n"));
                }
            }
        }
    }
    out
}

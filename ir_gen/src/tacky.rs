//! Three-address-code intermediate representation.
//!
//! A flattened, instruction-based lowering of the AST with unbounded
//! virtual registers (`Value::Variable`), sitting between semantic
//! analysis and the machine-specific back ends.

mod instructions;
pub use instructions::{BinaryOP, Instruction, UnaryOP, Value};
use shared_context::symbol_table::InitValue;
use shared_context::{Identifier, Type};

pub struct Program {
    pub items: Vec<TopLevel>,
}

impl Program {
    pub fn new(items: Vec<TopLevel>) -> Self {
        Self { items }
    }
}

pub enum TopLevel {
    Function(FunctionDef),
    StaticVariable(StaticVariable),
}

/// A function body: parameters are carried as plain names, already
/// disambiguated by identifier resolution, to be moved out of their
/// calling-convention registers/stack slots by the back end's prologue.
pub struct FunctionDef {
    pub name: Identifier,
    pub params: Vec<Identifier>,
    pub global: bool,
    pub instructions: Vec<Instruction>,
}

impl FunctionDef {
    pub fn new(name: Identifier, params: Vec<Identifier>, global: bool, instructions: Vec<Instruction>) -> Self {
        Self {
            name,
            params,
            global,
            instructions,
        }
    }
}

pub struct StaticVariable {
    pub name: Identifier,
    pub global: bool,
    pub var_type: Type,
    pub init: InitValue,
}

impl StaticVariable {
    pub fn new(name: Identifier, global: bool, var_type: Type, init: InitValue) -> Self {
        Self {
            name,
            global,
            var_type,
            init,
        }
    }
}

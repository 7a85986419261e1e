//! IR (intermediate representation) generator.
//!
//! Lowers the type-checked, control-flow-labeled AST into `tacky`: a flat,
//! three-address-code form with unbounded virtual registers. Structurally
//! this is a straight-line walk of the AST; all the hard control-flow
//! decisions (which label a `break`/`continue`/`case`/`default` targets)
//! were already made by the semantic analyser and just need to be turned
//! into jumps here.

pub mod tacky;

use parser::ast;
use shared_context::symbol_table::{EntryType, IdenAttrs, InitValue, SymbolTable};
use shared_context::symbol_interner::SymbolInterner;
use shared_context::{Identifier, Span, SpannedIdentifier, Type};

mod gen_expressions;
mod gen_statements;
pub mod print_ir;

/// Entry point for IR generation: consumes a checked AST and the final
/// symbol table and produces a `tacky::Program`.
///
/// `var_counter` is the running name counter handed off by the semantic
/// analyser's identifier-resolution and control-flow passes, so temporaries
/// and labels minted here never collide with a renamed local or a
/// loop/switch label. `symbol_table` is borrowed mutably because every
/// compiler-generated temporary is registered into it with its type, the
/// same way a source-level local would be; the back end looks types up
/// there uniformly, with no separate notion of a "temporary's type".
pub fn lower_to_tacky<'src, 'ctx>(
    program: ast::Program,
    sy_interner: &'ctx mut SymbolInterner<'src>,
    symbol_table: &mut SymbolTable,
    var_counter: usize,
) -> tacky::Program {
    let mut ir_gen = IRgen::new(var_counter, sy_interner, symbol_table);
    ir_gen.gen_tacky(program)
}

/// Generates `tacky` from a type-checked AST.
///
/// Owns the running name counter used to mint fresh temporaries and
/// labels, the string interner needed to turn their spellings into
/// `Identifier`s, and a mutable handle on the symbol table so minted
/// temporaries can be typed the same way any other local is.
pub struct IRgen<'src, 'ctx> {
    var_counter: usize,
    sy_interner: &'ctx mut SymbolInterner<'src>,
    symbol_table: &'ctx mut SymbolTable,
}

impl<'src, 'ctx> IRgen<'src, 'ctx> {
    pub fn new(
        var_counter: usize,
        sy_interner: &'ctx mut SymbolInterner<'src>,
        symbol_table: &'ctx mut SymbolTable,
    ) -> Self {
        Self {
            var_counter,
            sy_interner,
            symbol_table,
        }
    }

    /// Mints a fresh compile-time temporary of type `ty` (`tmp.0`, `tmp.1`,
    /// ...), registered into the symbol table exactly like a source-level
    /// local so the back end can look its size up uniformly.
    ///
    /// The `.` is deliberate: it can never appear in a valid C identifier,
    /// so a temp's spelling can never collide with a source name.
    fn make_temp_var(&mut self, ty: Type) -> tacky::Value {
        let text = format!("tmp.{}", self.var_counter);
        self.var_counter += 1;
        let symbol = self.sy_interner.intern(&text);
        let id = Identifier::new(symbol, 0);

        let sp_iden = SpannedIdentifier::new(id, Span::default());
        self.symbol_table.add(sp_iden, EntryType::Scalar(ty), IdenAttrs::LocalAttrs);

        tacky::Value::Variable(id)
    }

    /// Mints a fresh control-flow label (`label_0`, `label_1`, ...), in the
    /// same counter/spelling scheme the control-flow pass uses for loop and
    /// switch labels.
    fn make_label(&mut self) -> Identifier {
        let text = format!("label_{}", self.var_counter);
        self.var_counter += 1;
        Identifier::new(self.sy_interner.intern(&text), 0)
    }

    /// The `break` target derived from a loop or switch's own label.
    fn break_label(&mut self, label: Identifier) -> Identifier {
        self.suffixed_label(label, "break")
    }

    /// The `continue` target derived from a loop's own label.
    fn continue_label(&mut self, label: Identifier) -> Identifier {
        self.suffixed_label(label, "continue")
    }

    fn suffixed_label(&mut self, label: Identifier, suffix: &str) -> Identifier {
        let text = format!("{}_{}", self.sy_interner.lookup(label.get_symbol()), suffix);
        Identifier::new(self.sy_interner.intern(&text), 0)
    }

    /// Translates a checked `ast::Program` into `tacky`: one `Function` item
    /// per function *definition* (prototypes without a body contribute
    /// nothing), plus one `StaticVariable` item per static-storage-duration
    /// object the symbol table recorded that actually needs storage.
    pub fn gen_tacky(&mut self, program: ast::Program) -> tacky::Program {
        let mut items = Vec::new();

        for decl in program.declarations {
            if let ast::Declaration::FunDecl(f) = decl {
                if let Some(function) = self.gen_function_def(f) {
                    items.push(tacky::TopLevel::Function(function));
                }
            }
        }

        for static_var in gen_static_variables(self.symbol_table) {
            items.push(tacky::TopLevel::StaticVariable(static_var));
        }

        tacky::Program::new(items)
    }

    /// Lowers one function *definition*; returns `None` for a bodiless
    /// declaration, which exists only to satisfy the type checker and
    /// carries no code of its own.
    fn gen_function_def(&mut self, function: ast::FunctionDecl) -> Option<tacky::FunctionDef> {
        let body = function.body?;
        let global = function.storage_class != ast::StorageClass::Static;
        let name = function.name.get_identifier();
        let params = function
            .params
            .iter()
            .map(|p| p.get_identifier())
            .collect();

        let mut instructions = Vec::new();
        self.gen_function_block(body, &mut instructions);

        Some(tacky::FunctionDef::new(name, params, global, instructions))
    }

    /// Lowers a function's top-level block, appending an implicit
    /// `return 0` so a function whose source falls off the end (a validly
    /// ill-formed but common case for non-`void`-returning functions in
    /// practice) still ends in a `Return`.
    fn gen_function_block(&mut self, block: ast::Block, instructions: &mut Vec<tacky::Instruction>) {
        self.gen_block(block, instructions);
        instructions.push(tacky::Instruction::Return(tacky::Value::Constant(0)));
    }

    /// Lowers a `{ ... }` block with no implicit trailing return.
    fn gen_block(&mut self, block: ast::Block, instructions: &mut Vec<tacky::Instruction>) {
        for item in block.items {
            self.gen_block_item(item, instructions);
        }
    }

    fn gen_block_item(&mut self, item: ast::BlockItem, instructions: &mut Vec<tacky::Instruction>) {
        match item {
            ast::BlockItem::D(decl) => self.gen_declaration(decl, instructions),
            ast::BlockItem::S(stmt) => self.gen_statement(stmt, instructions),
        }
    }

    /// A function *declaration* (prototype) inside a block contributes no
    /// code; a variable declaration is handled by
    /// [`Self::gen_variable_declaration`].
    fn gen_declaration(&mut self, decl: ast::Declaration, instructions: &mut Vec<tacky::Instruction>) {
        match decl {
            ast::Declaration::FunDecl(_) => (),
            ast::Declaration::VarDecl(var_decl) => self.gen_variable_declaration(var_decl, instructions),
        }
    }

    /// Lowers a local variable declaration.
    ///
    /// A `static`/`extern` local has no in-function initialization code at
    /// all: its value (if any) was already folded into the symbol table's
    /// `StaticAttrs` entry by the type checker and is emitted once as a
    /// top-level static, not on every call. Only a plain automatic local
    /// with an initializer lowers to anything here, as a `Copy` into the
    /// variable's own name.
    fn gen_variable_declaration(&mut self, var_decl: ast::VariableDecl, instructions: &mut Vec<tacky::Instruction>) {
        if var_decl.storage_class != ast::StorageClass::None {
            return;
        }

        let Some(init) = var_decl.init else {
            return;
        };

        let value = self.gen_expression(init, instructions);
        instructions.push(tacky::Instruction::Copy {
            src: value,
            dst: tacky::Value::Variable(var_decl.name.get_identifier()),
        });
    }
}

/// Walks the final symbol table for every static-storage-duration scalar
/// that actually needs an emitted symbol: a bare `extern` declaration with
/// no definition in this translation unit (`NoInitializer`) contributes
/// nothing.
fn gen_static_variables(symbol_table: &SymbolTable) -> Vec<tacky::StaticVariable> {
    let mut statics = Vec::new();

    for entry in symbol_table.get_table_ref().values() {
        let (EntryType::Scalar(ty), IdenAttrs::StaticAttrs { init, external }) =
            (entry.entry_type, entry.attributes)
        else {
            continue;
        };

        if matches!(init, InitValue::NoInitializer) {
            continue;
        }

        statics.push(tacky::StaticVariable::new(
            entry.sp_iden.get_identifier(),
            external,
            ty,
            init,
        ));
    }

    statics
}

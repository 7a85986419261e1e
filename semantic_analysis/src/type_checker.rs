use crate::semantic_error::{ErrorType, SemanticErr};
use parser::ast::*;
use shared_context::{
    source_map::SourceMap,
    symbol_table::SymbolTable,
    type_interner::{TypeID, TypeInterner},
};

mod typecheck_expressions;
mod typecheck_functions;
mod typecheck_statements;
mod typecheck_variables;

/// Third sub-pass of semantic analysis: type checking.
///
/// Walks the AST a final time, resolving every expression's type under the
/// `int`/`long` common-type rule, inserting explicit `Cast` nodes wherever a
/// narrower operand needs widening (or a wider one needs truncating), and
/// installing every name's final type/linkage metadata into the flat
/// [`SymbolTable`] the TAC generator and back end consume.
pub(crate) struct TypeChecker<'src, 'ctx> {
    ty_interner: &'ctx TypeInterner<'src>,
    symbol_table: &'ctx mut SymbolTable,
    source_map: &'ctx SourceMap<'src>,
}

impl<'src, 'ctx> TypeChecker<'src, 'ctx> {
    pub fn new(
        symbol_table: &'ctx mut SymbolTable,
        ty_interner: &'ctx TypeInterner<'src>,
        source_map: &'ctx SourceMap<'src>,
    ) -> Self {
        Self {
            ty_interner,
            symbol_table,
            source_map,
        }
    }

    /// Performs full type checking on the input program.
    pub fn typecheck_program(&mut self, program: Program) -> Result<Program, SemanticErr> {
        let mut declarations = Vec::new();
        for decl in program.declarations {
            declarations.push(
                self.typecheck_global_declaration(decl)
                    .map_err(|e| SemanticErr::new(e, self.source_map))?,
            );
        }
        Ok(Program { declarations })
    }

    /// Recursively type checks every item in a block. `curr_fun` is the
    /// interned function type of the enclosing function, consulted when a
    /// `Return` needs to know what type to cast its operand to.
    fn typecheck_block(&mut self, block: Block, curr_fun: TypeID) -> Result<Block, ErrorType> {
        let mut items = Vec::new();
        for item in block.items {
            items.push(self.typecheck_block_item(item, curr_fun)?);
        }
        Ok(Block::new(items, block.span))
    }

    fn typecheck_block_item(
        &mut self,
        item: BlockItem,
        curr_fun: TypeID,
    ) -> Result<BlockItem, ErrorType> {
        Ok(match item {
            BlockItem::D(decl) => BlockItem::D(self.typecheck_local_declaration(decl)?),
            BlockItem::S(stmt) => BlockItem::S(self.typecheck_statement(stmt, curr_fun)?),
        })
    }

    fn typecheck_local_declaration(&mut self, decl: Declaration) -> Result<Declaration, ErrorType> {
        match decl {
            Declaration::FunDecl(f) => Ok(Declaration::FunDecl(self.typecheck_function_declaration(f)?)),
            Declaration::VarDecl(v) => Ok(Declaration::VarDecl(self.typecheck_local_variable(v)?)),
        }
    }

    fn typecheck_global_declaration(&mut self, decl: Declaration) -> Result<Declaration, ErrorType> {
        match decl {
            Declaration::FunDecl(f) => Ok(Declaration::FunDecl(self.typecheck_function_declaration(f)?)),
            Declaration::VarDecl(v) => Ok(Declaration::VarDecl(self.typecheck_file_scope_variable(v)?)),
        }
    }
}

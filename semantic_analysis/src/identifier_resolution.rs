use crate::semantic_error::{ErrorType, SemanticErr};
use parser::ast::*;
use shared_context::{SpannedIdentifier, source_map::SourceMap, symbol_interner::Symbol};
use std::collections::{HashMap, VecDeque};

mod resolve_declaration;
mod resolve_expressions;
mod resolve_statements;

/// First pass of semantic analysis: resolves every variable and function
/// reference to a declaration, renames block-scoped variables (and function
/// parameters) to a unique [`shared_context::Identifier`] so shadowing can
/// never be confused with reassignment, and rejects duplicate declarations
/// within one scope.
///
/// Names with linkage (file-scope declarations, and any `static`/`extern`
/// declaration) keep their original spelling untouched, since that spelling
/// is also their assembly symbol.
pub struct IdentifierResolver<'src, 'ctx> {
    source_map: &'ctx SourceMap<'src>,
    variable_counter: usize,
}

/// An entry in the resolver's scope stack: the identifier a name currently
/// resolves to, and whether that name has linkage.
#[derive(Clone, Copy)]
struct ResolverEntry {
    sp_identifier: SpannedIdentifier,
    linkage: bool,
}

impl ResolverEntry {
    fn new(sp_identifier: SpannedIdentifier, linkage: bool) -> Self {
        Self {
            sp_identifier,
            linkage,
        }
    }

    fn has_linkage(&self) -> bool {
        self.linkage
    }

    fn get_sp_identifier(&self) -> SpannedIdentifier {
        self.sp_identifier
    }
}

/// A stack of scopes, innermost first, mapping spellings to their current
/// resolution.
struct ResolverContext {
    scopes: VecDeque<HashMap<Symbol, ResolverEntry>>,
}

impl ResolverContext {
    fn new() -> Self {
        Self {
            scopes: VecDeque::new(),
        }
    }

    fn create_scope(&mut self) {
        self.scopes.push_front(HashMap::new());
    }

    fn delete_scope(&mut self) {
        self.scopes.pop_front();
    }

    fn insert_entry(&mut self, key: Symbol, value: ResolverEntry) {
        self.scopes
            .front_mut()
            .expect("resolver context is empty")
            .insert(key, value);
    }

    fn search_scope(&self, key: &Symbol) -> Option<ResolverEntry> {
        for scope in &self.scopes {
            if let Some(entry) = scope.get(key) {
                return Some(*entry);
            }
        }
        None
    }

    fn search_current_scope(&self, key: &Symbol) -> Option<ResolverEntry> {
        self.scopes
            .front()
            .expect("resolver context is empty")
            .get(key)
            .copied()
    }
}

impl<'src, 'ctx> IdentifierResolver<'src, 'ctx> {
    pub fn new(source_map: &'ctx SourceMap<'src>) -> Self {
        Self {
            source_map,
            variable_counter: 1,
        }
    }

    /// The number of unique variable identifiers minted so far, used as the
    /// starting point for the control-flow pass's own label counter so the
    /// two never collide.
    pub fn get_var_count(&self) -> usize {
        self.variable_counter
    }

    fn get_var_count_and_increment(&mut self) -> usize {
        let count = self.variable_counter;
        self.variable_counter += 1;
        count
    }

    /// Entry point: resolves every declaration in the program within one
    /// persistent file scope.
    pub fn resolve_program(&mut self, program: Program) -> Result<Program, SemanticErr> {
        let mut resolver_ctx = ResolverContext::new();
        resolver_ctx.create_scope();

        let mut declarations = Vec::new();
        for decl in program.declarations {
            declarations.push(
                self.resolve_global_declaration(decl, &mut resolver_ctx)
                    .map_err(|err| SemanticErr::new(err, self.source_map))?,
            );
        }

        resolver_ctx.delete_scope();
        Ok(Program { declarations })
    }

    /// Resolves a `{ ... }` block, pushing a fresh scope around it.
    fn resolve_block(&mut self, block: Block, ctx: &mut ResolverContext) -> Result<Block, ErrorType> {
        ctx.create_scope();
        let mut items = Vec::new();
        for item in block.items {
            items.push(self.resolve_block_item(item, ctx)?);
        }
        ctx.delete_scope();
        Ok(Block::new(items, block.span))
    }

    fn resolve_block_item(
        &mut self,
        item: BlockItem,
        ctx: &mut ResolverContext,
    ) -> Result<BlockItem, ErrorType> {
        Ok(match item {
            BlockItem::D(decl) => BlockItem::D(self.resolve_local_declaration(decl, ctx)?),
            BlockItem::S(stmt) => BlockItem::S(self.resolve_statement(stmt, ctx)?),
        })
    }
}

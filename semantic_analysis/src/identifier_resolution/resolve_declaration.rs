use super::{IdentifierResolver, ResolverContext, ResolverEntry};
use crate::semantic_error::ErrorType;
use parser::ast::{Block, Declaration, FunctionDecl, StorageClass, VariableDecl};
use shared_context::{Identifier, SpannedIdentifier};

impl<'src, 'ctx> IdentifierResolver<'src, 'ctx> {
    pub(super) fn resolve_global_declaration(
        &mut self,
        decl: Declaration,
        ctx: &mut ResolverContext,
    ) -> Result<Declaration, ErrorType> {
        match decl {
            Declaration::FunDecl(f) => Ok(Declaration::FunDecl(self.resolve_function_declaration(f, ctx)?)),
            Declaration::VarDecl(v) => Ok(Declaration::VarDecl(self.resolve_file_scope_variable(v, ctx)?)),
        }
    }

    /// Resolves a declaration found inside a function body. Local function
    /// *definitions* (a body at non-file scope) are rejected; a local
    /// function *declaration* (prototype, no body) is fine.
    pub(super) fn resolve_local_declaration(
        &mut self,
        decl: Declaration,
        ctx: &mut ResolverContext,
    ) -> Result<Declaration, ErrorType> {
        match decl {
            Declaration::FunDecl(f) if f.body.is_some() => {
                Err(ErrorType::NestedFunctionDefinition(f.span))
            }
            Declaration::FunDecl(f) => Ok(Declaration::FunDecl(self.resolve_function_declaration(f, ctx)?)),
            Declaration::VarDecl(v) => Ok(Declaration::VarDecl(self.resolve_local_variable(v, ctx)?)),
        }
    }

    fn resolve_file_scope_variable(
        &mut self,
        var_decl: VariableDecl,
        ctx: &mut ResolverContext,
    ) -> Result<VariableDecl, ErrorType> {
        let symbol = var_decl.name.get_identifier().get_symbol();
        ctx.insert_entry(symbol, ResolverEntry::new(var_decl.name, true));

        let init = match var_decl.init {
            Some(expr) => Some(self.resolve_expression(expr, ctx)?),
            None => None,
        };

        Ok(VariableDecl { init, ..var_decl })
    }

    /// Resolves a block-scope variable declaration.
    ///
    /// `static`/`extern` locals have linkage and keep their spelling; a
    /// plain auto local is given a fresh unique identifier. Declaring a name
    /// that already exists in the *current* scope is an error unless both
    /// declarations have linkage (two `extern` redeclarations of the same
    /// name, say).
    pub(super) fn resolve_local_variable(
        &mut self,
        var_decl: VariableDecl,
        ctx: &mut ResolverContext,
    ) -> Result<VariableDecl, ErrorType> {
        let symbol = var_decl.name.get_identifier().get_symbol();
        let has_linkage = var_decl.storage_class != StorageClass::None;

        if let Some(prev) = ctx.search_current_scope(&symbol) {
            if !(prev.has_linkage() && has_linkage) {
                return Err(ErrorType::DuplicateDeclaration {
                    first: prev.get_sp_identifier().get_span(),
                    second: var_decl.name.get_span(),
                });
            }
        }

        if var_decl.storage_class == StorageClass::Extern && var_decl.init.is_some() {
            return Err(ErrorType::ExternVariableWithInitializer(var_decl.span));
        }

        let name = if has_linkage {
            ctx.insert_entry(symbol, ResolverEntry::new(var_decl.name, true));
            var_decl.name
        } else {
            let count = self.get_var_count_and_increment();
            let identifier = Identifier::new(symbol, count);
            let name = SpannedIdentifier::new(identifier, var_decl.name.get_span());
            ctx.insert_entry(symbol, ResolverEntry::new(name, false));
            name
        };

        let init = match var_decl.init {
            Some(expr) => Some(self.resolve_expression(expr, ctx)?),
            None => None,
        };

        Ok(VariableDecl { name, init, ..var_decl })
    }

    fn resolve_function_declaration(
        &mut self,
        f: FunctionDecl,
        ctx: &mut ResolverContext,
    ) -> Result<FunctionDecl, ErrorType> {
        let symbol = f.name.get_identifier().get_symbol();

        if let Some(prev) = ctx.search_current_scope(&symbol) {
            if !prev.has_linkage() {
                return Err(ErrorType::DuplicateDeclaration {
                    first: prev.get_sp_identifier().get_span(),
                    second: f.name.get_span(),
                });
            }
        }
        ctx.insert_entry(symbol, ResolverEntry::new(f.name, true));

        ctx.create_scope();
        let result = (|| {
            let params = self.resolve_params(f.params, ctx)?;
            let body = match f.body {
                Some(block) => Some(self.resolve_function_body(block, ctx)?),
                None => None,
            };
            Ok((params, body))
        })();
        ctx.delete_scope();

        let (params, body) = result?;
        Ok(FunctionDecl { name: f.name, params, body, ..f })
    }

    fn resolve_params(
        &mut self,
        params: Vec<SpannedIdentifier>,
        ctx: &mut ResolverContext,
    ) -> Result<Vec<SpannedIdentifier>, ErrorType> {
        let mut resolved = Vec::new();
        for param in params {
            let symbol = param.get_identifier().get_symbol();
            if let Some(prev) = ctx.search_current_scope(&symbol) {
                return Err(ErrorType::DuplicateDeclaration {
                    first: prev.get_sp_identifier().get_span(),
                    second: param.get_span(),
                });
            }
            let count = self.get_var_count_and_increment();
            let identifier = Identifier::new(symbol, count);
            let name = SpannedIdentifier::new(identifier, param.get_span());
            ctx.insert_entry(symbol, ResolverEntry::new(name, false));
            resolved.push(name);
        }
        Ok(resolved)
    }

    /// Resolves a function's top-level body directly in the parameter
    /// scope created by the caller, rather than pushing another nested
    /// scope, so a local redeclaring a parameter name is caught as the same
    /// conflict it would be between two locals.
    fn resolve_function_body(
        &mut self,
        block: Block,
        ctx: &mut ResolverContext,
    ) -> Result<Block, ErrorType> {
        let mut items = Vec::new();
        for item in block.items {
            items.push(self.resolve_block_item(item, ctx)?);
        }
        Ok(Block::new(items, block.span))
    }
}

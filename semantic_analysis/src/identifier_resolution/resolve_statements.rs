use super::{IdentifierResolver, ResolverContext};
use crate::semantic_error::ErrorType;
use parser::ast::{Expression, ForInit, Statement, StatementType};

impl<'src, 'ctx> IdentifierResolver<'src, 'ctx> {
    /// Resolves a statement by recursively resolving its inner expressions
    /// and nested statements. `ast_label` is left untouched here (it is the
    /// control-flow pass's job to fill it in); a `Goto`/`Label` name is also
    /// left as-is, since labels have function-wide scope independent of
    /// blocks and are validated later by spelling, not by this pass's scope
    /// stack.
    pub(crate) fn resolve_statement(
        &mut self,
        stmt: Statement,
        resolver_ctx: &mut ResolverContext,
    ) -> Result<Statement, ErrorType> {
        let span = stmt.span;
        let ast_label = stmt.ast_label;

        let kind = match stmt.kind {
            StatementType::Return(expr) => {
                StatementType::Return(self.resolve_expression(expr, resolver_ctx)?)
            }
            StatementType::ExprStatement(expr) => {
                StatementType::ExprStatement(self.resolve_expression(expr, resolver_ctx)?)
            }
            StatementType::Compound(block) => {
                StatementType::Compound(self.resolve_block(block, resolver_ctx)?)
            }
            StatementType::Goto(label) => StatementType::Goto(label),
            StatementType::Label { name, stmt } => StatementType::Label {
                name,
                stmt: Box::new(self.resolve_statement(*stmt, resolver_ctx)?),
            },
            StatementType::Break => StatementType::Break,
            StatementType::Continue => StatementType::Continue,
            StatementType::While { condition, body } => {
                self.resolve_while_statement(condition, *body, resolver_ctx)?
            }
            StatementType::DoWhile { condition, body } => {
                self.resolve_do_while_statement(condition, *body, resolver_ctx)?
            }
            StatementType::For {
                init,
                condition,
                post,
                body,
            } => self.resolve_for_statement(init, condition, post, *body, resolver_ctx)?,
            StatementType::If {
                condition,
                if_clause,
                else_clause,
            } => self.resolve_if_statement(condition, *if_clause, else_clause, resolver_ctx)?,
            StatementType::Switch {
                condition,
                body,
                cases,
            } => StatementType::Switch {
                condition: self.resolve_expression(condition, resolver_ctx)?,
                body: Box::new(self.resolve_statement(*body, resolver_ctx)?),
                cases,
            },
            StatementType::Case { value, stmt } => StatementType::Case {
                value: self.resolve_expression(value, resolver_ctx)?,
                stmt: Box::new(self.resolve_statement(*stmt, resolver_ctx)?),
            },
            StatementType::Default { stmt } => StatementType::Default {
                stmt: Box::new(self.resolve_statement(*stmt, resolver_ctx)?),
            },
            StatementType::Null => StatementType::Null,
        };

        let mut resolved = Statement::new(kind, span);
        resolved.ast_label = ast_label;
        Ok(resolved)
    }

    fn resolve_if_statement(
        &mut self,
        condition: Expression,
        if_clause: Statement,
        else_clause: Option<Box<Statement>>,
        resolver_ctx: &mut ResolverContext,
    ) -> Result<StatementType, ErrorType> {
        let condition = self.resolve_expression(condition, resolver_ctx)?;
        let if_clause = Box::new(self.resolve_statement(if_clause, resolver_ctx)?);

        let else_clause = match else_clause {
            Some(clause) => Some(Box::new(self.resolve_statement(*clause, resolver_ctx)?)),
            None => None,
        };

        Ok(StatementType::If {
            condition,
            if_clause,
            else_clause,
        })
    }

    fn resolve_while_statement(
        &mut self,
        condition: Expression,
        body: Statement,
        resolver_ctx: &mut ResolverContext,
    ) -> Result<StatementType, ErrorType> {
        let condition = self.resolve_expression(condition, resolver_ctx)?;
        let body = Box::new(self.resolve_statement(body, resolver_ctx)?);
        Ok(StatementType::While { condition, body })
    }

    fn resolve_do_while_statement(
        &mut self,
        condition: Expression,
        body: Statement,
        resolver_ctx: &mut ResolverContext,
    ) -> Result<StatementType, ErrorType> {
        let condition = self.resolve_expression(condition, resolver_ctx)?;
        let body = Box::new(self.resolve_statement(body, resolver_ctx)?);
        Ok(StatementType::DoWhile { condition, body })
    }

    /// Resolves a `for` statement in its own scope, so a declaration in the
    /// init-clause does not leak past the loop and a body declaration
    /// shadowing it is caught the normal way.
    fn resolve_for_statement(
        &mut self,
        init: Option<ForInit>,
        condition: Option<Expression>,
        post: Option<Expression>,
        body: Statement,
        resolver_ctx: &mut ResolverContext,
    ) -> Result<StatementType, ErrorType> {
        resolver_ctx.create_scope();

        let result = (|| {
            let init = self.resolve_for_init(init, resolver_ctx)?;
            let condition = self.resolve_optional_expr(condition, resolver_ctx)?;
            let post = self.resolve_optional_expr(post, resolver_ctx)?;
            let body = Box::new(self.resolve_statement(body, resolver_ctx)?);
            Ok(StatementType::For {
                init,
                condition,
                post,
                body,
            })
        })();

        resolver_ctx.delete_scope();
        result
    }

    fn resolve_for_init(
        &mut self,
        init: Option<ForInit>,
        resolver_ctx: &mut ResolverContext,
    ) -> Result<Option<ForInit>, ErrorType> {
        match init {
            Some(ForInit::D(decl)) => Ok(Some(ForInit::D(
                self.resolve_local_variable(decl, resolver_ctx)?,
            ))),
            Some(ForInit::E(optional_expr)) => Ok(Some(ForInit::E(
                self.resolve_optional_expr(optional_expr, resolver_ctx)?,
            ))),
            None => Ok(None),
        }
    }
}

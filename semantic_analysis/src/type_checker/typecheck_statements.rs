use crate::{TypeChecker, semantic_error::ErrorType};
use parser::ast::*;
use shared_context::type_interner::TypeID;

impl<'src, 'ctx> TypeChecker<'src, 'ctx> {
    /// Type checks a statement, recursing into every nested statement and
    /// expression. `curr_fun` carries the enclosing function's interned
    /// signature so `Return` knows what type to cast its operand to.
    pub(crate) fn typecheck_statement(
        &mut self,
        stmt: Statement,
        curr_fun: TypeID,
    ) -> Result<Statement, ErrorType> {
        let span = stmt.span;
        let ast_label = stmt.ast_label;

        let kind = match stmt.kind {
            StatementType::Return(expr) => {
                let expr = self.typecheck_expression(expr)?;
                let ret_type = self.ty_interner.get(curr_fun).ret;
                StatementType::Return(Self::convert_to(expr, ret_type))
            }
            StatementType::ExprStatement(expr) => {
                StatementType::ExprStatement(self.typecheck_expression(expr)?)
            }
            StatementType::If {
                condition,
                if_clause,
                else_clause,
            } => {
                let condition = self.typecheck_expression(condition)?;
                let if_clause = Box::new(self.typecheck_statement(*if_clause, curr_fun)?);
                let else_clause = match else_clause {
                    Some(clause) => Some(Box::new(self.typecheck_statement(*clause, curr_fun)?)),
                    None => None,
                };
                StatementType::If {
                    condition,
                    if_clause,
                    else_clause,
                }
            }
            StatementType::Compound(block) => StatementType::Compound(self.typecheck_block(block, curr_fun)?),
            StatementType::While { condition, body } => StatementType::While {
                condition: self.typecheck_expression(condition)?,
                body: Box::new(self.typecheck_statement(*body, curr_fun)?),
            },
            StatementType::DoWhile { condition, body } => StatementType::DoWhile {
                condition: self.typecheck_expression(condition)?,
                body: Box::new(self.typecheck_statement(*body, curr_fun)?),
            },
            StatementType::For {
                init,
                condition,
                post,
                body,
            } => {
                let init = match init {
                    Some(ForInit::D(decl)) => Some(ForInit::D(self.typecheck_local_variable(decl)?)),
                    Some(ForInit::E(expr)) => Some(ForInit::E(self.typecheck_optional_expr(expr)?)),
                    None => None,
                };
                let condition = self.typecheck_optional_expr(condition)?;
                let post = self.typecheck_optional_expr(post)?;
                let body = Box::new(self.typecheck_statement(*body, curr_fun)?);
                StatementType::For {
                    init,
                    condition,
                    post,
                    body,
                }
            }
            StatementType::Switch { condition, body, cases } => StatementType::Switch {
                condition: self.typecheck_expression(condition)?,
                body: Box::new(self.typecheck_statement(*body, curr_fun)?),
                cases,
            },
            StatementType::Case { value, stmt } => StatementType::Case {
                value: self.typecheck_expression(value)?,
                stmt: Box::new(self.typecheck_statement(*stmt, curr_fun)?),
            },
            StatementType::Default { stmt } => {
                StatementType::Default { stmt: Box::new(self.typecheck_statement(*stmt, curr_fun)?) }
            }
            StatementType::Label { name, stmt } => StatementType::Label {
                name,
                stmt: Box::new(self.typecheck_statement(*stmt, curr_fun)?),
            },
            other @ (StatementType::Goto(_)
            | StatementType::Break
            | StatementType::Continue
            | StatementType::Null) => other,
        };

        let mut checked = Statement::new(kind, span);
        checked.ast_label = ast_label;
        Ok(checked)
    }

    fn typecheck_optional_expr(&mut self, expr: Option<Expression>) -> Result<Option<Expression>, ErrorType> {
        match expr {
            Some(e) => Ok(Some(self.typecheck_expression(e)?)),
            None => Ok(None),
        }
    }
}

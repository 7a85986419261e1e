use crate::Parser;
use crate::ast::{Expression, ForInit, Statement, StatementType};
use crate::parse_err::ParseErr;
use lexer::token::Token;
use shared_context::Span;

impl<'src, 'ctx> Parser<'src, 'ctx> {
    /// Parses a statement and returns a `Statement` AST node. Handles
    /// return, if/else, goto, labels, loops, break/continue, switch/case/
    /// default, compound blocks, and bare expression statements.
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseErr> {
        let start = self.peek()?.get_span();

        let next_token = self.peek()?.get_token();
        let stmt_type = match next_token {
            Token::Return => self.parse_return_statement()?,
            Token::LeftCurlyBracket => StatementType::Compound(self.parse_block()?),
            Token::If => self.parse_if_statement()?,
            Token::Goto => self.parse_goto_statement()?,
            Token::Do => self.parse_do_while_statement()?,
            Token::While => self.parse_while_statement()?,
            Token::For => self.parse_for_statement()?,
            Token::Switch => self.parse_switch_statement()?,
            Token::Case => self.parse_case_statement()?,
            Token::Default => self.parse_default_statement()?,
            Token::Continue => {
                self.advance()?;
                self.expect_token(Token::Semicolon)?;
                StatementType::Continue
            }
            Token::Break => {
                self.advance()?;
                self.expect_token(Token::Semicolon)?;
                StatementType::Break
            }
            Token::Semicolon => {
                self.advance()?;
                StatementType::Null
            }
            // `IDENT ':'` is a label; anything else starting with an
            // identifier is a bare expression statement. Telling them apart
            // needs the second token of lookahead the lexer provides.
            Token::Identifier if self.peek_two()?.get_token() == Token::Colon => {
                self.parse_label_statement()?
            }
            _ => {
                let exp = self.parse_expression(0)?;
                self.expect_token(Token::Semicolon)?;
                StatementType::ExprStatement(exp)
            }
        };

        let span = start.to(self.current_token.get_span());
        Ok(Statement::new(stmt_type, span))
    }

    fn parse_return_statement(&mut self) -> Result<StatementType, ParseErr> {
        self.advance()?; // consume 'return'
        let exp = self.parse_expression(0)?;
        self.expect_token(Token::Semicolon)?;
        Ok(StatementType::Return(exp))
    }

    fn parse_if_statement(&mut self) -> Result<StatementType, ParseErr> {
        self.advance()?; // consume 'if'

        self.expect_token(Token::LeftParenthesis)?;
        let condition = self.parse_expression(0)?;
        self.expect_token(Token::RightParenthesis)?;

        let if_clause = Box::new(self.parse_statement()?);

        let else_clause = match self.peek()?.get_token() {
            Token::Else => {
                self.advance()?; // consume 'else'
                Some(Box::new(self.parse_statement()?))
            }
            _ => None,
        };

        Ok(StatementType::If {
            condition,
            if_clause,
            else_clause,
        })
    }

    fn parse_goto_statement(&mut self) -> Result<StatementType, ParseErr> {
        self.advance()?; // consume 'goto'
        let label = self.parse_identifier()?;
        self.expect_token(Token::Semicolon)?;
        Ok(StatementType::Goto(label))
    }

    fn parse_label_statement(&mut self) -> Result<StatementType, ParseErr> {
        let name = self.parse_identifier()?;
        self.expect_token(Token::Colon)?;
        let stmt = Box::new(self.parse_statement()?);
        Ok(StatementType::Label { name, stmt })
    }

    fn parse_while_statement(&mut self) -> Result<StatementType, ParseErr> {
        self.advance()?; // consume 'while'
        self.expect_token(Token::LeftParenthesis)?;
        let condition = self.parse_expression(0)?;
        self.expect_token(Token::RightParenthesis)?;
        let body = Box::new(self.parse_statement()?);
        Ok(StatementType::While { condition, body })
    }

    fn parse_do_while_statement(&mut self) -> Result<StatementType, ParseErr> {
        self.advance()?; // consume 'do'
        let body = Box::new(self.parse_statement()?);
        self.expect_token(Token::While)?;
        self.expect_token(Token::LeftParenthesis)?;
        let condition = self.parse_expression(0)?;
        self.expect_token(Token::RightParenthesis)?;
        self.expect_token(Token::Semicolon)?;
        Ok(StatementType::DoWhile { condition, body })
    }

    fn parse_for_statement(&mut self) -> Result<StatementType, ParseErr> {
        self.advance()?; // consume 'for'
        self.expect_token(Token::LeftParenthesis)?;

        let init = self.parse_for_init()?;
        let condition = self.parse_optional_for_statement_expr()?;
        self.expect_token(Token::Semicolon)?;
        let post = self.parse_optional_for_statement_expr()?;
        self.expect_token(Token::RightParenthesis)?;

        let body = Box::new(self.parse_statement()?);

        Ok(StatementType::For {
            init,
            condition,
            post,
            body,
        })
    }

    fn parse_for_init(&mut self) -> Result<Option<ForInit>, ParseErr> {
        let next_token = self.peek()?.get_token();
        if next_token.is_specifier() {
            let start = self.peek()?.get_span();
            let (var_type, storage_class) = self.parse_type_and_storage_class_list()?;
            Ok(Some(ForInit::D(self.parse_variable_declaration(
                var_type,
                storage_class,
                start,
            )?)))
        } else if next_token == Token::Semicolon {
            self.advance()?; // consume ';'
            Ok(None)
        } else {
            let expr = self.parse_expression(0)?;
            self.expect_token(Token::Semicolon)?;
            Ok(Some(ForInit::E(Some(expr))))
        }
    }

    fn parse_optional_for_statement_expr(&mut self) -> Result<Option<Expression>, ParseErr> {
        match self.peek()?.get_token() {
            Token::RightParenthesis | Token::Semicolon => Ok(None),
            _ => Ok(Some(self.parse_expression(0)?)),
        }
    }

    fn parse_switch_statement(&mut self) -> Result<StatementType, ParseErr> {
        self.advance()?; // consume 'switch'
        self.expect_token(Token::LeftParenthesis)?;
        let condition = self.parse_expression(0)?;
        self.expect_token(Token::RightParenthesis)?;
        let body = Box::new(self.parse_statement()?);
        Ok(StatementType::Switch {
            condition,
            body,
            cases: Vec::new(),
        })
    }

    fn parse_case_statement(&mut self) -> Result<StatementType, ParseErr> {
        self.advance()?; // consume 'case'
        let value = self.parse_expression(0)?;
        self.expect_token(Token::Colon)?;
        let stmt = Box::new(self.parse_statement()?);
        Ok(StatementType::Case { value, stmt })
    }

    fn parse_default_statement(&mut self) -> Result<StatementType, ParseErr> {
        self.advance()?; // consume 'default'
        self.expect_token(Token::Colon)?;
        let stmt = Box::new(self.parse_statement()?);
        Ok(StatementType::Default { stmt })
    }
}

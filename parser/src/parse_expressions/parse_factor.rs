use crate::ast::{Expression, ExpressionType, PostOP, UnaryOP};
use crate::{ParseErr, Parser};
use lexer::token::Token;

impl<'src, 'ctx> Parser<'src, 'ctx> {
    /// Parses a "factor": an optional run of unary prefix operators over a
    /// postfix expression. Unary operators bind right-to-left (`--!x` is
    /// `-(-(!x))`), each recursing back into `parse_factor` for its operand.
    pub(crate) fn parse_factor(&mut self) -> Result<Expression, ParseErr> {
        let start = self.peek()?.get_span();
        let token = self.peek()?.get_token();

        match token {
            tok if tok.is_unary() => self.handle_unary_expression(start),
            Token::Inc | Token::Dec => self.handle_prefix_incdec(start),
            _ => self.parse_postfix(),
        }
    }

    fn handle_unary_expression(&mut self, start: shared_context::Span) -> Result<Expression, ParseErr> {
        let op = self.parse_unary_op()?;
        let operand = Box::new(self.parse_factor()?);
        let span = start.to(self.current_token.get_span());
        let expr_type = ExpressionType::Unary { operator: op, operand };
        Ok(Expression::new(expr_type, span))
    }

    fn handle_prefix_incdec(&mut self, start: shared_context::Span) -> Result<Expression, ParseErr> {
        let token = self.advance()?; // consume '++' or '--'
        let operator = match token.get_token() {
            Token::Inc => UnaryOP::PreInc,
            Token::Dec => UnaryOP::PreDec,
            _ => unreachable!(),
        };
        let operand = Box::new(self.parse_factor()?);
        let span = start.to(self.current_token.get_span());
        let expr_type = ExpressionType::Unary { operator, operand };
        Ok(Expression::new(expr_type, span))
    }

    fn parse_unary_op(&mut self) -> Result<UnaryOP, ParseErr> {
        let token = self.advance()?;
        match token.get_token() {
            Token::Neg => Ok(UnaryOP::Negate),
            Token::Not => Ok(UnaryOP::Complement),
            Token::LogicalNot => Ok(UnaryOP::Not),
            _ => Err(ParseErr::expected("unary operator", &token, self.source_map)),
        }
    }

    /// A postfix expression: a primary, optionally followed by one
    /// trailing `++`/`--`.
    fn parse_postfix(&mut self) -> Result<Expression, ParseErr> {
        let start = self.peek()?.get_span();
        let mut expr = self.parse_primary()?;

        if matches!(self.peek()?.get_token(), Token::Inc | Token::Dec) {
            let token = self.advance()?;
            let operator = match token.get_token() {
                Token::Inc => PostOP::Inc,
                Token::Dec => PostOP::Dec,
                _ => unreachable!(),
            };
            let span = start.to(self.current_token.get_span());
            expr = Expression::new(
                ExpressionType::PostOp {
                    operator,
                    operand: Box::new(expr),
                },
                span,
            );
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expression, ParseErr> {
        let token = self.peek()?;

        match token.get_token() {
            Token::ConstantInt => self.parse_constant_int(),
            Token::LeftParenthesis => self.parse_parenthesized_expression(),
            Token::Identifier => self.parse_identifier_expression(),
            _ => Err(ParseErr::new("invalid expression", token.get_span(), self.source_map)),
        }
    }

    fn parse_parenthesized_expression(&mut self) -> Result<Expression, ParseErr> {
        self.advance()?; // consume '('
        let inner_exp = self.parse_expression(0)?;
        self.expect_token(Token::RightParenthesis)?;
        Ok(inner_exp)
    }

    /// A bare identifier is either a function call (if `(` follows) or a
    /// variable reference.
    fn parse_identifier_expression(&mut self) -> Result<Expression, ParseErr> {
        match self.peek_two()?.get_token() {
            Token::LeftParenthesis => self.parse_function_call(),
            _ => self.parse_variable_expression(),
        }
    }

    fn parse_function_call(&mut self) -> Result<Expression, ParseErr> {
        let start = self.peek()?.get_span();

        let name = self.parse_identifier()?;
        self.expect_token(Token::LeftParenthesis)?;
        let args = self.parse_function_args()?;
        self.expect_token(Token::RightParenthesis)?;
        let span = start.to(self.current_token.get_span());

        Ok(Expression::new(ExpressionType::FunctionCall { name, args }, span))
    }

    fn parse_function_args(&mut self) -> Result<Vec<Expression>, ParseErr> {
        let mut args = Vec::new();
        if self.peek()?.get_token() == Token::RightParenthesis {
            return Ok(args);
        }

        args.push(self.parse_expression(0)?);
        while self.peek()?.get_token() != Token::RightParenthesis {
            self.expect_token(Token::Comma)?;
            args.push(self.parse_expression(0)?);
        }
        Ok(args)
    }

    fn parse_variable_expression(&mut self) -> Result<Expression, ParseErr> {
        let start = self.peek()?.get_span();
        let id = self.parse_identifier()?;
        let span = start.to(self.current_token.get_span());
        Ok(Expression::new(ExpressionType::Var(id), span))
    }

    fn parse_constant_int(&mut self) -> Result<Expression, ParseErr> {
        let start = self.peek()?.get_span();
        let token = self.advance()?;

        if token.get_token() == Token::ConstantInt {
            let value = token.get_lexeme().parse::<i64>().map_err(|_| {
                ParseErr::new("integer constant out of range", token.get_span(), self.source_map)
            })?;
            let span = start.to(self.current_token.get_span());
            Ok(Expression::new(ExpressionType::Constant(value), span))
        } else {
            Err(ParseErr::expected("integer constant", &token, self.source_map))
        }
    }
}

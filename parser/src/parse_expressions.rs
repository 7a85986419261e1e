use crate::Parser;
use crate::ast::{BinaryOP, Expression, ExpressionType};
use crate::parse_err::ParseErr;
use lexer::token::Token;
use shared_context::Span;

mod parse_factor;

impl<'src, 'ctx> Parser<'src, 'ctx> {
    /// Precedence-climbing expression parser. `min_prec` is the lowest
    /// precedence this call is allowed to consume; a binary operator
    /// climbs at `precedence + 1` (left-associative), assignment climbs at
    /// its own precedence (right-associative), and the conditional
    /// operator's else-branch climbs at its own precedence too
    /// (right-associative).
    pub(crate) fn parse_expression(&mut self, min_prec: usize) -> Result<Expression, ParseErr> {
        let start = self.peek()?.get_span();
        let mut left = self.parse_factor()?;

        while self.peek()?.get_token().is_binary() {
            let next_token = self.peek()?.get_token();
            if next_token.precedence() < min_prec {
                break;
            }

            left = if next_token == Token::Assignment {
                self.handle_assignment(left, None, start)?
            } else if next_token.is_compound_assign() {
                let op = Self::compound_assign_op(next_token);
                self.handle_assignment(left, Some(op), start)?
            } else if next_token == Token::QuestionMark {
                self.handle_conditional(left, start)?
            } else {
                self.handle_binary(left, start)?
            };
        }

        Ok(left)
    }

    /// Handles `lhs = rhs` and every `lhs <op>= rhs` compound form. Both
    /// climb at the assignment operator's own precedence, making them
    /// right-associative (`a = b = c` parses as `a = (b = c)`).
    fn handle_assignment(
        &mut self,
        left: Expression,
        op: Option<BinaryOP>,
        start: Span,
    ) -> Result<Expression, ParseErr> {
        let prec = self.peek()?.get_token().precedence();
        self.advance()?; // consume '=' or a compound-assignment operator
        let right = self.parse_expression(prec)?;
        let span = start.to(self.current_token.get_span());
        let expr_type = ExpressionType::Assignment {
            op,
            lvalue: Box::new(left),
            rvalue: Box::new(right),
        };
        Ok(Expression::new(expr_type, span))
    }

    /// Handles `cond ? cons : alt`. The middle branch is parsed at the
    /// lowest precedence (it's delimited by `:`, not by precedence), and
    /// the else branch climbs at the conditional operator's own precedence
    /// (right-associative, so `a ? b : c ? d : e` nests as expected).
    fn handle_conditional(&mut self, cond: Expression, start: Span) -> Result<Expression, ParseErr> {
        let prec = self.peek()?.get_token().precedence();
        self.advance()?; // consume '?'
        let cons = self.parse_expression(0)?;
        self.expect_token(Token::Colon)?;
        let alt = self.parse_expression(prec)?;
        let span = start.to(self.current_token.get_span());
        let expr_type = ExpressionType::Conditional {
            cond: Box::new(cond),
            cons: Box::new(cons),
            alt: Box::new(alt),
        };
        Ok(Expression::new(expr_type, span))
    }

    /// Handles a left-associative binary operator: the right-hand side
    /// climbs at `precedence + 1` so a same-precedence operator to its
    /// right is left for the outer loop instead of being swallowed here.
    fn handle_binary(&mut self, left: Expression, start: Span) -> Result<Expression, ParseErr> {
        let prec = self.peek()?.get_token().precedence();
        let operator = self.parse_binary_op()?;
        let right = self.parse_expression(prec + 1)?;
        let span = start.to(self.current_token.get_span());
        let expr_type = ExpressionType::Binary {
            operator,
            operand1: Box::new(left),
            operand2: Box::new(right),
        };
        Ok(Expression::new(expr_type, span))
    }

    fn parse_binary_op(&mut self) -> Result<BinaryOP, ParseErr> {
        let token = self.advance()?;
        match token.get_token() {
            Token::Add => Ok(BinaryOP::Add),
            Token::Neg => Ok(BinaryOP::Sub),
            Token::Mul => Ok(BinaryOP::Mul),
            Token::Div => Ok(BinaryOP::Div),
            Token::Mod => Ok(BinaryOP::Mod),
            Token::BitAnd => Ok(BinaryOP::BitAnd),
            Token::BitOr => Ok(BinaryOP::BitOr),
            Token::BitXor => Ok(BinaryOP::BitXor),
            Token::ShiftLeft => Ok(BinaryOP::ShiftLeft),
            Token::ShiftRight => Ok(BinaryOP::ShiftRight),
            Token::LogicalAnd => Ok(BinaryOP::LogicalAnd),
            Token::LogicalOr => Ok(BinaryOP::LogicalOr),
            Token::Equal => Ok(BinaryOP::Equal),
            Token::NotEqual => Ok(BinaryOP::NotEqual),
            Token::LessThan => Ok(BinaryOP::LessThan),
            Token::GreaterThan => Ok(BinaryOP::GreaterThan),
            Token::LessThanOrEq => Ok(BinaryOP::LessThanOrEq),
            Token::GreaterThanOrEq => Ok(BinaryOP::GreaterThanOrEq),
            _ => Err(ParseErr::expected("binary operator", &token, self.source_map)),
        }
    }

    fn compound_assign_op(token: Token) -> BinaryOP {
        match token {
            Token::AddAssign => BinaryOP::Add,
            Token::SubAssign => BinaryOP::Sub,
            Token::MulAssign => BinaryOP::Mul,
            Token::DivAssign => BinaryOP::Div,
            Token::ModAssign => BinaryOP::Mod,
            Token::AndAssign => BinaryOP::BitAnd,
            Token::OrAssign => BinaryOP::BitOr,
            Token::XorAssign => BinaryOP::BitXor,
            Token::ShlAssign => BinaryOP::ShiftLeft,
            Token::ShrAssign => BinaryOP::ShiftRight,
            _ => unreachable!("caller already checked Token::is_compound_assign"),
        }
    }
}

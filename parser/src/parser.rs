use lexer::{Lexer, SpannedToken, Token};
use shared_context::source_map::SourceMap;
use shared_context::symbol_interner::SymbolInterner;
use shared_context::type_interner::TypeInterner;
use shared_context::{Identifier, Span, SpannedIdentifier};

use crate::ast::*;
use crate::parse_err::ParseErr;

pub struct Parser<'src, 'ctx> {
    lexer: Lexer<'src>,
    pub(crate) current_token: SpannedToken<'src>,
    pub(crate) source_map: &'ctx SourceMap<'src>,
    pub(crate) sy_interner: &'ctx mut SymbolInterner<'src>,
    pub(crate) ty_interner: &'ctx mut TypeInterner<'src>,
}

impl<'src, 'ctx> Parser<'src, 'ctx> {
    pub fn new(
        lexer: Lexer<'src>,
        source_map: &'ctx SourceMap<'src>,
        sy_interner: &'ctx mut SymbolInterner<'src>,
        ty_interner: &'ctx mut TypeInterner<'src>,
    ) -> Self {
        Self {
            lexer,
            current_token: SpannedToken::default(),
            source_map,
            sy_interner,
            ty_interner,
        }
    }

    /// Looks at the next token without consuming it.
    pub(crate) fn peek(&mut self) -> Result<SpannedToken<'src>, ParseErr> {
        self.lexer
            .peek()
            .map_err(|e| ParseErr::new(e.to_string(), e.span(), self.source_map))
    }

    /// Looks at the token after next, without consuming either. Used to
    /// distinguish a labeled statement (`IDENT ':'`) from a bare expression
    /// statement and a function declaration from a variable one.
    pub(crate) fn peek_two(&mut self) -> Result<SpannedToken<'src>, ParseErr> {
        self.lexer
            .peek_two()
            .map_err(|e| ParseErr::new(e.to_string(), e.span(), self.source_map))
    }

    /// Consumes and returns the next token.
    pub(crate) fn advance(&mut self) -> Result<SpannedToken<'src>, ParseErr> {
        let token = self
            .lexer
            .next()
            .map_err(|e| ParseErr::new(e.to_string(), e.span(), self.source_map))?;
        self.current_token = token;
        Ok(token)
    }

    /// Compares the next token's kind to `expected`, consuming it on a
    /// match and raising a `ParseErr` otherwise.
    pub(crate) fn expect_token(&mut self, expected: Token) -> Result<(), ParseErr> {
        let token = self.peek()?;
        if token.get_token() != expected {
            Err(ParseErr::expected(
                &expected.to_string(),
                &token,
                self.source_map,
            ))
        } else {
            self.advance()?;
            Ok(())
        }
    }

    /// Entry point: parses an entire translation unit.
    pub fn parse_program(&mut self) -> Result<Program, ParseErr> {
        let mut declarations = Vec::new();

        while self.peek()?.get_token() != Token::Eof {
            declarations.push(self.parse_declaration()?);
        }

        Ok(Program { declarations })
    }

    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseErr> {
        let start = self.peek()?.get_span();

        self.expect_token(Token::LeftCurlyBracket)?;

        let mut items = Vec::new();
        while self.peek()?.get_token() != Token::RightCurlyBracket {
            items.push(self.parse_block_item()?);
        }
        self.advance()?; // consume '}'

        let span = start.to(self.current_token.get_span());
        Ok(Block::new(items, span))
    }

    fn parse_block_item(&mut self) -> Result<BlockItem, ParseErr> {
        if self.peek()?.get_token().is_specifier() {
            Ok(BlockItem::D(self.parse_declaration()?))
        } else {
            Ok(BlockItem::S(self.parse_statement()?))
        }
    }

    /// Parses an identifier token into an interned, spanned handle.
    pub(crate) fn parse_identifier(&mut self) -> Result<SpannedIdentifier, ParseErr> {
        let start = self.peek()?.get_span();
        let token = self.advance()?;

        if token.get_token() == Token::Identifier {
            let identifier = Identifier::new(self.sy_interner.intern(token.get_lexeme()), 0);
            let span = start.to(token.get_span());
            Ok(SpannedIdentifier::new(identifier, span))
        } else {
            Err(ParseErr::expected("identifier", &token, self.source_map))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOP, Declaration, ExpressionType, StatementType};
    use crate::print_ast::DebuggingPrinter;
    use bumpalo::Bump;

    /// Parses `src` and hands the resulting program (plus the interner
    /// needed to resolve its identifiers back to text) to `check`.
    fn with_parsed<R>(src: &str, check: impl FnOnce(&Program, &SymbolInterner) -> R) -> R {
        let arena = Bump::new();
        let source_map = SourceMap::new("test.c", src);
        let mut sy_interner = SymbolInterner::new(&arena);
        let mut ty_interner = TypeInterner::new(&arena);
        let lexer = Lexer::new(src);
        let mut parser = Parser::new(lexer, &source_map, &mut sy_interner, &mut ty_interner);
        let program = parser.parse_program().expect("program should parse");
        check(&program, &sy_interner)
    }

    fn only_function(program: &Program) -> &FunctionDecl {
        match program.declarations.first().expect("one declaration") {
            Declaration::FunDecl(f) => f,
            Declaration::VarDecl(_) => panic!("expected a function declaration"),
        }
    }

    #[test]
    fn minimal_function_parses() {
        with_parsed("int main(void) { return 2; }", |program, _| {
            let f = only_function(program);
            let body = f.body.as_ref().expect("function has a body");
            assert_eq!(body.items.len(), 1);
        });
    }

    #[test]
    fn additive_operators_are_left_associative() {
        // "1 - 2 - 3" must parse as "(1 - 2) - 3", not "1 - (2 - 3)".
        with_parsed("int main(void) { return 1 - 2 - 3; }", |program, _| {
            let f = only_function(program);
            let crate::ast::BlockItem::S(stmt) = &f.body.as_ref().unwrap().items[0] else {
                panic!("expected a statement");
            };
            let StatementType::Return(expr) = &stmt.kind else {
                panic!("expected a return statement");
            };
            let ExpressionType::Binary {
                operator: BinaryOP::Sub,
                operand1,
                ..
            } = &expr.kind
            else {
                panic!("expected an outer subtraction");
            };
            assert!(matches!(
                operand1.kind,
                ExpressionType::Binary {
                    operator: BinaryOP::Sub,
                    ..
                }
            ));
        });
    }

    #[test]
    fn assignment_is_right_associative() {
        // "a = b = 3" must parse as "a = (b = 3)".
        let src = "int main(void) { int a; int b; a = b = 3; return a; }";
        with_parsed(src, |program, _| {
            let f = only_function(program);
            let items = &f.body.as_ref().unwrap().items;
            let crate::ast::BlockItem::S(stmt) = &items[2] else {
                panic!("expected a statement");
            };
            let StatementType::ExprStatement(expr) = &stmt.kind else {
                panic!("expected an expression statement");
            };
            let ExpressionType::Assignment { rvalue, .. } = &expr.kind else {
                panic!("expected an assignment");
            };
            assert!(matches!(rvalue.kind, ExpressionType::Assignment { .. }));
        });
    }

    #[test]
    fn for_loop_with_declaring_init_parses() {
        let src = "int main(void) { for (int i = 0; i < 10; i = i + 1) ; return 0; }";
        with_parsed(src, |program, _| {
            let f = only_function(program);
            let crate::ast::BlockItem::S(stmt) = &f.body.as_ref().unwrap().items[0] else {
                panic!("expected a statement");
            };
            let StatementType::For { init, .. } = &stmt.kind else {
                panic!("expected a for statement");
            };
            assert!(matches!(init, Some(crate::ast::ForInit::D(_))));
        });
    }

    #[test]
    fn label_is_distinguished_from_bare_expression() {
        with_parsed("int main(void) { x: return 0; }", |program, _| {
            let f = only_function(program);
            let crate::ast::BlockItem::S(stmt) = &f.body.as_ref().unwrap().items[0] else {
                panic!("expected a statement");
            };
            assert!(matches!(stmt.kind, StatementType::Label { .. }));
        });
    }

    #[test]
    fn switch_collects_no_cases_up_front() {
        let src = "int main(void) { switch (1) { case 1: return 1; default: return 0; } }";
        with_parsed(src, |program, _| {
            let f = only_function(program);
            let crate::ast::BlockItem::S(stmt) = &f.body.as_ref().unwrap().items[0] else {
                panic!("expected a statement");
            };
            // `cases` is left empty by the parser; the control-flow pass fills it in.
            assert!(matches!(stmt.kind, StatementType::Switch { ref cases, .. } if cases.is_empty()));
        });
    }

    #[test]
    fn two_storage_classes_is_a_parse_error() {
        let arena = Bump::new();
        let src = "static extern int x;";
        let source_map = SourceMap::new("test.c", src);
        let mut sy_interner = SymbolInterner::new(&arena);
        let mut ty_interner = TypeInterner::new(&arena);
        let lexer = Lexer::new(src);
        let mut parser = Parser::new(lexer, &source_map, &mut sy_interner, &mut ty_interner);
        assert!(parser.parse_program().is_err());
    }

    #[test]
    fn printer_parenthesizes_every_binary_operator() {
        with_parsed("int main(void) { return 1 - 2 - 3; }", |program, interner| {
            let printer = DebuggingPrinter::new(interner);
            let rendered = printer.print_program(program);
            assert!(rendered.contains("((1 - 2) - 3)"));
        });
    }
}

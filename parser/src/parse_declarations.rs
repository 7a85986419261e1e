use crate::Parser;
use crate::ast::{Block, Declaration, FunctionDecl, StorageClass, VariableDecl};
use crate::parse_err::ParseErr;
use lexer::SpannedToken;
use lexer::token::Token;
use shared_context::Type;
use shared_context::{Span, SpannedIdentifier};

impl<'src, 'ctx> Parser<'src, 'ctx> {
    /// Parses a declaration, determining whether it is a function or
    /// variable declaration from the token after the name.
    pub(crate) fn parse_declaration(&mut self) -> Result<Declaration, ParseErr> {
        let start = self.peek()?.get_span();
        let (decl_type, storage_class) = self.parse_type_and_storage_class_list()?;

        // the name has already been consumed as part of collecting the
        // specifier list's terminator; peek the token after the identifier
        // to tell a function declaration (`(`) from a variable one.
        let after_name = self.peek_two()?.get_token();
        match after_name {
            Token::LeftParenthesis => Ok(Declaration::FunDecl(self.parse_function_decl(
                decl_type,
                storage_class,
                start,
            )?)),
            _ => Ok(Declaration::VarDecl(self.parse_variable_declaration(
                decl_type,
                storage_class,
                start,
            )?)),
        }
    }

    /// Collects a declaration's specifier list (storage class + base type
    /// keywords), splitting it into type and storage-class tokens.
    pub(crate) fn parse_type_and_storage_class_list(
        &mut self,
    ) -> Result<(Type, StorageClass), ParseErr> {
        let (list, span) = self.collect_declaration_specifiers()?;
        let mut type_list = Vec::new();
        let mut storage_class_list = Vec::new();

        for specifier in list {
            if specifier.get_token().is_type() {
                type_list.push(specifier);
            } else {
                storage_class_list.push(specifier);
            }
        }

        let decl_type = self.parse_type(type_list, span)?;

        if storage_class_list.len() > 1 {
            return Err(ParseErr::new(
                "a declaration may specify at most one storage class",
                span,
                self.source_map,
            ));
        }

        let storage_class = match storage_class_list.first() {
            Some(class) => Self::parse_storage_class(*class),
            None => StorageClass::None,
        };

        Ok((decl_type, storage_class))
    }

    /// Collects the maximal run of specifier tokens (`int`/`long`/
    /// `static`/`extern`) at the current position.
    fn collect_declaration_specifiers(
        &mut self,
    ) -> Result<(Vec<SpannedToken<'src>>, Span), ParseErr> {
        let start = self.peek()?.get_span();

        let mut specifier_list = Vec::new();
        while self.peek()?.get_token().is_specifier() {
            let token = self.advance()?;
            specifier_list.push(token);
        }

        let span = start.to(self.current_token.get_span());
        Ok((specifier_list, span))
    }

    /// Collects a specifier list that must not contain a storage class
    /// (used for function parameters).
    pub(crate) fn parse_type_list(&mut self) -> Result<Type, ParseErr> {
        let (list, span) = self.collect_declaration_specifiers()?;
        let mut type_list = Vec::new();

        for specifier in list {
            if specifier.get_token().is_type() {
                type_list.push(specifier);
            } else {
                return Err(ParseErr::new(
                    "storage class specifier is not allowed here",
                    span,
                    self.source_map,
                ));
            }
        }

        self.parse_type(type_list, span)
    }

    fn parse_type(&self, token_list: Vec<SpannedToken<'src>>, span: Span) -> Result<Type, ParseErr> {
        let type_list: Vec<&str> = token_list.iter().map(|st| st.get_lexeme()).collect();
        match type_list.as_slice() {
            ["int"] => Ok(Type::Int),
            ["int", "long"] | ["long", "int"] | ["long"] => Ok(Type::Long),
            _ => Err(ParseErr::new("invalid type specifier", span, self.source_map)),
        }
    }

    fn parse_storage_class(token: SpannedToken<'src>) -> StorageClass {
        match token.get_token() {
            Token::Static => StorageClass::Static,
            Token::Extern => StorageClass::Extern,
            _ => unreachable!("collect_declaration_specifiers only yields specifier tokens"),
        }
    }

    /// Parses a variable declaration's name, optional initializer, and
    /// terminating `;`.
    pub(crate) fn parse_variable_declaration(
        &mut self,
        var_type: Type,
        storage_class: StorageClass,
        start: Span,
    ) -> Result<VariableDecl, ParseErr> {
        let name = self.parse_identifier()?;
        let init = match self.peek()?.get_token() {
            Token::Assignment => {
                self.advance()?; // consume '='
                Some(self.parse_expression(0)?)
            }
            _ => None,
        };

        self.expect_token(Token::Semicolon)?;

        let span = start.to(self.current_token.get_span());
        Ok(VariableDecl::new(name, var_type, init, storage_class, span))
    }

    fn parse_function_decl(
        &mut self,
        ret_type: Type,
        storage_class: StorageClass,
        start: Span,
    ) -> Result<FunctionDecl, ParseErr> {
        let name = self.parse_identifier()?;

        self.expect_token(Token::LeftParenthesis)?;
        let (params_types, params_iden) = self.parse_params_list()?;
        self.expect_token(Token::RightParenthesis)?;

        let body = self.parse_optional_block()?;

        let span = start.to(self.current_token.get_span());
        let type_id = self.ty_interner.intern(ret_type, &params_types);

        Ok(FunctionDecl::new(
            name,
            type_id,
            params_iden,
            body,
            storage_class,
            span,
        ))
    }

    /// Parses an optional function body: either a `{ ... }` block, or a
    /// terminating `;` for a declaration with no body.
    fn parse_optional_block(&mut self) -> Result<Option<Block>, ParseErr> {
        match self.peek()?.get_token() {
            Token::LeftCurlyBracket => Ok(Some(self.parse_block()?)),
            _ => {
                self.expect_token(Token::Semicolon)?;
                Ok(None)
            }
        }
    }

    /// Parses a function parameter list: either `void` (no parameters) or
    /// one or more `(int|long) IDENT` pairs separated by commas.
    fn parse_params_list(&mut self) -> Result<(Vec<Type>, Vec<SpannedIdentifier>), ParseErr> {
        let mut params_iden = Vec::new();
        let mut params_type = Vec::new();

        if self.peek()?.get_token() == Token::Void {
            self.advance()?; // consume 'void'
            return Ok((params_type, params_iden));
        }

        let param_type = self.parse_type_list()?;
        params_iden.push(self.parse_identifier()?);
        params_type.push(param_type);

        while self.peek()?.get_token() != Token::RightParenthesis {
            self.expect_token(Token::Comma)?;
            let param_type = self.parse_type_list()?;
            params_iden.push(self.parse_identifier()?);
            params_type.push(param_type);
        }
        Ok((params_type, params_iden))
    }
}

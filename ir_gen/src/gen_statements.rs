//! Statement lowering: turns a (type-checked, control-flow-labeled)
//! `ast::Statement` into a sequence of `tacky::Instruction`s.
//!
//! Every loop/switch already carries its own unique label in
//! `Statement::ast_label`, assigned by the semantic analyser's control-flow
//! pass; `break`/`continue` carry the *target's* label in their own
//! `ast_label` instead. This module only has to turn those labels into the
//! right jumps.

use crate::IRgen;
use crate::tacky;
use parser::ast::{self, Expression, ForInit, Statement, StatementType};
use shared_context::Type;

impl<'src, 'ctx> IRgen<'src, 'ctx> {
    pub(crate) fn gen_statement(&mut self, stmt: Statement, instructions: &mut Vec<tacky::Instruction>) {
        let ast_label = stmt.ast_label;

        match stmt.kind {
            StatementType::Return(expr) => {
                let val = self.gen_expression(expr, instructions);
                instructions.push(tacky::Instruction::Return(val));
            }

            StatementType::ExprStatement(expr) => {
                self.gen_expression(expr, instructions);
            }

            StatementType::Null => (),

            StatementType::Compound(block) => self.gen_block(block, instructions),

            StatementType::If {
                condition,
                if_clause,
                else_clause,
            } => self.gen_if(condition, *if_clause, else_clause, instructions),

            StatementType::Break => {
                instructions.push(tacky::Instruction::Jump(self.break_label(ast_label)));
            }

            StatementType::Continue => {
                instructions.push(tacky::Instruction::Jump(self.continue_label(ast_label)));
            }

            StatementType::While { condition, body } => self.gen_while(condition, *body, ast_label, instructions),

            StatementType::DoWhile { condition, body } => {
                self.gen_do_while(condition, *body, ast_label, instructions)
            }

            StatementType::For {
                init,
                condition,
                post,
                body,
            } => self.gen_for(init, condition, post, *body, ast_label, instructions),

            StatementType::Switch { condition, body, cases } => {
                self.gen_switch(condition, *body, cases, ast_label, instructions)
            }

            StatementType::Case { stmt, .. } => {
                instructions.push(tacky::Instruction::Label(ast_label));
                self.gen_statement(*stmt, instructions);
            }

            StatementType::Default { stmt } => {
                instructions.push(tacky::Instruction::Label(ast_label));
                self.gen_statement(*stmt, instructions);
            }

            StatementType::Label { name, stmt } => {
                instructions.push(tacky::Instruction::Label(name.get_identifier()));
                self.gen_statement(*stmt, instructions);
            }

            StatementType::Goto(name) => {
                instructions.push(tacky::Instruction::Jump(name.get_identifier()));
            }
        }
    }

    /// ```text
    ///   cond = <condition>
    ///   jump_if_zero cond, else_label   (or end_label, with no else clause)
    ///   <if_clause>
    ///   jump end_label
    /// else_label:
    ///   <else_clause>
    /// end_label:
    /// ```
    fn gen_if(
        &mut self,
        condition: Expression,
        if_clause: Statement,
        else_clause: Option<Box<Statement>>,
        instructions: &mut Vec<tacky::Instruction>,
    ) {
        match else_clause {
            None => {
                let end_label = self.make_label();
                let cond = self.gen_expression(condition, instructions);
                instructions.push(tacky::Instruction::JumpIfZero {
                    cond,
                    target: end_label,
                });
                self.gen_statement(if_clause, instructions);
                instructions.push(tacky::Instruction::Label(end_label));
            }
            Some(else_clause) => {
                let else_label = self.make_label();
                let end_label = self.make_label();

                let cond = self.gen_expression(condition, instructions);
                instructions.push(tacky::Instruction::JumpIfZero {
                    cond,
                    target: else_label,
                });

                self.gen_statement(if_clause, instructions);
                instructions.push(tacky::Instruction::Jump(end_label));

                instructions.push(tacky::Instruction::Label(else_label));
                self.gen_statement(*else_clause, instructions);

                instructions.push(tacky::Instruction::Label(end_label));
            }
        }
    }

    /// ```text
    /// continue_label:
    ///   cond = <condition>
    ///   jump_if_zero cond, break_label
    ///   <body>
    ///   jump continue_label
    /// break_label:
    /// ```
    fn gen_while(
        &mut self,
        condition: Expression,
        body: Statement,
        label: shared_context::Identifier,
        instructions: &mut Vec<tacky::Instruction>,
    ) {
        let continue_label = self.continue_label(label);
        let break_label = self.break_label(label);

        instructions.push(tacky::Instruction::Label(continue_label));
        let cond = self.gen_expression(condition, instructions);
        instructions.push(tacky::Instruction::JumpIfZero {
            cond,
            target: break_label,
        });

        self.gen_statement(body, instructions);
        instructions.push(tacky::Instruction::Jump(continue_label));
        instructions.push(tacky::Instruction::Label(break_label));
    }

    /// ```text
    /// start_label:
    ///   <body>
    /// continue_label:
    ///   cond = <condition>
    ///   jump_if_not_zero cond, start_label
    /// break_label:
    /// ```
    fn gen_do_while(
        &mut self,
        condition: Expression,
        body: Statement,
        label: shared_context::Identifier,
        instructions: &mut Vec<tacky::Instruction>,
    ) {
        let start_label = self.make_label();
        let continue_label = self.continue_label(label);
        let break_label = self.break_label(label);

        instructions.push(tacky::Instruction::Label(start_label));
        self.gen_statement(body, instructions);

        instructions.push(tacky::Instruction::Label(continue_label));
        let cond = self.gen_expression(condition, instructions);
        instructions.push(tacky::Instruction::JumpIfNotZero {
            cond,
            target: start_label,
        });

        instructions.push(tacky::Instruction::Label(break_label));
    }

    /// ```text
    ///   <init>
    /// start_label:
    ///   cond = <condition>?
    ///   jump_if_zero cond, break_label
    ///   <body>
    /// continue_label:
    ///   <post>
    ///   jump start_label
    /// break_label:
    /// ```
    fn gen_for(
        &mut self,
        init: Option<ForInit>,
        condition: Option<Expression>,
        post: Option<Expression>,
        body: Statement,
        label: shared_context::Identifier,
        instructions: &mut Vec<tacky::Instruction>,
    ) {
        let start_label = self.make_label();
        let continue_label = self.continue_label(label);
        let break_label = self.break_label(label);

        match init {
            Some(ForInit::D(var_decl)) => self.gen_variable_declaration(var_decl, instructions),
            Some(ForInit::E(Some(expr))) => {
                self.gen_expression(expr, instructions);
            }
            Some(ForInit::E(None)) | None => (),
        }

        instructions.push(tacky::Instruction::Label(start_label));
        if let Some(condition) = condition {
            let cond = self.gen_expression(condition, instructions);
            instructions.push(tacky::Instruction::JumpIfZero {
                cond,
                target: break_label,
            });
        }

        self.gen_statement(body, instructions);

        instructions.push(tacky::Instruction::Label(continue_label));
        if let Some(post) = post {
            self.gen_expression(post, instructions);
        }

        instructions.push(tacky::Instruction::Jump(start_label));
        instructions.push(tacky::Instruction::Label(break_label));
    }

    /// Lowers a `switch` as a linear chain of equality tests against the
    /// controlling value, one per `case`, followed by a jump to `default`
    /// (or past the body entirely, if there is none) when nothing matched.
    ///
    /// ```text
    ///   cond = <condition>
    ///   t1 = cond == c1; jump_if_not_zero t1, case1_label
    ///   t2 = cond == c2; jump_if_not_zero t2, case2_label
    ///   ...
    ///   jump default_label   (or break_label, with no default)
    ///   <body, with Case/Default lowering to just a Label>
    /// break_label:
    /// ```
    fn gen_switch(
        &mut self,
        condition: Expression,
        body: Statement,
        cases: Vec<ast::SwitchCase>,
        label: shared_context::Identifier,
        instructions: &mut Vec<tacky::Instruction>,
    ) {
        let break_label = self.break_label(label);
        let cond = self.gen_expression(condition, instructions);

        let mut default_label = None;
        for case in &cases {
            match case.value {
                Some(value) => {
                    let matches = self.make_temp_var(Type::Int);
                    instructions.push(tacky::Instruction::Binary {
                        op: tacky::BinaryOP::Equal,
                        src1: cond,
                        src2: tacky::Value::Constant(value),
                        dst: matches,
                    });
                    instructions.push(tacky::Instruction::JumpIfNotZero {
                        cond: matches,
                        target: case.label,
                    });
                }
                None => default_label = Some(case.label),
            }
        }
        instructions.push(tacky::Instruction::Jump(default_label.unwrap_or(break_label)));

        self.gen_statement(body, instructions);
        instructions.push(tacky::Instruction::Label(break_label));
    }
}

//! Second semantic pass: labels every loop and `switch`, validates
//! `break`/`continue`/`goto`/`case`/`default` placement, and folds `case`
//! values to constants while checking for duplicates.
//!
//! A `break` targets the nearest enclosing loop *or* switch; a `continue`
//! only ever targets the nearest enclosing loop, skipping over any switch
//! in between. `case`/`default` belong to the nearest enclosing switch, not
//! any switch nested further in.

use crate::semantic_error::{ErrorType, SemanticErr};
use parser::ast::*;
use shared_context::{
    Identifier, Span, source_map::SourceMap,
    symbol_interner::{Symbol, SymbolInterner},
};
use std::collections::HashMap;

pub struct ControlFlow<'src, 'ctx> {
    sy_interner: &'ctx mut SymbolInterner<'src>,
    source_map: &'ctx SourceMap<'src>,
    label_counter: usize,
}

/// The nearest enclosing loop/switch targets a `break`, `continue` or
/// `goto` needs to resolve against. Copied down through every recursive
/// call, so entering a nested loop or switch only has to override the
/// fields it changes.
#[derive(Clone, Copy, Default)]
struct FlowContext {
    break_target: Option<Identifier>,
    continue_target: Option<Identifier>,
}

/// Accumulates the `case`/`default` arms of the switch currently being
/// labeled, so duplicates can be rejected and `Switch.cases` populated in
/// one pass.
#[derive(Default)]
struct SwitchCollector {
    cases: Vec<SwitchCase>,
    seen_values: HashMap<i64, Span>,
    default_span: Option<Span>,
}

/// Tracks every `goto`/`Label` name seen within one function, so an
/// undefined or duplicate label can be reported once the whole function
/// body has been walked.
#[derive(Default)]
struct LabelTracker {
    defined: HashMap<Symbol, Span>,
    used: HashMap<Symbol, Span>,
}

impl<'src, 'ctx> ControlFlow<'src, 'ctx> {
    pub fn new(
        sy_interner: &'ctx mut SymbolInterner<'src>,
        source_map: &'ctx SourceMap<'src>,
        label_counter: usize,
    ) -> Self {
        Self {
            sy_interner,
            source_map,
            label_counter,
        }
    }

    /// The total number of labels minted, used as the next free id for
    /// later stages (TAC temporaries, etc.) so nothing collides.
    pub fn get_label_count(&self) -> usize {
        self.label_counter
    }

    fn make_label(&mut self) -> Identifier {
        let text = format!("label_{}", self.label_counter);
        self.label_counter += 1;
        let symbol = self.sy_interner.intern(&text);
        Identifier::new(symbol, 0)
    }

    pub fn label_program(&mut self, program: Program) -> Result<Program, SemanticErr> {
        let mut declarations = Vec::new();
        for decl in program.declarations {
            declarations.push(match decl {
                Declaration::VarDecl(_) => decl,
                Declaration::FunDecl(f) => Declaration::FunDecl(
                    self.label_function_decl(f)
                        .map_err(|e| SemanticErr::new(e, self.source_map))?,
                ),
            });
        }
        Ok(Program { declarations })
    }

    fn label_function_decl(&mut self, f: FunctionDecl) -> Result<FunctionDecl, ErrorType> {
        let mut labels = LabelTracker::default();
        let body = match f.body {
            Some(block) => {
                let block = self.label_block(block, FlowContext::default(), None, &mut labels)?;
                for (&symbol, &span) in &labels.used {
                    if !labels.defined.contains_key(&symbol) {
                        return Err(ErrorType::UndefinedLabel(span));
                    }
                }
                Some(block)
            }
            None => None,
        };
        Ok(FunctionDecl { body, ..f })
    }

    fn label_block(
        &mut self,
        block: Block,
        ctx: FlowContext,
        mut switch: Option<&mut SwitchCollector>,
        labels: &mut LabelTracker,
    ) -> Result<Block, ErrorType> {
        let mut items = Vec::new();
        for item in block.items {
            items.push(self.label_block_item(item, ctx, switch.as_deref_mut(), labels)?);
        }
        Ok(Block::new(items, block.span))
    }

    fn label_block_item(
        &mut self,
        item: BlockItem,
        ctx: FlowContext,
        switch: Option<&mut SwitchCollector>,
        labels: &mut LabelTracker,
    ) -> Result<BlockItem, ErrorType> {
        match item {
            BlockItem::D(decl) => Ok(BlockItem::D(decl)),
            BlockItem::S(stmt) => Ok(BlockItem::S(self.label_statement(stmt, ctx, switch, labels)?)),
        }
    }

    fn label_statement(
        &mut self,
        stmt: Statement,
        ctx: FlowContext,
        mut switch: Option<&mut SwitchCollector>,
        labels: &mut LabelTracker,
    ) -> Result<Statement, ErrorType> {
        let span = stmt.span;

        let (kind, ast_label) = match stmt.kind {
            StatementType::Break => {
                let label = ctx
                    .break_target
                    .ok_or(ErrorType::BreakOutsideLoopOrSwitch(span))?;
                (StatementType::Break, label)
            }
            StatementType::Continue => {
                let label = ctx
                    .continue_target
                    .ok_or(ErrorType::ContinueOutsideLoop(span))?;
                (StatementType::Continue, label)
            }
            StatementType::Compound(block) => {
                let block = self.label_block(block, ctx, switch.as_deref_mut(), labels)?;
                (StatementType::Compound(block), Identifier::default())
            }
            StatementType::If {
                condition,
                if_clause,
                else_clause,
            } => {
                let if_clause =
                    Box::new(self.label_statement(*if_clause, ctx, switch.as_deref_mut(), labels)?);
                let else_clause = match else_clause {
                    Some(clause) => Some(Box::new(self.label_statement(
                        *clause,
                        ctx,
                        switch.as_deref_mut(),
                        labels,
                    )?)),
                    None => None,
                };
                (
                    StatementType::If {
                        condition,
                        if_clause,
                        else_clause,
                    },
                    Identifier::default(),
                )
            }
            StatementType::While { condition, body } => {
                let label = self.make_label();
                let loop_ctx = FlowContext {
                    break_target: Some(label),
                    continue_target: Some(label),
                };
                let body = Box::new(self.label_statement(*body, loop_ctx, None, labels)?);
                (StatementType::While { condition, body }, label)
            }
            StatementType::DoWhile { condition, body } => {
                let label = self.make_label();
                let loop_ctx = FlowContext {
                    break_target: Some(label),
                    continue_target: Some(label),
                };
                let body = Box::new(self.label_statement(*body, loop_ctx, None, labels)?);
                (StatementType::DoWhile { condition, body }, label)
            }
            StatementType::For {
                init,
                condition,
                post,
                body,
            } => {
                let label = self.make_label();
                let loop_ctx = FlowContext {
                    break_target: Some(label),
                    continue_target: Some(label),
                };
                let body = Box::new(self.label_statement(*body, loop_ctx, None, labels)?);
                (
                    StatementType::For {
                        init,
                        condition,
                        post,
                        body,
                    },
                    label,
                )
            }
            StatementType::Switch { condition, body, .. } => {
                let label = self.make_label();
                let switch_ctx = FlowContext {
                    break_target: Some(label),
                    continue_target: ctx.continue_target,
                };
                let mut collector = SwitchCollector::default();
                let body = Box::new(self.label_statement(
                    *body,
                    switch_ctx,
                    Some(&mut collector),
                    labels,
                )?);
                (
                    StatementType::Switch {
                        condition,
                        body,
                        cases: collector.cases,
                    },
                    label,
                )
            }
            StatementType::Case { value, stmt: inner } => {
                let Some(collector) = switch.as_deref_mut() else {
                    return Err(ErrorType::CaseOutsideSwitch(span));
                };
                let Some(folded) = fold_constant(&value) else {
                    return Err(ErrorType::NonConstantCaseValue(value.span));
                };
                if let Some(&first) = collector.seen_values.get(&folded) {
                    return Err(ErrorType::DuplicateCase {
                        value: folded,
                        first,
                        second: span,
                    });
                }
                let label = self.make_label();
                collector.seen_values.insert(folded, span);
                collector.cases.push(SwitchCase {
                    value: Some(folded),
                    label,
                });
                let inner = Box::new(self.label_statement(*inner, ctx, switch, labels)?);
                (
                    StatementType::Case {
                        value,
                        stmt: inner,
                    },
                    label,
                )
            }
            StatementType::Default { stmt: inner } => {
                let Some(collector) = switch.as_deref_mut() else {
                    return Err(ErrorType::DefaultOutsideSwitch(span));
                };
                if let Some(first) = collector.default_span {
                    return Err(ErrorType::DuplicateDefault { first, second: span });
                }
                let label = self.make_label();
                collector.default_span = Some(span);
                collector.cases.push(SwitchCase { value: None, label });
                let inner = Box::new(self.label_statement(*inner, ctx, switch, labels)?);
                (StatementType::Default { stmt: inner }, label)
            }
            StatementType::Label { name, stmt: inner } => {
                let symbol = name.get_identifier().get_symbol();
                if let Some(&first) = labels.defined.get(&symbol) {
                    return Err(ErrorType::DuplicateLabel {
                        first,
                        second: name.get_span(),
                    });
                }
                labels.defined.insert(symbol, name.get_span());
                let inner = Box::new(self.label_statement(*inner, ctx, switch, labels)?);
                (StatementType::Label { name, stmt: inner }, Identifier::default())
            }
            StatementType::Goto(name) => {
                let symbol = name.get_identifier().get_symbol();
                labels.used.entry(symbol).or_insert(name.get_span());
                (StatementType::Goto(name), Identifier::default())
            }
            other @ (StatementType::Return(_)
            | StatementType::ExprStatement(_)
            | StatementType::Null) => (other, Identifier::default()),
        };

        let mut labeled = Statement::new(kind, span);
        labeled.ast_label = ast_label;
        Ok(labeled)
    }
}

/// Folds a restricted constant-expression grammar (integer literals and the
/// arithmetic/bitwise/logical/comparison operators applied to them) to its
/// `i64` value. Returns `None` for anything that depends on a variable or a
/// function call, which is not a valid `case` label in this language.
fn fold_constant(expr: &Expression) -> Option<i64> {
    match &expr.kind {
        ExpressionType::Constant(n) => Some(*n),
        ExpressionType::Cast { operand, .. } => fold_constant(operand),
        ExpressionType::Unary { operator, operand } => {
            let v = fold_constant(operand)?;
            Some(match operator {
                UnaryOP::Negate => v.wrapping_neg(),
                UnaryOP::Complement => !v,
                UnaryOP::Not => (v == 0) as i64,
                UnaryOP::PreInc | UnaryOP::PreDec => return None,
            })
        }
        ExpressionType::Binary {
            operator,
            operand1,
            operand2,
        } => {
            let a = fold_constant(operand1)?;
            let b = fold_constant(operand2)?;
            match operator {
                BinaryOP::Add => Some(a.wrapping_add(b)),
                BinaryOP::Sub => Some(a.wrapping_sub(b)),
                BinaryOP::Mul => Some(a.wrapping_mul(b)),
                BinaryOP::Div => a.checked_div(b),
                BinaryOP::Mod => a.checked_rem(b),
                BinaryOP::BitAnd => Some(a & b),
                BinaryOP::BitOr => Some(a | b),
                BinaryOP::BitXor => Some(a ^ b),
                BinaryOP::ShiftLeft => Some(a.wrapping_shl(b as u32)),
                BinaryOP::ShiftRight => Some(a.wrapping_shr(b as u32)),
                BinaryOP::LogicalAnd => Some((a != 0 && b != 0) as i64),
                BinaryOP::LogicalOr => Some((a != 0 || b != 0) as i64),
                BinaryOP::Equal => Some((a == b) as i64),
                BinaryOP::NotEqual => Some((a != b) as i64),
                BinaryOP::LessThan => Some((a < b) as i64),
                BinaryOP::GreaterThan => Some((a > b) as i64),
                BinaryOP::LessThanOrEq => Some((a <= b) as i64),
                BinaryOP::GreaterThanOrEq => Some((a >= b) as i64),
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;

    fn run(src: &str) -> Result<Program, SemanticErr> {
        let arena = Bump::new();
        let source_map = SourceMap::new("test.c", src);
        let mut sy_interner = SymbolInterner::new(&arena);
        let mut ty_interner = shared_context::type_interner::TypeInterner::new(&arena);
        let lexer = lexer::Lexer::new(src);
        let mut parser = parser::Parser::new(lexer, &source_map, &mut sy_interner, &mut ty_interner);
        let program = parser.parse_program().expect("program should parse");
        let mut resolver = crate::identifier_resolution::IdentifierResolver::new(&source_map);
        let resolved = resolver.resolve_program(program).expect("should resolve");
        let mut control_flow = ControlFlow::new(&mut sy_interner, &source_map, resolver.get_var_count());
        control_flow.label_program(resolved)
    }

    #[test]
    fn break_outside_loop_or_switch_is_rejected() {
        assert!(run("int main(void) { break; return 0; }").is_err());
    }

    #[test]
    fn continue_inside_switch_targets_the_enclosing_loop() {
        let src = "int main(void) { while (1) { switch (1) { case 1: continue; } } return 0; }";
        assert!(run(src).is_ok());
    }

    #[test]
    fn duplicate_case_values_are_rejected() {
        let src = "int main(void) { switch (1) { case 1: return 1; case 1: return 2; } }";
        assert!(run(src).is_err());
    }

    #[test]
    fn multiple_default_labels_are_rejected() {
        let src = "int main(void) { switch (1) { default: return 1; default: return 2; } }";
        assert!(run(src).is_err());
    }

    #[test]
    fn switch_collects_its_cases() {
        let src = "int main(void) { switch (1) { case 1: return 1; default: return 0; } }";
        let program = run(src).expect("should label");
        let Declaration::FunDecl(f) = &program.declarations[0] else {
            panic!("expected a function");
        };
        let BlockItem::S(stmt) = &f.body.as_ref().unwrap().items[0] else {
            panic!("expected a statement");
        };
        let StatementType::Switch { cases, .. } = &stmt.kind else {
            panic!("expected a switch");
        };
        assert_eq!(cases.len(), 2);
    }
}

//! Debug pretty-printer for the AST. Its text format is not normative;
//! it exists for manual inspection (the `--parse` CLI stage) and for the
//! parser's own round-trip tests.

use crate::ast::*;
use shared_context::symbol_interner::SymbolInterner;

pub struct DebuggingPrinter<'a, 'src> {
    interner: &'a SymbolInterner<'src>,
}

impl<'a, 'src> DebuggingPrinter<'a, 'src> {
    pub fn new(interner: &'a SymbolInterner<'src>) -> Self {
        Self { interner }
    }

    pub fn print_program(&self, program: &Program) -> String {
        program
            .declarations
            .iter()
            .map(|d| self.print_declaration(d))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn name(&self, iden: shared_context::Identifier) -> &'src str {
        self.interner.lookup(iden.get_symbol())
    }

    fn print_declaration(&self, decl: &Declaration) -> String {
        match decl {
            Declaration::FunDecl(f) => self.print_function_decl(f),
            Declaration::VarDecl(v) => self.print_variable_decl(v),
        }
    }

    fn print_function_decl(&self, f: &FunctionDecl) -> String {
        let params = f
            .params
            .iter()
            .map(|p| self.name(p.get_identifier()).to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let name = self.name(f.name.get_identifier());
        match &f.body {
            Some(body) => format!("Function({name}, [{params}], {})", self.print_block(body)),
            None => format!("FunctionDecl({name}, [{params}])"),
        }
    }

    fn print_variable_decl(&self, v: &VariableDecl) -> String {
        let name = self.name(v.name.get_identifier());
        match &v.init {
            Some(init) => format!("Declare({name} = {})", self.print_expr(init)),
            None => format!("Declare({name})"),
        }
    }

    fn print_block(&self, block: &Block) -> String {
        let items = block
            .items
            .iter()
            .map(|item| self.print_block_item(item))
            .collect::<Vec<_>>()
            .join("; ");
        format!("{{ {items} }}")
    }

    fn print_block_item(&self, item: &BlockItem) -> String {
        match item {
            BlockItem::D(d) => self.print_declaration(d),
            BlockItem::S(s) => self.print_statement(s),
        }
    }

    fn print_statement(&self, stmt: &Statement) -> String {
        match &stmt.kind {
            StatementType::Return(e) => format!("Return({})", self.print_expr(e)),
            StatementType::If {
                condition,
                if_clause,
                else_clause,
            } => {
                let cond = self.print_expr(condition);
                let then = self.print_statement(if_clause);
                match else_clause {
                    Some(e) => format!("If({cond}, {then}, {})", self.print_statement(e)),
                    None => format!("If({cond}, {then})"),
                }
            }
            StatementType::Goto(label) => format!("Goto({})", self.name(label.get_identifier())),
            StatementType::Label { name, stmt } => {
                format!("{}: {}", self.name(name.get_identifier()), self.print_statement(stmt))
            }
            StatementType::Break => "Break".to_string(),
            StatementType::Continue => "Continue".to_string(),
            StatementType::While { condition, body } => {
                format!("While({}, {})", self.print_expr(condition), self.print_statement(body))
            }
            StatementType::DoWhile { condition, body } => {
                format!("DoWhile({}, {})", self.print_statement(body), self.print_expr(condition))
            }
            StatementType::For {
                init,
                condition,
                post,
                body,
            } => {
                let init = init.as_ref().map(|i| self.print_for_init(i)).unwrap_or_default();
                let cond = condition.as_ref().map(|c| self.print_expr(c)).unwrap_or_default();
                let post = post.as_ref().map(|p| self.print_expr(p)).unwrap_or_default();
                format!("For({init}; {cond}; {post}, {})", self.print_statement(body))
            }
            StatementType::Switch { condition, body, .. } => {
                format!("Switch({}, {})", self.print_expr(condition), self.print_statement(body))
            }
            StatementType::Case { value, stmt } => {
                format!("Case({}, {})", self.print_expr(value), self.print_statement(stmt))
            }
            StatementType::Default { stmt } => format!("Default({})", self.print_statement(stmt)),
            StatementType::Compound(block) => self.print_block(block),
            StatementType::ExprStatement(e) => self.print_expr(e),
            StatementType::Null => "Null".to_string(),
        }
    }

    fn print_for_init(&self, init: &ForInit) -> String {
        match init {
            ForInit::D(decl) => self.print_variable_decl(decl),
            ForInit::E(Some(e)) => self.print_expr(e),
            ForInit::E(None) => String::new(),
        }
    }

    /// Fully parenthesized infix form, e.g. `((1 - 2) - 3)`.
    fn print_expr(&self, expr: &Expression) -> String {
        match &expr.kind {
            ExpressionType::Constant(n) => n.to_string(),
            ExpressionType::Var(id) => self.name(id.get_identifier()).to_string(),
            ExpressionType::Unary { operator, operand } => {
                format!("({}{})", Self::unary_sym(*operator), self.print_expr(operand))
            }
            ExpressionType::PostOp { operator, operand } => {
                let sym = match operator {
                    PostOP::Inc => "++",
                    PostOP::Dec => "--",
                };
                format!("({}{sym})", self.print_expr(operand))
            }
            ExpressionType::Binary {
                operator,
                operand1,
                operand2,
            } => format!(
                "({} {} {})",
                self.print_expr(operand1),
                Self::binary_sym(*operator),
                self.print_expr(operand2)
            ),
            ExpressionType::Conditional { cond, cons, alt } => format!(
                "({} ? {} : {})",
                self.print_expr(cond),
                self.print_expr(cons),
                self.print_expr(alt)
            ),
            ExpressionType::Assignment { op, lvalue, rvalue } => {
                let sym = match op {
                    None => "=".to_string(),
                    Some(op) => format!("{}=", Self::binary_sym(*op)),
                };
                format!("({} {sym} {})", self.print_expr(lvalue), self.print_expr(rvalue))
            }
            ExpressionType::FunctionCall { name, args } => {
                let args = args.iter().map(|a| self.print_expr(a)).collect::<Vec<_>>().join(", ");
                format!("{}({args})", self.name(name.get_identifier()))
            }
            ExpressionType::Cast { target, operand } => {
                let ty = match target {
                    shared_context::Type::Int => "int",
                    shared_context::Type::Long => "long",
                };
                format!("({ty}){}", self.print_expr(operand))
            }
        }
    }

    fn unary_sym(op: UnaryOP) -> &'static str {
        match op {
            UnaryOP::Negate => "-",
            UnaryOP::Complement => "~",
            UnaryOP::Not => "!",
            UnaryOP::PreInc => "++",
            UnaryOP::PreDec => "--",
        }
    }

    fn binary_sym(op: BinaryOP) -> &'static str {
        match op {
            BinaryOP::Add => "+",
            BinaryOP::Sub => "-",
            BinaryOP::Mul => "*",
            BinaryOP::Div => "/",
            BinaryOP::Mod => "%",
            BinaryOP::BitAnd => "&",
            BinaryOP::BitOr => "|",
            BinaryOP::BitXor => "^",
            BinaryOP::ShiftLeft => "<<",
            BinaryOP::ShiftRight => ">>",
            BinaryOP::LogicalAnd => "&&",
            BinaryOP::LogicalOr => "||",
            BinaryOP::Equal => "==",
            BinaryOP::NotEqual => "!=",
            BinaryOP::LessThan => "<",
            BinaryOP::GreaterThan => ">",
            BinaryOP::LessThanOrEq => "<=",
            BinaryOP::GreaterThanOrEq => ">=",
        }
    }
}

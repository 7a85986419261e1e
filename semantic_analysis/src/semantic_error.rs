use core::fmt;
use shared_context::Span;
use shared_context::source_map::SourceMap;

/// Every way the semantic analyser can reject an otherwise syntactically
/// valid program. Each payload carries the span(s) needed to point back at
/// the offending source text; the source text itself (rendered by
/// `SourceMap::format_message`) stands in for the identifier's spelling, so
/// none of these carry a name string.
#[derive(Debug)]
pub enum ErrorType {
    DuplicateDeclaration { first: Span, second: Span },
    UseOfUndeclared(Span),
    InvalidLeftValue(Span),
    BreakOutsideLoopOrSwitch(Span),
    ContinueOutsideLoop(Span),
    CaseOutsideSwitch(Span),
    DefaultOutsideSwitch(Span),
    NonConstantCaseValue(Span),
    DuplicateCase { value: i64, first: Span, second: Span },
    DuplicateDefault { first: Span, second: Span },
    UndefinedLabel(Span),
    DuplicateLabel { first: Span, second: Span },
    ConflictingTypes { first: Span, second: Span },
    ConflictingLinkage { first: Span, second: Span },
    RedefinedFunction { first: Span, second: Span },
    ArityMismatch { expected: usize, found: usize, span: Span },
    NestedFunctionDefinition(Span),
    ExternVariableWithInitializer(Span),
    InvalidStaticInitializer(Span),
    FunctionUsedAsVariable(Span),
    VariableUsedAsFunction(Span),
}

#[derive(Debug)]
pub struct SemanticErr {
    formatted: String,
}

impl SemanticErr {
    pub fn new(err: ErrorType, source_map: &SourceMap) -> Self {
        let formatted = Self::format(err, source_map);
        Self { formatted }
    }

    fn at(source_map: &SourceMap, message: &str, span: Span) -> String {
        source_map.format_message(message, span)
    }

    fn at_two(source_map: &SourceMap, headline: &str, first: Span, second: Span) -> String {
        format!(
            "{headline}\nfirst declared here:\n{}\nconflicting declaration here:\n{}",
            source_map.format_message("", first),
            source_map.format_message("", second),
        )
    }

    fn format(err: ErrorType, source_map: &SourceMap) -> String {
        match err {
            ErrorType::DuplicateDeclaration { first, second } => {
                Self::at_two(source_map, "identifier declared twice in the same scope", first, second)
            }
            ErrorType::UseOfUndeclared(span) => {
                Self::at(source_map, "use of undeclared identifier", span)
            }
            ErrorType::InvalidLeftValue(span) => {
                Self::at(source_map, "invalid left-hand side of assignment", span)
            }
            ErrorType::BreakOutsideLoopOrSwitch(span) => {
                Self::at(source_map, "'break' statement not in a loop or switch", span)
            }
            ErrorType::ContinueOutsideLoop(span) => {
                Self::at(source_map, "'continue' statement not in a loop", span)
            }
            ErrorType::CaseOutsideSwitch(span) => {
                Self::at(source_map, "'case' label not within a switch statement", span)
            }
            ErrorType::DefaultOutsideSwitch(span) => {
                Self::at(source_map, "'default' label not within a switch statement", span)
            }
            ErrorType::NonConstantCaseValue(span) => {
                Self::at(source_map, "case value is not a constant expression", span)
            }
            ErrorType::DuplicateCase { value, first, second } => Self::at_two(
                source_map,
                &format!("duplicate case value '{value}'"),
                first,
                second,
            ),
            ErrorType::DuplicateDefault { first, second } => {
                Self::at_two(source_map, "multiple default labels in one switch", first, second)
            }
            ErrorType::UndefinedLabel(span) => {
                Self::at(source_map, "use of undeclared label", span)
            }
            ErrorType::DuplicateLabel { first, second } => {
                Self::at_two(source_map, "label already defined in this function", first, second)
            }
            ErrorType::ConflictingTypes { first, second } => {
                Self::at_two(source_map, "redeclared with a conflicting type", first, second)
            }
            ErrorType::ConflictingLinkage { first, second } => {
                Self::at_two(source_map, "redeclared with conflicting linkage", first, second)
            }
            ErrorType::RedefinedFunction { first, second } => {
                Self::at_two(source_map, "redefinition of function", first, second)
            }
            ErrorType::ArityMismatch { expected, found, span } => Self::at(
                source_map,
                &format!("function expects {expected} argument(s), found {found}"),
                span,
            ),
            ErrorType::NestedFunctionDefinition(span) => {
                Self::at(source_map, "a function definition may only appear at file scope", span)
            }
            ErrorType::ExternVariableWithInitializer(span) => Self::at(
                source_map,
                "'extern' variable declaration may not have an initializer",
                span,
            ),
            ErrorType::InvalidStaticInitializer(span) => Self::at(
                source_map,
                "initializer for a static-storage-duration variable must be a constant",
                span,
            ),
            ErrorType::FunctionUsedAsVariable(span) => {
                Self::at(source_map, "function used as a variable", span)
            }
            ErrorType::VariableUsedAsFunction(span) => {
                Self::at(source_map, "variable used as a function", span)
            }
        }
    }
}

impl fmt::Display for SemanticErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted)
    }
}

impl std::error::Error for SemanticErr {}

use crate::error::AxcError;
use crate::files::{remove_file_extension, set_file_name};
use codegen::aarch64;
use emitter::Emitter;
use lexer::{Lexer, Token};
use parser::Parser;
use parser::print_ast::DebuggingPrinter as AstPrinter;
use semantic_analysis::analize;
use shared_context::asm_symbol_table::AsmSymbolTable;
use shared_context::options::{HostOs, Machine};
use shared_context::source_map::SourceMap;
use shared_context::symbol_interner::SymbolInterner;
use shared_context::symbol_table::SymbolTable;
use shared_context::type_interner::TypeInterner;
use shared_context::{Bump, SymbolRegistery};
use std::fs;

/// Lexes the whole file and prints every token; stops before the parser
/// ever runs, so a `LexError` here is reported directly rather than
/// wrapped in a `ParseErr` the way it would be further down the pipeline.
pub fn lex_stage(file_path: &str, silent: bool) -> Result<(), AxcError> {
    let source = fs::read_to_string(file_path)?;
    let mut lexer = Lexer::new(&source);

    loop {
        let tok = lexer.next()?;
        if !silent {
            println!("{:?}\t{:?}", tok.get_token(), tok.get_lexeme());
        }
        if tok.get_token() == Token::Eof {
            break;
        }
    }

    Ok(())
}

/// Lexes and parses the file, printing the resulting AST. No semantic
/// analysis runs, so this can be used to inspect a program the checker
/// would reject.
pub fn parse_stage(file_path: &str, file_name: &str, silent: bool) -> Result<(), AxcError> {
    let source = fs::read_to_string(file_path)?;
    let arena = Bump::new();
    let source_map = SourceMap::new(file_name, &source);
    let mut sy_interner = SymbolInterner::new(&arena);
    let mut ty_interner = TypeInterner::new(&arena);

    let lexer = Lexer::new(&source);
    let mut parser = Parser::new(lexer, &source_map, &mut sy_interner, &mut ty_interner);
    let program = parser.parse_program()?;

    if !silent {
        println!("{}", AstPrinter::new(&sy_interner).print_program(&program));
    }
    Ok(())
}

/// Lexes, parses, and runs every semantic-analysis pass, reporting success
/// or the first semantic error. Nothing is printed on success: this stage
/// exists to validate a program, not to dump it.
pub fn validate_stage(file_path: &str, file_name: &str, silent: bool) -> Result<(), AxcError> {
    let source = fs::read_to_string(file_path)?;
    let arena = Bump::new();
    let source_map = SourceMap::new(file_name, &source);
    let mut sy_interner = SymbolInterner::new(&arena);
    let mut ty_interner = TypeInterner::new(&arena);
    let mut symbol_table = SymbolTable::new();

    let lexer = Lexer::new(&source);
    let mut parser = Parser::new(lexer, &source_map, &mut sy_interner, &mut ty_interner);
    let program = parser.parse_program()?;

    analize(&ty_interner, &mut sy_interner, &mut symbol_table, &source_map, program)
        .map_err(|e| AxcError::Semantic(e.to_string()))?;

    if !silent {
        println!("{file_name}: ok");
    }
    Ok(())
}

/// Runs the front end through TAC generation and prints the lowered
/// program.
pub fn tacky_stage(file_path: &str, file_name: &str, silent: bool) -> Result<(), AxcError> {
    let source = fs::read_to_string(file_path)?;
    let arena = Bump::new();
    let source_map = SourceMap::new(file_name, &source);
    let mut sy_interner = SymbolInterner::new(&arena);
    let mut ty_interner = TypeInterner::new(&arena);
    let mut symbol_table = SymbolTable::new();

    let lexer = Lexer::new(&source);
    let mut parser = Parser::new(lexer, &source_map, &mut sy_interner, &mut ty_interner);
    let program = parser.parse_program()?;

    let (checked, counter) =
        analize(&ty_interner, &mut sy_interner, &mut symbol_table, &source_map, program)
            .map_err(|e| AxcError::Semantic(e.to_string()))?;

    let tacky_program = ir_gen::lower_to_tacky(checked, &mut sy_interner, &mut symbol_table, counter);
    if !silent {
        ir_gen::print_ir::print_program(&tacky_program);
    }

    Ok(())
}

/// Runs the front end and the selected target's back end, printing the
/// resulting machine IR without writing a file.
pub fn codegen_stage(
    file_path: &str,
    file_name: &str,
    machine: Machine,
    silent: bool,
) -> Result<(), AxcError> {
    let source = fs::read_to_string(file_path)?;
    let arena = Bump::new();
    let source_map = SourceMap::new(file_name, &source);
    let mut sy_interner = SymbolInterner::new(&arena);
    let mut ty_interner = TypeInterner::new(&arena);
    let mut symbol_table = SymbolTable::new();

    let lexer = Lexer::new(&source);
    let mut parser = Parser::new(lexer, &source_map, &mut sy_interner, &mut ty_interner);
    let program = parser.parse_program()?;

    let (checked, counter) =
        analize(&ty_interner, &mut sy_interner, &mut symbol_table, &source_map, program)
            .map_err(|e| AxcError::Semantic(e.to_string()))?;

    let tacky_program = ir_gen::lower_to_tacky(checked, &mut sy_interner, &mut symbol_table, counter);

    match machine {
        Machine::X86_64 => {
            let symbol_reg = SymbolRegistery::build(symbol_table);
            let asm_program = codegen::codegen(tacky_program, &ty_interner, &symbol_reg);
            if !silent {
                codegen::DebuggingPrinter::new(&sy_interner).print(&asm_program);
            }
        }
        Machine::Aarch64 => {
            let asm_program = aarch64::lower(tacky_program)?;
            if !silent {
                print!("{}", aarch64::print_program(&asm_program, &sy_interner));
            }
        }
    }

    Ok(())
}

/// The default, full pipeline: lex through emission, writing
/// `<input-basename>.s` next to the input file. Returns the path written.
pub fn emit_assembly(file_path: &str, file_name: &str, machine: Machine) -> Result<String, AxcError> {
    let source = fs::read_to_string(file_path)?;
    let arena = Bump::new();
    let source_map = SourceMap::new(file_name, &source);
    let mut sy_interner = SymbolInterner::new(&arena);
    let mut ty_interner = TypeInterner::new(&arena);
    let mut symbol_table = SymbolTable::new();

    let lexer = Lexer::new(&source);
    let mut parser = Parser::new(lexer, &source_map, &mut sy_interner, &mut ty_interner);
    let program = parser.parse_program()?;

    let (checked, counter) =
        analize(&ty_interner, &mut sy_interner, &mut symbol_table, &source_map, program)
            .map_err(|e| AxcError::Semantic(e.to_string()))?;

    let tacky_program = ir_gen::lower_to_tacky(checked, &mut sy_interner, &mut symbol_table, counter);

    let asm_file_name = format!("{}.s", remove_file_extension(file_name));
    let output_path = set_file_name(file_path, &asm_file_name);
    let mut out_file = fs::File::create(&output_path)?;

    match machine {
        Machine::X86_64 => {
            // `AsmSymbolTable` is built from a reference so the table can
            // still be consumed by value below; `SymbolRegistery::build`
            // needs ownership to partition it into `var_table`/`fun_table`.
            let asm_symbols = AsmSymbolTable::new(&symbol_table);
            let symbol_reg = SymbolRegistery::build(symbol_table);
            let asm_program = codegen::codegen(tacky_program, &ty_interner, &symbol_reg);

            let host_os = HostOs::detect();
            let emitter = Emitter::new(&sy_interner, &asm_symbols, host_os);
            emitter.write_program(asm_program, &mut out_file)?;
        }
        Machine::Aarch64 => {
            let asm_program = aarch64::lower(tacky_program)?;
            use std::io::Write;
            write!(out_file, "{}", aarch64::print_program(&asm_program, &sy_interner))?;
        }
    }

    Ok(output_path)
}

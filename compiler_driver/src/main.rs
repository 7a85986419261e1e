use clap::Parser;
use compiler_driver::files::get_file_name;
use compiler_driver::stages;
use shared_context::options::Machine;
use std::process::ExitCode;

/// A compiler for a subset of C17, emitting GAS-syntax x86-64 assembly
/// (with an AArch64 skeleton behind `-m aarch64`).
#[derive(Parser)]
#[command(name = "axc", version, about)]
struct Cli {
    /// Suppress every debug dump; on the default pipeline, also suppress
    /// the "wrote ..." confirmation.
    #[arg(short = 's', long)]
    silent: bool,

    /// Target architecture: x86_64 (default), amd64, aarch64, or arm64.
    #[arg(short = 'm', long, default_value = "x86_64")]
    machine: String,

    /// Stop after lexing and print every token.
    #[arg(short = 'l', long, group = "stage")]
    lex: bool,

    /// Stop after parsing and print the AST.
    #[arg(short = 'p', long, group = "stage")]
    parse: bool,

    /// Stop after semantic analysis.
    #[arg(short = 'v', long, group = "stage")]
    validate: bool,

    /// Stop after TAC generation and print it.
    #[arg(short = 't', long, group = "stage")]
    tacky: bool,

    /// Stop after code generation and print the machine IR, without
    /// writing an assembly file.
    #[arg(short = 'c', long, group = "stage")]
    codegen: bool,

    file: std::path::PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(machine) = Machine::parse(&cli.machine) else {
        println!(
            "error: unknown machine '{}', expected one of x86_64, amd64, aarch64, arm64",
            cli.machine
        );
        return ExitCode::FAILURE;
    };

    let file_path = cli.file.to_string_lossy().into_owned();
    let file_name = get_file_name(&file_path).to_string();

    let result = if cli.lex {
        stages::lex_stage(&file_path, cli.silent)
    } else if cli.parse {
        stages::parse_stage(&file_path, &file_name, cli.silent)
    } else if cli.validate {
        stages::validate_stage(&file_path, &file_name, cli.silent)
    } else if cli.tacky {
        stages::tacky_stage(&file_path, &file_name, cli.silent)
    } else if cli.codegen {
        stages::codegen_stage(&file_path, &file_name, machine, cli.silent)
    } else {
        stages::emit_assembly(&file_path, &file_name, machine).map(|output_path| {
            if !cli.silent {
                println!("{output_path}");
            }
        })
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}

//! A debug printer for `tacky`, mirroring the ease-of-reading dumps other
//! stages produce; not used by the compiler driver's normal pipeline.

use crate::tacky;

pub fn print_program(program: &tacky::Program) {
    println!("Program");
    for item in &program.items {
        match item {
            tacky::TopLevel::Function(f) => print_function(f),
            tacky::TopLevel::StaticVariable(s) => print_static(s),
        }
    }
}

fn print_function(function: &tacky::FunctionDef) {
    let indent = " ".repeat(2);
    let linkage = if function.global { "global" } else { "internal" };
    println!(
        "{}Function {}.{} ({}) [{}]",
        indent,
        function.name.get_symbol().raw(),
        function.name.get_id(),
        function
            .params
            .iter()
            .map(|p| format!("{}.{}", p.get_symbol().raw(), p.get_id()))
            .collect::<Vec<_>>()
            .join(", "),
        linkage,
    );

    for instr in &function.instructions {
        print_instruction(instr);
    }
}

fn print_static(var: &tacky::StaticVariable) {
    let indent = " ".repeat(2);
    let linkage = if var.global { "global" } else { "internal" };
    println!(
        "{}StaticVariable {}.{} {:?} {:?} [{}]",
        indent,
        var.name.get_symbol().raw(),
        var.name.get_id(),
        var.var_type,
        var.init,
        linkage,
    );
}

fn print_instruction(instr: &tacky::Instruction) {
    let indent = " ".repeat(4);
    match instr {
        tacky::Instruction::Return(val) => println!("{indent}Return({val})"),

        tacky::Instruction::Unary { op, src, dst } => {
            println!("{indent}{dst} = {op:?} {src}");
        }

        tacky::Instruction::Binary { op, src1, src2, dst } => {
            println!("{indent}{dst} = {src1} {op:?} {src2}");
        }

        tacky::Instruction::Copy { src, dst } => println!("{indent}{dst} = {src}"),

        tacky::Instruction::SignExtend { src, dst } => println!("{indent}{dst} = sign_extend {src}"),

        tacky::Instruction::Truncate { src, dst } => println!("{indent}{dst} = truncate {src}"),

        tacky::Instruction::Jump(target) => {
            println!("{}Jump({}.{})", indent, target.get_symbol().raw(), target.get_id());
        }

        tacky::Instruction::JumpIfZero { cond, target } => {
            println!(
                "{}JumpIfZero({cond}, {}.{})",
                indent,
                target.get_symbol().raw(),
                target.get_id()
            );
        }

        tacky::Instruction::JumpIfNotZero { cond, target } => {
            println!(
                "{}JumpIfNotZero({cond}, {}.{})",
                indent,
                target.get_symbol().raw(),
                target.get_id()
            );
        }

        tacky::Instruction::Label(label) => {
            println!("{}Label({}.{})", indent, label.get_symbol().raw(), label.get_id());
        }

        tacky::Instruction::FunCall { name, args, dst } => {
            let args = args.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(", ");
            println!(
                "{}{dst} = Call {}.{}({args})",
                indent,
                name.get_symbol().raw(),
                name.get_id()
            );
        }
    }
}

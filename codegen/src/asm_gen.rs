//! Instruction selection: a straight-line translation of each `tacky`
//! instruction into one or more `asm` instructions, still over unbounded
//! `Pseudo` operands. Legality (which operand combinations a real x86-64
//! instruction can actually take) is [`crate::fix_instructions`]'s job, not
//! this module's.

use crate::asm::{self, Operand, Register};
use ir_gen::tacky;
use shared_context::{
    Identifier, OperandSize, SymbolRegistery, Type, convert_type_to_operand_size, type_interner::TypeInterner,
};

mod gen_control_flow;
mod gen_operations;

/// The System V AMD64 integer argument registers, in order.
const ARG_REGS: [asm::RegName; 6] = [
    asm::RegName::DI,
    asm::RegName::SI,
    asm::RegName::DX,
    asm::RegName::CX,
    asm::RegName::R8,
    asm::RegName::R9,
];

pub struct AsmGen<'ctx, 'src> {
    ty_interner: &'ctx TypeInterner<'src>,
    symbol_reg: &'ctx SymbolRegistery,
}

impl<'ctx, 'src> AsmGen<'ctx, 'src> {
    pub fn new(ty_interner: &'ctx TypeInterner<'src>, symbol_reg: &'ctx SymbolRegistery) -> Self {
        Self {
            ty_interner,
            symbol_reg,
        }
    }

    /// Consumes the tacky tree and produces an asm tree, one `asm::TopLevel`
    /// per `tacky::TopLevel`.
    pub fn gen_asm(&self, program: tacky::Program) -> asm::Program {
        let items = program
            .items
            .into_iter()
            .map(|item| match item {
                tacky::TopLevel::Function(f) => asm::TopLevel::Function(self.gen_function_def(f)),
                tacky::TopLevel::StaticVariable(s) => asm::TopLevel::StaticVariable(self.gen_static_variable(s)),
            })
            .collect();

        asm::Program::new(items)
    }

    fn gen_static_variable(&self, var: tacky::StaticVariable) -> asm::StaticVariable {
        asm::StaticVariable::new(var.name, var.global, var.var_type.align_bytes(), var.init)
    }

    fn gen_function_def(&self, function: tacky::FunctionDef) -> asm::FunctionDef {
        let mut instructions = Vec::new();

        // Placeholder for the prologue's real frame size; reg_alloc
        // patches this once it knows the function's total stack usage.
        instructions.push(asm::Instruction::AllocateStack(0));

        self.gen_prologue(&function.params, &mut instructions);

        for instr in function.instructions {
            self.gen_instruction(instr, &mut instructions);
        }

        asm::FunctionDef::new(function.name, function.global, instructions)
    }

    /// Moves each parameter out of its calling-convention register or
    /// caller-frame stack slot and into its own pseudo-register, so the
    /// rest of the function body can just refer to it by name.
    fn gen_prologue(&self, params: &[Identifier], out: &mut Vec<asm::Instruction>) {
        for (i, param) in params.iter().enumerate() {
            let ty = self.var_type(param);
            let size = convert_type_to_operand_size(ty);
            let dst = Operand::Pseudo(*param);

            let src = if i < ARG_REGS.len() {
                Operand::Reg(Register::new(ARG_REGS[i], size))
            } else {
                // Laid out by the caller above the return address: one
                // 8-byte slot per extra argument, in source order.
                let offset = 16 + 8 * (i - ARG_REGS.len()) as i64;
                Operand::Stack(offset)
            };

            out.push(asm::Instruction::Mov { ty: size, src, dst });
        }
    }

    fn gen_instruction(&self, instr: tacky::Instruction, out: &mut Vec<asm::Instruction>) {
        match instr {
            tacky::Instruction::Return(val) => self.gen_return(val, out),
            tacky::Instruction::Unary { op, src, dst } => self.gen_unary(op, src, dst, out),
            tacky::Instruction::Binary { op, src1, src2, dst } => self.gen_binary(op, src1, src2, dst, out),
            tacky::Instruction::Copy { src, dst } => self.gen_copy(src, dst, out),
            tacky::Instruction::SignExtend { src, dst } => self.gen_sign_extend(src, dst, out),
            tacky::Instruction::Truncate { src, dst } => self.gen_truncate(src, dst, out),
            tacky::Instruction::Jump(target) => out.push(asm::Instruction::Jmp(target)),
            tacky::Instruction::JumpIfZero { cond, target } => self.gen_jump_if_zero(cond, target, out),
            tacky::Instruction::JumpIfNotZero { cond, target } => self.gen_jump_if_not_zero(cond, target, out),
            tacky::Instruction::Label(label) => out.push(asm::Instruction::Label(label)),
            tacky::Instruction::FunCall { name, args, dst } => self.gen_call(name, args, dst, out),
        }
    }

    fn gen_return(&self, val: tacky::Value, out: &mut Vec<asm::Instruction>) {
        let ty = self.value_size(&val);
        out.push(asm::Instruction::Mov {
            ty,
            src: Self::convert_val(&val),
            dst: Operand::Reg(Register::new(asm::RegName::AX, ty)),
        });
        out.push(asm::Instruction::Ret);
    }

    fn gen_copy(&self, src: tacky::Value, dst: tacky::Value, out: &mut Vec<asm::Instruction>) {
        let ty = self.value_size(&dst);
        out.push(asm::Instruction::Mov {
            ty,
            src: Self::convert_val(&src),
            dst: Self::convert_val(&dst),
        });
    }

    /// Widening a `Cast` lowers straight to the dedicated sign-extend op.
    fn gen_sign_extend(&self, src: tacky::Value, dst: tacky::Value, out: &mut Vec<asm::Instruction>) {
        out.push(asm::Instruction::Movsx {
            src: Self::convert_val(&src),
            dst: Self::convert_val(&dst),
        });
    }

    /// Narrowing a `Cast` carries no opcode of its own: just a 4-byte `Mov`
    /// reading the source's low bytes into a fresh, narrower slot.
    fn gen_truncate(&self, src: tacky::Value, dst: tacky::Value, out: &mut Vec<asm::Instruction>) {
        out.push(asm::Instruction::Mov {
            ty: OperandSize::Long,
            src: Self::convert_val(&src),
            dst: Self::convert_val(&dst),
        });
    }

    fn gen_call(
        &self,
        name: Identifier,
        args: Vec<tacky::Value>,
        dst: tacky::Value,
        out: &mut Vec<asm::Instruction>,
    ) {
        let mut args = args;
        let stack_args = if args.len() > ARG_REGS.len() {
            args.split_off(ARG_REGS.len())
        } else {
            Vec::new()
        };
        let reg_args = args;

        // Keep %rsp 16-byte aligned across the call: one padding slot if
        // an odd number of arguments spill to the stack.
        let stack_padding: i64 = if stack_args.len() % 2 == 1 { 8 } else { 0 };
        if stack_padding > 0 {
            out.push(asm::Instruction::AllocateStack(stack_padding));
        }

        for (i, arg) in reg_args.iter().enumerate() {
            let ty = self.value_size(arg);
            out.push(asm::Instruction::Mov {
                ty,
                src: Self::convert_val(arg),
                dst: Operand::Reg(Register::new(ARG_REGS[i], ty)),
            });
        }

        for arg in stack_args.iter().rev() {
            let ty = self.value_size(arg);
            // `push` always moves 8 bytes; widen through %rax first so a
            // 4-byte argument doesn't drag along whatever garbage sits
            // above it in memory.
            out.push(asm::Instruction::Mov {
                ty,
                src: Self::convert_val(arg),
                dst: Operand::Reg(Register::new(asm::RegName::AX, ty)),
            });
            out.push(asm::Instruction::Push(Operand::Reg(Register::new(
                asm::RegName::AX,
                OperandSize::Qword,
            ))));
        }

        out.push(asm::Instruction::Call(name));

        let bytes_to_remove = stack_padding + 8 * stack_args.len() as i64;
        if bytes_to_remove > 0 {
            out.push(asm::Instruction::DeallocateStack(bytes_to_remove));
        }

        let ret_ty = self.function_return_size(&name);
        out.push(asm::Instruction::Mov {
            ty: ret_ty,
            src: Operand::Reg(Register::new(asm::RegName::AX, ret_ty)),
            dst: Self::convert_val(&dst),
        });
    }

    fn var_type(&self, iden: &Identifier) -> Type {
        self.symbol_reg.get_variable(iden).get_type()
    }

    /// The type a `tacky::Value` holds: a constant is always `Int` (the
    /// type checker never leaves a narrower/wider constant unconverted),
    /// a variable's type comes from the symbol table, where every
    /// compiler-generated temporary was registered exactly like a source
    /// local (see `ir_gen::IRgen::make_temp_var`).
    fn value_type(&self, val: &tacky::Value) -> Type {
        match val {
            tacky::Value::Constant(_) => Type::Int,
            tacky::Value::Variable(iden) => self.var_type(iden),
        }
    }

    fn value_size(&self, val: &tacky::Value) -> OperandSize {
        convert_type_to_operand_size(self.value_type(val))
    }

    fn function_return_size(&self, name: &Identifier) -> OperandSize {
        let fun = self.symbol_reg.get_function(name);
        let ret_ty = self.ty_interner.get(fun.get_type_id()).ret;
        convert_type_to_operand_size(ret_ty)
    }

    fn convert_val(val: &tacky::Value) -> Operand {
        match val {
            tacky::Value::Constant(n) => Operand::Immediate(*n),
            tacky::Value::Variable(iden) => Operand::Pseudo(*iden),
        }
    }
}

/// The scalar type of a declaration, after semantic analysis.
///
/// This is the entire type system AXC supports: `int` and `long`, both
/// signed. Function types are handled separately via [`crate::type_interner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Long,
}

impl Type {
    /// Size in bytes of a scalar of this type, used for stack slot and
    /// static-storage sizing.
    pub fn size_bytes(self) -> usize {
        match self {
            Type::Int => 4,
            Type::Long => 8,
        }
    }

    /// Alignment in bytes required for a static of this type.
    pub fn align_bytes(self) -> usize {
        self.size_bytes()
    }

    pub fn is_long(self) -> bool {
        matches!(self, Type::Long)
    }

    /// The usual-arithmetic-conversions common type of two operands:
    /// `Long` if either side is `Long`, otherwise `Int`.
    pub fn common_type(a: Type, b: Type) -> Type {
        if a == Type::Long || b == Type::Long {
            Type::Long
        } else {
            Type::Int
        }
    }
}

/// Operand width used by the x86-64 back end, derived from a [`Type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandSize {
    Byte,
    Long,
    Qword,
}

impl OperandSize {
    pub fn suffix(self) -> &'static str {
        match self {
            OperandSize::Byte => "b",
            OperandSize::Long => "l",
            OperandSize::Qword => "q",
        }
    }
}

/// Maps a source-level scalar type to the operand size used to hold it.
pub fn convert_type_to_operand_size(ty: Type) -> OperandSize {
    match ty {
        Type::Int => OperandSize::Long,
        Type::Long => OperandSize::Qword,
    }
}

use crate::types::Type;
use bumpalo::Bump;
use std::collections::HashMap;

/// A unique identifier for an interned function type.
///
/// This acts as a stable handle that refers to a specific canonical
/// [`FunctionType`]. Equality between function types can be done by
/// comparing these IDs directly, without comparing parameter lists or
/// return types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeID(u32);

/// Represents a canonicalized function type.
///
/// Each `FunctionType` stores a return type and a slice of parameter
/// types, allocated in a [`Bump`] arena so interned values are immutable
/// and stable for the arena's lifetime.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct FunctionType<'a> {
    pub ret: Type,
    pub params: &'a [Type],
}

impl<'a> FunctionType<'a> {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Stores all unique (interned) function types within a compilation.
///
/// Structurally identical `(ret, params)` pairs share one canonical
/// representation, so two function declarations with the same shape
/// compare equal by comparing their [`TypeID`]s alone.
pub struct TypeInterner<'a> {
    arena: &'a Bump,
    map: HashMap<FunctionType<'a>, TypeID>,
    types: Vec<&'a FunctionType<'a>>,
}

impl<'a> TypeInterner<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        Self {
            arena,
            map: HashMap::new(),
            types: Vec::new(),
        }
    }

    /// Interns a function type composed of `ret` and `params`, returning
    /// the existing ID if an identical type was interned before.
    pub fn intern(&mut self, ret: Type, params: &[Type]) -> TypeID {
        let key = FunctionType { ret, params };
        if let Some(&id) = self.map.get(&key) {
            return id;
        }

        let params_copy = self.arena.alloc_slice_copy(params);
        let fty = self.arena.alloc(FunctionType {
            ret,
            params: params_copy,
        });

        let id = TypeID(self.types.len() as u32);
        self.map.insert(
            FunctionType {
                ret,
                params: params_copy,
            },
            id,
        );
        self.types.push(fty);

        id
    }

    /// Retrieves the canonical [`FunctionType`] for a previously returned ID.
    ///
    /// # Panics
    /// Panics if `id` was not returned by `self.intern(..)`.
    pub fn get(&self, id: TypeID) -> &'a FunctionType<'a> {
        self.types[id.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_signatures_dedup_to_the_same_id() {
        let arena = Bump::new();
        let mut interner = TypeInterner::new(&arena);
        let a = interner.intern(Type::Int, &[Type::Int, Type::Long]);
        let b = interner.intern(Type::Int, &[Type::Int, Type::Long]);
        assert_eq!(a, b);
        assert_eq!(interner.get(a).arity(), 2);
    }

    #[test]
    fn differing_signatures_get_distinct_ids() {
        let arena = Bump::new();
        let mut interner = TypeInterner::new(&arena);
        let a = interner.intern(Type::Int, &[]);
        let b = interner.intern(Type::Long, &[]);
        assert_ne!(a, b);
    }
}

use bumpalo::Bump;
use std::collections::HashMap;

/// A cheap, copyable handle to an interned string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Symbol(pub(crate) usize);

impl Symbol {
    /// The raw interning index, for debug dumps that want a stable,
    /// cheap label without going through a [`SymbolInterner`] lookup.
    pub fn raw(&self) -> usize {
        self.0
    }
}

/// Deduplicates identifier spellings into [`Symbol`] handles, backing the
/// actual string storage with a bump arena so every `&str` returned by
/// `lookup` is stable for the lifetime of the arena.
pub struct SymbolInterner<'a> {
    arena: &'a Bump,
    map: HashMap<&'a str, Symbol>,
    vec: Vec<&'a str>,
}

impl<'a> SymbolInterner<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        // reserve the first position for a default value
        let vec = vec!["default"];

        Self {
            arena,
            map: HashMap::new(),
            vec,
        }
    }

    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.map.get(s) {
            return sym;
        }

        let sym = Symbol(self.vec.len());

        // Allocate the string in the bump arena
        let stored: &'a str = self.arena.alloc_str(s);

        self.vec.push(stored);
        self.map.insert(stored, sym);

        sym
    }

    pub fn lookup(&self, sym: Symbol) -> &'a str {
        self.vec[sym.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_same_spelling_twice_returns_same_symbol() {
        let arena = Bump::new();
        let mut interner = SymbolInterner::new(&arena);
        let a = interner.intern("foo");
        let b = interner.intern("foo");
        assert_eq!(a, b);
        assert_eq!(interner.lookup(a), "foo");
    }

    #[test]
    fn distinct_spellings_get_distinct_symbols() {
        let arena = Bump::new();
        let mut interner = SymbolInterner::new(&arena);
        let a = interner.intern("foo");
        let b = interner.intern("bar");
        assert_ne!(a, b);
    }
}

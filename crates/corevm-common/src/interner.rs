//! String interning for identifier/name deduplication.
//!
//! Identifiers (class names, field names, method names) are compared by
//! equality constantly during type checking and usage analysis — as map
//! keys, as union-member discriminants, as the basis for canonical type
//! strings. Interning turns those comparisons (and the `Copy` cost of
//! passing a name around) into a `u32` compare instead of a `str` compare.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// An interned string. Cheap to copy, compares by identity of the index,
/// not by content — two `Atom`s are equal iff they were interned from
/// equal strings by the *same* `Interner`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(u32);

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Atom({})", self.0)
    }
}

/// A deduplicating string table.
///
/// Not thread-safe by design: the checker runs a single-threaded,
/// synchronous driver, so a plain `FxHashMap` suffices; a parallel driver
/// would need a sharded variant merged at a barrier.
#[derive(Default)]
pub struct Interner {
    strings: Vec<Arc<str>>,
    lookup: FxHashMap<Arc<str>, Atom>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `s`, returning its `Atom`. Interning the same text twice
    /// returns the same `Atom`.
    pub fn intern(&mut self, s: &str) -> Atom {
        if let Some(&atom) = self.lookup.get(s) {
            return atom;
        }
        let arc: Arc<str> = Arc::from(s);
        let atom = Atom(self.strings.len() as u32);
        self.strings.push(arc.clone());
        self.lookup.insert(arc, atom);
        atom
    }

    /// Resolve an `Atom` back to its text. Panics if `atom` was not
    /// produced by this interner — that would be a caller bug, never a
    /// user-triggerable one.
    pub fn resolve(&self, atom: Atom) -> &str {
        &self.strings[atom.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_the_same_text_twice_yields_the_same_atom() {
        let mut interner = Interner::new();
        let a = interner.intern("speak");
        let b = interner.intern("speak");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_text_yields_distinct_atoms() {
        let mut interner = Interner::new();
        let a = interner.intern("speak");
        let b = interner.intern("bark");
        assert_ne!(a, b);
    }

    #[test]
    fn resolve_round_trips() {
        let mut interner = Interner::new();
        let atom = interner.intern("Animal");
        assert_eq!(interner.resolve(atom), "Animal");
    }
}

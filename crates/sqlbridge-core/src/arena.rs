//! Arena allocation for syntax-tree nodes.
//!
//! Every node produced by a parse lives in a single [`Arena`]; releasing the
//! tree is a wholesale `reset`, never a per-node free. The arena is owned by
//! the caller and handed to the parser by reference, so the borrow checker
//! reifies the invariant "a tree never outlives its arena": resetting the
//! arena requires `&mut Arena`, which is impossible while any `&'a` node
//! reference is still alive.

use bumpalo::Bump;

/// Initial chunk size. A typical statement parses without growing past it.
const INITIAL_CHUNK: usize = 8 * 1024;

/// A monotonic bump allocator backing all syntax-tree nodes.
///
/// ```
/// use sqlbridge_core::{parse_one, Arena};
///
/// let arena = Arena::new();
/// let stmt = parse_one(&arena, "SELECT 1").unwrap();
/// assert!(stmt.is_some());
/// ```
pub struct Arena {
    bump: Bump,
}

impl Arena {
    /// Creates an arena with the default initial chunk.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CHUNK)
    }

    /// Creates an arena whose first chunk holds at least `bytes`.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bump: Bump::with_capacity(bytes),
        }
    }

    /// Moves `value` into the arena and returns a reference to it.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc<T>(&self, value: T) -> &mut T {
        self.bump.alloc(value)
    }

    /// Copies `s` into the arena.
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    /// The underlying bump allocator, for building node sequences with
    /// `bumpalo::collections::Vec::new_in`.
    #[must_use]
    pub fn bump(&self) -> &Bump {
        &self.bump
    }

    /// Total bytes currently allocated, across all chunks.
    #[must_use]
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Drops every node at once and rewinds to a single retained chunk.
    ///
    /// Trees produced before the reset cannot be alive at this point; the
    /// `&mut self` receiver makes retaining them a compile error.
    pub fn reset(&mut self) {
        self.bump.reset();
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_returns_stable_references() {
        let arena = Arena::new();
        let a = arena.alloc(42_u64);
        let b = arena.alloc(7_u64);
        assert_eq!(*a, 42);
        assert_eq!(*b, 7);
    }

    #[test]
    fn alloc_str_copies_into_arena() {
        let arena = Arena::new();
        let s = String::from("users");
        let copied = arena.alloc_str(&s);
        drop(s);
        assert_eq!(copied, "users");
    }

    #[test]
    fn reset_rewinds_allocation() {
        let mut arena = Arena::new();
        for i in 0..1000_u32 {
            arena.alloc(i);
        }
        let grown = arena.allocated_bytes();
        arena.reset();
        assert!(arena.allocated_bytes() <= grown);
        // the arena is fully reusable after a reset
        let x = arena.alloc(1_u8);
        assert_eq!(*x, 1);
    }
}

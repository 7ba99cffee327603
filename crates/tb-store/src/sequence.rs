//! Id sequences

use tb_core::traits::Id;

/// Monotonic id counter. Ids are never handed out twice, including ids of
/// rows that were deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: Id,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdSequence {
    pub fn starting_at(next: Id) -> Self {
        Self { next }
    }

    /// Take the next id
    pub fn next_id(&mut self) -> Id {
        let id = self.next;
        self.next += 1;
        id
    }

    pub fn peek(&self) -> Id {
        self.next
    }
}

/// One sequence per mutable collection. Teams are read-only and have none.
#[derive(Debug, Clone, Default)]
pub struct Sequences {
    pub users: IdSequence,
    pub projects: IdSequence,
    pub tasks: IdSequence,
    pub task_links: IdSequence,
}

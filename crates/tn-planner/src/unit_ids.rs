//! Unit id assignment.

use rustc_hash::FxHashSet;

use tn_core::UnitId;

/// Hands out the lowest positive ids not used by existing units or by units
/// emitted earlier in the turn.
#[derive(Debug, Clone)]
pub struct UnitIdAllocator {
    taken: FxHashSet<UnitId>,
    next:  u32,
}

impl UnitIdAllocator {
    pub fn new(existing: impl IntoIterator<Item = UnitId>) -> Self {
        Self { taken: existing.into_iter().collect(), next: 1 }
    }

    pub fn next_id(&mut self) -> UnitId {
        while self.taken.contains(&UnitId(self.next)) {
            self.next += 1;
        }
        let id = UnitId(self.next);
        self.taken.insert(id);
        self.next += 1;
        id
    }
}

//! Per-turn budget.

/// Resources available this turn.  Only ever decreases; never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    start:     u64,
    remaining: u64,
}

impl Budget {
    pub fn new(start: u64) -> Self {
        Self { start, remaining: start }
    }

    #[inline]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    #[inline]
    pub fn spent(&self) -> u64 {
        self.start - self.remaining
    }

    #[inline]
    pub fn start(&self) -> u64 {
        self.start
    }

    #[inline]
    pub fn can_afford(&self, cost: u64) -> bool {
        cost <= self.remaining
    }

    /// Deduct `cost` if affordable.  Returns `false` (and changes nothing)
    /// otherwise.
    pub fn try_spend(&mut self, cost: u64) -> bool {
        match self.remaining.checked_sub(cost) {
            Some(left) => {
                self.remaining = left;
                true
            }
            None => false,
        }
    }
}

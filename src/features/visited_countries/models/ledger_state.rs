/// Mutation applied to a single (user, country) ledger row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOp {
    Increment,
    Decrement,
}

/// Next diary count for a ledger row, `None` meaning "no row".
///
/// absent -> 1 -> 2 -> ... -> 1 -> absent. Decrementing an absent row leaves
/// it absent; a zero count is never produced.
pub fn next_count(current: Option<i32>, op: LedgerOp) -> Option<i32> {
    match (current, op) {
        (None, LedgerOp::Increment) => Some(1),
        (Some(n), LedgerOp::Increment) => Some(n.saturating_add(1)),
        (None, LedgerOp::Decrement) => None,
        (Some(n), LedgerOp::Decrement) if n > 1 => Some(n - 1),
        (Some(_), LedgerOp::Decrement) => None,
    }
}

/// Observable outcome of a ledger primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerChange {
    Created,
    Incremented { diary_count: i32 },
    Decremented { diary_count: i32 },
    Removed,
    /// Decrement on an absent row
    Untouched,
}

impl LedgerChange {
    pub fn between(before: Option<i32>, after: Option<i32>) -> Self {
        match (before, after) {
            (None, Some(_)) => LedgerChange::Created,
            (Some(_), None) => LedgerChange::Removed,
            (None, None) => LedgerChange::Untouched,
            (Some(b), Some(a)) if a > b => LedgerChange::Incremented { diary_count: a },
            (Some(_), Some(a)) => LedgerChange::Decremented { diary_count: a },
        }
    }
}

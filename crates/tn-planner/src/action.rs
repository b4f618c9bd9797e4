//! Actions: what the planner emits for one turn.

use std::fmt;

use tn_core::{NodeId, UnitId};

/// Discriminant of [`Action`]; also keys the per-turn caps.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ActionKind {
    Link,
    Upgrade,
    Unit,
    InstantLink,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] =
        [ActionKind::Link, ActionKind::Upgrade, ActionKind::Unit, ActionKind::InstantLink];

    /// Keyword used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Link        => "LINK",
            ActionKind::Upgrade     => "UPGRADE",
            ActionKind::Unit        => "UNIT",
            ActionKind::InstantLink => "INSTANTLINK",
        }
    }

    #[inline]
    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One committed action.
///
/// A `Unit` or `Upgrade` may refer to a link built earlier in the same
/// action list; the list order is the commit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Link { a: NodeId, b: NodeId },
    Upgrade { a: NodeId, b: NodeId },
    Unit { id: UnitId, stops: Vec<NodeId> },
    InstantLink { a: NodeId, b: NodeId },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Link { .. }        => ActionKind::Link,
            Action::Upgrade { .. }     => ActionKind::Upgrade,
            Action::Unit { .. }        => ActionKind::Unit,
            Action::InstantLink { .. } => ActionKind::InstantLink,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Link { a, b } | Action::Upgrade { a, b } | Action::InstantLink { a, b } => {
                write!(f, "{} {} {}", self.kind(), a.0, b.0)
            }
            Action::Unit { id, stops } => {
                write!(f, "{} {}", self.kind(), id.0)?;
                for s in stops {
                    write!(f, " {}", s.0)?;
                }
                Ok(())
            }
        }
    }
}

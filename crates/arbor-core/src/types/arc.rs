use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of its span an arc points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Head sits to the right of its dependent.
    Left,
    /// Head sits to the left of its dependent.
    Right,
}

impl Direction {
    /// Index into chart arrays: `0` for left, `1` for right.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "L"),
            Self::Right => write!(f, "R"),
        }
    }
}

/// A directed head → dependent edge between two token positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Arc {
    /// Position of the head. May be `0` (ROOT).
    pub head: usize,
    /// Position of the dependent. Always `>= 1`.
    pub dependent: usize,
}

impl Arc {
    #[must_use]
    pub fn new(head: usize, dependent: usize) -> Self {
        Self { head, dependent }
    }

    #[must_use]
    pub fn direction(self) -> Direction {
        if self.head > self.dependent {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// Absolute distance between head and dependent.
    #[must_use]
    pub fn distance(self) -> usize {
        self.head.abs_diff(self.dependent)
    }

    /// Leftmost and rightmost positions covered by the arc.
    #[must_use]
    pub fn span(self) -> (usize, usize) {
        (
            self.head.min(self.dependent),
            self.head.max(self.dependent),
        )
    }

    /// Two arcs cross when exactly one endpoint of one lies strictly inside the other.
    #[must_use]
    pub fn crosses(self, other: Arc) -> bool {
        let (a_lo, a_hi) = self.span();
        let (b_lo, b_hi) = other.span();
        (a_lo < b_lo && b_lo < a_hi && a_hi < b_hi) || (b_lo < a_lo && a_lo < b_hi && b_hi < a_hi)
    }
}

impl fmt::Display for Arc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.head, self.dependent)
    }
}

mod constraint;
pub(crate) mod lowlevel;

pub use constraint::{Constraint, EdgeConstraint, VertexConstraint};

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub fn new(x: i32, y: i32) -> Self {
        Location { x, y }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A vertex of the time-expanded search space.
///
/// Two states are the same search vertex only when time and position both
/// match, so every time step gets its own copy of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct State {
    pub time: usize,
    pub x: i32,
    pub y: i32,
}

impl State {
    pub fn new(time: usize, x: i32, y: i32) -> Self {
        State { time, x, y }
    }

    pub fn location(&self) -> Location {
        Location::new(self.x, self.y)
    }

    // Time is ignored.
    pub fn is_same_location(&self, other: &State) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ({},{})", self.time, self.x, self.y)
    }
}

pub type Path = Vec<State>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: usize,
    pub start: Location,
    pub goal: Location,
}

impl Agent {
    /// Start state at time zero.
    pub fn start_state(&self) -> State {
        State::new(0, self.start.x, self.start.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_state_identity_includes_time() {
        let a = State::new(1, 2, 3);
        let b = State::new(2, 2, 3);
        assert_ne!(a, b);
        assert!(a.is_same_location(&b));
        assert_eq!(a.location(), b.location());

        let set: HashSet<State> = [a, b, State::new(1, 2, 3)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Location::new(1, 2).to_string(), "(1,2)");
        assert_eq!(State::new(3, 1, 2).to_string(), "3: (1,2)");
    }
}

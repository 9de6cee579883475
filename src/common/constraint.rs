use super::State;

use serde::{Deserialize, Serialize};

/// Forbids `agent` from occupying `(x, y)` at `time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexConstraint {
    pub agent: usize,
    pub time: usize,
    pub x: i32,
    pub y: i32,
}

/// Forbids `agent1` from moving `(x1, y1)@time1 -> (x2, y2)@time2`.
/// `agent2` is the agent it collided with and is only kept for bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeConstraint {
    pub agent1: usize,
    pub agent2: usize,
    pub time1: usize,
    pub x1: i32,
    pub y1: i32,
    pub time2: usize,
    pub x2: i32,
    pub y2: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Constraint {
    Vertex(VertexConstraint),
    Edge(EdgeConstraint),
}

impl Constraint {
    pub fn is_vertex(&self) -> bool {
        matches!(self, Constraint::Vertex(_))
    }

    pub fn is_edge(&self) -> bool {
        matches!(self, Constraint::Edge(_))
    }

    /// The constrained agent.
    pub fn agent(&self) -> usize {
        match self {
            Constraint::Vertex(v) => v.agent,
            Constraint::Edge(e) => e.agent1,
        }
    }

    /// Whether the transition `curr -> next` is prohibited. Agent identity is
    /// not checked here, callers pass constraints already filtered.
    pub fn forbids(&self, curr: &State, next: &State) -> bool {
        match self {
            Constraint::Vertex(v) => v.x == next.x && v.y == next.y && v.time == next.time,
            Constraint::Edge(e) => {
                e.x1 == curr.x
                    && e.y1 == curr.y
                    && e.time1 == curr.time
                    && e.x2 == next.x
                    && e.y2 == next.y
                    && e.time2 == next.time
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: State, to: State) -> Constraint {
        Constraint::Edge(EdgeConstraint {
            agent1: 0,
            agent2: 1,
            time1: from.time,
            x1: from.x,
            y1: from.y,
            time2: to.time,
            x2: to.x,
            y2: to.y,
        })
    }

    #[test]
    fn test_vertex_constraint() {
        let c = Constraint::Vertex(VertexConstraint {
            agent: 2,
            time: 1,
            x: 1,
            y: 0,
        });
        assert!(c.is_vertex());
        assert!(!c.is_edge());
        assert_eq!(c.agent(), 2);

        let curr = State::new(0, 0, 0);
        assert!(c.forbids(&curr, &State::new(1, 1, 0)));
        // Same cell, other time.
        assert!(!c.forbids(&State::new(1, 0, 0), &State::new(2, 1, 0)));
        assert!(!c.forbids(&curr, &State::new(1, 0, 1)));
    }

    #[test]
    fn test_edge_constraint_matches_exact_transition() {
        let c = edge(State::new(0, 0, 0), State::new(1, 1, 0));
        assert!(c.is_edge());
        assert_eq!(c.agent(), 0);

        assert!(c.forbids(&State::new(0, 0, 0), &State::new(1, 1, 0)));
        // Reverse direction is a different edge.
        assert!(!c.forbids(&State::new(0, 1, 0), &State::new(1, 0, 0)));
        // Same target from another cell.
        assert!(!c.forbids(&State::new(0, 1, 1), &State::new(1, 1, 0)));
        // Same move later on.
        assert!(!c.forbids(&State::new(3, 0, 0), &State::new(4, 1, 0)));
    }

    #[test]
    fn test_constraint_yaml() {
        let yaml = "type: vertex\nagent: 1\ntime: 3\nx: 2\ny: 4\n";
        let c: Constraint = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            c,
            Constraint::Vertex(VertexConstraint {
                agent: 1,
                time: 3,
                x: 2,
                y: 4
            })
        );
    }
}

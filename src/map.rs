use crate::common::{Constraint, Location, State};

use anyhow::{anyhow, ensure};
use std::collections::HashSet;

/// The shared grid: bounds, obstacles and one goal per agent.
///
/// Bounds are inclusive on both ends, a cell `(x, y)` is inside when
/// `0 <= x <= dimx` and `0 <= y <= dimy`.
#[derive(Debug, Clone)]
pub struct Environment {
    dimx: i32,
    dimy: i32,
    obstacles: HashSet<Location>,
    goals: Vec<Location>,
    current_agent: usize,
}

impl Environment {
    pub fn new(
        dimx: i32,
        dimy: i32,
        obstacles: HashSet<Location>,
        goals: Vec<Location>,
    ) -> anyhow::Result<Self> {
        ensure!(
            dimx >= 0 && dimy >= 0,
            "grid dimensions must be non-negative, got {dimx}x{dimy}"
        );
        ensure!(!goals.is_empty(), "environment needs at least one goal");

        let env = Environment {
            dimx,
            dimy,
            obstacles,
            goals,
            current_agent: 0,
        };
        for (agent, goal) in env.goals.iter().enumerate() {
            if !env.in_bounds(goal) {
                return Err(anyhow!("goal {goal} of agent {agent} is outside the grid"));
            }
            if env.obstacles.contains(goal) {
                return Err(anyhow!("goal {goal} of agent {agent} is an obstacle"));
            }
        }
        Ok(env)
    }

    pub fn dim_x(&self) -> i32 {
        self.dimx
    }

    pub fn dim_y(&self) -> i32 {
        self.dimy
    }

    /// Grid area used to scale the segmentation heuristic above any distance.
    pub fn area(&self) -> usize {
        self.dimx as usize * self.dimy as usize
    }

    pub fn goals(&self) -> &[Location] {
        &self.goals
    }

    pub fn goal(&self, agent: usize) -> Location {
        self.goals[agent]
    }

    pub fn num_agents(&self) -> usize {
        self.goals.len()
    }

    pub fn is_obstacle(&self, location: &Location) -> bool {
        self.obstacles.contains(location)
    }

    fn in_bounds(&self, location: &Location) -> bool {
        0 <= location.x && location.x <= self.dimx && 0 <= location.y && location.y <= self.dimy
    }

    /// Manhattan distance to the goal of `agent`. Admissible because moves
    /// are restricted to the four cardinal directions with unit cost.
    pub fn heuristic(&self, agent: usize, state: &State) -> usize {
        let goal = &self.goals[agent];
        (state.x - goal.x).unsigned_abs() as usize + (state.y - goal.y).unsigned_abs() as usize
    }

    /// Successors of `state` one step later, in the order up, down, right, left.
    pub fn expand(&self, state: &State, constraints: &[Constraint]) -> Vec<State> {
        let time = state.time + 1;
        let directions = [(0, 1), (0, -1), (1, 0), (-1, 0)]; // Up, down, right, left

        directions
            .iter()
            .map(|&(dx, dy)| State::new(time, state.x + dx, state.y + dy))
            .filter(|next| self.is_valid(state, next, constraints))
            .collect()
    }

    /// Whether moving `curr -> next` stays on the grid, avoids obstacles and
    /// violates none of `constraints`.
    pub fn is_valid(&self, curr: &State, next: &State, constraints: &[Constraint]) -> bool {
        let location = next.location();
        if !self.in_bounds(&location) || self.obstacles.contains(&location) {
            return false;
        }

        !constraints
            .iter()
            .any(|constraint| constraint.forbids(curr, next))
    }

    pub fn is_goal(&self, agent: usize, state: &State) -> bool {
        state.location() == self.goals[agent]
    }

    pub fn current_agent(&self) -> usize {
        self.current_agent
    }

    /// Advances the driver cursor, wrapping to the first agent after the last.
    pub fn select_next_agent(&mut self) -> usize {
        self.current_agent = (self.current_agent + 1) % self.goals.len();
        self.current_agent
    }

    pub fn reset_agent(&mut self) {
        self.current_agent = 0;
    }
}

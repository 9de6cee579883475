use super::segment::segment_cost;
use crate::common::lowlevel::{LowLevelNode, NodeArena, OpenOrderKey};
use crate::common::{Constraint, Path, State};
use crate::map::Environment;
use crate::stat::Stats;

use std::collections::{BTreeSet, HashMap};
use tracing::{debug, instrument, trace};

/// Knobs the calling driver sets for a single low level search.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchOptions {
    /// Ceiling on the heuristic of nodes admitted while guided by a reference
    /// solution. `None` admits everything.
    pub bound: Option<f64>,
    /// Give up after this many expansions. `None` searches until the open list empties.
    pub node_limit: Option<usize>,
}

impl SearchOptions {
    fn admits(&self, h_cost: usize) -> bool {
        self.bound.map_or(true, |bound| h_cost as f64 <= bound)
    }
}

/// Best-first search over `(time, x, y)` for `agent` from `start`.
///
/// `constraints` must already be filtered to `agent`. With an empty
/// `reference` the successors are ranked by distance; otherwise by the
/// segment cost against `reference` scaled by the grid area, so avoiding
/// other agents dominates path length. A state is opened at most once,
/// a cheaper rediscovery does not replace its entry. An `agent` without a
/// goal on `env` yields `None`.
#[instrument(skip_all, name = "a_star", fields(agent = agent, start = %start), level = "debug")]
pub fn a_star_search(
    env: &Environment,
    agent: usize,
    start: State,
    constraints: &[Constraint],
    reference: &[Path],
    options: &SearchOptions,
    stats: &mut Stats,
) -> Option<Path> {
    let guided = !reference.is_empty();
    debug!("constraints: {constraints:?}, guided: {guided}");
    stats.low_level_searches += 1;

    if agent >= env.num_agents() {
        debug!("agent {agent} has no goal on this grid");
        stats.low_level_failures += 1;
        return None;
    }

    let mut arena = NodeArena::default();
    let mut open_list = BTreeSet::new();
    // Every state ever admitted to the open list, with the g cost it was admitted at.
    let mut g_cost_map: HashMap<State, usize> = HashMap::new();
    let mut sequence = 0;
    let mut expanded = 0;

    // Unguided successors all reuse the start's distance estimate.
    let start_distance = env.heuristic(agent, &start);
    let start_h_cost = if guided { 0 } else { start_distance };
    let root = arena.push(LowLevelNode {
        state: start,
        g_cost: 0,
        h_cost: start_h_cost,
        parent: None,
    });
    open_list.insert(OpenOrderKey {
        f_cost: start_h_cost,
        sequence,
        node: root,
    });
    g_cost_map.insert(start, 0);

    while let Some(key) = open_list.pop_first() {
        let current = arena.get(key.node).clone();
        trace!("expand node: {current:?}");

        if env.is_goal(agent, &current.state) {
            let path = arena.trace(key.node);
            debug!(
                "found path of length {} after {} generated nodes",
                path.len(),
                arena.len()
            );
            return Some(path);
        }

        if options.node_limit.is_some_and(|limit| expanded >= limit) {
            debug!("node limit {expanded} reached");
            stats.low_level_limit_reached += 1;
            stats.low_level_failures += 1;
            return None;
        }
        expanded += 1;
        stats.low_level_expand_nodes += 1;

        // Assuming uniform cost.
        let tentative_g_cost = current.g_cost + 1;

        for neighbor in env.expand(&current.state, constraints) {
            stats.low_level_generate_nodes += 1;

            // Already opened states keep their first entry, no decrease-key.
            if let Some(&old_g_cost) = g_cost_map.get(&neighbor) {
                if tentative_g_cost < old_g_cost {
                    trace!("ignore cheaper path to opened state {neighbor}");
                }
                continue;
            }

            let h_cost = if guided {
                stats.segment_evaluations += 1;
                let candidate = arena.trace_through(key.node, neighbor);
                env.area() * segment_cost(agent, &candidate, reference)
            } else {
                start_distance
            };

            if guided && !options.admits(h_cost) {
                trace!("prune {neighbor} with h cost {h_cost}");
                stats.low_level_bound_pruned += 1;
                continue;
            }

            let node = arena.push(LowLevelNode {
                state: neighbor,
                g_cost: tentative_g_cost,
                h_cost,
                parent: Some(key.node),
            });
            sequence += 1;
            open_list.insert(OpenOrderKey {
                f_cost: arena.get(node).f_cost(),
                sequence,
                node,
            });
            g_cost_map.insert(neighbor, tentative_g_cost);
        }
    }

    debug!("no solution found under the current constraints");
    stats.low_level_failures += 1;
    None
}

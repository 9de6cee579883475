use crate::common::{Path, State};

use std::ops::Range;

/// Result of cutting a joint solution into segments at every time step
/// where two agents' recent footprints touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    /// Number of segments, starting at 1 for a solution without any overlap.
    pub count: usize,
    /// `costs[agent][t]` is the segment index of that agent's state at time `t`.
    pub costs: Vec<Vec<usize>>,
}

/// True when the two state lists share no cell, regardless of time.
pub fn is_disjoint(a: &[State], b: &[State]) -> bool {
    if a.is_empty() || b.is_empty() {
        return true;
    }

    !a.iter()
        .any(|state_a| b.iter().any(|state_b| state_a.is_same_location(state_b)))
}

/// Segments `reference` with `candidate` standing in for `agent`'s own path.
///
/// Every agent accumulates the states it visits since the last boundary.
/// As soon as any two of those footprints share a cell the current time step
/// becomes a new boundary: everything before it gets the current segment
/// index and all footprints start over empty.
pub fn segment_paths(agent: usize, candidate: &[State], reference: &[Path]) -> Segmentation {
    // The candidate always takes part, even past the end of the reference set.
    let num_paths = reference.len().max(agent + 1);
    let paths: Vec<&[State]> = (0..num_paths)
        .map(|a| {
            if a == agent {
                candidate
            } else {
                reference.get(a).map_or(&[][..], |path| path.as_slice())
            }
        })
        .collect();

    let horizon = paths.iter().map(|path| path.len()).max().unwrap_or(0);
    let mut costs: Vec<Vec<usize>> = paths.iter().map(|path| vec![0; path.len()]).collect();
    let mut visited: Vec<Vec<State>> = vec![Vec::new(); num_paths];
    let mut last_boundary = 0;
    let mut count = 1;

    for time in 0..=horizon {
        for (a, path) in paths.iter().enumerate() {
            if let Some(state) = path.get(time) {
                visited[a].push(*state);
            }
        }

        if has_overlapping_pair(&visited) {
            tag_segment(&mut costs, last_boundary..time, count);
            last_boundary = time;
            count += 1;
            visited.iter_mut().for_each(Vec::clear);
        }
    }
    tag_segment(&mut costs, last_boundary..horizon + 1, count);

    Segmentation { count, costs }
}

/// Segment count of `candidate` against `reference`, the congestion term of
/// the guided search.
pub fn segment_cost(agent: usize, candidate: &[State], reference: &[Path]) -> usize {
    segment_paths(agent, candidate, reference).count
}

fn has_overlapping_pair(visited: &[Vec<State>]) -> bool {
    (0..visited.len()).any(|a1| {
        (a1 + 1..visited.len()).any(|a2| !is_disjoint(&visited[a1], &visited[a2]))
    })
}

fn tag_segment(costs: &mut [Vec<usize>], times: Range<usize>, segment: usize) {
    for agent_costs in costs.iter_mut() {
        let end = times.end.min(agent_costs.len());
        if times.start < end {
            agent_costs[times.start..end].fill(segment);
        }
    }
}

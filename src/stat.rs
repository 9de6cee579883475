use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub time_us: usize,
    pub low_level_searches: usize,
    pub low_level_failures: usize,
    pub low_level_limit_reached: usize,
    pub low_level_expand_nodes: usize,
    pub low_level_generate_nodes: usize,
    pub low_level_bound_pruned: usize,
    pub segment_evaluations: usize,
}

impl Stats {
    pub fn print(&self) {
        info!(
            "Time(microseconds) {:?} Searches {:?} (failed {:?}, limit reached {:?}) Expand nodes {:?} Generate nodes {:?} Bound pruned {:?} Segment evaluations {:?}",
            self.time_us,
            self.low_level_searches,
            self.low_level_failures,
            self.low_level_limit_reached,
            self.low_level_expand_nodes,
            self.low_level_generate_nodes,
            self.low_level_bound_pruned,
            self.segment_evaluations
        );
    }
}

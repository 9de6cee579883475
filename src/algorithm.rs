mod astar;
mod segment;

pub use astar::{a_star_search, SearchOptions};
pub use segment::{is_disjoint, segment_cost, segment_paths, Segmentation};

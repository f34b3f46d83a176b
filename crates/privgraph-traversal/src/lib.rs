pub mod common;
pub mod bfs;
pub mod pathfinding;
pub mod reachability;
pub mod search;

pub use common::{AdjacencyView, Direction, EdgeIndex, Hop, NodeIndex, Step, Topology};
pub use bfs::{breadth_first, BfsTree};
pub use pathfinding::{shortest_path, PathResult};
pub use reachability::{ancestors, descendants, reachable_set};
pub use search::{nearest_match, SearchOptions};

//! `rn-routing` — search algorithms over the roadnet graph store.
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`bfs`]      | Breadth-first traversal, hop-count shortest paths      |
//! | [`dfs`]      | Depth-first traversal, cycle detection                 |
//! | [`dijkstra`] | Single-source shortest paths by weight                 |
//! | [`astar`]    | Point-to-point search with a haversine heuristic       |
//! | [`mst`]      | Kruskal and Prim minimum spanning trees                |
//! | [`error`]    | `RoutingError`, `RoutingResult<T>`                     |
//!
//! # Live weights
//!
//! Every algorithm reads edge weights at call time and holds no cache, so
//! a query issued after a traffic update sees the rewritten weights.  An
//! infinite weight means a blocked edge: weighted searches treat it as
//! absent, while BFS/DFS (pure topology) still traverse it.

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod error;
pub mod mst;


pub use astar::{Heuristic, RoutePath, astar};
pub use bfs::{Traversal, bfs};
pub use dfs::{DfsTraversal, dfs, dfs_iterative, has_cycle};
pub use dijkstra::{ShortestPaths, dijkstra};
pub use error::{RoutingError, RoutingResult};
pub use mst::{SpanningTree, TreeEdge, kruskal, prim};

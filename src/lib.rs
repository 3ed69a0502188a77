//! Stoer-Wagner global minimum cut over weighted undirected graphs, together
//! with the primitives it is built on: an adjacency-list [`graph::Graph`]
//! with stable integer identifiers, a breadth-first
//! [`connectivity::is_connected`] check, and a mergeable
//! [`heap::PairingHeap`] supporting key modification through stable handles.

pub mod connectivity;
pub mod error;
pub mod graph;
pub mod heap;
pub mod stoer_wagner;

pub use connectivity::is_connected;
pub use error::{Error, Result};
pub use graph::{EdgeId, Graph, NodeId};
pub use heap::{MaxFirst, MinFirst, NodeRef, PairingHeap, SelectionPolicy};
pub use stoer_wagner::minimum_cut;

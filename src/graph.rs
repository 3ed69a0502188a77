use std::collections::HashMap;

use crate::error::{Error, Result};

/// Node identifier. Dense after [`Graph::compact`], otherwise arbitrary.
pub type NodeId = usize;

/// Edge identifier. Allocated monotonically by [`Graph::add_edge`] and only
/// reused after [`Graph::compact`] or [`Graph::clear`].
pub type EdgeId = usize;

/// A mutable adjacency-list graph over integer node and edge identifiers.
///
/// The graph owns topology only: edges are identified by `EdgeId` and any
/// associated data (such as weights) is kept by the caller in an external map.
/// The adjacency structure is symmetric: if `v` is a neighbor of `u` through
/// edge `e`, then `u` is a neighbor of `v` through the same `e`.
///
/// # Examples
/// ```
/// use mincut::graph::Graph;
///
/// let mut g = Graph::new();
/// let e = g.add_edge(0, 1);
/// assert_eq!(g.add_edge(1, 0), e); // same undirected edge
/// assert_eq!(g.node_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adj: HashMap<NodeId, HashMap<NodeId, EdgeId>>,
    next_edge: EdgeId,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes currently in the graph.
    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// Number of edges currently in the graph.
    pub fn edge_count(&self) -> usize {
        self.adj.values().map(HashMap::len).sum::<usize>() / 2
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// Returns `true` if `u` is a node of the graph.
    pub fn contains_node(&self, u: NodeId) -> bool {
        self.adj.contains_key(&u)
    }

    /// Iterates over the node identifiers in arbitrary order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adj.keys().copied()
    }

    /// Adds node `u`. Idempotent: an existing node keeps its adjacency.
    pub fn add_node(&mut self, u: NodeId) {
        self.adj.entry(u).or_default();
    }

    /// Removes node `u` together with all of its incident edges.
    ///
    /// # Errors
    /// `NodeNotFound` if `u` is not in the graph.
    pub fn remove_node(&mut self, u: NodeId) -> Result<()> {
        let nbrs = self.adj.remove(&u).ok_or(Error::NodeNotFound)?;
        for v in nbrs.keys() {
            if let Some(nbrs_v) = self.adj.get_mut(v) {
                nbrs_v.remove(&u);
            }
        }
        Ok(())
    }

    /// Adds an undirected edge between `u` and `v`, creating either node on
    /// demand, and returns its identifier.
    ///
    /// If the pair is already adjacent the existing identifier is returned
    /// and the graph is left unchanged, so parallel edges never occur.
    /// Self-loops are not supported; callers must pass distinct endpoints.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> EdgeId {
        debug_assert_ne!(u, v, "self-loops are not supported");
        if let Some(&e) = self.adj.get(&u).and_then(|nbrs| nbrs.get(&v)) {
            return e;
        }
        let e = self.next_edge;
        self.adj.entry(u).or_default().insert(v, e);
        self.adj.entry(v).or_default().insert(u, e);
        self.next_edge += 1;
        e
    }

    /// Removes the edge between `u` and `v` and returns its identifier.
    ///
    /// # Errors
    /// `EdgeNotFound` if `u` is absent or the pair is not adjacent.
    pub fn remove_edge(&mut self, u: NodeId, v: NodeId) -> Result<EdgeId> {
        let e = self
            .adj
            .get_mut(&u)
            .and_then(|nbrs| nbrs.remove(&v))
            .ok_or(Error::EdgeNotFound)?;
        if let Some(nbrs_v) = self.adj.get_mut(&v) {
            nbrs_v.remove(&u);
        }
        Ok(e)
    }

    /// Read-only view of `u`'s neighbors, keyed by neighbor with the
    /// connecting edge identifier as value.
    ///
    /// # Errors
    /// `NodeNotFound` if `u` is not in the graph.
    pub fn neighbors(&self, u: NodeId) -> Result<&HashMap<NodeId, EdgeId>> {
        self.adj.get(&u).ok_or(Error::NodeNotFound)
    }

    /// Renumbers all nodes and edges to dense ranges starting at zero,
    /// preserving relative iteration order, and returns the old-to-new
    /// mappings `(node_map, edge_map)`.
    ///
    /// The next-edge counter is reset to the new node count.
    pub fn compact(&mut self) -> (HashMap<NodeId, NodeId>, HashMap<EdgeId, EdgeId>) {
        let mut node_map = HashMap::new();
        let mut edge_map = HashMap::new();
        for (&u, nbrs) in &self.adj {
            let next = node_map.len();
            node_map.entry(u).or_insert(next);
            for &e in nbrs.values() {
                let next = edge_map.len();
                edge_map.entry(e).or_insert(next);
            }
        }
        let mut adj = HashMap::with_capacity(self.adj.len());
        for (&u, nbrs) in &self.adj {
            let renumbered = nbrs
                .iter()
                .map(|(&v, &e)| (node_map[&v], edge_map[&e]))
                .collect();
            adj.insert(node_map[&u], renumbered);
        }
        self.adj = adj;
        self.next_edge = self.adj.len();
        (node_map, edge_map)
    }

    /// Removes all nodes and edges and resets the edge counter to zero.
    pub fn clear(&mut self) {
        self.adj.clear();
        self.next_edge = 0;
    }
}

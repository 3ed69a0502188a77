//! Stoer-Wagner global minimum cut.
//!
//! Repeatedly grows a maximum-adjacency ordering with a max-selection pairing
//! heap, contracts the two last nodes of each phase, and keeps the lightest
//! cut-of-the-phase seen; the recorded contractions are then replayed to
//! recover the partition behind the winning phase.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::ops::AddAssign;

use log::{debug, trace};
use num_traits::Zero;

use crate::connectivity::is_connected;
use crate::error::{Error, Result};
use crate::graph::{EdgeId, Graph, NodeId};
use crate::heap::{MaxFirst, NodeRef, PairingHeap};

/// A node together with its accumulated edge weight into the growing set.
/// Ordering considers the weight only.
#[derive(Clone, Copy, Debug)]
struct NodeWeight<W> {
    node: NodeId,
    weight: W,
}

impl<W: PartialOrd> PartialEq for NodeWeight<W> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight
    }
}

impl<W: PartialOrd> PartialOrd for NodeWeight<W> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.weight.partial_cmp(&other.weight)
    }
}

fn weight_of<W>(weights: &HashMap<EdgeId, W>, e: EdgeId) -> W
where
    W: Copy + Zero,
{
    weights.get(&e).copied().unwrap_or_else(W::zero)
}

/// Computes a global minimum cut of a weighted undirected graph with the
/// Stoer-Wagner algorithm.
///
/// Edge weights are looked up in `weights` by edge identifier; a missing
/// entry counts as zero. The algorithm is destructive: it contracts `graph`
/// in place and accumulates weights into `weights`, so callers needing the
/// original topology afterwards must keep a copy.
///
/// # Arguments
/// * `graph` - The undirected graph to cut; consumed by contraction
/// * `weights` - Edge weights keyed by edge identifier; mutated in place
///
/// # Returns
/// * `Ok((value, side_a, side_b))` - The cut value and the two node sets of
///   the partition; both sets are non-empty and together cover every node of
///   the input graph
/// * `Err(Error)` - If a precondition fails; the graph is untouched in that
///   case
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use mincut::{minimum_cut, Graph};
///
/// let mut graph = Graph::new();
/// let mut weights = HashMap::new();
/// weights.insert(graph.add_edge(0, 1), 3.0);
/// weights.insert(graph.add_edge(1, 2), 1.0);
/// weights.insert(graph.add_edge(2, 0), 2.0);
///
/// let (value, side_a, side_b) = minimum_cut(&mut graph, &mut weights).unwrap();
/// assert_eq!(value, 3.0);
/// assert_eq!(side_a.len() + side_b.len(), 3);
/// ```
///
/// # Complexity
/// * Time: O(V·E + V² log V) with the pairing heap
/// * Space: O(V + E)
///
/// # Errors
/// * `InsufficientNodes` if the graph has fewer than two nodes
/// * `NotConnected` if the graph is not a single component
/// * `NegativeWeight` if any edge weight is negative
pub fn minimum_cut<W>(
    graph: &mut Graph,
    weights: &mut HashMap<EdgeId, W>,
) -> Result<(W, Vec<NodeId>, Vec<NodeId>)>
where
    W: Copy + PartialOrd + AddAssign + Zero + Debug,
{
    let n = graph.node_count();
    if n < 2 {
        return Err(Error::InsufficientNodes);
    }
    if !is_connected(graph)? {
        return Err(Error::NotConnected);
    }
    for u in graph.nodes() {
        for &e in graph.neighbors(u)?.values() {
            if weight_of(weights, e) < W::zero() {
                return Err(Error::NegativeWeight);
            }
        }
    }

    let original: Vec<NodeId> = graph.nodes().collect();
    let mut contractions: Vec<(NodeId, NodeId)> = Vec::with_capacity(n - 1);
    let mut best: Option<(usize, W)> = None;

    for i in 0..n - 1 {
        let start = graph.nodes().next().ok_or(Error::EmptyGraph)?;
        let mut in_set = HashSet::from([start]);
        let mut heap: PairingHeap<NodeWeight<W>, MaxFirst> = PairingHeap::with_policy();
        let mut tracked: HashMap<NodeId, NodeRef> = HashMap::new();
        for (&v, &e) in graph.neighbors(start)? {
            let weight = weight_of(weights, e);
            tracked.insert(v, heap.insert(NodeWeight { node: v, weight }));
        }

        // Grow the set by most-tightly-connected node until exactly two
        // nodes of this phase remain outside it.
        let mut last = start;
        for _ in 0..n - i - 2 {
            let picked = heap.pop().ok_or(Error::NotConnected)?;
            last = picked.node;
            in_set.insert(last);
            for (&v, &e) in graph.neighbors(last)? {
                if in_set.contains(&v) {
                    continue;
                }
                let weight = weight_of(weights, e);
                match tracked.get(&v) {
                    Some(&node) => {
                        if let Some(entry) = heap.get(node).copied() {
                            let mut accumulated = entry.weight;
                            accumulated += weight;
                            heap.modify(
                                node,
                                NodeWeight {
                                    node: v,
                                    weight: accumulated,
                                },
                            );
                        }
                    }
                    None => {
                        tracked.insert(v, heap.insert(NodeWeight { node: v, weight }));
                    }
                }
            }
        }

        let NodeWeight {
            node: merge,
            weight: phase_cut,
        } = match heap.peek() {
            Some(&top) => top,
            None => return Err(Error::NotConnected),
        };
        trace!("phase {}: cut of the phase {:?}", i, phase_cut);
        let improved = match best {
            Some((_, value)) => phase_cut < value,
            None => true,
        };
        if improved {
            best = Some((i, phase_cut));
        }

        // Contract: fold `merge` into `last`, accumulating edge weights.
        contractions.push((last, merge));
        let merged_nbrs: Vec<(NodeId, EdgeId)> = graph
            .neighbors(merge)?
            .iter()
            .map(|(&x, &e)| (x, e))
            .collect();
        for (x, e) in merged_nbrs {
            if x == last {
                continue;
            }
            let weight = weight_of(weights, e);
            let combined = graph.add_edge(last, x);
            *weights.entry(combined).or_insert_with(W::zero) += weight;
        }
        graph.remove_node(merge)?;
    }

    let (best_phase, cut_value) = best.ok_or(Error::InsufficientNodes)?;
    debug!("best phase {} with cut value {:?}", best_phase, cut_value);

    // Rebuild the graph as it stood entering the winning phase and collect
    // everything contracted into that phase's merge target.
    graph.clear();
    for &(survivor, merged) in contractions.iter().take(best_phase) {
        graph.add_edge(survivor, merged);
    }
    let seed = contractions[best_phase].1;
    graph.add_node(seed);
    let mut reachable = HashSet::from([seed]);
    let mut queue = VecDeque::from([seed]);
    while let Some(u) = queue.pop_front() {
        for &v in graph.neighbors(u)?.keys() {
            if reachable.insert(v) {
                queue.push_back(v);
            }
        }
    }

    let (inside, outside): (Vec<NodeId>, Vec<NodeId>) = original
        .into_iter()
        .partition(|u| reachable.contains(u));
    Ok((cut_value, inside, outside))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn build(edges: &[(NodeId, NodeId, f64)]) -> (Graph, HashMap<EdgeId, f64>) {
        let mut graph = Graph::new();
        let mut weights = HashMap::new();
        for &(u, v, w) in edges {
            weights.insert(graph.add_edge(u, v), w);
        }
        (graph, weights)
    }

    fn crossing_weight(edges: &[(NodeId, NodeId, f64)], side: &HashSet<NodeId>) -> f64 {
        edges
            .iter()
            .filter(|&&(u, v, _)| side.contains(&u) != side.contains(&v))
            .map(|&(_, _, w)| w)
            .sum()
    }

    fn brute_force_cut(nodes: &[NodeId], edges: &[(NodeId, NodeId, f64)]) -> f64 {
        let n = nodes.len();
        let mut best = f64::INFINITY;
        for mask in 1..(1u32 << n) - 1 {
            let side: HashSet<NodeId> = nodes
                .iter()
                .enumerate()
                .filter(|&(i, _)| mask & (1 << i) != 0)
                .map(|(_, &u)| u)
                .collect();
            let cut = crossing_weight(edges, &side);
            if cut < best {
                best = cut;
            }
        }
        best
    }

    fn assert_partition(side_a: &[NodeId], side_b: &[NodeId], expected: &[NodeId]) {
        assert!(!side_a.is_empty());
        assert!(!side_b.is_empty());
        let a: HashSet<NodeId> = side_a.iter().copied().collect();
        let b: HashSet<NodeId> = side_b.iter().copied().collect();
        assert!(a.is_disjoint(&b));
        let mut union: Vec<NodeId> = a.union(&b).copied().collect();
        union.sort_unstable();
        let mut all: Vec<NodeId> = expected.to_vec();
        all.sort_unstable();
        assert_eq!(union, all);
    }

    #[test]
    fn test_minimum_cut_two_nodes() {
        let edges = [(0, 1, 7.0)];
        let (mut graph, mut weights) = build(&edges);
        let (value, side_a, side_b) = minimum_cut(&mut graph, &mut weights).unwrap();
        assert_eq!(value, 7.0);
        assert_partition(&side_a, &side_b, &[0, 1]);
        assert_eq!(side_a.len(), 1);
        assert_eq!(side_b.len(), 1);
    }

    #[test]
    fn test_minimum_cut_square_cycle() {
        // 4-cycle with unit weights: the minimum cut severs two edges.
        let edges = [(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0)];
        let (mut graph, mut weights) = build(&edges);
        let (value, side_a, side_b) = minimum_cut(&mut graph, &mut weights).unwrap();
        assert_eq!(value, 2.0);
        assert_partition(&side_a, &side_b, &[0, 1, 2, 3]);
        assert_eq!(side_a.len(), 2);
        assert_eq!(side_b.len(), 2);
        let side: HashSet<NodeId> = side_a.iter().copied().collect();
        assert_eq!(crossing_weight(&edges, &side), 2.0);
    }

    #[test]
    fn test_minimum_cut_bridged_triangles() {
        // Two heavy triangles joined by a single light bridge: the cut is
        // the bridge, splitting the graph into the two triangles.
        let edges = [
            (0, 1, 5.0),
            (1, 2, 5.0),
            (2, 0, 5.0),
            (3, 4, 5.0),
            (4, 5, 5.0),
            (5, 3, 5.0),
            (2, 3, 1.0),
        ];
        let (mut graph, mut weights) = build(&edges);
        let (value, side_a, side_b) = minimum_cut(&mut graph, &mut weights).unwrap();
        assert_eq!(value, 1.0);
        assert_partition(&side_a, &side_b, &[0, 1, 2, 3, 4, 5]);
        let mut a: Vec<NodeId> = side_a.clone();
        a.sort_unstable();
        let mut b: Vec<NodeId> = side_b.clone();
        b.sort_unstable();
        if a == vec![0, 1, 2] {
            assert_eq!(b, vec![3, 4, 5]);
        } else {
            assert_eq!(a, vec![3, 4, 5]);
            assert_eq!(b, vec![0, 1, 2]);
        }
    }

    #[test]
    fn test_minimum_cut_star_isolates_lightest_leaf() {
        let edges = [(0, 1, 4.0), (0, 2, 2.0), (0, 3, 3.0), (0, 4, 5.0)];
        let (mut graph, mut weights) = build(&edges);
        let (value, side_a, side_b) = minimum_cut(&mut graph, &mut weights).unwrap();
        assert_eq!(value, 2.0);
        assert_partition(&side_a, &side_b, &[0, 1, 2, 3, 4]);
        let singleton = if side_a.len() == 1 { &side_a } else { &side_b };
        assert_eq!(singleton, &vec![2]);
    }

    #[test]
    fn test_minimum_cut_integer_weights() {
        let mut graph = Graph::new();
        let mut weights: HashMap<EdgeId, i64> = HashMap::new();
        for &(u, v, w) in &[
            (0, 1, 3),
            (1, 2, 3),
            (2, 0, 3),
            (2, 3, 2),
            (3, 4, 4),
            (4, 5, 4),
            (5, 3, 4),
        ] {
            weights.insert(graph.add_edge(u, v), w);
        }
        let (value, side_a, side_b) = minimum_cut(&mut graph, &mut weights).unwrap();
        assert_eq!(value, 2);
        assert_eq!(side_a.len() + side_b.len(), 6);
    }

    #[test]
    fn test_minimum_cut_insufficient_nodes() {
        let mut graph = Graph::new();
        let mut weights: HashMap<EdgeId, f64> = HashMap::new();
        assert!(matches!(
            minimum_cut(&mut graph, &mut weights),
            Err(Error::InsufficientNodes)
        ));
        graph.add_node(0);
        assert!(matches!(
            minimum_cut(&mut graph, &mut weights),
            Err(Error::InsufficientNodes)
        ));
    }

    #[test]
    fn test_minimum_cut_not_connected() {
        let edges = [(0, 1, 1.0), (2, 3, 1.0)];
        let (mut graph, mut weights) = build(&edges);
        assert!(matches!(
            minimum_cut(&mut graph, &mut weights),
            Err(Error::NotConnected)
        ));
    }

    #[test]
    fn test_minimum_cut_negative_weight_before_mutation() {
        let edges = [(0, 1, 2.0), (1, 2, -1.0), (2, 0, 2.0)];
        let (mut graph, mut weights) = build(&edges);
        let graph_before = graph.clone();
        let weights_before = weights.clone();
        assert!(matches!(
            minimum_cut(&mut graph, &mut weights),
            Err(Error::NegativeWeight)
        ));
        assert_eq!(graph, graph_before);
        assert_eq!(weights, weights_before);
    }

    #[test]
    fn test_minimum_cut_matches_brute_force_on_random_graphs() {
        let mut rng = rand::thread_rng();
        for _ in 0..30 {
            let n = rng.gen_range(4..=7);
            let nodes: Vec<NodeId> = (0..n).collect();
            let mut seen: HashSet<(NodeId, NodeId)> = HashSet::new();
            let mut edges: Vec<(NodeId, NodeId, f64)> = Vec::new();
            // Spanning path keeps the graph connected; extra chords make the
            // cut structure nontrivial.
            for u in 1..n {
                let w = rng.gen_range(1..=9) as f64;
                seen.insert((u - 1, u));
                edges.push((u - 1, u, w));
            }
            for _ in 0..n {
                let u = rng.gen_range(0..n);
                let v = rng.gen_range(0..n);
                if u == v {
                    continue;
                }
                let (lo, hi) = (u.min(v), u.max(v));
                if seen.insert((lo, hi)) {
                    edges.push((lo, hi, rng.gen_range(1..=9) as f64));
                }
            }

            let expected = brute_force_cut(&nodes, &edges);
            let (mut graph, mut weights) = build(&edges);
            let (value, side_a, side_b) = minimum_cut(&mut graph, &mut weights).unwrap();
            assert_eq!(value, expected);
            assert_partition(&side_a, &side_b, &nodes);
            let side: HashSet<NodeId> = side_a.iter().copied().collect();
            assert_eq!(crossing_weight(&edges, &side), expected);
        }
    }
}

//! Unlabelled DAG representation used by the extension counters.
//!
//! A graph over nodes `0..n` keeps, per node, a parent row and a child row (see
//! [`BitRow`]), the node's connectivity (in-degree + out-degree), and the sets of root
//! and leaf nodes. Every decomposition step produces a graph with one node fewer whose
//! rows are re-indexed so that the node set is always `0..n`.
//!
//! The same code drives both representations:
//! - [`FixedWidthGraph`]: one `u64` word per row, up to 64 nodes.
//! - [`WideGraph`]: a [`WideSet`] per row, any node count.

use crate::bits::BitRow;
use crate::error::{Error, Result};
use crate::wide::WideSet;
use std::fmt;

/// Graph with single-word rows (`n <= 64`).
pub type FixedWidthGraph = UnlabelledGraph<u64>;

/// Graph with growable rows (any `n`).
pub type WideGraph = UnlabelledGraph<WideSet>;

// ============================================================================
// Inbound interface
// ============================================================================

/// Anything that can describe a DAG over `0..num_nodes()`.
///
/// Graph construction only ever asks these two questions; it never calls back afterward.
pub trait OrderedModel {
    /// Number of nodes.
    fn num_nodes(&self) -> usize;

    /// Whether the arc `parent -> child` is present.
    fn is_directed_arc(&self, parent: usize, child: usize) -> bool;
}

// ============================================================================
// UnlabelledGraph
// ============================================================================

/// An unlabelled DAG with incrementally maintained degree, root and leaf bookkeeping.
///
/// Invariants (checked by [`UnlabelledGraph::is_consistent`]):
/// - `p ∈ parents[c]` iff `c ∈ children[p]`.
/// - `connected[i] == |parents[i]| + |children[i]|`.
/// - `roots` / `leaves` are exactly the nodes with an empty parent / child row.
///
/// Acyclicity is the caller's responsibility.
#[derive(Clone, Debug, PartialEq)]
pub struct UnlabelledGraph<R: BitRow> {
    pub(crate) num_nodes: usize,
    pub(crate) connected: Vec<usize>,
    pub(crate) parents: Vec<R>,
    pub(crate) children: Vec<R>,
    pub(crate) roots: R,
    pub(crate) leaves: R,
    immutable: bool,
}

impl<R: BitRow> UnlabelledGraph<R> {
    /// Creates an arc-free graph on `n` nodes.
    ///
    /// # Errors
    /// Returns [`Error::Capacity`] if `n` exceeds the row storage's capacity.
    pub fn new(n: usize) -> Result<Self> {
        if let Some(limit) = R::CAPACITY {
            if n > limit {
                return Err(Error::Capacity { nodes: n, limit });
            }
        }
        Ok(Self {
            num_nodes: n,
            connected: vec![0; n],
            parents: vec![R::empty(n); n],
            children: vec![R::empty(n); n],
            roots: R::full(n),
            leaves: R::full(n),
            immutable: false,
        })
    }

    /// Builds a transitively closed graph from an external model.
    ///
    /// Every arc the model reports is added with implied-arc propagation; arcs already
    /// present through propagation are skipped.
    ///
    /// # Errors
    /// Returns [`Error::Capacity`] if the model is too large for this representation.
    pub fn from_model<M: OrderedModel + ?Sized>(model: &M) -> Result<Self> {
        let n = model.num_nodes();
        let mut g = Self::new(n)?;
        for i in 0..n {
            for j in 0..n {
                if i != j && model.is_directed_arc(i, j) && !g.is_directed_arc(i, j) {
                    g.add_arc(i, j, true)?;
                }
            }
        }
        Ok(g)
    }

    /// Builds a graph from an arc list, propagating implied arcs.
    ///
    /// # Errors
    /// Fails on out-of-range nodes, self-loops or capacity violations.
    pub fn from_arcs(n: usize, arcs: &[(usize, usize)]) -> Result<Self> {
        let mut g = Self::new(n)?;
        for &(p, c) in arcs {
            if !g.is_directed_arc(p, c) {
                g.add_arc(p, c, true)?;
            }
        }
        Ok(g)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Number of nodes.
    #[inline(always)]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// In-degree + out-degree of `node`.
    #[inline(always)]
    pub fn connected(&self, node: usize) -> usize {
        self.connected[node]
    }

    /// Connectivity of every node.
    pub fn connectivity(&self) -> &[usize] {
        &self.connected
    }

    /// Whether mutation is currently forbidden.
    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    /// Freezes (`true`) or thaws (`false`) the graph.
    ///
    /// A frozen graph rejects [`add_arc`](Self::add_arc) and
    /// [`remove_node_in_place`](Self::remove_node_in_place); [`remove_node`](Self::remove_node)
    /// still works because it never touches `self`.
    pub fn set_immutable(&mut self, immutable: bool) {
        self.immutable = immutable;
    }

    /// Parent row of `node`.
    #[inline(always)]
    pub fn parent_set(&self, node: usize) -> &R {
        &self.parents[node]
    }

    /// Child row of `node`.
    #[inline(always)]
    pub fn child_set(&self, node: usize) -> &R {
        &self.children[node]
    }

    /// Nodes with no parents.
    #[inline(always)]
    pub fn root_set(&self) -> &R {
        &self.roots
    }

    /// Nodes with no children.
    #[inline(always)]
    pub fn leaf_set(&self) -> &R {
        &self.leaves
    }

    /// Nodes with neither parents nor children.
    pub fn disconnected_set(&self) -> R {
        let mut s = self.roots.clone();
        s.intersect_with(&self.leaves);
        s
    }

    /// Parents of `node`, ascending.
    pub fn parents(&self, node: usize) -> Vec<usize> {
        self.parents[node].to_vec()
    }

    /// Children of `node`, ascending.
    pub fn children(&self, node: usize) -> Vec<usize> {
        self.children[node].to_vec()
    }

    /// Number of root nodes.
    #[inline]
    pub fn num_root_nodes(&self) -> usize {
        self.roots.count()
    }

    /// Number of leaf nodes.
    #[inline]
    pub fn num_leaf_nodes(&self) -> usize {
        self.leaves.count()
    }

    /// Number of nodes that are both root and leaf.
    #[inline]
    pub fn num_disconnected_nodes(&self) -> usize {
        self.disconnected_set().count()
    }

    /// Root nodes, ascending.
    pub fn root_nodes(&self) -> Vec<usize> {
        self.roots.to_vec()
    }

    /// Leaf nodes, ascending.
    pub fn leaf_nodes(&self) -> Vec<usize> {
        self.leaves.to_vec()
    }

    /// Disconnected nodes, ascending.
    pub fn disconnected_nodes(&self) -> Vec<usize> {
        self.disconnected_set().to_vec()
    }

    /// Whether `parent -> child` is present.
    #[inline(always)]
    pub fn is_directed_arc(&self, parent: usize, child: usize) -> bool {
        parent < self.num_nodes && self.children[parent].contains(child)
    }

    /// Total number of arcs.
    pub fn arc_count(&self) -> usize {
        self.children.iter().map(BitRow::count).sum()
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    /// Adds `parent -> child`.
    ///
    /// With `propagate_implied`, every arc needed to keep the relation transitively
    /// closed is added as well: each parent of `parent` becomes a parent of `child`, and
    /// each child of `child` becomes a child of `parent`, recursively.
    ///
    /// # Errors
    /// - [`Error::Immutable`] if the graph is frozen.
    /// - [`Error::NodeOutOfRange`] / [`Error::SelfLoop`] for bad indices.
    /// - [`Error::ArcExists`] if the arc is already present.
    pub fn add_arc(&mut self, parent: usize, child: usize, propagate_implied: bool) -> Result<()> {
        if self.immutable {
            return Err(Error::Immutable);
        }
        self.check_node(parent)?;
        self.check_node(child)?;
        if parent == child {
            return Err(Error::SelfLoop { node: parent });
        }
        if self.parents[child].contains(parent) {
            return Err(Error::ArcExists { parent, child });
        }

        self.connected[parent] += 1;
        self.connected[child] += 1;
        self.roots.remove(child);
        self.leaves.remove(parent);
        self.parents[child].insert(parent);
        self.children[parent].insert(child);

        if propagate_implied {
            for i in 0..self.num_nodes {
                if self.parents[parent].contains(i) && !self.parents[child].contains(i) {
                    self.add_arc(i, child, true)?;
                }
                if self.children[child].contains(i) && !self.children[parent].contains(i) {
                    self.add_arc(parent, i, true)?;
                }
            }
        }
        Ok(())
    }

    /// Returns a new graph with `node` removed; `self` is left untouched.
    ///
    /// Remaining nodes above `node` are renumbered down by one.
    ///
    /// # Errors
    /// Returns [`Error::NodeOutOfRange`] if `node >= num_nodes` (including on an empty graph).
    pub fn remove_node(&self, node: usize) -> Result<Self> {
        self.check_node(node)?;
        let mut g = self.clone();
        g.immutable = false;
        g.strip_node(node);
        Ok(g)
    }

    /// Removes `node` from `self` without allocating a new graph.
    ///
    /// # Errors
    /// - [`Error::Immutable`] if the graph is frozen.
    /// - [`Error::NodeOutOfRange`] if `node >= num_nodes`.
    pub fn remove_node_in_place(&mut self, node: usize) -> Result<()> {
        if self.immutable {
            return Err(Error::Immutable);
        }
        self.check_node(node)?;
        self.strip_node(node);
        Ok(())
    }

    fn strip_node(&mut self, node: usize) {
        let removed_parents = self.parents.remove(node);
        let removed_children = self.children.remove(node);
        self.connected.remove(node);
        self.num_nodes -= 1;

        for i in 0..self.num_nodes {
            let old = if i < node { i } else { i + 1 };
            if removed_parents.contains(old) {
                self.connected[i] -= 1;
            }
            if removed_children.contains(old) {
                self.connected[i] -= 1;
            }
            self.parents[i] = self.parents[i].without_bit(node);
            self.children[i] = self.children[i].without_bit(node);
        }
        self.recompute_ends();
    }

    /// Rebuilds the root and leaf rows from the parent/child rows.
    fn recompute_ends(&mut self) {
        self.roots = R::empty(self.num_nodes);
        self.leaves = R::empty(self.num_nodes);
        for i in 0..self.num_nodes {
            if self.parents[i].is_empty() {
                self.roots.insert(i);
            }
            if self.children[i].is_empty() {
                self.leaves.insert(i);
            }
        }
    }

    #[inline]
    fn check_node(&self, node: usize) -> Result<()> {
        if node >= self.num_nodes {
            return Err(Error::NodeOutOfRange {
                node,
                num_nodes: self.num_nodes,
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Connectivity
    // ------------------------------------------------------------------------

    /// All nodes reachable from `node` ignoring arc direction (including `node`).
    ///
    /// # Errors
    /// Returns [`Error::NodeOutOfRange`] if `node >= num_nodes`.
    pub fn subgraph_set(&self, node: usize) -> Result<R> {
        self.check_node(node)?;
        let mut reached = R::empty(self.num_nodes);
        reached.insert(node);
        let mut checked = R::empty(self.num_nodes);

        while reached != checked {
            for i in 0..self.num_nodes {
                if reached.contains(i) && !checked.contains(i) {
                    checked.insert(i);
                    reached.union_with(&self.children[i]);
                    reached.union_with(&self.parents[i]);
                }
            }
        }
        Ok(reached)
    }

    /// [`subgraph_set`](Self::subgraph_set) as an ascending index list.
    ///
    /// # Errors
    /// Returns [`Error::NodeOutOfRange`] if `node >= num_nodes`.
    pub fn subgraph_nodes(&self, node: usize) -> Result<Vec<usize>> {
        Ok(self.subgraph_set(node)?.to_vec())
    }

    /// Checks every bookkeeping invariant from scratch.
    pub fn is_consistent(&self) -> bool {
        let n = self.num_nodes;
        if self.parents.len() != n || self.children.len() != n || self.connected.len() != n {
            return false;
        }
        for i in 0..n {
            if self.connected[i] != self.parents[i].count() + self.children[i].count() {
                return false;
            }
            if self.parents[i].is_empty() != self.roots.contains(i)
                || self.children[i].is_empty() != self.leaves.contains(i)
            {
                return false;
            }
            if self.parents[i].ones().any(|p| p >= n || !self.children[p].contains(i)) {
                return false;
            }
            if self.children[i].ones().any(|c| c >= n || !self.parents[c].contains(i)) {
                return false;
            }
        }
        self.roots.ones().all(|i| i < n) && self.leaves.ones().all(|i| i < n)
    }
}

impl<R: BitRow> OrderedModel for UnlabelledGraph<R> {
    fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    fn is_directed_arc(&self, parent: usize, child: usize) -> bool {
        UnlabelledGraph::is_directed_arc(self, parent, child)
    }
}

impl<R: BitRow> fmt::Display for UnlabelledGraph<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.num_nodes {
            write!(f, "{i} :")?;
            for p in self.parents[i].ones() {
                write!(f, " <- {p}")?;
            }
            writeln!(f)?;
        }
        for i in 0..self.num_nodes {
            write!(f, "[{i}] => {}\t", self.connected[i])?;
        }
        writeln!(f)?;
        writeln!(f, "Root: {:?}", self.roots.to_vec())?;
        writeln!(f, "Leaf: {:?}", self.leaves.to_vec())
    }
}

// ============================================================================
// Tests
// ============================================================================

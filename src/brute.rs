//! Exact permutation-based extension counter.
//!
//! Builds the ordering one position at a time: a node may take the next position once
//! every one of its predecessors has been placed. Super-exponential, so it is only used
//! as a reference for the dynamic counter and on very small graphs.

use crate::bits::{bit, BitRow};
use crate::error::{Error, Result};
use crate::graph::UnlabelledGraph;

/// Largest graph the brute-force counter accepts (the placed-set is a single word with
/// headroom for a sign bit).
pub const MAX_BRUTE_FORCE_NODES: usize = 31;

/// Reusable brute-force counter; keeps its scratch buffers between calls.
#[derive(Clone, Debug, Default)]
pub struct BruteForceCounter {
    /// `doms[v]`: predecessors of `v` as a bitset.
    doms: Vec<u64>,
    /// Current partial permutation.
    perm: Vec<usize>,
    /// Nodes placed so far.
    placed: u64,
}

impl BruteForceCounter {
    /// Creates a counter with empty scratch space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the linear extensions of `g` exactly.
    ///
    /// # Errors
    /// Returns [`Error::Capacity`] if `g` has more than [`MAX_BRUTE_FORCE_NODES`] nodes.
    pub fn count_extensions<R: BitRow>(&mut self, g: &UnlabelledGraph<R>) -> Result<u128> {
        let n = g.num_nodes();
        if n > MAX_BRUTE_FORCE_NODES {
            return Err(Error::Capacity {
                nodes: n,
                limit: MAX_BRUTE_FORCE_NODES,
            });
        }
        if n <= 1 {
            return Ok(1);
        }

        self.doms.clear();
        self.doms
            .extend((0..n).map(|v| g.parent_set(v).ones().fold(0u64, |acc, p| acc | bit(p))));
        self.perm.clear();
        self.perm.extend(0..n);
        self.placed = 0;
        Ok(self.extend_from(0))
    }

    /// Counts completions given that `perm[..next]` is already placed.
    fn extend_from(&mut self, next: usize) -> u128 {
        let n = self.perm.len();
        if next + 2 >= n {
            // Two nodes left: one order if either still waits on an unplaced node, else two.
            let pending = (self.doms[self.perm[next]] | self.doms[self.perm[next + 1]]) & !self.placed;
            return if pending != 0 { 1 } else { 2 };
        }

        let mut total = 0u128;
        let held = self.perm[next];
        for i in next..n {
            let v = self.perm[i];
            if self.doms[v] & !self.placed == 0 {
                self.perm[i] = held;
                self.perm[next] = v;
                self.placed |= bit(v);
                total += self.extend_from(next + 1);
                self.placed &= !bit(v);
                self.perm[i] = v;
            }
        }
        self.perm[next] = held;
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{FixedWidthGraph, WideGraph};

    #[test]
    fn incremental_arcs_reduce_count() {
        let mut g = FixedWidthGraph::new(6).unwrap();
        let mut counter = BruteForceCounter::new();
        assert_eq!(counter.count_extensions(&g), Ok(720));

        let steps: [((usize, usize), u128); 9] = [
            ((0, 1), 360),
            ((1, 2), 120),
            ((5, 4), 60),
            ((5, 0), 24),
            ((5, 3), 20),
            ((0, 3), 15),
            ((1, 3), 10),
            ((3, 4), 3),
            ((2, 3), 1),
        ];
        for ((p, c), expected) in steps {
            g.add_arc(p, c, true).unwrap();
            assert_eq!(counter.count_extensions(&g), Ok(expected), "after {p} -> {c}");
        }
    }

    #[test]
    fn trivial_graphs() {
        let mut counter = BruteForceCounter::new();
        assert_eq!(counter.count_extensions(&FixedWidthGraph::new(0).unwrap()), Ok(1));
        assert_eq!(counter.count_extensions(&FixedWidthGraph::new(1).unwrap()), Ok(1));
        assert_eq!(counter.count_extensions(&FixedWidthGraph::new(2).unwrap()), Ok(2));
        let arc = FixedWidthGraph::from_arcs(2, &[(1, 0)]).unwrap();
        assert_eq!(counter.count_extensions(&arc), Ok(1));
    }

    #[test]
    fn diamond_chain_and_antichain() {
        let mut counter = BruteForceCounter::new();
        let diamond = FixedWidthGraph::from_arcs(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]).unwrap();
        assert_eq!(counter.count_extensions(&diamond), Ok(2));
        let chain = FixedWidthGraph::from_arcs(3, &[(0, 1), (1, 2)]).unwrap();
        assert_eq!(counter.count_extensions(&chain), Ok(1));
        assert_eq!(counter.count_extensions(&FixedWidthGraph::new(3).unwrap()), Ok(6));
    }

    #[test]
    fn works_without_closure() {
        // Direct parents suffice: 0 -> 1 -> 2 added without propagation.
        let mut g = FixedWidthGraph::new(3).unwrap();
        g.add_arc(0, 1, false).unwrap();
        g.add_arc(1, 2, false).unwrap();
        assert_eq!(BruteForceCounter::new().count_extensions(&g), Ok(1));
    }

    #[test]
    fn rejects_32_nodes() {
        let g = FixedWidthGraph::new(32).unwrap();
        assert_eq!(
            BruteForceCounter::new().count_extensions(&g),
            Err(Error::Capacity { nodes: 32, limit: 31 })
        );
    }

    #[test]
    fn wide_rows_give_same_answer() {
        let arcs = [(0, 3), (1, 3), (2, 4)];
        let fixed = FixedWidthGraph::from_arcs(5, &arcs).unwrap();
        let wide = WideGraph::from_arcs(5, &arcs).unwrap();
        let mut counter = BruteForceCounter::new();
        assert_eq!(counter.count_extensions(&fixed), Ok(20));
        assert_eq!(counter.count_extensions(&wide), Ok(20));
    }
}

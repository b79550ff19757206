//! Canonical (relabelling-tolerant) hashing of unlabelled DAGs.
//!
//! Nodes are sorted by connectivity, by direction of any arc between them, and by child
//! count. Nodes the sort cannot tell apart are grouped, uniquely placed nodes are moved to
//! the front, and the hash is the sum of a random weight per `(child position, parent
//! position)` over every arc.
//!
//! This is a heuristic: isomorphic graphs usually, but not always, hash equally, and two
//! non-isomorphic graphs may collide. Collisions between graphs with different extension
//! counts would corrupt a memo table keyed by this hash; the property tests sample random
//! graphs to detect that empirically.

use crate::bits::BitRow;
use crate::graph::UnlabelledGraph;
use rand::{RngCore, SeedableRng};
use rand_xorshift::XorShiftRng;

/// Default seed for [`HashWeights`].
pub const DEFAULT_HASH_SEED: u64 = 123;

/// Initial dimension of the weight table.
const INITIAL_DIM: usize = 64;

// ============================================================================
// HashWeights
// ============================================================================

/// A lazily grown `dim x dim` table of random 64-bit weights.
///
/// Growing keeps every existing entry and draws new ones from the same seeded generator,
/// so a given sequence of sizes always yields the same table.
#[derive(Clone, Debug)]
pub struct HashWeights {
    seed: u64,
    dim: usize,
    table: Vec<u64>,
    rng: XorShiftRng,
}

impl Default for HashWeights {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_SEED)
    }
}

impl HashWeights {
    /// Creates a table seeded with `seed`, pre-grown to 64 x 64.
    pub fn new(seed: u64) -> Self {
        let mut w = Self {
            seed,
            dim: 0,
            table: Vec::new(),
            rng: XorShiftRng::seed_from_u64(seed),
        };
        w.ensure(INITIAL_DIM);
        w
    }

    /// The seed the table was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Grows the table to at least `n x n`. Never shrinks.
    pub fn ensure(&mut self, n: usize) {
        if n <= self.dim {
            return;
        }
        let old = self.dim;
        let mut table = vec![0u64; n * n];
        for i in 0..n {
            for j in 0..n {
                table[i * n + j] = if i < old && j < old {
                    self.table[i * old + j]
                } else {
                    self.rng.next_u64()
                };
            }
        }
        tracing::debug!(from = old, to = n, "grew hash weight table");
        self.table = table;
        self.dim = n;
    }

    /// Weight for `(i, j)`; both must be below [`dim`](Self::dim).
    #[inline(always)]
    pub fn weight(&self, i: usize, j: usize) -> u64 {
        debug_assert!(i < self.dim && j < self.dim);
        self.table[i * self.dim + j]
    }
}

// ============================================================================
// Hashing
// ============================================================================

impl<R: BitRow> UnlabelledGraph<R> {
    /// Labelled hash: `Σ weight[child][parent]` over arcs, using node indices as they are.
    pub fn labelled_hash(&self, weights: &mut HashWeights) -> u64 {
        weights.ensure(self.num_nodes);
        let mut hash = 0u64;
        for child in 0..self.num_nodes {
            for parent in self.parents[child].ones() {
                hash = hash.wrapping_add(weights.weight(child, parent));
            }
        }
        hash
    }

    /// Canonical hash: arcs are weighted by the sorted positions of their endpoints.
    pub fn canonical_hash(&self, weights: &mut HashWeights) -> u64 {
        let n = self.num_nodes;
        weights.ensure(n);
        let order = self.canonical_order();

        let mut hash = 0u64;
        for (i, &child) in order.iter().enumerate() {
            for (j, &parent) in order.iter().enumerate() {
                if self.parents[child].contains(parent) {
                    hash = hash.wrapping_add(weights.weight(i, j));
                }
            }
        }
        hash
    }

    /// The node order used by [`canonical_hash`](Self::canonical_hash).
    ///
    /// Position `k` of the result holds the node placed at sorted position `k`.
    pub fn canonical_order(&self) -> Vec<usize> {
        let n = self.num_nodes;
        let mut order: Vec<usize> = (0..n).collect();
        if n < 2 {
            return order;
        }
        self.quicksort(&mut order, 0, n as isize - 1);

        // Adjacent nodes the predicate cannot separate share a group id.
        let mut group = vec![0isize; n];
        for i in 1..n {
            let tied = !self.before(order[i - 1], order[i]) && !self.before(order[i], order[i - 1]);
            group[i] = if tied { group[i - 1] } else { group[i - 1] + 1 };
        }

        // Singleton groups are marked -1 and float to the front, keeping relative order.
        let singleton: Vec<bool> = (0..n)
            .map(|i| {
                let left = i == 0 || group[i - 1] != group[i];
                let right = i == n - 1 || group[i + 1] != group[i];
                left && right
            })
            .collect();
        for (g, single) in group.iter_mut().zip(singleton) {
            if single {
                *g = -1;
            }
        }
        let mut keyed: Vec<(isize, usize)> = group.into_iter().zip(order).collect();
        keyed.sort_by_key(|&(g, _)| g);
        keyed.into_iter().map(|(_, v)| v).collect()
    }

    /// Sort predicate: fewer connections first; if linked, the child first; then fewer children first.
    fn before(&self, a: usize, b: usize) -> bool {
        if a == b {
            return false;
        }
        if self.connected[a] != self.connected[b] {
            return self.connected[a] < self.connected[b];
        }
        if self.children[a].contains(b) {
            return false;
        }
        if self.children[b].contains(a) {
            return true;
        }
        self.children[a].count() < self.children[b].count()
    }

    /// Deterministic quicksort over `order[start..=end]`, pivoting on the middle element.
    ///
    /// `before` is not a strict weak order, so both scans are bounded by the range.
    fn quicksort(&self, order: &mut [usize], start: isize, end: isize) {
        if end <= start {
            return;
        }
        let split = order[((start + end) / 2) as usize];
        let mut left = start;
        let mut right = end;

        while left < right {
            while left < end && self.before(order[left as usize], split) {
                left += 1;
            }
            while right > start && self.before(split, order[right as usize]) {
                right -= 1;
            }
            if left > right {
                break;
            }
            order.swap(left as usize, right as usize);
            left += 1;
            right -= 1;
        }

        self.quicksort(order, start, right);
        self.quicksort(order, left, end);
    }
}

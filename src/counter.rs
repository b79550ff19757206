//! Dynamic-programming extension counter.
//!
//! `perms(g)` repeatedly applies cheap reductions that shrink the graph without
//! branching, and only when none applies does it branch over the smaller of the root and
//! leaf sets. Results of branching steps are memoized by graph hash.
//!
//! Reductions, tried in this order on every call:
//! 1. A node with no arcs can sit anywhere: `n · perms(g - v)`.
//! 2. A unique root (or leaf) must come first (last): `perms(g - v)`.
//! 3. A node comparable to every other node splits the graph into its ancestors and its
//!    descendants: `perms(ancestors) · perms(descendants)`.
//! 4. Disconnected components `g1`, `g2`: `interleave(|g1|, |g2|) · perms(g1) · perms(g2)`.

use crate::bits::BitRow;
use crate::canonical::{HashWeights, DEFAULT_HASH_SEED};
use crate::combinatorics::InterleaveTable;
use crate::error::Result;
use crate::graph::{FixedWidthGraph, OrderedModel, UnlabelledGraph, WideGraph};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

// ============================================================================
// Configuration
// ============================================================================

/// Which polynomial-time reductions the counter may use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reductions {
    /// Pull out nodes that are both root and leaf.
    pub disconnected_node: bool,
    /// Pull out a unique root or unique leaf.
    pub single_root_or_leaf: bool,
    /// Split on a node connected to every other node.
    pub fully_connected: bool,
    /// Split into undirected connected components.
    pub disconnected_subgraph: bool,
}

impl Reductions {
    /// Every reduction enabled.
    pub const fn all() -> Self {
        Self {
            disconnected_node: true,
            single_root_or_leaf: true,
            fully_connected: true,
            disconnected_subgraph: true,
        }
    }

    /// Pure branching.
    pub const fn none() -> Self {
        Self {
            disconnected_node: false,
            single_root_or_leaf: false,
            fully_connected: false,
            disconnected_subgraph: false,
        }
    }
}

impl Default for Reductions {
    fn default() -> Self {
        Self::all()
    }
}

/// How branching results are keyed in the memo table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HashMode {
    /// No memoization.
    None,
    /// Hash the graph as labelled (cheap, few hits).
    Labelled,
    /// Hash a canonicalized node order (more hits, small collision risk).
    #[default]
    Canonical,
}

/// Counter configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterConfig {
    /// Enabled reductions.
    pub reductions: Reductions,
    /// Memo key scheme.
    pub hash_mode: HashMode,
    /// Graphs with this many nodes or more are never looked up or stored.
    pub max_hashable_size: usize,
    /// Seed of the hash weight table.
    pub hash_seed: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            reductions: Reductions::all(),
            hash_mode: HashMode::Canonical,
            max_hashable_size: 60,
            hash_seed: DEFAULT_HASH_SEED,
        }
    }
}

/// Per-size counters for the branching step and the memo table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CounterStats {
    /// `split_calls[n]`: calls on `n`-node graphs that reached the memo/branch step.
    pub split_calls: Vec<u64>,
    /// `cache_inserts[n]`: memo entries stored for `n`-node graphs.
    pub cache_inserts: Vec<u64>,
    /// Memo lookups that hit.
    pub cache_hits: u64,
}

impl CounterStats {
    fn bump(v: &mut Vec<u64>, n: usize) {
        if v.len() <= n {
            v.resize(n + 1, 0);
        }
        v[n] += 1;
    }

    /// Total calls that reached the branching step.
    pub fn total_split_calls(&self) -> u64 {
        self.split_calls.iter().sum()
    }

    /// Total memo insertions.
    pub fn total_cache_inserts(&self) -> u64 {
        self.cache_inserts.iter().sum()
    }
}

// ============================================================================
// ExtensionCounter
// ============================================================================

/// Counts linear extensions, memoizing across calls.
///
/// The memo table, hash weights and interleave table are owned by the counter, so
/// independent counters can run on different threads (see [`count_many`]).
#[derive(Clone, Debug)]
pub struct ExtensionCounter {
    config: CounterConfig,
    /// Keyed by node count and graph hash; graph hashes alone ignore isolated nodes.
    cache: HashMap<(usize, u64), f64>,
    weights: HashWeights,
    interleave: InterleaveTable,
    stats: CounterStats,
}

impl Default for ExtensionCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionCounter {
    /// Counter with every reduction and canonical hashing.
    pub fn new() -> Self {
        Self::with_config(CounterConfig::default())
    }

    /// Counter with an explicit configuration.
    pub fn with_config(config: CounterConfig) -> Self {
        Self {
            weights: HashWeights::new(config.hash_seed),
            config,
            cache: HashMap::new(),
            interleave: InterleaveTable::new(),
            stats: CounterStats::default(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    /// Replaces the configuration. The memo table is only valid for one configuration,
    /// so it is cleared.
    pub fn set_config(&mut self, config: CounterConfig) {
        if config.hash_seed != self.weights.seed() {
            self.weights = HashWeights::new(config.hash_seed);
        }
        self.config = config;
        self.clear_cache();
    }

    /// Number of memoized graphs.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drops every memoized result.
    pub fn clear_cache(&mut self) {
        debug!(entries = self.cache.len(), "clearing extension cache");
        self.cache.clear();
    }

    /// Counters collected since construction or the last [`reset_stats`](Self::reset_stats).
    pub fn stats(&self) -> &CounterStats {
        &self.stats
    }

    /// Zeroes the statistics.
    pub fn reset_stats(&mut self) {
        self.stats = CounterStats::default();
    }

    /// `C(a + b, a)` from the counter's interleave table.
    ///
    /// # Errors
    /// Fails if the table bound is exceeded or the value overflows `i64`.
    pub fn interleave(&mut self, a: usize, b: usize) -> Result<i64> {
        self.interleave.interleave(a, b)
    }

    /// Number of linear extensions of `g`.
    ///
    /// `g` itself is never modified; decomposition works on counter-owned copies.
    ///
    /// # Errors
    /// Propagates graph errors from decomposition (which indicate a broken invariant).
    pub fn count_perms<R: BitRow>(&mut self, g: &UnlabelledGraph<R>) -> Result<f64> {
        let mut work = g.clone();
        work.set_immutable(false);
        let total = self.perms(work)?;
        debug!(
            nodes = g.num_nodes(),
            extensions = total,
            cache = self.cache.len(),
            "counted extensions"
        );
        Ok(total)
    }

    /// Natural log of [`count_perms`](Self::count_perms).
    ///
    /// # Errors
    /// Same as [`count_perms`](Self::count_perms).
    pub fn log_count_perms<R: BitRow>(&mut self, g: &UnlabelledGraph<R>) -> Result<f64> {
        Ok(self.count_perms(g)?.ln())
    }

    /// Builds a graph from `model` (single-word rows when it fits, wide rows otherwise)
    /// and counts its extensions.
    ///
    /// # Errors
    /// Propagates graph construction errors.
    pub fn count_model<M: OrderedModel + ?Sized>(&mut self, model: &M) -> Result<f64> {
        if model.num_nodes() <= crate::bits::WORD_BITS {
            self.count_perms(&FixedWidthGraph::from_model(model)?)
        } else {
            self.count_perms(&WideGraph::from_model(model)?)
        }
    }

    fn perms<R: BitRow>(&mut self, mut g: UnlabelledGraph<R>) -> Result<f64> {
        let n = g.num_nodes();
        if n <= 1 {
            return Ok(1.0);
        }
        let rules = self.config.reductions;

        if rules.disconnected_node {
            if let Some(v) = g.disconnected_set().first() {
                trace!(n, node = v, "disconnected node");
                g.remove_node_in_place(v)?;
                return Ok(n as f64 * self.perms(g)?);
            }
        }

        if rules.single_root_or_leaf {
            let num_roots = g.num_root_nodes();
            let num_leaves = g.num_leaf_nodes();
            let root = g.root_set().first();
            let leaf = g.leaf_set().first();
            match (root, leaf) {
                (Some(r), _) if num_roots == 1 && num_leaves > 1 => {
                    trace!(n, node = r, "unique root");
                    g.remove_node_in_place(r)?;
                    return self.perms(g);
                }
                (_, Some(l)) if num_leaves == 1 && num_roots > 1 => {
                    trace!(n, node = l, "unique leaf");
                    g.remove_node_in_place(l)?;
                    return self.perms(g);
                }
                (Some(r), Some(l)) if num_roots == 1 && num_leaves == 1 && r != l => {
                    trace!(n, root = r, leaf = l, "unique root and leaf");
                    // Higher index first so the lower one keeps its position.
                    g.remove_node_in_place(r.max(l))?;
                    g.remove_node_in_place(r.min(l))?;
                    return self.perms(g);
                }
                _ => {}
            }
        }

        if rules.fully_connected {
            if let Some(s) = (0..n).find(|&s| g.connected(s) == n - 1) {
                trace!(n, node = s, "fully connected split");
                let parents = g.parents(s);
                let children = g.children(s);
                let shift = |v: usize| if v > s { v - 1 } else { v };

                let mut ancestors = g.remove_node(s)?;
                let mut descendants = g;
                descendants.remove_node_in_place(s)?;
                for &p in parents.iter().rev() {
                    descendants.remove_node_in_place(shift(p))?;
                }
                for &c in children.iter().rev() {
                    ancestors.remove_node_in_place(shift(c))?;
                }
                return Ok(self.perms(ancestors)? * self.perms(descendants)?);
            }
        }

        if rules.disconnected_subgraph {
            let component = g.subgraph_set(0)?;
            let a = component.count();
            if a != n {
                match self.interleave.interleave(a, n - a) {
                    Ok(ways) => {
                        trace!(n, a, b = n - a, "disconnected subgraph");
                        let mut g1 = g.clone();
                        let mut g2 = g;
                        for i in (0..n).rev() {
                            if component.contains(i) {
                                g2.remove_node_in_place(i)?;
                            } else {
                                g1.remove_node_in_place(i)?;
                            }
                        }
                        return Ok(ways as f64 * self.perms(g1)? * self.perms(g2)?);
                    }
                    Err(e) => {
                        warn!(a, b = n - a, error = %e, "interleave unavailable, branching instead");
                    }
                }
            }
        }

        CounterStats::bump(&mut self.stats.split_calls, n);

        let hash = if n < self.config.max_hashable_size {
            match self.config.hash_mode {
                HashMode::None => None,
                HashMode::Labelled => Some(g.labelled_hash(&mut self.weights)),
                HashMode::Canonical => Some(g.canonical_hash(&mut self.weights)),
            }
        } else {
            None
        };
        if let Some(h) = hash {
            if let Some(&cached) = self.cache.get(&(n, h)) {
                self.stats.cache_hits += 1;
                return Ok(cached);
            }
        }

        // Branch on whichever end has fewer candidates.
        let candidates = if g.num_root_nodes() > g.num_leaf_nodes() {
            g.leaf_nodes()
        } else {
            g.root_nodes()
        };
        let mut total = 0.0;
        if let Some((&last, rest)) = candidates.split_last() {
            for &v in rest {
                total += self.perms(g.remove_node(v)?)?;
            }
            g.remove_node_in_place(last)?;
            total += self.perms(g)?;
        }

        if let Some(h) = hash {
            self.cache.insert((n, h), total);
            CounterStats::bump(&mut self.stats.cache_inserts, n);
        }
        Ok(total)
    }
}

/// Counts every graph in parallel, one counter (and memo table) per worker thread.
pub fn count_many<R: BitRow>(graphs: &[UnlabelledGraph<R>], config: &CounterConfig) -> Vec<Result<f64>> {
    graphs
        .par_iter()
        .map_init(
            || ExtensionCounter::with_config(config.clone()),
            |counter, g| counter.count_perms(g),
        )
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute::BruteForceCounter;
    use crate::combinatorics::{choose, factorial};
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    fn random_dag(rng: &mut XorShiftRng, n: usize, p: f64) -> FixedWidthGraph {
        let mut order: Vec<usize> = (0..n).collect();
        for i in 0..n {
            let r = rng.random_range(i..n);
            order.swap(i, r);
        }
        let mut g = FixedWidthGraph::new(n).unwrap();
        for i in 0..n {
            for j in (i + 1)..n {
                if rng.random_bool(p) && !g.is_directed_arc(order[i], order[j]) {
                    g.add_arc(order[i], order[j], true).unwrap();
                }
            }
        }
        g
    }

    fn chain(n: usize) -> Vec<(usize, usize)> {
        (1..n).map(|i| (i - 1, i)).collect()
    }

    fn assert_close(a: f64, b: f64) {
        assert!(((a - b) / b).abs() < 1e-12, "{a} vs {b}");
    }

    // -------------------------------------------------------------------------
    // Base cases
    // -------------------------------------------------------------------------

    #[test]
    fn trivial_graphs() {
        let mut c = ExtensionCounter::new();
        assert_eq!(c.count_perms(&FixedWidthGraph::new(0).unwrap()), Ok(1.0));
        assert_eq!(c.count_perms(&FixedWidthGraph::new(1).unwrap()), Ok(1.0));
        assert_eq!(c.count_perms(&FixedWidthGraph::new(3).unwrap()), Ok(6.0));
        let chain3 = FixedWidthGraph::from_arcs(3, &chain(3)).unwrap();
        assert_eq!(c.count_perms(&chain3), Ok(1.0));
    }

    #[test]
    fn antichain_is_factorial_and_chain_is_one() {
        let mut c = ExtensionCounter::new();
        for n in 0..=20 {
            let empty = FixedWidthGraph::new(n).unwrap();
            assert_eq!(c.count_perms(&empty).unwrap(), factorial(n), "n={n}");
            let total = FixedWidthGraph::from_arcs(n, &chain(n)).unwrap();
            assert_eq!(c.count_perms(&total), Ok(1.0), "n={n}");
        }
    }

    #[test]
    fn diamond_has_two_extensions() {
        let diamond = FixedWidthGraph::from_arcs(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]).unwrap();
        assert_eq!(ExtensionCounter::new().count_perms(&diamond), Ok(2.0));
        assert_eq!(BruteForceCounter::new().count_extensions(&diamond), Ok(2));
    }

    #[test]
    fn incremental_arcs_reduce_count() {
        let mut g = FixedWidthGraph::new(6).unwrap();
        let mut c = ExtensionCounter::new();
        assert_eq!(c.count_perms(&g), Ok(720.0));
        let steps = [
            ((0, 1), 360.0),
            ((1, 2), 120.0),
            ((5, 4), 60.0),
            ((5, 0), 24.0),
            ((5, 3), 20.0),
            ((0, 3), 15.0),
            ((1, 3), 10.0),
            ((3, 4), 3.0),
            ((2, 3), 1.0),
        ];
        for ((p, cnode), expected) in steps {
            g.add_arc(p, cnode, true).unwrap();
            assert_eq!(c.count_perms(&g), Ok(expected), "after {p} -> {cnode}");
        }
    }

    #[test]
    fn split_components_case() {
        // 0 -> 3 <- 1 and 2 -> 4: components of size 3 and 2.
        let g = FixedWidthGraph::from_arcs(5, &[(0, 3), (1, 3), (2, 4)]).unwrap();
        assert_eq!(ExtensionCounter::new().count_perms(&g), Ok(20.0));
    }

    #[test]
    fn input_graph_is_untouched() {
        let mut g = FixedWidthGraph::from_arcs(5, &[(0, 1), (2, 3)]).unwrap();
        g.set_immutable(true);
        let before = g.clone();
        ExtensionCounter::new().count_perms(&g).unwrap();
        assert_eq!(g, before);
        assert!(g.is_immutable());
    }

    // -------------------------------------------------------------------------
    // Laws
    // -------------------------------------------------------------------------

    #[test]
    fn independence_law() {
        let mut rng = XorShiftRng::seed_from_u64(0x1DE);
        let mut c = ExtensionCounter::new();
        for _ in 0..30 {
            let a = rng.random_range(1..7);
            let b = rng.random_range(1..7);
            let ga = random_dag(&mut rng, a, 0.4);
            let gb = random_dag(&mut rng, b, 0.4);

            let mut arcs = Vec::new();
            for p in 0..a {
                arcs.extend(ga.children(p).into_iter().map(|ch| (p, ch)));
            }
            for p in 0..b {
                arcs.extend(gb.children(p).into_iter().map(|ch| (a + p, a + ch)));
            }
            let union = FixedWidthGraph::from_arcs(a + b, &arcs).unwrap();

            let expected = choose(a + b, a) * c.count_perms(&ga).unwrap() * c.count_perms(&gb).unwrap();
            assert_eq!(c.count_perms(&union).unwrap(), expected);
            assert_eq!(c.interleave(a, b).unwrap() as f64, choose(a + b, a));
        }
    }

    #[test]
    fn fully_connected_split_law() {
        // Node 2 sits between {0, 1} and {3, 4, 5}; 4 -> 5 inside the lower half.
        let g = FixedWidthGraph::from_arcs(6, &[(0, 2), (1, 2), (2, 3), (2, 4), (4, 5)]).unwrap();
        assert_eq!(g.connected(2), 5);
        let upper = FixedWidthGraph::new(2).unwrap();
        let lower = FixedWidthGraph::from_arcs(3, &[(1, 2)]).unwrap();

        let mut c = ExtensionCounter::new();
        let split = c.count_perms(&upper).unwrap() * c.count_perms(&lower).unwrap();
        assert_eq!(split, 2.0 * 3.0);
        assert_eq!(c.count_perms(&g), Ok(split));
        assert_eq!(BruteForceCounter::new().count_extensions(&g), Ok(6));
    }

    // -------------------------------------------------------------------------
    // Agreement with brute force
    // -------------------------------------------------------------------------

    #[test]
    fn exhaustive_agreement_up_to_six_nodes() {
        // Every DAG is isomorphic to one whose arcs all point forward in index order.
        let mut dynamic = ExtensionCounter::new();
        let mut brute = BruteForceCounter::new();
        for n in 0..=6usize {
            let pairs: Vec<(usize, usize)> = (0..n)
                .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
                .collect();
            for mask in 0u32..(1u32 << pairs.len()) {
                let arcs: Vec<(usize, usize)> = pairs
                    .iter()
                    .enumerate()
                    .filter(|(k, _)| mask & (1 << k) != 0)
                    .map(|(_, &arc)| arc)
                    .collect();
                let g = FixedWidthGraph::from_arcs(n, &arcs).unwrap();
                let expected = brute.count_extensions(&g).unwrap() as f64;
                assert_eq!(dynamic.count_perms(&g).unwrap(), expected, "n={n} arcs={arcs:?}");
            }
        }
    }

    #[test]
    fn random_agreement_with_brute_force() {
        let mut rng = XorShiftRng::seed_from_u64(123);
        let mut dynamic = ExtensionCounter::new();
        let mut brute = BruteForceCounter::new();
        let n = 10;
        let p = (2.0 * n as f64) / (n * (n - 1) / 2) as f64;
        for _ in 0..100 {
            let g = random_dag(&mut rng, n, p);
            let expected = brute.count_extensions(&g).unwrap() as f64;
            assert_eq!(dynamic.count_perms(&g).unwrap(), expected, "\n{g}");
        }
    }

    #[test]
    fn every_configuration_agrees() {
        let mut rng = XorShiftRng::seed_from_u64(0xC0F1);
        let graphs: Vec<FixedWidthGraph> = (0..40).map(|_| random_dag(&mut rng, 8, 0.3)).collect();
        let mut reference = BruteForceCounter::new();
        let expected: Vec<f64> = graphs
            .iter()
            .map(|g| reference.count_extensions(g).unwrap() as f64)
            .collect();

        for reductions in [Reductions::all(), Reductions::none()] {
            for hash_mode in [HashMode::None, HashMode::Labelled, HashMode::Canonical] {
                let mut c = ExtensionCounter::with_config(CounterConfig {
                    reductions,
                    hash_mode,
                    ..CounterConfig::default()
                });
                for (g, &e) in graphs.iter().zip(&expected) {
                    assert_eq!(c.count_perms(g).unwrap(), e, "{reductions:?} {hash_mode:?}");
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Cache and statistics
    // -------------------------------------------------------------------------

    #[test]
    fn cache_fills_and_clears() {
        let mut rng = XorShiftRng::seed_from_u64(0xCAC4E);
        let mut c = ExtensionCounter::new();
        for _ in 0..20 {
            c.count_perms(&random_dag(&mut rng, 12, 0.2)).unwrap();
        }
        assert!(c.cache_len() > 0);
        assert_eq!(c.stats().total_cache_inserts(), c.cache_len() as u64);
        assert!(c.stats().total_split_calls() >= c.stats().total_cache_inserts());

        c.clear_cache();
        assert_eq!(c.cache_len(), 0);
        c.reset_stats();
        assert_eq!(c.stats(), &CounterStats::default());
    }

    #[test]
    fn repeated_count_hits_cache() {
        let mut rng = XorShiftRng::seed_from_u64(0x417);
        let g = random_dag(&mut rng, 14, 0.15);
        let mut c = ExtensionCounter::new();
        let first = c.count_perms(&g).unwrap();
        let hits = c.stats().cache_hits;
        assert_eq!(c.count_perms(&g).unwrap(), first);
        if c.stats().total_cache_inserts() > 0 {
            assert!(c.stats().cache_hits > hits);
        }
    }

    #[test]
    fn no_hashing_means_no_cache() {
        let mut rng = XorShiftRng::seed_from_u64(0x0);
        let mut c = ExtensionCounter::with_config(CounterConfig {
            hash_mode: HashMode::None,
            ..CounterConfig::default()
        });
        for _ in 0..10 {
            c.count_perms(&random_dag(&mut rng, 10, 0.2)).unwrap();
        }
        assert_eq!(c.cache_len(), 0);
    }

    #[test]
    fn size_bound_disables_cache() {
        let mut rng = XorShiftRng::seed_from_u64(0x5123);
        let mut c = ExtensionCounter::with_config(CounterConfig {
            max_hashable_size: 0,
            ..CounterConfig::default()
        });
        for _ in 0..10 {
            c.count_perms(&random_dag(&mut rng, 10, 0.2)).unwrap();
        }
        assert_eq!(c.cache_len(), 0);
    }

    #[test]
    fn set_config_clears_cache() {
        let mut rng = XorShiftRng::seed_from_u64(0x5E7);
        let mut c = ExtensionCounter::new();
        for _ in 0..10 {
            c.count_perms(&random_dag(&mut rng, 12, 0.2)).unwrap();
        }
        c.set_config(CounterConfig {
            hash_seed: 99,
            ..CounterConfig::default()
        });
        assert_eq!(c.cache_len(), 0);
        assert_eq!(c.config().hash_seed, 99);
    }

    // -------------------------------------------------------------------------
    // Wide graphs and fallbacks
    // -------------------------------------------------------------------------

    #[test]
    fn fixed_and_wide_agree() {
        let mut rng = XorShiftRng::seed_from_u64(0xF1DE);
        let mut c = ExtensionCounter::new();
        for _ in 0..30 {
            let fixed = random_dag(&mut rng, 15, 0.2);
            let wide = WideGraph::from_model(&fixed).unwrap();
            assert_eq!(c.count_perms(&fixed).unwrap(), c.count_perms(&wide).unwrap());
        }
    }

    #[test]
    fn interleave_overflow_falls_back_to_branching() {
        // Two chains of 30 and 40 nodes: C(70, 30) overflows i64, so the top-level split
        // is replaced by branching until the components are small enough.
        let mut arcs = chain(30);
        arcs.extend(chain(40).into_iter().map(|(p, c)| (p + 30, c + 30)));
        let g = WideGraph::from_arcs(70, &arcs).unwrap();
        let got = ExtensionCounter::new().count_perms(&g).unwrap();
        assert_close(got, choose(70, 30));
    }

    #[test]
    fn count_model_picks_representation() {
        let mut c = ExtensionCounter::new();
        let small = FixedWidthGraph::from_arcs(5, &chain(5)).unwrap();
        assert_eq!(c.count_model(&small), Ok(1.0));

        let big = WideGraph::new(70).unwrap();
        assert_close(c.count_model(&big).unwrap(), factorial(70));
    }

    #[test]
    fn log_count_matches_count() {
        let g = FixedWidthGraph::new(5).unwrap();
        let mut c = ExtensionCounter::new();
        assert_close(c.log_count_perms(&g).unwrap(), 120f64.ln());
    }

    #[test]
    fn parallel_batch_matches_sequential() {
        let mut rng = XorShiftRng::seed_from_u64(0xBA7C);
        let graphs: Vec<FixedWidthGraph> = (0..32).map(|_| random_dag(&mut rng, 11, 0.25)).collect();
        let parallel = count_many(&graphs, &CounterConfig::default());
        let mut c = ExtensionCounter::new();
        for (g, got) in graphs.iter().zip(parallel) {
            assert_eq!(got, c.count_perms(g));
        }
    }
}

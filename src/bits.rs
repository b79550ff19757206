//! Bit-level helpers shared by both graph representations.
//!
//! A graph row (a parent set, child set, root set, ...) is a set of node indices stored
//! as bits. [`BitRow`] abstracts over the storage so that every decomposition routine is
//! written once: `u64` rows hold up to 64 nodes in a single machine word, and
//! [`WideSet`](crate::wide::WideSet) rows grow without bound.

use std::fmt;

/// Largest node count a single `u64` row can index.
pub const WORD_BITS: usize = 64;

/// Returns `1 << v`.
#[inline(always)]
pub const fn bit(v: usize) -> u64 {
    1u64 << v
}

/// Returns a mask with the lowest `n` bits set (`n <= 64`).
#[inline(always)]
pub const fn low_mask(n: usize) -> u64 {
    if n >= WORD_BITS {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

/// Population count of `x`.
#[inline(always)]
pub const fn count_bits(x: u64) -> usize {
    x.count_ones() as usize
}

/// Indices of the set bits of `x`, ascending.
pub fn node_array(x: u64) -> Vec<usize> {
    let mut out = Vec::with_capacity(count_bits(x));
    let mut t = x;
    while t != 0 {
        out.push(t.trailing_zeros() as usize);
        t &= t - 1;
    }
    out
}

/// Builds a bitset from a list of node indices (all `< 64`).
pub fn from_node_array(nodes: &[usize]) -> u64 {
    nodes.iter().fold(0u64, |acc, &v| {
        debug_assert!(v < WORD_BITS);
        acc | bit(v)
    })
}

/// Deletes bit position `pos` from `x`: bits below `pos` are kept, bits above shift down by one.
#[inline]
pub const fn remove_bit(x: u64, pos: usize) -> u64 {
    debug_assert!(pos < WORD_BITS);
    let below = low_mask(pos);
    ((x >> 1) & !below) | (x & below)
}

// ============================================================================
// BitRow
// ============================================================================

/// Storage strategy for one row of node indices.
///
/// Implementations must treat absent high bits as zero so that two rows holding the
/// same indices compare equal.
pub trait BitRow: Clone + fmt::Debug + PartialEq + Send + Sync {
    /// Largest node count the storage supports, or `None` when unbounded.
    const CAPACITY: Option<usize>;

    /// An empty row sized for `n` nodes.
    fn empty(n: usize) -> Self;

    /// A row containing `0..n`.
    fn full(n: usize) -> Self;

    /// Whether `i` is in the row.
    fn contains(&self, i: usize) -> bool;

    /// Adds `i`.
    fn insert(&mut self, i: usize);

    /// Removes `i` (no-op if absent).
    fn remove(&mut self, i: usize);

    /// Number of indices in the row.
    fn count(&self) -> usize;

    /// Whether the row holds no indices.
    fn is_empty(&self) -> bool;

    /// `self |= other`.
    fn union_with(&mut self, other: &Self);

    /// `self &= other`.
    fn intersect_with(&mut self, other: &Self);

    /// Copy of the row with position `pos` deleted and higher indices shifted down by one.
    fn without_bit(&self, pos: usize) -> Self;

    /// Smallest index in the row.
    fn first(&self) -> Option<usize>;

    /// Indices in ascending order.
    fn ones(&self) -> impl Iterator<Item = usize> + '_;

    /// Indices as a vector, ascending.
    fn to_vec(&self) -> Vec<usize> {
        self.ones().collect()
    }
}

impl BitRow for u64 {
    const CAPACITY: Option<usize> = Some(WORD_BITS);

    #[inline(always)]
    fn empty(_n: usize) -> Self {
        0
    }

    #[inline(always)]
    fn full(n: usize) -> Self {
        low_mask(n)
    }

    #[inline(always)]
    fn contains(&self, i: usize) -> bool {
        i < WORD_BITS && (*self & bit(i)) != 0
    }

    #[inline(always)]
    fn insert(&mut self, i: usize) {
        debug_assert!(i < WORD_BITS);
        *self |= bit(i);
    }

    #[inline(always)]
    fn remove(&mut self, i: usize) {
        if i < WORD_BITS {
            *self &= !bit(i);
        }
    }

    #[inline(always)]
    fn count(&self) -> usize {
        count_bits(*self)
    }

    #[inline(always)]
    fn is_empty(&self) -> bool {
        *self == 0
    }

    #[inline(always)]
    fn union_with(&mut self, other: &Self) {
        *self |= *other;
    }

    #[inline(always)]
    fn intersect_with(&mut self, other: &Self) {
        *self &= *other;
    }

    #[inline(always)]
    fn without_bit(&self, pos: usize) -> Self {
        remove_bit(*self, pos)
    }

    #[inline(always)]
    fn first(&self) -> Option<usize> {
        if *self == 0 {
            None
        } else {
            Some(self.trailing_zeros() as usize)
        }
    }

    fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        let mut t = *self;
        std::iter::from_fn(move || {
            if t == 0 {
                return None;
            }
            let v = t.trailing_zeros() as usize;
            t &= t - 1;
            Some(v)
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

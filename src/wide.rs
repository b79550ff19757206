//! `WideSet`: a growable bit row for graphs with more than 64 nodes.

use crate::bits::{bit, low_mask, BitRow, WORD_BITS};

/// A bit set stored as a vector of 64-bit words.
///
/// Trailing zero words are always trimmed, so derived equality compares contents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WideSet {
    words: Vec<u64>,
}

impl WideSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Creates an empty set with room for `bits` indices.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: Vec::with_capacity(bits.div_ceil(WORD_BITS)),
        }
    }

    /// The underlying words, least significant first.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    #[inline]
    fn trim(&mut self) {
        while self.words.last() == Some(&0) {
            self.words.pop();
        }
    }
}

impl From<u64> for WideSet {
    fn from(x: u64) -> Self {
        let mut s = Self { words: vec![x] };
        s.trim();
        s
    }
}

impl TryFrom<&WideSet> for u64 {
    type Error = crate::Error;

    /// Narrows to a single word; fails if any index is `>= 64`.
    fn try_from(s: &WideSet) -> Result<Self, Self::Error> {
        match s.words.len() {
            0 => Ok(0),
            1 => Ok(s.words[0]),
            _ => Err(crate::Error::Capacity {
                nodes: s.words.len() * WORD_BITS,
                limit: WORD_BITS,
            }),
        }
    }
}

impl BitRow for WideSet {
    const CAPACITY: Option<usize> = None;

    fn empty(n: usize) -> Self {
        Self::with_capacity(n)
    }

    fn full(n: usize) -> Self {
        let mut words = vec![u64::MAX; n / WORD_BITS];
        let rem = n % WORD_BITS;
        if rem != 0 {
            words.push(low_mask(rem));
        }
        Self { words }
    }

    #[inline]
    fn contains(&self, i: usize) -> bool {
        self.words
            .get(i / WORD_BITS)
            .is_some_and(|w| (w & bit(i % WORD_BITS)) != 0)
    }

    #[inline]
    fn insert(&mut self, i: usize) {
        let w = i / WORD_BITS;
        if w >= self.words.len() {
            self.words.resize(w + 1, 0);
        }
        self.words[w] |= bit(i % WORD_BITS);
    }

    #[inline]
    fn remove(&mut self, i: usize) {
        if let Some(w) = self.words.get_mut(i / WORD_BITS) {
            *w &= !bit(i % WORD_BITS);
            self.trim();
        }
    }

    fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn union_with(&mut self, other: &Self) {
        if self.words.len() < other.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= *b;
        }
    }

    fn intersect_with(&mut self, other: &Self) {
        self.words.truncate(other.words.len());
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= *b;
        }
        self.trim();
    }

    fn without_bit(&self, pos: usize) -> Self {
        let w = pos / WORD_BITS;
        if w >= self.words.len() {
            return self.clone();
        }
        let mut words = self.words.clone();
        // Shift every word from `w` upwards down by one, carrying bit 0 of the next word.
        for k in w..words.len() {
            let carry = self.words.get(k + 1).map_or(0, |next| next << 63);
            words[k] = (self.words[k] >> 1) | carry;
        }
        let below = low_mask(pos % WORD_BITS);
        words[w] = (self.words[w] & below) | (words[w] & !below);
        let mut out = Self { words };
        out.trim();
        out
    }

    fn first(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .find(|(_, w)| **w != 0)
            .map(|(k, w)| k * WORD_BITS + w.trailing_zeros() as usize)
    }

    fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(k, &w)| {
            let mut t = w;
            std::iter::from_fn(move || {
                if t == 0 {
                    return None;
                }
                let v = t.trailing_zeros() as usize;
                t &= t - 1;
                Some(k * WORD_BITS + v)
            })
        })
    }
}

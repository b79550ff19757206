//! Factorials, binomials and the interleave table.

use crate::error::{Error, Result};

/// Dimension of the interleave table; `interleave(a, b)` needs `a, b < INTERLEAVE_LIMIT`
/// unless one side is trivially short.
pub const INTERLEAVE_LIMIT: usize = 100;

/// `n!` as a double.
pub fn factorial(n: usize) -> f64 {
    (2..=n).fold(1.0, |acc, k| acc * k as f64)
}

/// `C(n, r)` as a double; zero when `r > n`.
pub fn choose(n: usize, r: usize) -> f64 {
    if r > n {
        return 0.0;
    }
    let r = r.min(n - r);
    (1..=r).fold(1.0, |acc, i| acc * (n - r + i) as f64 / i as f64)
}

/// Memo table for `interleave(a, b)`: the number of ways to merge ordered sequences of
/// lengths `a` and `b` while keeping each sequence's internal order (`C(a + b, a)`).
#[derive(Clone, Debug)]
pub struct InterleaveTable {
    /// Row-major `INTERLEAVE_LIMIT x INTERLEAVE_LIMIT`; zero means not yet computed.
    table: Vec<i64>,
}

impl Default for InterleaveTable {
    fn default() -> Self {
        Self::new()
    }
}

impl InterleaveTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            table: vec![0; INTERLEAVE_LIMIT * INTERLEAVE_LIMIT],
        }
    }

    /// `interleave(a, b)`, computed as `Σ_{i=0..=a} interleave(i, b - 1)`.
    ///
    /// # Errors
    /// - [`Error::InterleaveBounds`] if `a` or `b` reaches [`INTERLEAVE_LIMIT`].
    /// - [`Error::InterleaveOverflow`] if the value does not fit in an `i64`.
    pub fn interleave(&mut self, a: usize, b: usize) -> Result<i64> {
        if a == 0 || b == 0 {
            return Ok(1);
        }
        if a == 1 {
            return i64::try_from(b + 1).map_err(|_| Error::InterleaveOverflow { a, b });
        }
        if b == 1 {
            return i64::try_from(a + 1).map_err(|_| Error::InterleaveOverflow { a, b });
        }
        if a >= INTERLEAVE_LIMIT || b >= INTERLEAVE_LIMIT {
            return Err(Error::InterleaveBounds {
                a,
                b,
                limit: INTERLEAVE_LIMIT,
            });
        }

        let idx = a * INTERLEAVE_LIMIT + b;
        if self.table[idx] == 0 {
            let mut sum = 0i64;
            for i in 0..=a {
                sum = sum
                    .checked_add(self.interleave(i, b - 1)?)
                    .ok_or(Error::InterleaveOverflow { a, b })?;
            }
            self.table[idx] = sum;
        }
        Ok(self.table[idx])
    }
}

//! Plain-text arc matrices: the crate's on-disk DAG format.
//!
//! Row `i`, column `j` is `1` when the arc `i -> j` is present. Rows may have any length
//! as long as the matrix is square; there is no symmetry requirement.

use crate::bits::BitRow;
use crate::error::{Error, Result};
use crate::graph::OrderedModel;
use crate::wide::WideSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

/// A directed arc matrix of arbitrary size.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArcMatrix {
    n: usize,
    /// `rows[i]`: children of `i`.
    rows: Vec<WideSet>,
}

impl ArcMatrix {
    /// An `n x n` matrix with no arcs.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            rows: vec![WideSet::empty(n); n],
        }
    }

    /// Builds a matrix from an arc list. Arcs are taken as given (no closure).
    ///
    /// # Errors
    /// Fails on out-of-range nodes or self-loops.
    pub fn from_arcs(n: usize, arcs: &[(usize, usize)]) -> Result<Self> {
        let mut m = Self::new(n);
        for &(p, c) in arcs {
            m.set_arc(p, c, true)?;
        }
        Ok(m)
    }

    /// Sets or clears `parent -> child`.
    ///
    /// # Errors
    /// Fails on out-of-range nodes or `parent == child`.
    pub fn set_arc(&mut self, parent: usize, child: usize, present: bool) -> Result<()> {
        for node in [parent, child] {
            if node >= self.n {
                return Err(Error::NodeOutOfRange {
                    node,
                    num_nodes: self.n,
                });
            }
        }
        if parent == child {
            return Err(Error::SelfLoop { node: parent });
        }
        if present {
            self.rows[parent].insert(child);
        } else {
            self.rows[parent].remove(child);
        }
        Ok(())
    }

    /// Number of arcs set.
    pub fn arc_count(&self) -> usize {
        self.rows.iter().map(BitRow::count).sum()
    }

    /// Returns a node on a directed cycle, if any (Kahn's algorithm).
    pub fn find_cycle_node(&self) -> Option<usize> {
        let mut indegree = vec![0usize; self.n];
        for row in &self.rows {
            for c in row.ones() {
                indegree[c] += 1;
            }
        }
        let mut ready: Vec<usize> = (0..self.n).filter(|&v| indegree[v] == 0).collect();
        let mut done = 0;
        while let Some(v) = ready.pop() {
            done += 1;
            for c in self.rows[v].ones() {
                indegree[c] -= 1;
                if indegree[c] == 0 {
                    ready.push(c);
                }
            }
        }
        if done == self.n {
            None
        } else {
            indegree.iter().position(|&d| d > 0)
        }
    }

    /// Writes the matrix as `n` lines of `0/1` characters.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        for row in &self.rows {
            for j in 0..self.n {
                write!(w, "{}", u8::from(row.contains(j)))?;
            }
            writeln!(w)?;
        }
        Ok(())
    }

    /// Saves the matrix to `filename`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn save_to_file(&self, filename: impl AsRef<Path>) -> io::Result<()> {
        let f = fs::File::create(filename)?;
        self.write_to(io::BufWriter::new(f))
    }

    /// Loads and validates a matrix from `filename`.
    ///
    /// # Errors
    /// I/O failures, malformed text and cyclic matrices are all reported.
    pub fn load_from_file(filename: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(filename).map_err(|e| ParseError::Io(e.to_string()))?;
        parse_arc_matrix(&text)
    }
}

impl OrderedModel for ArcMatrix {
    fn num_nodes(&self) -> usize {
        self.n
    }

    fn is_directed_arc(&self, parent: usize, child: usize) -> bool {
        parent < self.n && self.rows[parent].contains(child)
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Errors encountered while reading an arc matrix.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No non-empty rows were found.
    #[error("arc matrix is empty")]
    Empty,
    /// Matrix is not square.
    #[error("arc matrix is not square: row {row} has length {got}, expected {expected}")]
    NonSquare {
        /// The row index with wrong length.
        row: usize,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// Encountered a non `0/1` character.
    #[error("invalid character at ({row}, {col}): {ch:?} (expected '0' or '1')")]
    InvalidChar {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// The invalid character.
        ch: char,
    },
    /// Diagonal contains a `1`.
    #[error("self-loop detected at vertex {vertex}")]
    SelfLoop {
        /// The vertex with a self-loop.
        vertex: usize,
    },
    /// I/O error (file not found, etc.).
    #[error("I/O error: {0}")]
    Io(String),
}

/// Parses a `0/1` arc matrix from text.
///
/// Rules:
/// - Blank lines are ignored and each line is trimmed.
/// - The matrix must be square with a zero diagonal.
/// - The arcs must form a DAG.
///
/// # Errors
/// [`Error::Parse`] for malformed text, [`Error::Cyclic`] for a matrix with a cycle.
pub fn parse_arc_matrix(text: &str) -> Result<ArcMatrix> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(ParseError::Empty.into());
    }
    let n = lines.len();

    let mut m = ArcMatrix::new(n);
    for (i, line) in lines.iter().enumerate() {
        let bytes = line.as_bytes();
        if bytes.len() != n {
            return Err(ParseError::NonSquare {
                row: i,
                expected: n,
                got: bytes.len(),
            }
            .into());
        }
        for (j, &b) in bytes.iter().enumerate() {
            match b {
                b'0' => {}
                b'1' if i == j => return Err(ParseError::SelfLoop { vertex: i }.into()),
                b'1' => m.rows[i].insert(j),
                _ => {
                    return Err(ParseError::InvalidChar {
                        row: i,
                        col: j,
                        ch: b as char,
                    }
                    .into())
                }
            }
        }
    }

    if let Some(node) = m.find_cycle_node() {
        return Err(Error::Cyclic { node });
    }
    Ok(m)
}

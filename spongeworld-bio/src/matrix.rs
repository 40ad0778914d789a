//! Compressed sparse row storage for the feature × sample abundance matrix.
//!
//! Rows are features and columns are samples. Only non-zero cells are stored,
//! so a presence call with `threshold >= 0` only has to walk one row.
//!
//! # Invariants
//! - `row_offsets.len() == n_rows + 1`, `row_offsets[0] == 0`, non-decreasing
//! - within a row, column indices are strictly increasing
//! - every stored value is finite and strictly positive

use spongeworld_core::{SpongeError, SpongeResult};

#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    n_rows: usize,
    n_cols: usize,
    row_offsets: Vec<usize>,
    col_indices: Vec<u32>,
    values: Vec<f64>,
}

impl SparseMatrix {
    /// Builds the matrix from `(row, column, value)` triplets.
    ///
    /// Zero cells are skipped and repeated coordinates are summed. Negative,
    /// non-finite or out of range entries are rejected.
    pub fn from_triplets(
        n_rows: usize,
        n_cols: usize,
        mut entries: Vec<(usize, usize, f64)>,
    ) -> SpongeResult<Self> {
        if n_cols > u32::MAX as usize {
            return Err(SpongeError::load(format!("too many samples: {}", n_cols)));
        }
        for &(r, c, v) in &entries {
            if r >= n_rows || c >= n_cols {
                return Err(SpongeError::load(format!(
                    "entry ({}, {}) outside of a {}x{} matrix",
                    r, c, n_rows, n_cols
                )));
            }
            if !v.is_finite() || v < 0.0 {
                return Err(SpongeError::load(format!(
                    "invalid abundance {} at ({}, {})",
                    v, r, c
                )));
            }
        }

        entries.retain(|&(_, _, v)| v > 0.0);
        entries.sort_unstable_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        let mut row_offsets = vec![0usize; n_rows + 1];
        let mut col_indices: Vec<u32> = Vec::with_capacity(entries.len());
        let mut values: Vec<f64> = Vec::with_capacity(entries.len());
        let mut last: Option<(usize, usize)> = None;

        for (r, c, v) in entries {
            if last == Some((r, c)) {
                if let Some(value) = values.last_mut() {
                    *value += v;
                }
                continue;
            }
            row_offsets[r + 1] += 1;
            col_indices.push(c as u32);
            values.push(v);
            last = Some((r, c));
        }
        for r in 0..n_rows {
            row_offsets[r + 1] += row_offsets[r];
        }

        Ok(Self { n_rows, n_cols, row_offsets, col_indices, values })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Number of stored (non-zero) cells
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Non-zero cells of one row as `(column, value)`
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let (start, end) = self.row_bounds(row);
        self.col_indices[start..end]
            .iter()
            .zip(&self.values[start..end])
            .map(|(&c, &v)| (c as usize, v))
    }

    fn row_bounds(&self, row: usize) -> (usize, usize) {
        if row >= self.n_rows {
            return (0, 0);
        }
        (self.row_offsets[row], self.row_offsets[row + 1])
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        let (start, end) = self.row_bounds(row);
        match self.col_indices[start..end].binary_search(&(col as u32)) {
            Ok(pos) => self.values[start + pos],
            Err(_) => 0.0,
        }
    }

    /// Number of columns whose value in `row` is strictly above `threshold`.
    ///
    /// Zero cells are not stored, so a negative threshold is not supported.
    pub fn count_above(&self, row: usize, threshold: f64) -> usize {
        self.row(row).filter(|&(_, v)| v > threshold).count()
    }

    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.n_cols];
        for (&c, &v) in self.col_indices.iter().zip(&self.values) {
            sums[c as usize] += v;
        }
        sums
    }

    /// Keeps only the listed columns, in the listed order.
    pub fn select_columns(&self, keep: &[usize]) -> Self {
        let mut remap = vec![u32::MAX; self.n_cols];
        for (new, &old) in keep.iter().enumerate() {
            remap[old] = new as u32;
        }

        let mut row_offsets = Vec::with_capacity(self.n_rows + 1);
        let mut col_indices = Vec::with_capacity(self.col_indices.len());
        let mut values = Vec::with_capacity(self.values.len());
        row_offsets.push(0);

        let mut cells: Vec<(u32, f64)> = Vec::new();
        for row in 0..self.n_rows {
            cells.clear();
            cells.extend(
                self.row(row)
                    .filter(|&(c, _)| remap[c] != u32::MAX)
                    .map(|(c, v)| (remap[c], v)),
            );
            // Reordered columns must stay sorted within the row
            cells.sort_unstable_by_key(|&(c, _)| c);
            for &(c, v) in &cells {
                col_indices.push(c);
                values.push(v);
            }
            row_offsets.push(col_indices.len());
        }

        Self {
            n_rows: self.n_rows,
            n_cols: keep.len(),
            row_offsets,
            col_indices,
            values,
        }
    }

    /// Divides every column by its sum so each column adds up to 1.
    ///
    /// Columns summing to zero are left untouched; callers drop them first.
    pub fn normalize_columns(&mut self) {
        let sums = self.column_sums();
        for (c, v) in self.col_indices.iter().zip(self.values.iter_mut()) {
            let sum = sums[*c as usize];
            if sum > 0.0 {
                *v /= sum;
            }
        }
    }
}

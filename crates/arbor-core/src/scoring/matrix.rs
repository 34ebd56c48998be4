use crate::error::{ArborError, Result};

/// Square matrix of arc scores indexed `[head][dependent]`.
///
/// Only cells for candidate arcs are meaningful; the rest stay at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    size: usize,
    cells: Vec<f32>,
}

impl ScoreMatrix {
    /// An all-zero `size × size` matrix.
    #[must_use]
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            cells: vec![0.0; size * size],
        }
    }

    /// Builds a matrix from row-major nested vectors.
    ///
    /// # Errors
    ///
    /// Returns `ArborError::InvalidInput` if any row length differs from the row count.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (head, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(ArborError::invalid_input(format!(
                    "score matrix must be square: row {head} has {} columns, expected {size}",
                    row.len()
                )));
            }
            cells.extend_from_slice(row);
        }
        Ok(Self { size, cells })
    }

    /// Side length, ROOT included.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn get(&self, head: usize, dependent: usize) -> f32 {
        self.cells[head * self.size + dependent]
    }

    pub fn set(&mut self, head: usize, dependent: usize, score: f32) {
        self.cells[head * self.size + dependent] = score;
    }
}

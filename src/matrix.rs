use num_traits::Float;
use ordered_float::{OrderedFloat, PrimitiveFloat};

use alloc::{boxed::Box, vec::Vec};

use core::{cmp::Reverse, ops::Index};

use crate::MatrixError;

/// A square matrix of pairwise correlation coefficients
///
/// Cells are stored row-major and indexed by instrument position, in the same
/// order as the statistics they were built alongside. Matrices produced by
/// [`build`](crate::build) have `1` on the diagonal and are symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix<T> {
    /// Number of rows, and of columns
    dim: usize,
    /// Row-major cells, `dim * dim` of them
    cells: Box<[T]>,
}

impl<T> CorrelationMatrix<T> {
    /// Creates a matrix by evaluating `f(i, j)` for every cell, row by row
    ///
    /// # Arguments
    ///
    /// * `dim` - The number of rows and columns
    /// * `f` - Produces the value of cell `(i, j)`
    ///
    /// # Returns
    ///
    /// * `Self` - The matrix
    pub fn from_fn(dim: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(dim * dim);
        for i in 0..dim {
            for j in 0..dim {
                cells.push(f(i, j));
            }
        }
        Self {
            dim,
            cells: cells.into_boxed_slice(),
        }
    }

    /// Returns the number of rows (and columns)
    #[inline]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Returns `true` if the matrix has no cells
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.dim == 0
    }

    /// Returns row `i`, or `None` if out of bounds
    pub fn row(&self, i: usize) -> Option<&[T]> {
        (i < self.dim).then(|| &self.cells[i * self.dim..(i + 1) * self.dim])
    }

    /// Returns an iterator over the rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks_exact(self.dim.max(1))
    }

    /// Returns the cells as a row-major slice
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }
}

impl<T: Copy> CorrelationMatrix<T> {
    /// Returns cell `(i, j)`, or `None` if out of bounds
    ///
    /// # Examples
    ///
    /// ```
    /// use price_correlation::CorrelationMatrix;
    ///
    /// let m = CorrelationMatrix::from_fn(2, |i, j| if i == j { 1.0 } else { 0.5 });
    /// assert_eq!(m.get(0, 1), Some(0.5));
    /// assert_eq!(m.get(2, 0), None);
    /// ```
    pub fn get(&self, i: usize, j: usize) -> Option<T> {
        self.row(i).and_then(|row| row.get(j)).copied()
    }

    /// Returns the matrix as nested rows
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }
}

impl<T: Float> CorrelationMatrix<T> {
    /// Returns `true` if every mirrored pair of cells differs by at most `eps`
    pub fn is_symmetric(&self, eps: T) -> bool {
        (0..self.dim).all(|i| {
            (i + 1..self.dim).all(|j| {
                let upper = self.cells[i * self.dim + j];
                let lower = self.cells[j * self.dim + i];
                (upper - lower).abs() <= eps
            })
        })
    }
}

impl<T> CorrelationMatrix<T>
where
    T: Float + PrimitiveFloat,
{
    /// Returns the distinct pairs above the diagonal, strongest first
    ///
    /// Pairs are ranked by the absolute value of their coefficient, so strong
    /// negative correlations rank alongside strong positive ones. Ties keep
    /// row-major order.
    ///
    /// # Returns
    ///
    /// * `Vec<(usize, usize, T)>` - `(i, j, r)` triples with `i < j`
    ///
    /// # Examples
    ///
    /// ```
    /// use price_correlation::CorrelationMatrix;
    ///
    /// let cells = [
    ///     [1.0, 0.2, -0.9],
    ///     [0.2, 1.0, 0.5],
    ///     [-0.9, 0.5, 1.0],
    /// ];
    /// let m = CorrelationMatrix::from_fn(3, |i, j| cells[i][j]);
    /// assert_eq!(m.ranked_pairs(), vec![(0, 2, -0.9), (1, 2, 0.5), (0, 1, 0.2)]);
    /// ```
    pub fn ranked_pairs(&self) -> Vec<(usize, usize, T)> {
        let mut pairs = Vec::with_capacity(self.dim * self.dim.saturating_sub(1) / 2);
        for i in 0..self.dim {
            for j in i + 1..self.dim {
                pairs.push((i, j, self.cells[i * self.dim + j]));
            }
        }
        pairs.sort_by_key(|(_, _, r)| Reverse(OrderedFloat(Float::abs(*r))));
        pairs
    }
}

impl<T> Index<(usize, usize)> for CorrelationMatrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        assert!(i < self.dim && j < self.dim, "cell ({i}, {j}) out of bounds");
        &self.cells[i * self.dim + j]
    }
}

impl<T> TryFrom<Vec<Vec<T>>> for CorrelationMatrix<T> {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        let dim = rows.len();
        let mut cells = Vec::with_capacity(dim * dim);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != dim {
                return Err(MatrixError::NotSquare {
                    row,
                    len: values.len(),
                    dim,
                });
            }
            cells.extend(values);
        }
        Ok(Self {
            dim,
            cells: cells.into_boxed_slice(),
        })
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for CorrelationMatrix<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for CorrelationMatrix<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = <Vec<Vec<T>> as serde::Deserialize>::deserialize(deserializer)?;
        Self::try_from(rows).map_err(serde::de::Error::custom)
    }
}

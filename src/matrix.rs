//! Dense distance/duration matrix.

use crate::error::{Result, RoutingError};

/// A dense n×n matrix of pairwise measures (distance or duration), stored
/// row-major. Used for both `ProblemData`'s distance and duration tables.
///
/// # Examples
///
/// ```
/// use vrp_core::matrix::Matrix;
///
/// let m = Matrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).unwrap();
/// assert_eq!(m.get(0, 1), 5.0);
/// assert_eq!(m.size(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    size: usize,
}

impl Matrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a matrix from an explicit row-major `size x size` grid.
    ///
    /// Fails if the data length doesn't match `size * size` or any entry
    /// is negative.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != size * size {
            return Err(RoutingError::NonSquareMatrix {
                rows: data.len() / size.max(1),
                expected: size,
            });
        }
        for (idx, &value) in data.iter().enumerate() {
            if value < 0.0 {
                return Err(RoutingError::NegativeMeasure {
                    from: idx / size,
                    to: idx % size,
                    value,
                });
            }
        }
        Ok(Self { data, size })
    }

    /// Returns the measure from location `from` to location `to`.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the measure from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, value: f64) {
        self.data[from * self.size + to] = value;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the nearest neighbor of `from` among the given candidates.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates.iter().copied().min_by(|&a, &b| {
            self.get(from, a)
                .partial_cmp(&self.get(from, b))
                .expect("measures should not be NaN")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_data_round_trips() {
        let m = Matrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).expect("valid");
        assert_eq!(m.get(0, 1), 5.0);
        assert_eq!(m.get(1, 0), 5.0);
    }

    #[test]
    fn from_data_rejects_wrong_length() {
        assert!(Matrix::from_data(2, vec![0.0, 1.0, 2.0]).is_err());
    }

    #[test]
    fn from_data_rejects_negative_entries() {
        let err = Matrix::from_data(2, vec![0.0, -1.0, 1.0, 0.0]).unwrap_err();
        assert!(matches!(err, RoutingError::NegativeMeasure { .. }));
    }

    #[test]
    fn set_get_round_trip() {
        let mut m = Matrix::new(3);
        m.set(0, 1, 42.0);
        assert_eq!(m.get(0, 1), 42.0);
        assert_eq!(m.get(1, 0), 0.0);
    }

    #[test]
    fn nearest_neighbor_picks_closest_candidate() {
        let m =
            Matrix::from_data(3, vec![0.0, 5.0, 8.0, 5.0, 0.0, 9.0, 8.0, 9.0, 0.0]).expect("valid");
        assert_eq!(m.nearest_neighbor(0, &[1, 2]), Some(1));
        assert_eq!(m.nearest_neighbor(0, &[2]), Some(2));
        assert_eq!(m.nearest_neighbor(0, &[]), None);
    }

    #[test]
    fn asymmetric_matrix_detected() {
        let mut m = Matrix::new(2);
        m.set(0, 1, 10.0);
        m.set(1, 0, 15.0);
        assert!(!m.is_symmetric(1e-10));
    }
}

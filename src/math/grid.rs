use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::NetworkError;

/// Row-major 2D block of values used for network inputs, expected outputs
/// and read-outs.
///
/// A layer of width `W` and height `H` pairs with a grid of `W` rows of `H`
/// values each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridRecord")]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

/// Unchecked wire form; `Grid` only deserializes through its validation.
#[derive(Deserialize)]
struct GridRecord {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl TryFrom<GridRecord> for Grid {
    type Error = NetworkError;

    fn try_from(record: GridRecord) -> Result<Grid, NetworkError> {
        let grid = Grid {
            rows: record.rows,
            cols: record.cols,
            data: record.data,
        };
        if !grid.is_rectangular() {
            return Err(NetworkError::RaggedGrid);
        }
        Ok(grid)
    }
}

impl Grid {
    pub fn zeros(rows: usize, cols: usize) -> Grid {
        Grid::filled(rows, cols, 0.0)
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> Grid {
        Grid {
            rows,
            cols,
            data: vec![vec![value; cols]; rows],
        }
    }

    /// Uniform samples in `[0, 1)`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Grid {
        let mut res = Grid::zeros(rows, cols);

        for row in res.data.iter_mut() {
            for value in row.iter_mut() {
                *value = rng.gen::<f64>();
            }
        }

        res
    }

    /// Wraps nested rows, rejecting ragged input. An empty outer vector is a
    /// valid 0x0 grid.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Grid, NetworkError> {
        let cols = data.first().map_or(0, |row| row.len());
        if data.iter().any(|row| row.len() != cols) {
            return Err(NetworkError::RaggedGrid);
        }

        Ok(Grid {
            rows: data.len(),
            cols,
            data,
        })
    }

    /// Whether `data` really holds `rows` rows of `cols` values. Always true
    /// for grids built through the constructors; the fields are public, so a
    /// hand-assembled grid may not be.
    pub fn is_rectangular(&self) -> bool {
        self.data.len() == self.rows && self.data.iter().all(|row| row.len() == self.cols)
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row][col] = value;
    }

    pub fn map<F>(&self, functor: F) -> Grid
    where
        F: Fn(f64) -> f64,
    {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// `(row, col, value)` in row-major order.
    pub fn iter_indexed(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.data.iter().enumerate().flat_map(|(i, row)| {
            row.iter().enumerate().map(move |(j, &value)| (i, j, value))
        })
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid { rows: 0, cols: 0, data: vec![] }
    }
}

impl<const C: usize, const R: usize> From<[[f64; C]; R]> for Grid {
    fn from(rows: [[f64; C]; R]) -> Self {
        Grid {
            rows: R,
            cols: C,
            data: rows.iter().map(|row| row.to_vec()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn from_data_rejects_ragged_rows() {
        let err = Grid::from_data(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err, NetworkError::RaggedGrid);
    }

    #[test]
    fn from_data_accepts_empty() {
        let grid = Grid::from_data(vec![]).unwrap();
        assert_eq!(grid.shape(), (0, 0));
    }

    #[test]
    fn array_conversion_keeps_row_major_order() {
        let grid = Grid::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(grid.shape(), (2, 3));
        assert_eq!(grid.get(1, 0), 4.0);

        let flat: Vec<f64> = grid.iter_indexed().map(|(_, _, v)| v).collect();
        assert_eq!(flat, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn random_values_stay_in_unit_interval() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let grid = Grid::random(4, 5, &mut rng);
        assert!(grid.iter_indexed().all(|(_, _, v)| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn deserializing_checks_declared_shape() {
        let json = r#"{"rows":2,"cols":2,"data":[[0.5,0.5],[0.5]]}"#;
        let ragged = serde_json::from_str::<Grid>(json);
        assert!(ragged.is_err());

        let short = serde_json::from_str::<Grid>(r#"{"rows":3,"cols":1,"data":[[0.5],[0.5]]}"#);
        assert!(short.is_err());

        let json = r#"{"rows":1,"cols":2,"data":[[0.25,0.75]]}"#;
        let grid: Grid = serde_json::from_str(json).unwrap();
        assert_eq!(grid, Grid::from([[0.25, 0.75]]));
    }

    #[test]
    fn empty_rows_keep_their_declared_width() {
        let grid = Grid::zeros(0, 3);
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), grid);
    }
}

//! Dense symmetric solves for the penalized normal equations.

/// Row-major square matrix.
#[derive(Debug, Clone)]
pub struct SquareMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SquareMatrix {
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            values: vec![0.0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.values[row * self.size + column]
    }

    pub fn add(&mut self, row: usize, column: usize, value: f64) {
        self.values[row * self.size + column] += value;
    }

    /// Accumulates the outer product `x xᵀ`.
    pub fn add_outer(&mut self, x: &[f64]) {
        for (row, left) in x.iter().enumerate() {
            if *left == 0.0 {
                continue;
            }
            for (column, right) in x.iter().enumerate() {
                self.values[row * self.size + column] += left * right;
            }
        }
    }
}

/// Lower-triangular factor `L` with `A = L Lᵀ`.
#[derive(Debug, Clone)]
pub struct Cholesky {
    size: usize,
    lower: Vec<f64>,
}

impl Cholesky {
    /// Returns `None` when the matrix is not numerically positive definite.
    pub fn decompose(matrix: &SquareMatrix) -> Option<Self> {
        let size = matrix.size();
        let mut lower = vec![0.0; size * size];

        for row in 0..size {
            for column in 0..=row {
                let mut sum = matrix.get(row, column);
                for k in 0..column {
                    sum -= lower[row * size + k] * lower[column * size + k];
                }

                if row == column {
                    if !sum.is_finite() || sum <= 0.0 {
                        return None;
                    }
                    lower[row * size + column] = sum.sqrt();
                } else {
                    lower[row * size + column] = sum / lower[column * size + column];
                }
            }
        }

        Some(Self { size, lower })
    }

    /// Solves `A x = b`.
    pub fn solve(&self, rhs: &[f64]) -> Vec<f64> {
        let forward = self.forward_substitute(rhs);

        let mut solution = vec![0.0; self.size];
        for row in (0..self.size).rev() {
            let mut sum = forward[row];
            for k in (row + 1)..self.size {
                sum -= self.lower[k * self.size + row] * solution[k];
            }
            solution[row] = sum / self.lower[row * self.size + row];
        }
        solution
    }

    /// `xᵀ A⁻¹ x`, the leverage of `x` under the fitted design.
    pub fn inverse_quadratic_form(&self, x: &[f64]) -> f64 {
        self.forward_substitute(x)
            .iter()
            .map(|value| value * value)
            .sum()
    }

    fn forward_substitute(&self, rhs: &[f64]) -> Vec<f64> {
        let mut forward = vec![0.0; self.size];
        for row in 0..self.size {
            let mut sum = rhs[row];
            for k in 0..row {
                sum -= self.lower[row * self.size + k] * forward[k];
            }
            forward[row] = sum / self.lower[row * self.size + row];
        }
        forward
    }
}

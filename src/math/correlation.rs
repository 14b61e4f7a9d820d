//! Pearson correlation across the numeric columns.
//!
//! We build the `n × k` data matrix, centre each column, and read the
//! correlations off the cross-product `Xcᵀ Xc`. A column with zero variance
//! has undefined correlation; those cells come out as `NaN` (the diagonal
//! included), matching how the heatmap renders "no data".

use nalgebra::DMatrix;

use crate::domain::{NumericColumn, SalesDataset};
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub columns: Vec<NumericColumn>,
    pub values: DMatrix<f64>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[(row, col)]
    }

    pub fn size(&self) -> usize {
        self.columns.len()
    }
}

pub fn correlation_matrix(dataset: &SalesDataset) -> Result<CorrelationMatrix, AppError> {
    if dataset.is_empty() {
        return Err(AppError::internal("Cannot correlate an empty dataset."));
    }

    let columns = NumericColumn::ALL.to_vec();
    let n = dataset.len();
    let k = columns.len();

    let mut x = DMatrix::from_fn(n, k, |i, j| dataset.records()[i].value(columns[j]));
    for j in 0..k {
        let mean = x.column(j).mean();
        x.column_mut(j).add_scalar_mut(-mean);
    }

    let cross = x.transpose() * &x;
    let values = DMatrix::from_fn(k, k, |i, j| {
        let denom = (cross[(i, i)] * cross[(j, j)]).sqrt();
        if denom > 0.0 && denom.is_finite() {
            (cross[(i, j)] / denom).clamp(-1.0, 1.0)
        } else {
            f64::NAN
        }
    });

    Ok(CorrelationMatrix { columns, values })
}

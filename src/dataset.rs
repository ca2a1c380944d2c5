use crate::error::{Error, Result};
use crate::{Matrix, Vector};
use ndarray::{ArrayView1, Axis};

/// A named-column table of `f64` values.
///
/// Columns are fixed at construction; rows are insertion-ordered and carry
/// no further meaning. The fitter addresses columns by name, so names must
/// be unique.
#[derive(Clone, Debug)]
pub struct Dataset {
    columns: Vec<String>,
    data: Matrix,
}

impl Dataset {
    pub fn new(columns: Vec<String>, data: Matrix) -> Result<Self> {
        if columns.len() != data.ncols() {
            return Err(Error::invalid_argument(format!(
                "number of column names ({}) must match matrix width ({})",
                columns.len(),
                data.ncols()
            )));
        }

        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                return Err(Error::invalid_argument(format!(
                    "duplicate column name: {name}"
                )));
            }
        }

        Ok(Self { columns, data })
    }

    pub fn n_samples(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_columns(&self) -> usize {
        self.data.ncols()
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// View of a single column by name.
    pub fn column(&self, name: &str) -> Result<ArrayView1<'_, f64>> {
        let idx = self.column_index(name)?;
        Ok(self.data.column(idx))
    }

    /// Owned copy of a single column by name.
    pub fn column_owned(&self, name: &str) -> Result<Vector> {
        Ok(self.column(name)?.to_owned())
    }

    /// Feature matrix with the requested columns, in the requested order.
    pub fn select(&self, names: &[&str]) -> Result<Matrix> {
        let mut selected = Matrix::zeros((self.n_samples(), names.len()));
        for (j, name) in names.iter().enumerate() {
            let idx = self.column_index(name)?;
            selected
                .index_axis_mut(Axis(1), j)
                .assign(&self.data.column(idx));
        }
        Ok(selected)
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| Error::invalid_argument(format!("unknown column: {name}")))
    }
}

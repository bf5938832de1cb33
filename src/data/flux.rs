use super::DataError;

/// Row-major matrix of spectral flux, one row per date and one column per
/// wavelength.
#[derive(Debug, Clone, PartialEq)]
pub struct FluxMatrix {
    rows: usize,
    columns: usize,
    values: Vec<f64>,
}

impl FluxMatrix {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, DataError> {
        let columns = rows.first().map_or(0, Vec::len);
        let n_rows = rows.len();

        let mut values = Vec::with_capacity(n_rows * columns);
        for (row, data) in rows.into_iter().enumerate() {
            if data.len() != columns {
                return Err(DataError::RaggedRow {
                    row,
                    expected: columns,
                    found: data.len(),
                });
            }
            values.extend(data);
        }

        Ok(Self {
            rows: n_rows,
            columns,
            values,
        })
    }

    pub fn from_flat(values: Vec<f64>, columns: usize) -> Result<Self, DataError> {
        let rows = match columns {
            0 if values.is_empty() => 0,
            0 => {
                return Err(DataError::FlatLength {
                    values: values.len(),
                    columns,
                });
            }
            _ if values.len() % columns != 0 => {
                return Err(DataError::FlatLength {
                    values: values.len(),
                    columns,
                });
            }
            _ => values.len() / columns,
        };

        Ok(Self {
            rows,
            columns,
            values,
        })
    }

    /// A matrix with `rows` rows and no columns.
    pub fn empty(rows: usize) -> Self {
        Self {
            rows,
            columns: 0,
            values: Vec::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn row(&self, index: usize) -> &[f64] {
        &self.values[index * self.columns..(index + 1) * self.columns]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |i| self.row(i))
    }

    pub fn column(&self, index: usize) -> Vec<f64> {
        self.iter_rows().map(|row| row[index]).collect()
    }
}

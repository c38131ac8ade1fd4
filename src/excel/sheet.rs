use crate::excel::CellValue;

static EMPTY: CellValue = CellValue::Empty;

/// A worksheet held fully in memory. `data` is 1-based: row 0 and column 0 are padding.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub data: Vec<Vec<CellValue>>,
    pub max_rows: usize,
    pub max_cols: usize,
}

impl Sheet {
    // Rows start at A1.
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let max_rows = rows.len();
        let max_cols = rows.iter().map(Vec::len).max().unwrap_or(0);

        let mut data = vec![vec![CellValue::Empty; max_cols + 1]; max_rows + 1];
        for (row_idx, row) in rows.into_iter().enumerate() {
            for (col_idx, cell) in row.into_iter().enumerate() {
                data[row_idx + 1][col_idx + 1] = cell;
            }
        }

        Self {
            name: name.into(),
            data,
            max_rows,
            max_cols,
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }
}

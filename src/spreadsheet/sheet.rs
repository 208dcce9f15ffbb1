use crate::spreadsheet::cell::Cell;

/// Cells read from one sheet of a workbook, together with the used range they span.
pub(crate) struct Sheet {
    /// Source file name
    pub(crate) file_name: String,
    /// Sheet name
    pub(crate) name: String,
    /// Non-empty cells in row-major order
    pub(crate) cells: Vec<Cell>,
    /// Used range, determined from the cells pushed so far
    pub(crate) row_lower_bound: Option<usize>,
    pub(crate) row_upper_bound: Option<usize>,
    pub(crate) col_lower_bound: Option<usize>,
    pub(crate) col_upper_bound: Option<usize>,
}

impl Sheet {
    pub(crate) fn new(file_name: &str, name: &str) -> Self {
        Self {
            file_name: file_name.to_owned(),
            name: name.to_owned(),
            cells: Vec::new(),
            row_lower_bound: None,
            row_upper_bound: None,
            col_lower_bound: None,
            col_upper_bound: None,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub(crate) fn push(&mut self, cell: Cell) {
        self.update_bound(cell.row, cell.col);
        self.cells.push(cell);
    }

    /// Widens the used range to include (row, col) without storing a cell there.
    pub(crate) fn update_bound(&mut self, row: usize, col: usize) {
        if self.row_lower_bound.map(|lower| row < lower).unwrap_or(true) {
            self.row_lower_bound = Some(row);
        }
        if self.row_upper_bound.map(|upper| upper < row).unwrap_or(true) {
            self.row_upper_bound = Some(row);
        }
        if self.col_lower_bound.map(|lower| col < lower).unwrap_or(true) {
            self.col_lower_bound = Some(col);
        }
        if self.col_upper_bound.map(|upper| upper < col).unwrap_or(true) {
            self.col_upper_bound = Some(col);
        }
    }

    /// Restores row-major order; readers may emit cells out of order.
    /// A later cell at the same position replaces an earlier one.
    pub(crate) fn finish(&mut self) {
        self.cells.sort_by_key(|cell| (cell.row, cell.col));
        self.cells.dedup_by(|later, earlier| {
            let duplicate = later.row == earlier.row && later.col == earlier.col;
            if duplicate {
                std::mem::swap(later, earlier);
            }
            duplicate
        });
    }

    /// Lays the cells out as a dense grid covering the used range.
    /// Positions without a cell are `None`. Requires [`Sheet::finish`] to have run.
    pub(crate) fn rows(&self) -> Vec<Vec<Option<&Cell>>> {
        let (Some(row_lower), Some(row_upper), Some(col_lower), Some(col_upper)) = (
            self.row_lower_bound,
            self.row_upper_bound,
            self.col_lower_bound,
            self.col_upper_bound,
        ) else {
            return Vec::new();
        };

        let mut index = 0usize;
        let mut table = Vec::with_capacity(row_upper - row_lower + 1);
        for row in row_lower..=row_upper {
            let mut record = Vec::with_capacity(col_upper - col_lower + 1);
            for col in col_lower..=col_upper {
                match self.cells.get(index) {
                    Some(cell) if cell.row == row && cell.col == col => {
                        record.push(Some(cell));
                        index += 1;
                    }
                    _ => record.push(None),
                }
            }
            table.push(record);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::cell::CellType;

    fn push(sheet: &mut Sheet, row: usize, col: usize, value: &str) {
        sheet.push(Cell {
            row,
            col,
            kind: CellType::InlineString,
            value: value.to_owned(),
        });
    }

    #[test]
    fn sheet_initial() {
        let sheet = Sheet::new("", "");

        assert!(sheet.is_empty());
        assert_eq!(sheet.row_lower_bound, None);
        assert_eq!(sheet.col_upper_bound, None);
        assert!(sheet.rows().is_empty());
    }

    #[test]
    fn sheet_update() {
        let mut sheet = Sheet::new("", "");
        push(&mut sheet, 1, 1, "a");
        push(&mut sheet, 1, 3, "b");
        push(&mut sheet, 3, 1, "c");
        push(&mut sheet, 3, 3, "d");
        sheet.finish();

        assert_eq!(sheet.cells.len(), 4);
        assert_eq!(sheet.row_lower_bound, Some(1));
        assert_eq!(sheet.row_upper_bound, Some(3));
        assert_eq!(sheet.col_lower_bound, Some(1));
        assert_eq!(sheet.col_upper_bound, Some(3));
    }

    #[test]
    fn rows_fill_gaps_with_none() {
        let mut sheet = Sheet::new("", "");
        push(&mut sheet, 3, 3, "d");
        push(&mut sheet, 1, 1, "a");
        push(&mut sheet, 1, 3, "b");
        sheet.finish();

        let rows = sheet.rows();
        let values: Vec<Vec<Option<&str>>> = rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.map(|it| it.value.as_str())).collect())
            .collect();
        assert_eq!(values, vec![
            vec![Some("a"), None, Some("b")],
            vec![None, None, None],
            vec![None, None, Some("d")],
        ]);
    }

    #[test]
    fn later_cells_win_at_the_same_position() {
        let mut sheet = Sheet::new("", "");
        push(&mut sheet, 0, 0, "first");
        push(&mut sheet, 0, 0, "second");
        sheet.finish();

        assert_eq!(sheet.cells.len(), 1);
        assert_eq!(sheet.cells[0].value, "second");
    }
}

use crate::error::InspectError;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::criteria::LoadOptions;
use crate::spreadsheet::sheet::Sheet;
use crate::table::column::to_value;
use crate::table::column::Column;
use crate::table::column::ColumnType;
use crate::table::value::Value;
use crate::table::Table;

impl Table {
    /// Materializes a sheet: the first occupied row supplies labels, the rest are data.
    pub(crate) fn from_sheet(sheet: &Sheet, options: &LoadOptions) -> Result<Table, InspectError> {
        let grid = sheet.rows();
        let Some((header, records)) = grid.split_first() else {
            return Ok(Table::new(&sheet.name, Vec::new())?);
        };

        let is_null = |cell: &Option<&Cell>| cell.map(|it| options.nulls.contains(&it.value)).unwrap_or(true);
        let records: Vec<&Vec<Option<&Cell>>> = records
            .iter()
            .filter(|record| !options.skip_empty_rows || !record.iter().all(is_null))
            .collect();

        let mut columns = Vec::with_capacity(header.len());
        for (index, title) in header.iter().enumerate() {
            let label = match title {
                Some(cell) => header_label(sheet, cell)?,
                None => format!("Unnamed: {index}"),
            };
            let cells: Vec<Option<&Cell>> = records
                .iter()
                .map(|record| record[index])
                .map(|cell| if is_null(&cell) { None } else { cell })
                .collect();
            let kind = ColumnType::detect(cells.iter().flatten().filter_map(|cell| ColumnType::from(cell)));
            if kind == ColumnType::Mixed {
                tracing::warn!(sheet = %sheet.name, column = %label, "column mixes incompatible value types");
            }
            let values = cells
                .iter()
                .map(|cell| match cell {
                    Some(cell) => to_value(sheet, kind, cell),
                    None => Ok(Value::Null),
                })
                .collect::<Result<Vec<Value>, InspectError>>()?;
            columns.push(Column {
                index,
                label,
                kind,
                values,
            });
        }

        Ok(Table::new(&sheet.name, columns)?)
    }
}

/// Header cells read as their natural value; numbers and dates become their text form.
fn header_label(sheet: &Sheet, cell: &Cell) -> Result<String, InspectError> {
    match ColumnType::from(cell) {
        Some(ColumnType::Text) | None => Ok(cell.value.to_owned()),
        Some(kind) => Ok(to_value(sheet, kind, cell)?.to_field()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::cell::CellType;

    fn sheet(cells: &[(usize, usize, CellType, &str)]) -> Sheet {
        let mut sheet = Sheet::new("prices.xlsx", "MCP Details");
        for (row, col, kind, value) in cells {
            sheet.push(Cell { row: *row, col: *col, kind: *kind, value: value.to_string() });
        }
        sheet.finish();
        sheet
    }

    #[test]
    fn header_row_and_types() {
        let sheet = sheet(&[
            (2, 1, CellType::InlineString, " TYPE "),
            (2, 2, CellType::InlineString, "MCP (Rs./kWh)"),
            (3, 1, CellType::InlineString, "DAM"),
            (3, 2, CellType::Number, "4"),
            (4, 1, CellType::InlineString, "RTM"),
            (4, 2, CellType::Number, "3.75"),
        ]);
        let table = Table::from_sheet(&sheet, &LoadOptions::default()).unwrap();
        assert_eq!(table.labels(), vec![" TYPE ", "MCP (Rs./kWh)"]);
        assert_eq!(table.shape(), (2, 2));
        let price = table.column("MCP (Rs./kWh)").unwrap();
        assert_eq!(price.kind, ColumnType::Float);
        assert_eq!(price.values, vec![Value::Float(4.0), Value::Float(3.75)]);
    }

    #[test]
    fn missing_header_cells_are_unnamed() {
        let sheet = sheet(&[
            (0, 0, CellType::InlineString, "TYPE"),
            (0, 2, CellType::Number, "2024"),
            (1, 0, CellType::InlineString, "DAM"),
            (1, 1, CellType::Number, "1"),
            (1, 2, CellType::Number, "2"),
        ]);
        let table = Table::from_sheet(&sheet, &LoadOptions::default()).unwrap();
        assert_eq!(table.labels(), vec!["TYPE", "Unnamed: 1", "2024"]);
    }

    #[test]
    fn null_literals_and_empty_rows() {
        let sheet = sheet(&[
            (0, 0, CellType::InlineString, "MCV (GW)"),
            (1, 0, CellType::Number, "1.5"),
            (2, 0, CellType::InlineString, "NA"),
            (3, 0, CellType::Number, "2"),
        ]);
        let mut options = LoadOptions::default();
        options.nulls.insert("NA".to_string());
        let table = Table::from_sheet(&sheet, &options).unwrap();
        let column = table.column("MCV (GW)").unwrap();
        assert_eq!(column.kind, ColumnType::Float);
        assert_eq!(column.values, vec![Value::Float(1.5), Value::Null, Value::Float(2.0)]);

        options.skip_empty_rows = true;
        let table = Table::from_sheet(&sheet, &options).unwrap();
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn mixed_columns_keep_natural_values() {
        let sheet = sheet(&[
            (0, 0, CellType::InlineString, "Year"),
            (1, 0, CellType::Number, "2024"),
            (2, 0, CellType::InlineString, "n/a"),
        ]);
        let table = Table::from_sheet(&sheet, &LoadOptions::default()).unwrap();
        let column = table.column("Year").unwrap();
        assert_eq!(column.kind, ColumnType::Mixed);
        assert_eq!(column.values, vec![Value::Integer(2024), Value::Text("n/a".into())]);
    }

    #[test]
    fn empty_sheets_give_empty_tables() {
        let table = Table::from_sheet(&Sheet::new("prices.xlsx", "Blank"), &LoadOptions::default()).unwrap();
        assert_eq!(table.name, "Blank");
        assert_eq!(table.shape(), (0, 0));
    }
}

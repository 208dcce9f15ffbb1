use crate::table::Table;

/// Trims surrounding whitespace from every label and re-applies de-duplication.
/// A label left empty is named `Unnamed: {index}`, the way an empty header cell is.
/// Values are untouched. Normalizing twice gives the same table as normalizing once.
pub fn normalize(table: Table) -> Table {
    let Table { name, mut columns, .. } = table;
    for (index, column) in columns.iter_mut().enumerate() {
        let trimmed = column.label.trim();
        if trimmed.is_empty() {
            column.label = format!("Unnamed: {index}");
        } else if trimmed.len() != column.label.len() {
            column.label = trimmed.to_owned();
        }
    }
    Table::assemble(&name, columns)
}

use std::collections::HashSet;
use std::fmt::Display;

/// Which sheets of a workbook to load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SheetSelector {
    /// Every sheet, in workbook order.
    All,
    /// One sheet, matched by exact, case-sensitive name.
    Named(String),
}

impl SheetSelector {
    /// `"all"` selects every sheet; anything else is taken as a sheet name.
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Named(value.to_owned())
        }
    }

    pub fn accept(&self, sheet_name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == sheet_name,
        }
    }
}

impl Display for SheetSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Options applied while reading cells out of a sheet.
#[derive(Clone, Debug)]
pub struct LoadOptions {
    /// Cell texts treated as missing values.
    pub nulls: HashSet<String>,
    /// Read spreadsheet error cells (`#DIV/0!`, `#N/A`, ...) as missing values instead of failing.
    pub error_as_null: bool,
    /// Drop data rows in which every cell is missing.
    pub skip_empty_rows: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            nulls: HashSet::from([String::new()]),
            error_as_null: false,
            skip_empty_rows: false,
        }
    }
}

/// Reader-level selection passed to each workbook format.
#[derive(Clone, Debug)]
pub(crate) struct Criteria {
    pub(crate) sheets: SheetSelector,
    pub(crate) error_as_null: bool,
    /// Null literals; readers that infer kinds from text leave these out of the inference.
    pub(crate) nulls: HashSet<String>,
}

impl Criteria {
    pub(crate) fn accept(&self, sheet_name: &str) -> bool {
        self.sheets.accept(sheet_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_selection_is_exact_and_case_sensitive() {
        let selector = SheetSelector::parse("MCP Details");
        assert!(selector.accept("MCP Details"));
        assert!(!selector.accept("mcp details"));
        assert!(!selector.accept("MCP Details "));
    }

    #[test]
    fn all_accepts_every_sheet() {
        let selector = SheetSelector::parse("all");
        assert_eq!(selector, SheetSelector::All);
        assert!(selector.accept("anything"));
        assert_eq!(selector.to_string(), "all");
    }
}

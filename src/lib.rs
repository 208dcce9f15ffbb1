//! # Sheet Inspect
//!
//! Loads sheets of electricity-market price and volume workbooks, prints descriptive
//! statistics about them and exports sheets as CSV.
//!
//! ## Features
//!
//! - **Formats**: Office Open XML (`.xlsx`, `.xlsm`, `.xltx`, `.xltm`, `.xlam`), OpenDocument
//!   (`.ods`) and comma separated text (`.csv`)
//! - **Type inference**: every column gets one of Boolean, Integer, Float, Text, Date, Time,
//!   DateTime or Mixed from the storage kinds and number formats of its cells
//! - **Label normalization**: surrounding whitespace is trimmed; duplicate labels are suffixed
//! - **Reports**: shape, types, previews, unique counts, frequency tables, group samples,
//!   date ranges, null counts and descriptive statistics
//! - **Export**: atomic CSV output that loads back to the same table
//!
//! ## Pipeline
//!
//! [`spreadsheet::load_tables`] → [`table::normalize::normalize`] →
//! [`report`] or [`export::export_csv`]. The [`commands`] module wires these together
//! the way the `sheet-inspect` binary runs them.
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
mod helpers;
pub mod logging;
pub mod report;
pub mod spreadsheet;
pub mod table;

pub use crate::error::InspectError;
pub use crate::spreadsheet::load_table;
pub use crate::spreadsheet::load_tables;
pub use crate::spreadsheet::sheet_names;
pub use crate::spreadsheet::LoadOptions;
pub use crate::spreadsheet::SheetSelector;
pub use crate::table::normalize::normalize;
pub use crate::table::Table;

//! Low-level readers shared by the workbook formats.

pub(crate) mod reader;
pub(crate) mod xml;
pub(crate) mod zip;

use super::document::{Document, Row, TableError};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading a structured-text format into a [`Document`].
///
/// Implementors handle the format-specific tokenizing and grammar; everything
/// downstream of this trait only sees named blocks and named-column tables.
pub trait StructuredFile {
    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads a document from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Return
    ///
    /// Returns the parsed document with its blocks in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not well-formed or reading fails.
    fn read_from(reader: &mut impl BufRead) -> Result<Document, Self::Error>;

    /// Reads a document from a file path.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the file to read.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Document, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

/// A typed view of one row of a named table.
///
/// `CATEGORY` is the tag prefix including the trailing dot (e.g. `_chem_comp.`),
/// `COLUMNS` the column names below it. A column name prefixed with `?` is
/// optional and reads as the empty string when the file does not declare it.
pub trait Record: Sized {
    const CATEGORY: &'static str;
    const COLUMNS: &'static [&'static str];

    /// Builds the record from a row whose columns are exactly `COLUMNS`
    /// (with any `?` prefix removed).
    fn from_row(row: &Row<'_>) -> Result<Self, TableError>;
}

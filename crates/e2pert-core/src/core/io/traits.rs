use crate::core::models::interaction::InteractionTable;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading a matrix file format.
///
/// Implementors handle format-specific parsing; the returned value is whatever the
/// format carries (a matrix, optionally with per-row labels).
pub trait MatrixFile {
    /// The parsed content of one file.
    type Output;

    /// The error type for I/O and parse failures.
    type Error: Error + From<io::Error>;

    /// Reads a matrix from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error>;

    /// Reads a matrix from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Output, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

/// Defines the interface for writing an interaction table in some output format.
pub trait TableFile {
    /// The error type for serialization and I/O failures.
    type Error: Error + From<io::Error>;

    /// Writes the header row followed by every record, in table order.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(table: &InteractionTable, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Renders the table into an in-memory buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn to_bytes(table: &InteractionTable) -> Result<Vec<u8>, Self::Error> {
        let mut buffer = Vec::new();
        Self::write_to(table, &mut buffer)?;
        Ok(buffer)
    }

    /// Writes the table to a file path, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(table: &InteractionTable, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(table, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

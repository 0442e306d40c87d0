use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading a molecular structure file format.
///
/// Implementors handle format-specific parsing; opening files and buffering is shared.
pub trait StructureFile {
    /// The in-memory structure produced by the reader.
    type Structure;

    /// The error type for I/O and parsing failures.
    type Error: Error + From<io::Error>;

    /// Reads a structure from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or the reader reports an I/O failure.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Structure, Self::Error>;

    /// Reads a structure from a file path.
    ///
    /// The file handle is dropped before returning, on success and on failure alike.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Structure, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

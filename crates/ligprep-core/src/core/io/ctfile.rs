use crate::core::io::traits::StructureFile;
use crate::core::models::molecule::{MoleculeRecord, RecordError};
use crate::core::models::topology::Bond;
use nalgebra::Point3;
use std::fmt;
use std::io::{self, BufRead, Lines};
use thiserror::Error;
use tracing::{debug, trace};

const HEADER_LINES: usize = 3;
const V2000_INT_WIDTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    Counts,
    Atoms,
    Bonds,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Header => "header block",
                Self::Counts => "counts line",
                Self::Atoms => "atom block",
                Self::Bonds => "bond block",
            }
        )
    }
}

#[derive(Debug, Error)]
pub enum CtFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: CtParseErrorKind,
    },
    #[error("File ended after line {line} while reading the {section} ({missing} line(s) missing)")]
    UnexpectedEof {
        section: Section,
        line: usize,
        missing: usize,
    },
    #[error("Inconsistent connection table: {0}")]
    Record(#[from] RecordError),
}

#[derive(Debug, Error)]
pub enum CtParseErrorKind {
    #[error("Missing {field} field")]
    MissingField { field: &'static str },
    #[error("Invalid integer for {field} (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },
    #[error("Invalid float for {field} (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
    #[error("V3000 connection tables are not supported")]
    V3000Unsupported,
}

struct LineCursor<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> LineCursor<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    fn next_line(&mut self, section: Section, missing: usize) -> Result<String, CtFileError> {
        match self.lines.next() {
            Some(line) => {
                self.line_no += 1;
                Ok(line?)
            }
            None => Err(CtFileError::UnexpectedEof {
                section,
                line: self.line_no,
                missing,
            }),
        }
    }
}

/// Leading integer fields of a V2000 line.
///
/// Fields are the first whitespace-separated tokens. Strict V2000 writers use 3-column
/// cells, where values of 100 or more can run together (`"105108"`); when a line has fewer
/// tokens than required it is re-read as fixed cells.
fn leading_int_fields(line: &str, count: usize) -> Vec<&str> {
    let tokens: Vec<&str> = line.split_whitespace().take(count).collect();
    let short = tokens.len() < count;
    if short && line.is_ascii() && line.len() >= count * V2000_INT_WIDTH {
        (0..count)
            .map(|i| line[i * V2000_INT_WIDTH..(i + 1) * V2000_INT_WIDTH].trim())
            .collect()
    } else {
        tokens
    }
}

fn field<'a>(
    fields: &[&'a str],
    index: usize,
    name: &'static str,
    line: usize,
) -> Result<&'a str, CtFileError> {
    fields.get(index).copied().ok_or(CtFileError::Parse {
        line,
        kind: CtParseErrorKind::MissingField { field: name },
    })
}

fn parse_int<T: std::str::FromStr>(
    value: &str,
    name: &'static str,
    line: usize,
) -> Result<T, CtFileError> {
    value.parse().map_err(|_| CtFileError::Parse {
        line,
        kind: CtParseErrorKind::InvalidInt {
            field: name,
            value: value.into(),
        },
    })
}

/// Parses a coordinate; `NaN` and infinities are rejected like any other non-number.
fn parse_float(value: &str, name: &'static str, line: usize) -> Result<f64, CtFileError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CtFileError::Parse {
            line,
            kind: CtParseErrorKind::InvalidFloat {
                field: name,
                value: value.into(),
            },
        })
}

/// Reader for the V2000 connection table of an MDL molfile or the first record of an SDF
/// file.
///
/// Only the parts needed to build a [`MoleculeRecord`] are interpreted: the title line,
/// the atom and bond counts, atom coordinates with element symbols, and bonds with their
/// integer order. Tokens beyond the required fields, the properties block and any further
/// SDF records are ignored.
pub struct CtFile;

impl StructureFile for CtFile {
    type Structure = MoleculeRecord;
    type Error = CtFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<MoleculeRecord, CtFileError> {
        let mut cursor = LineCursor::new(reader);

        let title = cursor.next_line(Section::Header, HEADER_LINES)?;
        for remaining in (1..HEADER_LINES).rev() {
            cursor.next_line(Section::Header, remaining)?;
        }

        let counts = cursor.next_line(Section::Counts, 1)?;
        let line = cursor.line_no;
        if counts.contains("V3000") {
            return Err(CtFileError::Parse {
                line,
                kind: CtParseErrorKind::V3000Unsupported,
            });
        }
        let fields = leading_int_fields(&counts, 2);
        let atom_count: usize = parse_int(field(&fields, 0, "atom count", line)?, "atom count", line)?;
        let bond_count: usize = parse_int(field(&fields, 1, "bond count", line)?, "bond count", line)?;
        debug!(
            title = title.trim(),
            atom_count, bond_count, "Parsed connection-table counts line."
        );

        // Counts are untrusted; the vectors grow only as lines are actually read.
        let mut coordinates = Vec::new();
        let mut element_symbols = Vec::new();
        for i in 0..atom_count {
            let raw = cursor.next_line(Section::Atoms, atom_count - i)?;
            let line = cursor.line_no;
            let tokens: Vec<&str> = raw.split_whitespace().collect();
            let x = parse_float(field(&tokens, 0, "x coordinate", line)?, "x coordinate", line)?;
            let y = parse_float(field(&tokens, 1, "y coordinate", line)?, "y coordinate", line)?;
            let z = parse_float(field(&tokens, 2, "z coordinate", line)?, "z coordinate", line)?;
            let symbol = field(&tokens, 3, "element symbol", line)?;
            trace!(atom = i + 1, symbol, x, y, z, "Parsed atom line.");
            coordinates.push(Point3::new(x, y, z));
            element_symbols.push(symbol.to_string());
        }

        let mut bonds = Vec::new();
        for i in 0..bond_count {
            let raw = cursor.next_line(Section::Bonds, bond_count - i)?;
            let line = cursor.line_no;
            let fields = leading_int_fields(&raw, 3);
            let a1: usize = parse_int(field(&fields, 0, "first atom", line)?, "first atom", line)?;
            let a2: usize = parse_int(field(&fields, 1, "second atom", line)?, "second atom", line)?;
            let order: i64 = parse_int(field(&fields, 2, "bond order", line)?, "bond order", line)?;
            trace!(bond = i + 1, a1, a2, order, "Parsed bond line.");
            bonds.push(Bond::new(a1, a2, order));
        }

        Ok(MoleculeRecord::new(
            title.trim(),
            coordinates,
            element_symbols,
            bonds,
        )?)
    }
}

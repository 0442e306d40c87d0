use crate::core::io::traits::StructureFile;
use crate::core::models::topology::NeighborMap;
use crate::core::utils::elements;
use nalgebra::Point3;
use std::collections::HashSet;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, trace};

pub const CHAIN_ID: char = 'A';
pub const RESIDUE_SEQUENCE: i32 = 1;

const SERIAL_WIDTH: usize = 5;
const ATOM_NAME_WIDTH: usize = 4;
const RESIDUE_NAME_WIDTH: usize = 3;
const ELEMENT_WIDTH: usize = 2;
const COORDINATE_WIDTH: usize = 8;
const MIN_ATOM_RECORD_LEN: usize = 54;

#[derive(Debug, Clone, PartialEq)]
pub struct PdbAtom {
    pub serial: usize,
    pub name: String,
    pub residue_name: String,
    pub element: String,
    pub position: Point3<f64>,
}

/// The single-residue content of a PDB file: atom records plus `CONECT` connectivity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbStructure {
    pub atoms: Vec<PdbAtom>,
    pub connectivity: NeighborMap,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Value '{value}' does not fit the {width}-column {field} field")]
    FieldOverflow {
        field: &'static str,
        value: String,
        width: usize,
    },
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
    #[error("No element in columns 77-78 and none derivable from atom name '{0}'")]
    UnknownElement(String),
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn record_name(line: &str) -> &str {
    line.get(0..6).unwrap_or(line).trim()
}

fn parse_coordinate(line: &str, start: usize, line_num: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, start + COORDINATE_WIDTH);
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::InvalidFloat {
                columns: format!("{}-{}", start + 1, start + COORDINATE_WIDTH),
                value: value.into(),
            },
        })
}

fn format_coordinate(field: &'static str, value: f64) -> Result<String, PdbError> {
    let text = format!("{:.3}", value);
    check_width(field, &text, COORDINATE_WIDTH)?;
    Ok(text)
}

fn check_width(field: &'static str, value: &str, width: usize) -> Result<(), PdbError> {
    if value.chars().count() > width {
        return Err(PdbError::FieldOverflow {
            field,
            value: value.to_string(),
            width,
        });
    }
    Ok(())
}

pub struct PdbFile;

impl PdbFile {
    /// Renders one `HETATM` record.
    ///
    /// Chain and residue sequence are fixed placeholders; occupancy and temperature
    /// factor are written as zero.
    pub fn format_atom_record(atom: &PdbAtom) -> Result<String, PdbError> {
        check_width("serial", &atom.serial.to_string(), SERIAL_WIDTH)?;
        check_width("atom name", &atom.name, ATOM_NAME_WIDTH)?;
        check_width("residue name", &atom.residue_name, RESIDUE_NAME_WIDTH)?;
        check_width("element", &atom.element, ELEMENT_WIDTH)?;
        let x = format_coordinate("x coordinate", atom.position.x)?;
        let y = format_coordinate("y coordinate", atom.position.y)?;
        let z = format_coordinate("z coordinate", atom.position.z)?;

        Ok(format!(
            "HETATM{:>5} {:<4} {:<3} {}{:>4}    {:>8}{:>8}{:>8}{:>6.2}{:>6.2}          {:>2}",
            atom.serial,
            atom.name,
            atom.residue_name,
            CHAIN_ID,
            RESIDUE_SEQUENCE,
            x,
            y,
            z,
            0.0,
            0.0,
            atom.element,
        ))
    }

    /// Writes one `CONECT` record listing every partner, duplicates included, on a
    /// single line.
    pub fn write_conect_record(
        writer: &mut impl Write,
        serial: usize,
        partners: impl IntoIterator<Item = usize>,
    ) -> Result<(), PdbError> {
        check_width("serial", &serial.to_string(), SERIAL_WIDTH)?;
        write!(writer, "CONECT{:>5}", serial)?;
        for partner in partners {
            check_width("serial", &partner.to_string(), SERIAL_WIDTH)?;
            write!(writer, "{:>5}", partner)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    pub fn write_to(structure: &PdbStructure, writer: &mut impl Write) -> Result<(), PdbError> {
        for atom in &structure.atoms {
            writeln!(writer, "{}", Self::format_atom_record(atom)?)?;
        }
        for (serial, partners) in structure.connectivity.iter() {
            Self::write_conect_record(writer, serial, partners)?;
        }
        writeln!(writer, "END")?;
        writer.flush()?;
        Ok(())
    }

    /// Writes the structure to `path`, replacing any existing file.
    ///
    /// Output goes to a temporary file in the destination directory which is renamed over
    /// `path` only after every record has been written, so a failure never leaves a
    /// truncated file behind. A replaced file keeps its permissions; a new file gets the
    /// usual `0666` minus umask.
    pub fn write_to_path<P: AsRef<Path>>(structure: &PdbStructure, path: P) -> Result<(), PdbError> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut builder = tempfile::Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let mut tmp = builder.tempfile_in(dir)?;
        if let Ok(existing) = fs::metadata(path) {
            tmp.as_file().set_permissions(existing.permissions())?;
        }
        {
            let mut writer = io::BufWriter::new(tmp.as_file_mut());
            Self::write_to(structure, &mut writer)?;
        }
        tmp.persist(path).map_err(|e| PdbError::Io(e.error))?;
        debug!(path = %path.display(), atoms = structure.atoms.len(), "Wrote PDB file.");
        Ok(())
    }
}

impl StructureFile for PdbFile {
    type Structure = PdbStructure;
    type Error = PdbError;

    /// Reads `ATOM`/`HETATM` and `CONECT` records of the first model.
    ///
    /// The element comes from columns 77-78, or from the atom name when those are blank.
    fn read_from(reader: &mut impl BufRead) -> Result<PdbStructure, PdbError> {
        let mut structure = PdbStructure::default();
        let mut seen_serials = HashSet::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let record_type = record_name(&line);

            match record_type {
                "ATOM" | "HETATM" => {
                    if line.len() < MIN_ATOM_RECORD_LEN {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::LineTooShort,
                        });
                    }
                    let serial_str = slice_and_trim(&line, 6, 11);
                    let serial: usize = serial_str.parse().map_err(|_| PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::InvalidInt {
                            columns: "7-11".into(),
                            value: serial_str.into(),
                        },
                    })?;
                    if !seen_serials.insert(serial) {
                        return Err(PdbError::Inconsistency(format!(
                            "Duplicate atom serial: {}",
                            serial
                        )));
                    }
                    let name = slice_and_trim(&line, 12, 16);
                    let residue_name = slice_and_trim(&line, 17, 20);
                    let x = parse_coordinate(&line, 30, line_num)?;
                    let y = parse_coordinate(&line, 38, line_num)?;
                    let z = parse_coordinate(&line, 46, line_num)?;

                    let element = match slice_and_trim(&line, 76, 78) {
                        "" => elements::symbol_from_atom_name(name).ok_or_else(|| {
                            PdbError::Parse {
                                line: line_num,
                                kind: PdbParseErrorKind::UnknownElement(name.into()),
                            }
                        })?,
                        symbol => elements::normalize_symbol(symbol),
                    };

                    trace!(serial, name, %element, "Parsed atom record.");
                    structure.atoms.push(PdbAtom {
                        serial,
                        name: name.to_string(),
                        residue_name: residue_name.to_string(),
                        element,
                        position: Point3::new(x, y, z),
                    });
                }
                "CONECT" => {
                    let fields: Vec<usize> = (6..line.len())
                        .step_by(SERIAL_WIDTH)
                        .map(|start| {
                            slice_and_trim(&line, start, (start + SERIAL_WIDTH).min(line.len()))
                        })
                        .take_while(|s| !s.is_empty())
                        .map(|s| {
                            s.parse().map_err(|_| PdbError::Parse {
                                line: line_num,
                                kind: PdbParseErrorKind::InvalidInt {
                                    columns: "7-".into(),
                                    value: s.into(),
                                },
                            })
                        })
                        .collect::<Result<_, _>>()?;
                    if let Some((&serial, partners)) = fields.split_first() {
                        structure
                            .connectivity
                            .extend_atom(serial, partners.iter().copied());
                    }
                }
                "END" | "ENDMDL" => break,
                _ => {}
            }
        }

        debug!(atoms = structure.atoms.len(), "Parsed PDB structure.");
        Ok(structure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::topology::Bond;
    use std::io::Cursor;

    fn atom(serial: usize, name: &str, element: &str, position: [f64; 3]) -> PdbAtom {
        PdbAtom {
            serial,
            name: name.into(),
            residue_name: "UNL".into(),
            element: element.into(),
            position: Point3::new(position[0], position[1], position[2]),
        }
    }

    fn carbon_monoxide() -> PdbStructure {
        PdbStructure {
            atoms: vec![
                atom(1, "C1", "C", [0.0, 0.0, 0.0]),
                atom(2, "O1", "O", [1.5, 0.0, 0.0]),
            ],
            connectivity: NeighborMap::from_bonds(&[Bond::new(1, 2, 1)]),
        }
    }

    #[test]
    fn atom_record_uses_fixed_pdb_columns() {
        let line = PdbFile::format_atom_record(&atom(1, "C1", "C", [0.0, -1.25, 10.5])).unwrap();
        assert_eq!(
            line,
            "HETATM    1 C1   UNL A   1       0.000  -1.250  10.500  0.00  0.00           C"
        );
        assert_eq!(line.len(), 78);
        assert_eq!(&line[0..6], "HETATM");
        assert_eq!(&line[6..11], "    1");
        assert_eq!(&line[12..16], "C1  ");
        assert_eq!(&line[17..20], "UNL");
        assert_eq!(&line[21..22], "A");
        assert_eq!(&line[22..26], "   1");
        assert_eq!(&line[30..38], "   0.000");
        assert_eq!(&line[38..46], "  -1.250");
        assert_eq!(&line[46..54], "  10.500");
        assert_eq!(&line[54..60], "  0.00");
        assert_eq!(&line[60..66], "  0.00");
        assert_eq!(&line[76..78], " C");
    }

    #[test]
    fn atom_record_pads_short_residue_names_and_right_justifies_two_letter_elements() {
        let mut cl = atom(12, "Cl1", "Cl", [1.0, 2.0, 3.0]);
        cl.residue_name = "L".into();
        let line = PdbFile::format_atom_record(&cl).unwrap();
        assert_eq!(&line[6..11], "   12");
        assert_eq!(&line[12..16], "Cl1 ");
        assert_eq!(&line[17..20], "L  ");
        assert_eq!(&line[76..78], "Cl");
    }

    #[test]
    fn atom_record_rejects_names_wider_than_four_columns() {
        let err = PdbFile::format_atom_record(&atom(1, "Cl100", "Cl", [0.0; 3])).unwrap_err();
        assert!(matches!(
            err,
            PdbError::FieldOverflow {
                field: "atom name",
                width: 4,
                ..
            }
        ));
    }

    #[test]
    fn conect_record_lists_duplicates_in_five_column_fields() {
        let mut buf = Vec::new();
        PdbFile::write_conect_record(&mut buf, 3, [1, 1, 12]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "CONECT    3    1    1   12\n");
    }

    #[test]
    fn conect_record_for_zero_order_bond_lists_only_the_serial() {
        let structure = PdbStructure {
            atoms: carbon_monoxide().atoms,
            connectivity: NeighborMap::from_bonds(&[Bond::new(1, 2, 0)]),
        };
        let mut buf = Vec::new();
        PdbFile::write_to(&structure, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("CONECT    1\nCONECT    2\nEND\n"));
    }

    #[test]
    fn coordinates_wider_than_eight_columns_are_rejected() {
        let ok = PdbFile::format_atom_record(&atom(1, "C1", "C", [9999.999, -999.999, 0.0]));
        assert_eq!(&ok.unwrap()[30..46], "9999.999-999.999");

        for position in [[-1000.0, 0.0, 0.0], [0.0, 10000.0, 0.0], [0.0, 0.0, -12345.6]] {
            let err = PdbFile::format_atom_record(&atom(1, "C1", "C", position)).unwrap_err();
            assert!(matches!(
                err,
                PdbError::FieldOverflow { width: 8, .. }
            ));
        }
    }

    #[test]
    fn write_to_emits_atoms_then_conect_then_end() {
        let mut buf = Vec::new();
        PdbFile::write_to(&carbon_monoxide(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("HETATM    1 C1 "));
        assert!(lines[1].starts_with("HETATM    2 O1 "));
        assert_eq!(lines[2], "CONECT    1    2");
        assert_eq!(lines[3], "CONECT    2    1");
        assert_eq!(lines[4], "END");
    }

    #[test]
    fn write_to_path_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lig.pdb");
        std::fs::write(&path, "stale content\n").unwrap();

        PdbFile::write_to_path(&carbon_monoxide(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("stale"));
        assert!(text.ends_with("END\n"));
    }

    #[cfg(unix)]
    #[test]
    fn write_to_path_keeps_permissions_of_replaced_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        for mode in [0o644, 0o640] {
            let path = dir.path().join(format!("lig-{:o}.pdb", mode));
            std::fs::write(&path, "old\n").unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();

            PdbFile::write_to_path(&carbon_monoxide(), &path).unwrap();

            let written = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
            assert_eq!(written, mode);
        }
    }

    #[cfg(unix)]
    #[test]
    fn new_file_is_not_restricted_to_temp_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.pdb");
        PdbFile::write_to_path(&carbon_monoxide(), &path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode & 0o600, 0o600);
        // Created like any other file, so only the umask can strip group and other bits.
        let plain_path = dir.path().join("plain.txt");
        std::fs::write(&plain_path, "x").unwrap();
        let plain = std::fs::metadata(&plain_path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, plain);
    }

    #[test]
    fn failed_write_leaves_existing_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lig.pdb");
        std::fs::write(&path, "previous\n").unwrap();

        let mut structure = carbon_monoxide();
        structure.atoms[1].name = "TOOLONG".into();
        let err = PdbFile::write_to_path(&structure, &path).unwrap_err();

        assert!(matches!(err, PdbError::FieldOverflow { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous\n");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn reads_back_written_atoms_and_connectivity() {
        let mut buf = Vec::new();
        PdbFile::write_to(&carbon_monoxide(), &mut buf).unwrap();

        let parsed = PdbFile::read_from(&mut Cursor::new(buf)).unwrap();
        assert_eq!(parsed, carbon_monoxide());
    }

    #[test]
    fn element_falls_back_to_atom_name_when_columns_are_blank() {
        let text = "\
ATOM      1  CL1 LIG A   1       1.000   2.000   3.000  1.00  0.00
ATOM      2  C2  LIG A   1       0.000   0.000   0.000  1.00  0.00
END
";
        let parsed = PdbFile::read_from(&mut Cursor::new(text)).unwrap();
        assert_eq!(parsed.atoms[0].element, "Cl");
        assert_eq!(parsed.atoms[0].name, "CL1");
        assert_eq!(parsed.atoms[1].element, "C");
        assert_eq!(parsed.atoms[0].position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn reading_stops_at_first_model_end() {
        let text = "\
HETATM    1 C1   UNL A   1       0.000   0.000   0.000  0.00  0.00           C
ENDMDL
HETATM    2 C2   UNL A   1       1.000   0.000   0.000  0.00  0.00           C
";
        let parsed = PdbFile::read_from(&mut Cursor::new(text)).unwrap();
        assert_eq!(parsed.atoms.len(), 1);
    }

    #[test]
    fn record_name_handles_lines_shorter_than_six_columns() {
        assert_eq!(record_name("END"), "END");
        assert_eq!(record_name("HETATM    1"), "HETATM");
        assert_eq!(record_name("ATOM      1"), "ATOM");
        assert_eq!(record_name(""), "");
    }

    #[test]
    fn short_atom_record_is_rejected() {
        let text = "HETATM    1 C1   UNL A   1       0.000\n";
        let err = PdbFile::read_from(&mut Cursor::new(text)).unwrap_err();
        assert!(matches!(
            err,
            PdbError::Parse {
                line: 1,
                kind: PdbParseErrorKind::LineTooShort
            }
        ));
    }

    #[test]
    fn bad_coordinate_reports_columns() {
        let text =
            "HETATM    1 C1   UNL A   1       0.000   x.xxx   0.000  0.00  0.00           C\n";
        let err = PdbFile::read_from(&mut Cursor::new(text)).unwrap_err();
        match err {
            PdbError::Parse {
                kind: PdbParseErrorKind::InvalidFloat { columns, .. },
                ..
            } => assert_eq!(columns, "39-46"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let text =
            "HETATM    1 C1   UNL A   1         NaN   0.000   0.000  0.00  0.00           C\n";
        let err = PdbFile::read_from(&mut Cursor::new(text)).unwrap_err();
        assert!(matches!(
            err,
            PdbError::Parse {
                kind: PdbParseErrorKind::InvalidFloat { .. },
                ..
            }
        ));
    }

    #[test]
    fn duplicate_serials_are_rejected() {
        let record = "HETATM    1 C1   UNL A   1       0.000   0.000   0.000  0.00  0.00           C\n";
        let text = format!("{record}{record}");
        let err = PdbFile::read_from(&mut Cursor::new(text)).unwrap_err();
        assert!(matches!(err, PdbError::Inconsistency(_)));
    }

    #[test]
    fn file_without_atoms_reads_as_empty_structure() {
        let structure = PdbFile::read_from(&mut Cursor::new("REMARK nothing\nEND\n")).unwrap();
        assert!(structure.atoms.is_empty());
        assert!(structure.connectivity.is_empty());
    }
}

use crate::core::io::traits::MolecularFile;
use crate::core::models::atom::Atom;
use crate::core::models::error::ModelError;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct XyzMetadata {
    pub comment: String,
}

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("Invalid atom on line {line}: {source}")]
    Atom {
        line: usize,
        #[source]
        source: ModelError,
    },
    #[error("Header declares {declared} atoms but only {found} were found")]
    AtomCountMismatch { declared: usize, found: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum XyzParseErrorKind {
    #[error("Missing atom count line")]
    MissingHeader,
    #[error("Invalid atom count '{0}'")]
    InvalidCount(String),
    #[error("Expected 'Symbol x y z', found {0} field(s)")]
    TooFewFields(usize),
    #[error("Invalid coordinate '{0}'")]
    InvalidCoordinate(String),
}

pub struct XyzFile;

/// Upper bound on the atom buffer reserved from the header before any atom is read.
const MAX_PREALLOCATED_ATOMS: usize = 4096;

fn parse_coordinate(token: &str, line: usize) -> Result<f64, XyzError> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(XyzError::Parse {
            line,
            kind: XyzParseErrorKind::InvalidCoordinate(token.to_string()),
        }),
    }
}

impl MolecularFile for XyzFile {
    type Metadata = XyzMetadata;
    type Error = XyzError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut lines = reader.lines().enumerate().map(|(i, l)| (i + 1, l));

        let (count_line, count_str) = loop {
            match lines.next() {
                Some((n, line)) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break (n, line.trim().to_string());
                    }
                }
                None => {
                    return Err(XyzError::Parse {
                        line: 1,
                        kind: XyzParseErrorKind::MissingHeader,
                    });
                }
            }
        };
        let declared: usize = count_str.parse().map_err(|_| XyzError::Parse {
            line: count_line,
            kind: XyzParseErrorKind::InvalidCount(count_str.clone()),
        })?;

        let comment = match lines.next() {
            Some((_, line)) => line?.trim().to_string(),
            None => String::new(),
        };

        let mut atoms = Vec::with_capacity(declared.min(MAX_PREALLOCATED_ATOMS));
        for (line_num, line) in lines {
            if atoms.len() == declared {
                break;
            }
            let line = line?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            if fields.len() < 4 {
                return Err(XyzError::Parse {
                    line: line_num,
                    kind: XyzParseErrorKind::TooFewFields(fields.len()),
                });
            }
            let position = Point3::new(
                parse_coordinate(fields[1], line_num)?,
                parse_coordinate(fields[2], line_num)?,
                parse_coordinate(fields[3], line_num)?,
            );
            let atom = Atom::new(fields[0], position).map_err(|source| XyzError::Atom {
                line: line_num,
                source,
            })?;
            atoms.push(atom);
        }

        if atoms.len() != declared {
            return Err(XyzError::AtomCountMismatch {
                declared,
                found: atoms.len(),
            });
        }

        let structure = Structure::new(comment.clone(), atoms);
        Ok((structure, XyzMetadata { comment }))
    }

    fn write_to(
        structure: &Structure,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let comment = if metadata.comment.is_empty() {
            structure.name()
        } else {
            metadata.comment.as_str()
        };
        writeln!(writer, "{}", structure.len())?;
        writeln!(writer, "{}", comment)?;
        for atom in structure.atoms() {
            let p = atom.position;
            writeln!(
                writer,
                "{:<2} {:>14.8} {:>14.8} {:>14.8}",
                atom.element(),
                p.x,
                p.y,
                p.z
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const WATER_XYZ: &str = "3\nWater\nO 0.0 0.0 0.0\nH 0.9572 0.0 0.0\nH -0.2400 0.9266 0.0\n";

    #[test]
    fn reads_well_formed_file() {
        let (structure, metadata) = XyzFile::read_from(&mut Cursor::new(WATER_XYZ)).unwrap();
        assert_eq!(structure.name(), "Water");
        assert_eq!(metadata.comment, "Water");
        assert_eq!(structure.len(), 3);
        assert_eq!(structure.atom(1).unwrap().element(), "H");
        assert_eq!(
            structure.atom(2).unwrap().position,
            Point3::new(-0.24, 0.9266, 0.0)
        );
    }

    #[test]
    fn reads_only_the_first_frame() {
        let content = format!("{WATER_XYZ}3\nsecond frame\nO 1 1 1\nH 2 2 2\nH 3 3 3\n");
        let (structure, _) = XyzFile::read_from(&mut Cursor::new(content)).unwrap();
        assert_eq!(structure.len(), 3);
        assert_eq!(structure.atom(0).unwrap().position, Point3::origin());
    }

    #[test]
    fn rejects_invalid_count() {
        let err = XyzFile::read_from(&mut Cursor::new("three\n\nO 0 0 0\n")).unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 1,
                kind: XyzParseErrorKind::InvalidCount(_)
            }
        ));
    }

    #[test]
    fn rejects_missing_header() {
        let err = XyzFile::read_from(&mut Cursor::new("\n\n")).unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                kind: XyzParseErrorKind::MissingHeader,
                ..
            }
        ));
    }

    #[test]
    fn rejects_truncated_atom_list() {
        let err = XyzFile::read_from(&mut Cursor::new("3\nWater\nO 0 0 0\n")).unwrap_err();
        assert!(matches!(
            err,
            XyzError::AtomCountMismatch {
                declared: 3,
                found: 1
            }
        ));
    }

    #[test]
    fn rejects_bad_coordinate_with_line_number() {
        let err = XyzFile::read_from(&mut Cursor::new("1\nX\nO 0 zero 0\n")).unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 3,
                kind: XyzParseErrorKind::InvalidCoordinate(_)
            }
        ));
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        let inputs = [
            "1\nbad\nH NaN 0 0\n",
            "1\nbad\nH 0 inf 0\n",
            "1\nbad\nH 0 0 -infinity\n",
        ];
        for input in inputs {
            let err = XyzFile::read_from(&mut Cursor::new(input)).unwrap_err();
            assert!(
                matches!(
                    err,
                    XyzError::Parse {
                        line: 3,
                        kind: XyzParseErrorKind::InvalidCoordinate(_)
                    }
                ),
                "{input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn oversized_atom_count_is_a_mismatch() {
        let input = format!("{}\ncomment\nH 0 0 0\n", usize::MAX);
        let err = XyzFile::read_from(&mut Cursor::new(input)).unwrap_err();
        assert!(matches!(
            err,
            XyzError::AtomCountMismatch {
                declared: usize::MAX,
                found: 1
            }
        ));
    }

    #[test]
    fn rejects_unknown_element() {
        let err = XyzFile::read_from(&mut Cursor::new("1\nX\nZz 0 0 0\n")).unwrap_err();
        assert!(matches!(
            err,
            XyzError::Atom {
                line: 3,
                source: ModelError::UnknownElement(_)
            }
        ));
    }

    #[test]
    fn written_file_reads_back_with_same_atoms() {
        let (structure, _) = XyzFile::read_from(&mut Cursor::new(WATER_XYZ)).unwrap();
        let mut buffer = Vec::new();
        XyzFile::write_structure_to(&structure, &mut buffer).unwrap();

        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.starts_with("3\nWater\n"));

        let (reread, _) = XyzFile::read_from(&mut Cursor::new(buffer)).unwrap();
        assert_eq!(reread.len(), structure.len());
        for (a, b) in reread.atoms().iter().zip(structure.atoms()) {
            assert_eq!(a.element(), b.element());
            assert!((a.position - b.position).norm() < 1e-8);
        }
    }
}

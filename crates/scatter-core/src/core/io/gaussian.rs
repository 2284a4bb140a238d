use crate::core::io::traits::MolecularFile;
use crate::core::models::atom::Atom;
use crate::core::models::error::ModelError;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

pub const DEFAULT_ROUTE: &str = "#n B3LYP/6-31G(d) Opt Freq";

/// Job settings carried by a Gaussian input file.
///
/// Link 0 commands (`%chk`, `%mem`, `%nprocshared`) are optional and only written when
/// set. An empty title falls back to the structure name on output.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianJob {
    pub checkpoint: Option<String>,
    pub memory: Option<String>,
    pub nproc_shared: Option<u32>,
    pub route: String,
    pub title: String,
    pub charge: i32,
    pub multiplicity: u32,
}

impl Default for GaussianJob {
    fn default() -> Self {
        Self {
            checkpoint: None,
            memory: None,
            nproc_shared: None,
            route: DEFAULT_ROUTE.to_string(),
            title: String::new(),
            charge: 0,
            multiplicity: 1,
        }
    }
}

impl GaussianJob {
    /// Returns a copy of these settings with the given title.
    pub fn titled(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Error)]
pub enum GaussianError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: GaussianParseErrorKind,
    },
    #[error("Invalid atom on line {line}: {source}")]
    Atom {
        line: usize,
        #[source]
        source: ModelError,
    },
    #[error("Missing required section: {0}")]
    MissingSection(&'static str),
}

#[derive(Debug, Error, PartialEq)]
pub enum GaussianParseErrorKind {
    #[error("Route section must start with '#'")]
    InvalidRoute,
    #[error("Expected 'charge multiplicity', found '{0}'")]
    InvalidChargeMultiplicity(String),
    #[error("Invalid value for {key}: '{value}'")]
    InvalidLink0 { key: String, value: String },
    #[error("Expected 'Symbol x y z', found '{0}'")]
    InvalidAtomLine(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Link0,
    Route,
    Title,
    ChargeMultiplicity,
    Atoms,
    Done,
}

/// Strips Gaussian atom labels down to the element symbol (`"C1"`, `"C(Fragment=1)"` -> `"C"`).
fn element_from_label(label: &str) -> &str {
    let end = label
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphabetic())
        .map(|(i, _)| i)
        .unwrap_or(label.len());
    &label[..end]
}

fn parse_atom_line(line: &str, line_num: usize) -> Result<Atom, GaussianError> {
    let invalid = || GaussianError::Parse {
        line: line_num,
        kind: GaussianParseErrorKind::InvalidAtomLine(line.trim().to_string()),
    };
    let fields: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|f| !f.is_empty())
        .collect();
    // An optional freeze code may sit between the label and the coordinates.
    let coords = match fields.len() {
        4 => &fields[1..4],
        5 if fields[1].parse::<i32>().is_ok() => &fields[2..5],
        _ => return Err(invalid()),
    };
    let xyz: Vec<f64> = coords
        .iter()
        .map(|f| f.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<_>>()
        .ok_or_else(invalid)?;

    Atom::new(element_from_label(fields[0]), Point3::new(xyz[0], xyz[1], xyz[2])).map_err(
        |source| GaussianError::Atom {
            line: line_num,
            source,
        },
    )
}

fn apply_link0(job: &mut GaussianJob, line: &str, line_num: usize) -> Result<(), GaussianError> {
    let command = line.trim_start_matches('%');
    let (key, value) = command.split_once('=').unwrap_or((command, ""));
    let key = key.trim().to_ascii_lowercase();
    let value = value.trim();
    match key.as_str() {
        "chk" => job.checkpoint = Some(value.to_string()),
        "mem" => job.memory = Some(value.to_string()),
        "nprocshared" | "nproc" => {
            let n = value.parse().map_err(|_| GaussianError::Parse {
                line: line_num,
                kind: GaussianParseErrorKind::InvalidLink0 {
                    key: key.clone(),
                    value: value.to_string(),
                },
            })?;
            job.nproc_shared = Some(n);
        }
        _ => {}
    }
    Ok(())
}

pub struct GaussianFile;

impl MolecularFile for GaussianFile {
    type Metadata = GaussianJob;
    type Error = GaussianError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut job = GaussianJob {
            route: String::new(),
            ..GaussianJob::default()
        };
        let mut title_lines: Vec<String> = Vec::new();
        let mut atoms = Vec::new();
        let mut section = Section::Link0;

        for (index, line) in reader.lines().enumerate() {
            let line_num = index + 1;
            let line = line?;
            let trimmed = line.trim();

            match section {
                Section::Link0 => {
                    if trimmed.is_empty() {
                        continue;
                    }
                    if trimmed.starts_with('%') {
                        apply_link0(&mut job, trimmed, line_num)?;
                        continue;
                    }
                    if !trimmed.starts_with('#') {
                        return Err(GaussianError::Parse {
                            line: line_num,
                            kind: GaussianParseErrorKind::InvalidRoute,
                        });
                    }
                    job.route = trimmed.to_string();
                    section = Section::Route;
                }
                Section::Route => {
                    if trimmed.is_empty() {
                        section = Section::Title;
                    } else {
                        job.route.push(' ');
                        job.route.push_str(trimmed);
                    }
                }
                Section::Title => {
                    if trimmed.is_empty() {
                        section = Section::ChargeMultiplicity;
                    } else {
                        title_lines.push(trimmed.to_string());
                    }
                }
                Section::ChargeMultiplicity => {
                    let invalid = || GaussianError::Parse {
                        line: line_num,
                        kind: GaussianParseErrorKind::InvalidChargeMultiplicity(
                            trimmed.to_string(),
                        ),
                    };
                    let fields: Vec<&str> = trimmed.split_whitespace().collect();
                    if fields.len() < 2 {
                        return Err(invalid());
                    }
                    job.charge = fields[0].parse().map_err(|_| invalid())?;
                    job.multiplicity = fields[1].parse().map_err(|_| invalid())?;
                    section = Section::Atoms;
                }
                Section::Atoms => {
                    if trimmed.is_empty() {
                        section = Section::Done;
                    } else {
                        atoms.push(parse_atom_line(trimmed, line_num)?);
                    }
                }
                Section::Done => break,
            }
        }

        match section {
            Section::Link0 | Section::Route => return Err(GaussianError::MissingSection("title")),
            Section::Title | Section::ChargeMultiplicity => {
                return Err(GaussianError::MissingSection("charge and multiplicity"));
            }
            Section::Atoms | Section::Done => {}
        }
        if atoms.is_empty() {
            return Err(GaussianError::MissingSection("molecule specification"));
        }

        job.title = title_lines.join(" ");
        let structure = Structure::new(job.title.clone(), atoms);
        Ok((structure, job))
    }

    fn write_to(
        structure: &Structure,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let title = if metadata.title.is_empty() {
            structure.name()
        } else {
            metadata.title.as_str()
        };

        if let Some(chk) = &metadata.checkpoint {
            writeln!(writer, "%chk={}", chk)?;
        }
        if let Some(mem) = &metadata.memory {
            writeln!(writer, "%mem={}", mem)?;
        }
        if let Some(n) = metadata.nproc_shared {
            writeln!(writer, "%nprocshared={}", n)?;
        }
        writeln!(writer, "{}", metadata.route)?;
        writeln!(writer)?;
        writeln!(writer, "{}", title)?;
        writeln!(writer)?;
        writeln!(writer, "{} {}", metadata.charge, metadata.multiplicity)?;
        for atom in structure.atoms() {
            let p = atom.position;
            writeln!(
                writer,
                " {:<2} {:>14.8} {:>14.8} {:>14.8}",
                atom.element(),
                p.x,
                p.y,
                p.z
            )?;
        }
        // Gaussian requires a blank line after the molecule specification.
        writeln!(writer)?;
        Ok(())
    }
}

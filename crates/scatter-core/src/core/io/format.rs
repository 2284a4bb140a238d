use crate::core::io::gaussian::{GaussianError, GaussianFile, GaussianJob};
use crate::core::io::traits::MolecularFile;
use crate::core::io::xyz::{XyzError, XyzFile, XyzMetadata};
use crate::core::models::structure::Structure;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The structure file formats understood by the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureFormat {
    Xyz,
    Gaussian,
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Unsupported file extension for '{path}'. Supported extensions: {supported}", path = path.display())]
    Unsupported { path: PathBuf, supported: String },
    #[error("Failed to process XYZ file '{path}': {source}", path = path.display())]
    Xyz {
        path: PathBuf,
        #[source]
        source: XyzError,
    },
    #[error("Failed to process Gaussian file '{path}': {source}", path = path.display())]
    Gaussian {
        path: PathBuf,
        #[source]
        source: GaussianError,
    },
}

impl StructureFormat {
    pub const ALL: [StructureFormat; 2] = [StructureFormat::Xyz, StructureFormat::Gaussian];

    /// Resolves a format from a file extension (without the dot), case-insensitively.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "xyz" => Some(StructureFormat::Xyz),
            "com" | "gjf" => Some(StructureFormat::Gaussian),
            _ => None,
        }
    }

    /// # Errors
    ///
    /// Returns [`FormatError::Unsupported`] if the path has no recognised extension.
    pub fn from_path(path: &Path) -> Result<Self, FormatError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| FormatError::Unsupported {
                path: path.to_path_buf(),
                supported: Self::supported_extensions().join(", "),
            })
    }

    /// The extensions accepted for this format; the first is used when writing.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            StructureFormat::Xyz => &["xyz"],
            StructureFormat::Gaussian => &["com", "gjf"],
        }
    }

    pub fn extension(&self) -> &'static str {
        self.extensions()[0]
    }

    pub fn supported_extensions() -> Vec<&'static str> {
        Self::ALL
            .iter()
            .flat_map(|f| f.extensions().iter().copied())
            .collect()
    }
}

/// Reads a structure from `path`, choosing the parser from the file extension.
///
/// # Errors
///
/// Returns [`FormatError::Unsupported`] for unknown extensions, or the wrapped parser
/// error if the file cannot be read.
pub fn read_structure(path: &Path) -> Result<Structure, FormatError> {
    match StructureFormat::from_path(path)? {
        StructureFormat::Xyz => XyzFile::read_from_path(path)
            .map(|(structure, _)| structure)
            .map_err(|source| FormatError::Xyz {
                path: path.to_path_buf(),
                source,
            }),
        StructureFormat::Gaussian => GaussianFile::read_from_path(path)
            .map(|(structure, _)| structure)
            .map_err(|source| FormatError::Gaussian {
                path: path.to_path_buf(),
                source,
            }),
    }
}

/// Writes `structure` to `path` in the given format.
///
/// `job` supplies the Gaussian job settings, including the title; for XYZ output only
/// its title is used, as the comment line.
///
/// # Errors
///
/// Returns the wrapped writer error if the file cannot be written.
pub fn write_structure(
    structure: &Structure,
    format: StructureFormat,
    job: &GaussianJob,
    path: &Path,
) -> Result<(), FormatError> {
    match format {
        StructureFormat::Xyz => {
            let metadata = XyzMetadata {
                comment: job.title.clone(),
            };
            XyzFile::write_to_path(structure, &metadata, path).map_err(|source| FormatError::Xyz {
                path: path.to_path_buf(),
                source,
            })
        }
        StructureFormat::Gaussian => {
            GaussianFile::write_to_path(structure, job, path).map_err(|source| {
                FormatError::Gaussian {
                    path: path.to_path_buf(),
                    source,
                }
            })
        }
    }
}

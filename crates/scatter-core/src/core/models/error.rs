use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Unknown element symbol '{0}': no covalent radius is available")]
    UnknownElement(String),

    #[error("Invalid covalent radius {radius} for element '{symbol}': must be positive and finite")]
    InvalidCovalentRadius { symbol: String, radius: f64 },

    #[error("Non-finite position ({x}, {y}, {z}) for atom '{symbol}'")]
    NonFinitePosition {
        symbol: String,
        x: f64,
        y: f64,
        z: f64,
    },

    #[error("Structure '{0}' contains no atoms")]
    EmptyStructure(String),

    #[error("Atom index {index} is out of range for structure '{structure}' with {len} atoms")]
    AtomIndexOutOfRange {
        structure: String,
        index: usize,
        len: usize,
    },

    #[error("Invalid sphere radius {0}: must be finite and non-negative")]
    InvalidSphereRadius(f64),
}

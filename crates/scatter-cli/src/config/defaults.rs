use crate::cli::OutputFormat;
use ligscatter::core::io::gaussian::DEFAULT_ROUTE;
use ligscatter::engine::config::{DEFAULT_BOND_TOLERANCE, DEFAULT_MAX_ATTEMPTS};
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub ligands: usize,
    pub count: usize,
    pub weighted: bool,
    pub tolerance: f64,
    pub max_attempts: usize,
    pub out_dir: PathBuf,
    pub format: OutputFormat,
    pub route: String,
    pub charge: i32,
    pub multiplicity: u32,
    pub checkpoint: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            ligands: 1,
            count: 1,
            weighted: true,
            tolerance: DEFAULT_BOND_TOLERANCE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            out_dir: PathBuf::from("."),
            format: OutputFormat::Com,
            route: DEFAULT_ROUTE.to_string(),
            charge: 0,
            multiplicity: 1,
            checkpoint: true,
        }
    }
}

pub mod inspect;
pub mod place;

use crate::error::{CliError, Result};
use ligscatter::core::io::format::read_structure;
use ligscatter::core::models::structure::Structure;
use ligscatter::engine::error::EngineError;
use std::path::Path;
use tracing::info;

/// Reads a structure and decides its display name: an explicit name wins, then the name
/// stored in the file, then the file stem.
pub fn load_structure(path: &Path, name: Option<&str>) -> Result<Structure> {
    info!("Loading structure from {:?}", path);
    let mut structure = read_structure(path)?;

    let name = match name {
        Some(name) => name.trim().to_string(),
        None if !structure.name().trim().is_empty() => structure.name().trim().to_string(),
        None => path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("structure")
            .to_string(),
    };
    if name.is_empty() {
        return Err(CliError::Argument(format!(
            "Empty structure name given for {}",
            path.display()
        )));
    }
    structure.set_name(name);
    structure.ensure_not_empty().map_err(EngineError::from)?;
    Ok(structure)
}

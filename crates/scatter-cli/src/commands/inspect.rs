use super::load_structure;
use crate::cli::InspectArgs;
use crate::error::Result;
use ligscatter::core::models::structure::Structure;
use std::fmt::Write;

pub fn run(args: InspectArgs) -> Result<()> {
    let structure = load_structure(&args.file, None)?;
    print!("{}", render(&structure));
    Ok(())
}

/// One line per atom with the zero-based index used by `--moiety`.
pub fn render(structure: &Structure) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({} atoms)", structure.name(), structure.len());
    let _ = writeln!(
        out,
        "{:>5}  {:<3} {:>12} {:>12} {:>12} {:>8}",
        "index", "el", "x", "y", "z", "r_cov"
    );
    for (index, atom) in structure.atoms().iter().enumerate() {
        let p = atom.position;
        let _ = writeln!(
            out,
            "{:>5}  {:<3} {:>12.6} {:>12.6} {:>12.6} {:>8.3}",
            index,
            atom.element(),
            p.x,
            p.y,
            p.z,
            atom.covalent_radius()
        );
    }
    out
}

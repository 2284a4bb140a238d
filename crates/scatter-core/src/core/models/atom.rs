use super::error::ModelError;
use crate::core::utils::elements::{canonical_symbol, covalent_radius};
use nalgebra::Point3;

/// A single atom: an element identity placed at a point in space.
///
/// The element symbol and covalent radius are fixed at construction; only the position
/// changes as structures are rotated, translated and merged. The radius is resolved once
/// from the element table so that later distance checks never repeat the lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    element: String,
    covalent_radius: f64,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates an atom whose covalent radius is taken from the element table.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The element symbol, matched case-insensitively (e.g. `"C"`, `"cl"`).
    /// * `position` - The 3D coordinates of the atom.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownElement`] if the symbol has no tabulated radius, or
    /// [`ModelError::NonFinitePosition`] if any coordinate is NaN or infinite.
    pub fn new(symbol: &str, position: Point3<f64>) -> Result<Self, ModelError> {
        ensure_finite(symbol, &position)?;
        let radius =
            covalent_radius(symbol).ok_or_else(|| ModelError::UnknownElement(symbol.to_string()))?;
        Ok(Self {
            element: canonical_symbol(symbol),
            covalent_radius: radius,
            position,
        })
    }

    /// Creates an atom with an explicitly supplied covalent radius.
    ///
    /// Useful for pseudo-atoms or dummy centres that are not part of the element table.
    /// The symbol is stored as given.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidCovalentRadius`] unless `radius` is finite and positive,
    /// and [`ModelError::NonFinitePosition`] for a NaN or infinite coordinate.
    pub fn with_radius(
        symbol: &str,
        position: Point3<f64>,
        radius: f64,
    ) -> Result<Self, ModelError> {
        ensure_finite(symbol, &position)?;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ModelError::InvalidCovalentRadius {
                symbol: symbol.to_string(),
                radius,
            });
        }
        Ok(Self {
            element: symbol.trim().to_string(),
            covalent_radius: radius,
            position,
        })
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    /// The covalent radius of this atom in Angstroms.
    pub fn covalent_radius(&self) -> f64 {
        self.covalent_radius
    }

    /// Distance between the centres of two atoms.
    pub fn distance_to(&self, other: &Atom) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }
}

fn ensure_finite(symbol: &str, position: &Point3<f64>) -> Result<(), ModelError> {
    if position.iter().all(|c| c.is_finite()) {
        return Ok(());
    }
    Err(ModelError::NonFinitePosition {
        symbol: symbol.to_string(),
        x: position.x,
        y: position.y,
        z: position.z,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_resolves_radius_from_table() {
        let atom = Atom::new("O", Point3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(atom.element(), "O");
        assert_eq!(atom.covalent_radius(), 0.66);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn non_finite_positions_are_rejected() {
        let nan = Point3::new(f64::NAN, 0.0, 0.0);
        assert!(matches!(
            Atom::new("H", nan),
            Err(ModelError::NonFinitePosition { ref symbol, .. }) if symbol == "H"
        ));
        let inf = Point3::new(0.0, 0.0, f64::NEG_INFINITY);
        assert!(matches!(
            Atom::with_radius("X", inf, 1.0),
            Err(ModelError::NonFinitePosition { .. })
        ));
    }

    #[test]
    fn new_atom_canonicalizes_symbol() {
        let atom = Atom::new("cl", Point3::origin()).unwrap();
        assert_eq!(atom.element(), "Cl");
    }

    #[test]
    fn new_atom_fails_for_unknown_element() {
        let result = Atom::new("Qq", Point3::origin());
        assert_eq!(result, Err(ModelError::UnknownElement("Qq".to_string())));
    }

    #[test]
    fn with_radius_accepts_pseudo_atoms() {
        let atom = Atom::with_radius("A", Point3::origin(), 1.0).unwrap();
        assert_eq!(atom.element(), "A");
        assert_eq!(atom.covalent_radius(), 1.0);
    }

    #[test]
    fn with_radius_rejects_non_positive_or_non_finite_radius() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Atom::with_radius("A", Point3::origin(), bad),
                Err(ModelError::InvalidCovalentRadius { .. })
            ));
        }
    }

    #[test]
    fn distance_to_is_euclidean() {
        let a = Atom::new("H", Point3::new(0.0, 0.0, 0.0)).unwrap();
        let b = Atom::new("H", Point3::new(3.0, 4.0, 0.0)).unwrap();
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn cloned_atom_is_independent() {
        let original = Atom::new("C", Point3::new(1.0, 1.0, 1.0)).unwrap();
        let mut copy = original.clone();
        copy.position.x = 9.0;
        assert_eq!(original.position.x, 1.0);
        assert_eq!(copy.element(), original.element());
    }
}

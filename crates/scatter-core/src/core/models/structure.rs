use super::atom::Atom;
use super::error::ModelError;
use nalgebra::{Point3, UnitQuaternion, Vector3};

/// A named, ordered collection of atoms.
///
/// Order is stable and significant: index ranges are how merged fragments are told apart.
/// A `Structure` owns its atoms outright, so `clone()` is a deep copy and every derived
/// structure (rotated, translated, merged) is independent of the one it came from.
///
/// The coordinate origin doubles as the structure's reference point. Rotations turn the
/// structure about it, and merging places it at the requested position. Input structures
/// are normally normalized with [`Structure::center_on_atom`] so that an anchor atom sits
/// on that origin.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Structure {
    name: String,
    atoms: Vec<Atom>,
}

impl Structure {
    pub fn new(name: impl Into<String>, atoms: Vec<Atom>) -> Self {
        Self {
            name: name.into(),
            atoms,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Fails with [`ModelError::EmptyStructure`] if the structure has no atoms.
    pub fn ensure_not_empty(&self) -> Result<(), ModelError> {
        if self.atoms.is_empty() {
            Err(ModelError::EmptyStructure(self.name.clone()))
        } else {
            Ok(())
        }
    }

    /// Looks up an atom, reporting an out-of-range index as an error.
    pub fn try_atom(&self, index: usize) -> Result<&Atom, ModelError> {
        self.atoms
            .get(index)
            .ok_or_else(|| ModelError::AtomIndexOutOfRange {
                structure: self.name.clone(),
                index,
                len: self.atoms.len(),
            })
    }

    /// Moves every atom by the same offset, in place.
    pub fn translate(&mut self, offset: &Vector3<f64>) {
        for atom in &mut self.atoms {
            atom.position += offset;
        }
    }

    /// Returns a copy moved by `offset`; `self` is left untouched.
    pub fn translated(&self, offset: &Vector3<f64>) -> Structure {
        let mut copy = self.clone();
        copy.translate(offset);
        copy
    }

    /// Returns a copy rotated about the coordinate origin.
    ///
    /// Rotation is rigid: every interatomic distance is preserved up to rounding.
    pub fn rotated(&self, rotation: &UnitQuaternion<f64>) -> Structure {
        let mut copy = self.clone();
        for atom in &mut copy.atoms {
            atom.position = rotation * atom.position;
        }
        copy
    }

    /// Returns a copy translated so that the atom at `index` sits on the origin.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::AtomIndexOutOfRange`] if `index` does not name an atom; an
    /// empty structure always fails this way.
    pub fn center_on_atom(&self, index: usize) -> Result<Structure, ModelError> {
        let anchor = self.try_atom(index)?.position;
        Ok(self.translated(&(-anchor.coords)))
    }

    /// Produces a new structure containing `self`'s atoms followed by `source`'s atoms,
    /// with `source` moved so that its reference origin lands on `position`.
    ///
    /// Neither input is modified. The first `self.len()` atoms of the result are exactly
    /// `self`'s atoms in order; the remainder are `source`'s atoms in order.
    pub fn merged(&self, source: &Structure, position: &Point3<f64>) -> Structure {
        let mut combined = Structure {
            name: self.name.clone(),
            atoms: Vec::with_capacity(self.atoms.len() + source.atoms.len()),
        };
        combined.atoms.extend(self.atoms.iter().cloned());
        combined.append_placed(source, position);
        combined
    }

    /// In-place form of [`Structure::merged`]: appends copies of `source`'s atoms shifted
    /// by `position`. Existing atoms are untouched.
    pub fn append_placed(&mut self, source: &Structure, position: &Point3<f64>) {
        self.atoms.extend(source.atoms.iter().map(|atom| {
            let mut placed = atom.clone();
            placed.position += position.coords;
            placed
        }));
    }

    /// Largest distance from the coordinate origin to any atom centre.
    ///
    /// Invariant under rotation about the origin, which is what makes it usable for
    /// spacing fragments before their orientation is known. Zero for an empty structure.
    pub fn bounding_radius(&self) -> f64 {
        self.atoms
            .iter()
            .map(|a| a.position.coords.norm())
            .fold(0.0, f64::max)
    }

    /// Largest covalent radius among the atoms, or zero for an empty structure.
    pub fn max_covalent_radius(&self) -> f64 {
        self.atoms
            .iter()
            .map(Atom::covalent_radius)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn water() -> Structure {
        Structure::new(
            "Water",
            vec![
                Atom::new("O", Point3::new(0.0, 0.0, 0.0)).unwrap(),
                Atom::new("H", Point3::new(1.0, 0.0, 0.0)).unwrap(),
                Atom::new("H", Point3::new(0.0, 1.0, 0.0)).unwrap(),
            ],
        )
    }

    #[test]
    fn accessors_report_name_and_atoms() {
        let w = water();
        assert_eq!(w.name(), "Water");
        assert_eq!(w.len(), 3);
        assert!(!w.is_empty());
        assert_eq!(w.atom(1).unwrap().element(), "H");
        assert!(w.atom(3).is_none());
    }

    #[test]
    fn try_atom_reports_out_of_range_index() {
        let err = water().try_atom(7).unwrap_err();
        assert_eq!(
            err,
            ModelError::AtomIndexOutOfRange {
                structure: "Water".to_string(),
                index: 7,
                len: 3
            }
        );
    }

    #[test]
    fn ensure_not_empty_fails_for_empty_structure() {
        let empty = Structure::new("Nothing", Vec::new());
        assert_eq!(
            empty.ensure_not_empty(),
            Err(ModelError::EmptyStructure("Nothing".to_string()))
        );
        assert!(water().ensure_not_empty().is_ok());
    }

    #[test]
    fn translated_leaves_original_untouched() {
        let w = water();
        let moved = w.translated(&Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(w.atom(0).unwrap().position, Point3::origin());
        assert_eq!(moved.atom(0).unwrap().position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(moved.atom(1).unwrap().position, Point3::new(2.0, 2.0, 3.0));
    }

    #[test]
    fn rotated_turns_about_origin() {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2);
        let rotated = water().rotated(&rotation);
        let h1 = rotated.atom(1).unwrap().position;
        assert!((h1 - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
        assert_eq!(rotated.atom(0).unwrap().position, Point3::origin());
    }

    #[test]
    fn center_on_atom_moves_anchor_to_origin() {
        let centered = water().center_on_atom(1).unwrap();
        assert_eq!(centered.atom(1).unwrap().position, Point3::origin());
        assert_eq!(
            centered.atom(0).unwrap().position,
            Point3::new(-1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn center_on_atom_fails_for_empty_structure() {
        let empty = Structure::new("Nothing", Vec::new());
        assert!(matches!(
            empty.center_on_atom(0),
            Err(ModelError::AtomIndexOutOfRange { len: 0, .. })
        ));
    }

    #[test]
    fn merged_appends_translated_source_after_target() {
        let base = water();
        let ligand = water();
        let merged = base.merged(&ligand, &Point3::new(10.0, 0.0, 0.0));

        assert_eq!(merged.len(), 6);
        assert_eq!(merged.name(), "Water");
        assert_eq!(&merged.atoms()[..3], base.atoms());
        assert_eq!(merged.atom(3).unwrap().position, Point3::new(10.0, 0.0, 0.0));
        assert_eq!(merged.atom(4).unwrap().position, Point3::new(11.0, 0.0, 0.0));
        assert_eq!(merged.atom(5).unwrap().position, Point3::new(10.0, 1.0, 0.0));
        assert_eq!(ligand, water());
    }

    #[test]
    fn bounding_and_covalent_extents() {
        let w = water();
        assert!((w.bounding_radius() - 1.0).abs() < 1e-12);
        assert_eq!(w.max_covalent_radius(), 0.66);
        assert_eq!(Structure::default().bounding_radius(), 0.0);
    }
}

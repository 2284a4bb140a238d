use crate::core::models::atom::Atom;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::ops::Range;

/// A structure assembled from fragments, with the index range of each fragment.
///
/// Fragment 0 is always the base. Each placed copy appends one fragment after the
/// existing atoms, so the flat atom order and the ranges agree by construction: the ranges
/// are contiguous, ordered and together cover every atom exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    structure: Structure,
    fragments: Vec<Range<usize>>,
}

impl Composite {
    /// Starts a composite from a deep copy of `base`.
    pub fn new(base: &Structure) -> Self {
        Self {
            structure: base.clone(),
            fragments: vec![0..base.len()],
        }
    }

    /// Appends `source`, translated so its reference origin lands on `position`.
    ///
    /// Atoms already in the composite keep their positions and indices; `source` is not
    /// modified.
    pub fn add_fragment(&mut self, source: &Structure, position: &Point3<f64>) {
        let start = self.structure.len();
        self.structure.append_placed(source, position);
        self.fragments.push(start..self.structure.len());
    }

    /// Builder-style variant of [`Composite::add_fragment`].
    pub fn with_fragment(mut self, source: &Structure, position: &Point3<f64>) -> Self {
        self.add_fragment(source, position);
        self
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn into_structure(self) -> Structure {
        self.structure
    }

    pub fn fragments(&self) -> &[Range<usize>] {
        &self.fragments
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// The fragment that atom `index` came from, if the index is in range.
    pub fn fragment_of(&self, index: usize) -> Option<usize> {
        self.fragments.iter().position(|range| range.contains(&index))
    }

    /// The structure's atoms belonging to fragment `fragment`.
    pub fn fragment_atoms(&self, fragment: usize) -> Option<&[Atom]> {
        let range = self.fragments.get(fragment)?.clone();
        self.structure.atoms().get(range)
    }
}

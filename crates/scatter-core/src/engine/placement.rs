use super::composite::Composite;
use crate::core::models::region::Sphere;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::random_rotation;
use nalgebra::Point3;
use rand::Rng;
use tracing::trace;

/// Extra gap, in Angstroms, left between fragments of the reference composite on top of
/// the largest possible clash distance.
const REFERENCE_MARGIN: f64 = 1.0;

/// Returns a copy of `structure` turned by a rotation drawn uniformly from SO(3).
///
/// The rotation is about the structure's reference origin, so an anchor atom centred
/// there stays put. The input is not modified.
pub fn randomly_orient(structure: &Structure, rng: &mut impl Rng) -> Structure {
    let rotation = random_rotation(rng);
    structure.rotated(&rotation)
}

/// Builds one candidate: a fresh copy of `base` with `ligand_count` randomly oriented
/// ligand copies, each placed at an independent point sampled from `region`.
pub fn build_candidate(
    base: &Structure,
    ligand: &Structure,
    region: &Sphere,
    ligand_count: usize,
    rng: &mut impl Rng,
) -> Composite {
    let mut composite = Composite::new(base);
    for _ in 0..ligand_count {
        let spun = randomly_orient(ligand, rng);
        let position = region.sample(rng);
        trace!(x = position.x, y = position.y, z = position.z, "Placing ligand copy.");
        composite.add_fragment(&spun, &position);
    }
    composite
}

/// Builds the reference composite: the same fragment layout as any candidate, but with
/// every ligand copy parked far out on the +x axis where nothing can touch.
///
/// Spacing uses rotation-invariant bounding radii about each fragment's reference origin
/// plus the largest clash distance any atom pair could have, so the result is clash-free
/// for any tolerance up to `bond_tolerance`.
pub fn build_reference(
    base: &Structure,
    ligand: &Structure,
    ligand_count: usize,
    bond_tolerance: f64,
) -> Composite {
    let largest_radius = base.max_covalent_radius().max(ligand.max_covalent_radius());
    let clearance = 2.0 * largest_radius * bond_tolerance + REFERENCE_MARGIN;
    let base_extent = base.bounding_radius();
    let ligand_extent = ligand.bounding_radius();
    let spacing = 2.0 * ligand_extent + clearance;
    let first = base_extent + ligand_extent + clearance;

    let mut composite = Composite::new(base);
    for k in 0..ligand_count {
        let position = Point3::new(first + k as f64 * spacing, 0.0, 0.0);
        composite.add_fragment(ligand, &position);
    }
    composite
}

use crate::core::models::structure::Structure;
use nalgebra::{Point3, Quaternion, UnitQuaternion, Vector3};
use rand::Rng;
use std::f64::consts::TAU;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Atom selection is empty; at least one atom is required to compute a centroid")]
    EmptySelection,
    #[error("Selected atom index {index} is out of range for a structure with {len} atoms")]
    IndexOutOfRange { index: usize, len: usize },
}

/// How atoms contribute to a centroid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CentroidWeighting {
    /// Plain arithmetic mean of the positions.
    Unweighted,
    /// Each atom is weighted by its covalent radius, so larger atoms pull harder.
    #[default]
    CovalentRadius,
}

/// Computes the centroid of a subset of atoms in a structure.
///
/// Weights are normalized before accumulation, so a single-atom selection returns that
/// atom's position exactly under either weighting mode. Indices may repeat; a repeated
/// index simply counts twice.
///
/// # Arguments
///
/// * `structure` - The structure holding the atoms.
/// * `indices` - Zero-based indices of the atoms to include.
/// * `weighting` - Whether to weight by covalent radius.
///
/// # Errors
///
/// Returns [`GeometryError::EmptySelection`] if `indices` is empty, or
/// [`GeometryError::IndexOutOfRange`] if any index does not name an atom.
pub fn centroid(
    structure: &Structure,
    indices: &[usize],
    weighting: CentroidWeighting,
) -> Result<Point3<f64>, GeometryError> {
    if indices.is_empty() {
        return Err(GeometryError::EmptySelection);
    }

    let atoms = indices
        .iter()
        .map(|&index| {
            structure.atom(index).ok_or(GeometryError::IndexOutOfRange {
                index,
                len: structure.len(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let weight_of = |radius: f64| match weighting {
        CentroidWeighting::Unweighted => 1.0,
        CentroidWeighting::CovalentRadius => radius,
    };
    let total: f64 = atoms.iter().map(|a| weight_of(a.covalent_radius())).sum();

    let sum = atoms.iter().fold(Vector3::zeros(), |acc, atom| {
        acc + atom.position.coords * (weight_of(atom.covalent_radius()) / total)
    });
    Ok(Point3::from(sum))
}

/// Draws a rotation uniformly from SO(3).
///
/// Uses Shoemake's subgroup algorithm: three independent uniforms are mapped onto a unit
/// quaternion that is uniform on the 3-sphere, which in turn is uniform over rotations.
pub fn random_rotation(rng: &mut impl Rng) -> UnitQuaternion<f64> {
    let u1: f64 = rng.r#gen();
    let u2: f64 = rng.gen_range(0.0..TAU);
    let u3: f64 = rng.gen_range(0.0..TAU);

    let a = (1.0 - u1).sqrt();
    let b = u1.sqrt();
    let q = Quaternion::new(b * u3.cos(), a * u2.sin(), a * u2.cos(), b * u3.sin());
    UnitQuaternion::from_quaternion(q)
}

/// Largest absolute change of any interatomic distance between two conformations of
/// the same atom list. Returns `None` if the atom counts differ.
pub fn max_distance_deviation(a: &Structure, b: &Structure) -> Option<f64> {
    if a.len() != b.len() {
        return None;
    }
    let n = a.len();
    let mut worst: f64 = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let da = a.atoms()[i].distance_to(&a.atoms()[j]);
            let db = b.atoms()[i].distance_to(&b.atoms()[j]);
            worst = worst.max((da - db).abs());
        }
    }
    Some(worst)
}

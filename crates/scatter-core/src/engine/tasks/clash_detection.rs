use crate::core::models::atom::Atom;
use crate::engine::composite::Composite;
use crate::engine::error::EngineError;
use itertools::Itertools;
use nalgebra::{Point3, Vector3};
use tracing::{debug, instrument};

/// Two atoms from different fragments that sit closer than their bonding distance.
#[derive(Debug, Clone, PartialEq)]
pub struct ClashPair {
    pub atom_a: usize,
    pub atom_b: usize,
    pub fragment_a: usize,
    pub fragment_b: usize,
    pub distance: f64,
    pub threshold: f64,
}

impl ClashPair {
    /// How far inside the bonding distance the pair sits.
    pub fn overlap(&self) -> f64 {
        self.threshold - self.distance
    }
}

/// Outcome of a clash check, worst overlaps first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClashReport {
    pub clashes: Vec<ClashPair>,
}

impl ClashReport {
    /// `true` when no inter-fragment pair is within bonding distance.
    pub fn is_clear(&self) -> bool {
        self.clashes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clashes.is_empty()
    }
}

/// Bonding distance for an atom pair: the sum of covalent radii, scaled by `tolerance`.
#[inline]
pub fn bonding_threshold(a: &Atom, b: &Atom, tolerance: f64) -> f64 {
    (a.covalent_radius() + b.covalent_radius()) * tolerance
}

/// A fragment's bounding sphere, padded by its largest covalent radius.
struct FragmentBounds {
    center: Point3<f64>,
    radius: f64,
    reach: f64,
}

impl FragmentBounds {
    fn of(atoms: &[Atom]) -> Option<Self> {
        if atoms.is_empty() {
            return None;
        }
        let sum = atoms
            .iter()
            .fold(Vector3::zeros(), |acc, a| acc + a.position.coords);
        let center = Point3::from(sum / atoms.len() as f64);
        let radius = atoms
            .iter()
            .map(|a| nalgebra::distance(&center, &a.position))
            .fold(0.0, f64::max);
        let reach = atoms.iter().map(Atom::covalent_radius).fold(0.0, f64::max);
        Some(Self {
            center,
            radius,
            reach,
        })
    }

    /// Whether any atom pair across the two fragments could fall under its threshold.
    fn may_touch(&self, other: &Self, tolerance: f64) -> bool {
        let gap = nalgebra::distance(&self.center, &other.center) - self.radius - other.radius;
        gap < (self.reach + other.reach) * tolerance
    }
}

/// Finds every pair of atoms from different fragments of `composite` that lies strictly
/// closer than its bonding threshold.
///
/// Pairs within one fragment are never examined. Fragment pairs whose padded bounding
/// spheres cannot touch are skipped without looking at their atoms; this does not change
/// the result.
pub fn find_clashes(composite: &Composite, tolerance: f64) -> ClashReport {
    let atoms = composite.structure().atoms();
    let fragments = composite.fragments();
    let bounds: Vec<Option<FragmentBounds>> = fragments
        .iter()
        .map(|range| FragmentBounds::of(&atoms[range.clone()]))
        .collect();

    let mut clashes = Vec::new();
    for (fa, fb) in (0..fragments.len()).tuple_combinations() {
        let (Some(bounds_a), Some(bounds_b)) = (&bounds[fa], &bounds[fb]) else {
            continue;
        };
        if !bounds_a.may_touch(bounds_b, tolerance) {
            continue;
        }
        for i in fragments[fa].clone() {
            for j in fragments[fb].clone() {
                let threshold = bonding_threshold(&atoms[i], &atoms[j], tolerance);
                let distance = atoms[i].distance_to(&atoms[j]);
                if distance < threshold {
                    clashes.push(ClashPair {
                        atom_a: i,
                        atom_b: j,
                        fragment_a: fa,
                        fragment_b: fb,
                        distance,
                        threshold,
                    });
                }
            }
        }
    }

    clashes.sort_by(|a, b| b.overlap().total_cmp(&a.overlap()));
    ClashReport { clashes }
}

/// Checks a candidate composite against the reference composite built from the same
/// fragments.
///
/// The reference supplies the fragment partition: atom pairs that share a fragment there
/// are exempt, and every other pair in the candidate is tested against its bonding
/// threshold. A non-empty report means the candidate must be rejected.
///
/// # Errors
///
/// Returns [`EngineError::FragmentLayoutMismatch`] if the two composites were not built
/// from the same sequence of fragments.
#[instrument(level = "trace", skip_all, name = "clash_detection_task")]
pub fn run(
    reference: &Composite,
    candidate: &Composite,
    tolerance: f64,
) -> Result<ClashReport, EngineError> {
    if reference.fragments() != candidate.fragments() {
        return Err(EngineError::FragmentLayoutMismatch {
            reference: reference.fragment_count(),
            candidate: candidate.fragment_count(),
        });
    }

    let report = find_clashes(candidate, tolerance);
    if !report.is_clear() {
        debug!(
            num_clashes = report.len(),
            worst_overlap = report.clashes[0].overlap(),
            "Candidate rejected."
        );
    }
    Ok(report)
}

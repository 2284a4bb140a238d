use crate::core::models::region::Sphere;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::centroid;
use crate::engine::composite::Composite;
use crate::engine::config::ScatterConfig;
use crate::engine::error::EngineError;
use crate::engine::placement::{build_candidate, build_reference};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{debug, info, instrument, trace};

/// An accepted composite, named with its title.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatteredStructure {
    pub title: String,
    pub structure: Structure,
    /// Candidates built for this structure, the accepted one included.
    pub attempts: usize,
}

/// Seeded generator when a seed is configured, otherwise one seeded from the OS.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Title of the `index`-th (zero-based) structure: `{base}_{ligand_count}{ligand}_{n}`
/// with `n` counting from one.
pub fn structure_title(base: &str, ligand: &str, ligand_count: usize, index: usize) -> String {
    format!("{}_{}{}_{}", base, ligand_count, ligand, index + 1)
}

/// Fixed state for one batch: the placement sphere and the reference composite.
///
/// Every call to [`ScatterSession::generate`] starts from the pristine base and ligand,
/// so rejected attempts and earlier structures never influence each other.
pub struct ScatterSession<'a, R: Rng> {
    base: &'a Structure,
    ligand: &'a Structure,
    config: &'a ScatterConfig,
    region: Sphere,
    reference: Composite,
    rng: R,
}

impl<'a, R: Rng> ScatterSession<'a, R> {
    /// Validates the inputs and prepares the reference composite.
    ///
    /// Both structures are expected to be centred on their anchor atom.
    ///
    /// # Errors
    ///
    /// Fails if either structure is empty, a moiety index is out of range, the sphere
    /// radius is invalid, or the reference composite itself contains a clash.
    pub fn new(
        base: &'a Structure,
        ligand: &'a Structure,
        config: &'a ScatterConfig,
        rng: R,
    ) -> Result<Self, EngineError> {
        base.ensure_not_empty()?;
        ligand.ensure_not_empty()?;

        let center = centroid(base, &config.moiety.atom_indices, config.moiety.weighting)?;
        let region = Sphere::new(center, config.moiety.radius)?;
        debug!(
            center = ?region.center(),
            radius = region.radius(),
            "Placement sphere set on moiety."
        );

        let reference = build_reference(base, ligand, config.ligand_count, config.bond_tolerance);
        let overlap = tasks::clash_detection::find_clashes(&reference, config.bond_tolerance);
        if !overlap.is_clear() {
            return Err(EngineError::ReferenceOverlap {
                clashes: overlap.len(),
            });
        }

        Ok(Self {
            base,
            ligand,
            config,
            region,
            reference,
            rng,
        })
    }

    pub fn region(&self) -> &Sphere {
        &self.region
    }

    pub fn reference(&self) -> &Composite {
        &self.reference
    }

    /// Samples candidates for structure `index` until one is clash-free.
    ///
    /// Each rejection discards the whole candidate and re-samples every ligand.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PlacementExhausted`] once the attempt cap is reached and
    /// [`EngineError::PlacementTimeout`] once the configured wall-clock limit has passed.
    pub fn generate(
        &mut self,
        index: usize,
        reporter: &ProgressReporter,
    ) -> Result<ScatteredStructure, EngineError> {
        let retry = self.config.retry;
        let tolerance = self.config.bond_tolerance;
        let started = Instant::now();
        let mut attempts = 0;

        loop {
            attempts += 1;
            let candidate = build_candidate(
                self.base,
                self.ligand,
                &self.region,
                self.config.ligand_count,
                &mut self.rng,
            );

            let report = tasks::clash_detection::run(&self.reference, &candidate, tolerance)?;
            if report.is_clear() {
                let title = structure_title(
                    self.base.name(),
                    self.ligand.name(),
                    self.config.ligand_count,
                    index,
                );
                let mut structure = candidate.into_structure();
                structure.set_name(title.clone());
                debug!(structure_index = index, attempts, "Structure accepted.");
                return Ok(ScatteredStructure {
                    title,
                    structure,
                    attempts,
                });
            }

            trace!(
                structure_index = index,
                attempts,
                clashes = report.len(),
                "Candidate rejected."
            );
            reporter.report(Progress::AttemptRejected {
                structure_index: index,
                attempts,
            });

            if attempts >= retry.max_attempts {
                return Err(EngineError::PlacementExhausted {
                    structure_index: index,
                    attempts,
                });
            }
            if let Some(limit) = retry.timeout {
                let elapsed = started.elapsed();
                if elapsed >= limit {
                    return Err(EngineError::PlacementTimeout {
                        structure_index: index,
                        attempts,
                        elapsed,
                    });
                }
            }
        }
    }
}

/// Generates every configured structure, handing each to `sink` as soon as it is accepted.
///
/// The first error, from the engine or from `sink`, aborts the batch.
#[instrument(skip_all, name = "scatter_workflow")]
pub fn for_each_structure<F, E>(
    base: &Structure,
    ligand: &Structure,
    config: &ScatterConfig,
    reporter: &ProgressReporter,
    mut sink: F,
) -> Result<(), E>
where
    F: FnMut(ScatteredStructure) -> Result<(), E>,
    E: From<EngineError>,
{
    reporter.report(Progress::PhaseStart { name: "Setup" });
    info!(
        base = base.name(),
        ligand = ligand.name(),
        ligand_count = config.ligand_count,
        structure_count = config.structure_count,
        "Starting scatter workflow."
    );
    let mut session = ScatterSession::new(base, ligand, config, seeded_rng(config.seed))?;
    let center = session.region().center();
    reporter.report(Progress::Message(format!(
        "Placement sphere centred at ({:.3}, {:.3}, {:.3}) with radius {:.3} Å",
        center.x,
        center.y,
        center.z,
        session.region().radius()
    )));
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart { name: "Scattering" });
    reporter.report(Progress::TaskStart {
        total_steps: config.structure_count as u64,
    });
    let mut total_attempts = 0;
    for index in 0..config.structure_count {
        let scattered = session.generate(index, reporter)?;
        total_attempts += scattered.attempts;
        sink(scattered)?;
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    info!(
        structures = config.structure_count,
        total_attempts, "Scatter workflow complete."
    );
    Ok(())
}

/// Generates every configured structure and returns them in order.
pub fn run(
    base: &Structure,
    ligand: &Structure,
    config: &ScatterConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<ScatteredStructure>, EngineError> {
    let mut structures = Vec::with_capacity(config.structure_count);
    for_each_structure(base, ligand, config, reporter, |scattered| {
        structures.push(scattered);
        Ok::<(), EngineError>(())
    })?;
    Ok(structures)
}

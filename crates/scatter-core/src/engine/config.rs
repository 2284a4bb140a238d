use crate::core::utils::geometry::CentroidWeighting;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BOND_TOLERANCE: f64 = 1.1;
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
}

/// Bounds on how long a single structure may keep rejecting candidates.
///
/// The attempt cap always applies. The timeout, when set, is measured per structure from
/// its first attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub timeout: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            timeout: None,
        }
    }
}

/// Where ligands go: a sphere centred on the centroid of the moiety atoms.
#[derive(Debug, Clone, PartialEq)]
pub struct MoietyConfig {
    /// Zero-based indices of the base atoms forming the moiety.
    pub atom_indices: Vec<usize>,
    pub radius: f64,
    pub weighting: CentroidWeighting,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterConfig {
    pub moiety: MoietyConfig,
    pub ligand_count: usize,
    pub structure_count: usize,
    /// Scale applied to the sum of covalent radii to get the clash distance.
    pub bond_tolerance: f64,
    pub retry: RetryPolicy,
    pub seed: Option<u64>,
}

#[derive(Default)]
pub struct ScatterConfigBuilder {
    moiety_atoms: Option<Vec<usize>>,
    moiety_radius: Option<f64>,
    weighting: Option<CentroidWeighting>,
    ligand_count: Option<usize>,
    structure_count: Option<usize>,
    bond_tolerance: Option<f64>,
    max_attempts: Option<usize>,
    timeout: Option<Duration>,
    seed: Option<u64>,
}

impl ScatterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn moiety_atoms(mut self, indices: Vec<usize>) -> Self {
        self.moiety_atoms = Some(indices);
        self
    }
    pub fn moiety_radius(mut self, radius: f64) -> Self {
        self.moiety_radius = Some(radius);
        self
    }
    pub fn weighting(mut self, weighting: CentroidWeighting) -> Self {
        self.weighting = Some(weighting);
        self
    }
    pub fn ligand_count(mut self, count: usize) -> Self {
        self.ligand_count = Some(count);
        self
    }
    pub fn structure_count(mut self, count: usize) -> Self {
        self.structure_count = Some(count);
        self
    }
    pub fn bond_tolerance(mut self, tolerance: f64) -> Self {
        self.bond_tolerance = Some(tolerance);
        self
    }
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = Some(attempts);
        self
    }
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<ScatterConfig, ConfigError> {
        let atom_indices = self
            .moiety_atoms
            .ok_or(ConfigError::MissingParameter("moiety_atoms"))?;
        if atom_indices.is_empty() {
            return Err(ConfigError::InvalidParameter {
                parameter: "moiety_atoms",
                reason: "at least one atom index is required".to_string(),
            });
        }

        let radius = self
            .moiety_radius
            .ok_or(ConfigError::MissingParameter("moiety_radius"))?;
        if !radius.is_finite() || radius < 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "moiety_radius",
                reason: format!("{radius} is not a finite, non-negative length"),
            });
        }

        let bond_tolerance = self.bond_tolerance.unwrap_or(DEFAULT_BOND_TOLERANCE);
        if !bond_tolerance.is_finite() || bond_tolerance < 1.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "bond_tolerance",
                reason: format!("{bond_tolerance} must be a finite factor of at least 1.0"),
            });
        }

        let max_attempts = self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS);
        if max_attempts == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "max_attempts",
                reason: "at least one attempt is required".to_string(),
            });
        }

        Ok(ScatterConfig {
            moiety: MoietyConfig {
                atom_indices,
                radius,
                weighting: self.weighting.unwrap_or_default(),
            },
            ligand_count: self
                .ligand_count
                .ok_or(ConfigError::MissingParameter("ligand_count"))?,
            structure_count: self
                .structure_count
                .ok_or(ConfigError::MissingParameter("structure_count"))?,
            bond_tolerance,
            retry: RetryPolicy {
                max_attempts,
                timeout: self.timeout,
            },
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ScatterConfigBuilder {
        ScatterConfigBuilder::new()
            .moiety_atoms(vec![0, 2])
            .moiety_radius(3.5)
            .ligand_count(2)
            .structure_count(5)
    }

    #[test]
    fn build_applies_defaults() {
        let config = complete().build().unwrap();
        assert_eq!(config.moiety.atom_indices, vec![0, 2]);
        assert_eq!(config.moiety.radius, 3.5);
        assert_eq!(config.moiety.weighting, CentroidWeighting::CovalentRadius);
        assert_eq!(config.ligand_count, 2);
        assert_eq!(config.structure_count, 5);
        assert_eq!(config.bond_tolerance, DEFAULT_BOND_TOLERANCE);
        assert_eq!(config.retry, RetryPolicy::default());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn build_keeps_explicit_values() {
        let config = complete()
            .weighting(CentroidWeighting::Unweighted)
            .bond_tolerance(1.3)
            .max_attempts(50)
            .timeout(Duration::from_secs(2))
            .seed(7)
            .build()
            .unwrap();
        assert_eq!(config.moiety.weighting, CentroidWeighting::Unweighted);
        assert_eq!(config.bond_tolerance, 1.3);
        assert_eq!(config.retry.max_attempts, 50);
        assert_eq!(config.retry.timeout, Some(Duration::from_secs(2)));
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn build_reports_missing_parameters() {
        let err = ScatterConfigBuilder::new().build().unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("moiety_atoms"));

        let err = ScatterConfigBuilder::new()
            .moiety_atoms(vec![0])
            .moiety_radius(1.0)
            .ligand_count(1)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("structure_count"));
    }

    #[test]
    fn build_rejects_invalid_values() {
        let cases = [
            (complete().moiety_atoms(vec![]), "moiety_atoms"),
            (complete().moiety_radius(-1.0), "moiety_radius"),
            (complete().moiety_radius(f64::NAN), "moiety_radius"),
            (complete().bond_tolerance(0.9), "bond_tolerance"),
            (complete().max_attempts(0), "max_attempts"),
        ];
        for (builder, expected) in cases {
            match builder.build() {
                Err(ConfigError::InvalidParameter { parameter, .. }) => {
                    assert_eq!(parameter, expected)
                }
                other => panic!("expected invalid {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn zero_counts_are_allowed() {
        let config = complete().ligand_count(0).structure_count(0).build().unwrap();
        assert_eq!(config.ligand_count, 0);
        assert_eq!(config.structure_count, 0);
    }
}

use super::config::ConfigError;
use crate::core::models::error::ModelError;
use crate::core::utils::geometry::GeometryError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid structure: {0}")]
    Model(#[from] ModelError),

    #[error("Invalid moiety selection: {0}")]
    Geometry(#[from] GeometryError),

    #[error(
        "Could not place ligands without clashes for structure {structure_index} after {attempts} attempts"
    )]
    PlacementExhausted {
        structure_index: usize,
        attempts: usize,
    },

    #[error(
        "Placement for structure {structure_index} timed out after {attempts} attempts ({elapsed:?})"
    )]
    PlacementTimeout {
        structure_index: usize,
        attempts: usize,
        elapsed: Duration,
    },

    #[error("Fragment layout mismatch: reference has {reference} fragments, candidate has {candidate}")]
    FragmentLayoutMismatch { reference: usize, candidate: usize },

    #[error("Reference composite is not clash-free ({clashes} close contacts between fragments)")]
    ReferenceOverlap { clashes: usize },
}

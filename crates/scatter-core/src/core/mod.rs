//! # Core Module
//!
//! Fundamental building blocks for ligand scattering: the molecular data model, the
//! element data it depends on, pure geometric routines and structure file I/O.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, ordered structures and spherical regions
//! - **Geometry & Element Data** ([`utils`]) - Covalent radii, centroids and uniform rotations
//! - **File I/O** ([`io`]) - Reading and writing XYZ and Gaussian input files
//!
//! Everything in this module is free of hidden state. Randomness is always supplied by
//! the caller as an explicit `Rng`, so every routine is reproducible under a fixed seed.

pub mod io;
pub mod models;
pub mod utils;

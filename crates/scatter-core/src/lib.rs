//! # LigandScatter Core Library
//!
//! Generates batches of starting geometries by scattering randomly oriented copies of a
//! small ligand fragment around a fixed base structure, inside a sphere anchored on a
//! user-chosen moiety. Any candidate in which atoms from different fragments come closer
//! than a covalent bonding distance is rejected and re-sampled.
//!
//! ## Architectural Philosophy
//!
//! The library follows the same three-layer split used throughout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Atom`, `Structure`, `Sphere`),
//!   the covalent radius table, pure geometry (centroids, uniform random rotations) and
//!   file I/O for the supported structure formats.
//!
//! - **[`engine`]: The Logic Core.** Configuration, the error taxonomy, progress reporting,
//!   fragment composition (`Composite`), rigid randomization and the clash-detection task.
//!
//! - **[`workflows`]: The Public API.** The placement loop that ties sampling, composition
//!   and validation together and hands out accepted structures one at a time.

pub mod core;
pub mod engine;
pub mod workflows;

//! Provides input/output functionality for molecular structure files.
//!
//! Reading and writing go through the [`traits::MolecularFile`] trait. The concrete
//! formats are [`xyz`] (plain Cartesian coordinates) and [`gaussian`] (Gaussian job input,
//! the format finished structures are usually written in). [`format`] maps a file
//! extension to one of these formats by static lookup.

pub mod format;
pub mod gaussian;
pub mod traits;
pub mod xyz;

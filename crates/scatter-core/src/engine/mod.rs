//! # Engine Module
//!
//! The machinery behind a scattering run: everything between "here is a base, a ligand
//! and some settings" and "here is an accepted composite".
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Run parameters, retry policy and their builder
//! - **Composition** ([`composite`]) - Fragment-aware concatenation of structures
//! - **Placement** ([`placement`]) - Rigid randomization plus candidate and reference builders
//! - **Tasks** ([`tasks`]) - Validation passes run over finished composites (clash detection)
//! - **Progress Monitoring** ([`progress`]) - Optional callbacks for front ends
//! - **Error Handling** ([`error`]) - The engine-level error type
//!
//! Every candidate is built from fresh copies of the inputs, so a rejected attempt leaves
//! nothing behind and attempts never share mutable state.

pub mod composite;
pub mod config;
pub mod error;
pub mod placement;
pub mod progress;
pub mod tasks;

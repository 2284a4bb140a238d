//! # Workflows Module
//!
//! High-level entry points that drive a complete generation run.
//!
//! ## Overview
//!
//! A workflow validates its inputs up front, builds whatever fixed state the run needs,
//! and then produces results one at a time while reporting progress. Precondition
//! failures abort before any sampling starts; rejected candidates never leave the
//! workflow.
//!
//! - **Scatter Workflow** ([`scatter`]) - Rejection sampling of ligand placements around
//!   a base structure, one accepted composite per requested output.

pub mod scatter;

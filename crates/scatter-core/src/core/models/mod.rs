//! # Core Models Module
//!
//! Data structures describing what gets scattered and where.
//!
//! ## Key Components
//!
//! - [`atom`] - A typed point: element symbol, position and covalent radius
//! - [`structure`] - A named, ordered sequence of atoms with value semantics
//! - [`region`] - The spherical sampling region anchored on a moiety
//! - [`error`] - Precondition failures raised while building or querying models
//!
//! ## Usage
//!
//! ```ignore
//! use ligscatter::core::models::{atom::Atom, structure::Structure};
//! use nalgebra::Point3;
//!
//! let water = Structure::new("Water", vec![
//!     Atom::new("O", Point3::new(0.0, 0.0, 0.0))?,
//!     Atom::new("H", Point3::new(1.0, 0.0, 0.0))?,
//!     Atom::new("H", Point3::new(0.0, 1.0, 0.0))?,
//! ]);
//! ```
//!
//! Atom order inside a [`structure::Structure`] is significant: it is the only record of
//! which fragment an atom came from once structures are merged.

pub mod atom;
pub mod error;
pub mod region;
pub mod structure;

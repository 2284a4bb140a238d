//! Element data and geometric helpers shared by the models and the engine.

pub mod elements;
pub mod geometry;

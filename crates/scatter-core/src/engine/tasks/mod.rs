//! Validation tasks run over assembled composites.
//!
//! Each task is a self-contained pass that inspects a finished composite and reports
//! what it finds; the placement workflow decides what to do with the outcome.

pub mod clash_detection;

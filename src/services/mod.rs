// External integrations

pub mod exercise_catalog;

pub use exercise_catalog::*;

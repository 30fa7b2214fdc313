// Domain entities and request bodies

pub mod exercise;
pub mod member;

pub use exercise::*;
pub use member::*;

pub mod force;

pub use force::*;

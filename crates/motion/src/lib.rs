pub mod orbit;
pub mod spin;

pub use orbit::*;
pub use spin::*;

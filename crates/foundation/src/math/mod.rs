pub mod angles;
pub mod lnglat;
pub mod vec2;

pub use angles::*;
pub use lnglat::*;
pub use vec2::*;

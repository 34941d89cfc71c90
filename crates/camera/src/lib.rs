pub mod fixture;
pub mod interaction;
pub mod surface;

pub use fixture::*;
pub use interaction::*;
pub use surface::*;

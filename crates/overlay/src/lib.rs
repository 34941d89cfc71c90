pub mod path;
pub mod registry;
pub mod reveal;
pub mod sweep;

pub use path::*;
pub use registry::*;
pub use reveal::*;
pub use sweep::*;

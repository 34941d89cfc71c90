pub mod easing;
pub mod ids;
pub mod math;
pub mod time;

// Foundation crate: small, well-tested primitives only.
pub use easing::*;
pub use ids::*;
pub use time::*;

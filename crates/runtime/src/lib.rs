pub mod animations;
pub mod event_bus;
pub mod frame;
pub mod metrics;
pub mod timers;

pub use animations::*;
pub use event_bus::*;
pub use frame::*;
pub use metrics::*;
pub use timers::*;

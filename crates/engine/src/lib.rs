pub mod config;
pub mod coordinator;
pub mod poi;

pub use config::*;
pub use coordinator::*;
pub use poi::*;

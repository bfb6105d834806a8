pub mod registry;
pub mod tracker;

pub use registry::SessionRegistry;
pub use tracker::{SessionStatus, SessionTracker};

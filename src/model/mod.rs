pub mod config;
pub mod project;
pub mod store;
pub mod well;

pub use config::*;
pub use project::*;
pub use store::*;
pub use well::*;

//! resources module
pub mod resource_manager;

/// Re-export
pub use resource_manager::{ResourceManager, Resources, default_data_dir};

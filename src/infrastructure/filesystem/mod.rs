pub mod config_store;
pub mod project_lock;

pub use config_store::ConfigStore;
pub use project_lock::ProjectLock;

pub mod ddev;
pub mod environment_interface;

pub use ddev::DdevEnvironment;
pub use environment_interface::EnvironmentManager;

#[cfg(test)]
pub use environment_interface::MockEnvironmentManager;

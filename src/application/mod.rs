//! Application layer: workflows and the services they share
pub mod services;
pub mod use_cases;

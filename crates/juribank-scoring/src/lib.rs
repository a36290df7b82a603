pub mod config;
pub mod error;
pub mod outcomes;
pub mod telemetry;

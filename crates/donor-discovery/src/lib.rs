pub mod config;
pub mod discovery;
pub mod error;
pub mod snapshot;
pub mod telemetry;

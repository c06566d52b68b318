pub mod config;
pub mod error;
pub mod seed;
pub mod telemetry;
pub mod workflows;

pub mod config;
pub mod datasets;
pub mod error;
pub mod render;
pub mod report;
pub mod telemetry;

// * Operations: logging setup for the binary and tests

pub mod telemetry;

pub use telemetry::{init_tracing_for, init_tracing_pretty_with_level, init_tracing_with_level};

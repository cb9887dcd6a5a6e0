//! Hybrid job matching engine and the ambient pieces (configuration, errors, tracing)
//! shared by the HTTP service and CLI.

pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;

//! Scenario-based tests for chap

mod bad_configuration;
mod builtin_stages;
mod shared_logging;

//! tests/mod.rs
mod automation_tests;
mod cli_tests;

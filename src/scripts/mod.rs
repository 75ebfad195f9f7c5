//! scripts/mod.rs
pub mod signin_scripts;

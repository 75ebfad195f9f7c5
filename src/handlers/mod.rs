//! handlers/mod.rs
//! Un handler por comando de la CLI.
pub mod automation_handler;
pub mod messages_handler;

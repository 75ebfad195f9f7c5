//! services/mod.rs
//! Módulo que agrupa distintos "servicios" o "capas de negocio" de la app.

pub mod automation_service;
pub mod browser_service;
pub mod result_service;
pub mod sms_service;

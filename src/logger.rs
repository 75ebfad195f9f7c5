//! logger.rs
//! Configuración del logger usando env_logger.

/// Nivel desde RUST_LOG; "info" si no está definido.
pub fn init_logger() {
    // try_init: no falla si ya hay un logger instalado
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();
}

//! Inicialización del logger (`env_logger` detrás de la fachada `log`).
//!
//! Todo sale por stderr. `RUST_LOG` tiene prioridad sobre el nivel por
//! defecto que viene de la configuración.

use env_logger::{Builder, Env};

/// Inicializa el logger global con `default_level` como filtro por defecto
///
/// Si ya había un logger instalado (ej: en tests) no hace nada.
pub fn init(default_level: &str) {
    let env = Env::default().default_filter_or(default_level);

    let result = Builder::from_env(env).format_timestamp_secs().try_init();

    if result.is_ok() {
        log::debug!("logger inicializado (nivel por defecto: {})", default_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init("debug");
        init("info");
    }
}

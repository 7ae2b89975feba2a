//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor con soporte para argumentos CLI y variables
//! de entorno. Sin argumentos el servidor escucha en el puerto 8000 de
//! todas las interfaces y sirve el directorio actual.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./reqlog_server --port 9000 --root ./public
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=9000 SERVE_ROOT=./public ./reqlog_server
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Puerto por defecto
pub const DEFAULT_PORT: u16 = 8000;

/// Configuración del servidor
#[derive(Debug, Clone, Parser)]
#[command(name = "reqlog_server")]
#[command(about = "Servidor de archivos estáticos que registra headers y bodies de cada request")]
#[command(version)]
pub struct Config {
    /// Puerto en el que escucha el servidor (0 = puerto efímero)
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio que se sirve
    #[arg(short = 'd', long, default_value = ".", env = "SERVE_ROOT")]
    pub root: PathBuf,

    /// Nivel de log cuando RUST_LOG no está definido
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use reqlog_server::config::Config;
    ///
    /// let mut config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8000");
    ///
    /// config.host = "::1".to_string();
    /// assert_eq!(config.address(), "[::1]:8000");
    /// ```
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }

        if !self.root.is_dir() {
            return Err(format!("Root {} is not a directory", self.root.display()));
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("🌐 Network:");
        println!("   Address:      {}", self.address());
        println!("📁 Files:");
        println!("   Root:         {}", self.root.display());
        println!("📝 Logging:");
        println!("   Level:        {} (RUST_LOG overrides)", self.log_level);
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: "0.0.0.0".to_string(),
            root: PathBuf::from("."),
            log_level: "info".to_string(),
        }
    }
}

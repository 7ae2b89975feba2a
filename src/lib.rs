//! # reqlog_server
//! src/lib.rs
//!
//! Servidor HTTP de desarrollo para inspeccionar tráfico: registra los
//! headers de cada request (y el body de los POST) y responde sirviendo
//! archivos del directorio raíz.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Lectura de requests y construcción de responses HTTP/1.0
//! - `files`: Servidor de archivos estáticos (paths, listados, MIME)
//! - `handler`: Log de headers/bodies y delegación a `files`
//! - `server`: Accept-loop secuencial y shutdown
//! - `config`: Argumentos CLI y variables de entorno
//! - `error`: Tipos de error
//! - `logging`: Inicialización del logger
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use reqlog_server::config::Config;
//! use reqlog_server::server::Server;
//!
//! let config = Config::default();
//! let server = Server::new(&config).expect("Error al iniciar servidor");
//! server.run().expect("Error en el accept-loop");
//! ```

pub mod config;
pub mod error;
pub mod files;
pub mod handler;
pub mod http;
pub mod logging;
pub mod server;

pub use error::{ServerError, ServerResult};

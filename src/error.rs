//! # Errores del Servidor
//! src/error.rs
//!
//! Errores que pueden escapar de un handler o del arranque del servidor.
//! Los errores de parsing del request tienen su propio tipo
//! (`http::request::ParseError`) y se convierten aquí con `?`.

use crate::http::request::ParseError;
use thiserror::Error;

pub type ServerResult<T, E = ServerError> = Result<T, E>;

#[derive(Debug, Error)]
pub enum ServerError {
    /// No se pudo abrir el listener (puerto ocupado, host inválido...)
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed request: {0}")]
    Parse(#[from] ParseError),

    /// El body de un POST no es UTF-8 válido
    #[error("request body is not valid UTF-8: {0}")]
    BodyNotUtf8(#[from] std::string::FromUtf8Error),

    #[error("failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

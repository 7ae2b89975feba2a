//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes, de a una
//! 3. Lee y registra el request
//! 4. Envía la respuesta y cierra la conexión

pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::{Server, ShutdownHandle};

//! # Módulo HTTP
//!
//! Implementación mínima de HTTP/1.x sobre TCP, sin librerías de alto nivel:
//!
//! - Lectura y parsing de requests (head + body de POST)
//! - Construcción de responses HTTP/1.0
//! - Códigos de estado
//! - Escapado de URLs y HTML
//!
//! El servidor responde siempre con HTTP/1.0 y cierra la conexión después
//! de cada respuesta, aunque el cliente hable HTTP/1.1.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /hello.txt HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 5\r\n
//! \r\n
//! world
//! ```

pub mod escape;
pub mod request;
pub mod response;
pub mod status;

pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;

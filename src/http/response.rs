//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP/1.0
//! y convertirlas a bytes para enviar al cliente.
//!
//! ## Formato de una respuesta HTTP/1.0
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 5\r\n
//! \r\n
//! world
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use reqlog_server::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "text/plain")
//!     .with_body("world");
//!
//! let bytes = response.to_bytes();
//! assert!(bytes.ends_with(b"\r\n\r\nworld"));
//! ```

use super::escape::escape_html;
use super::StatusCode;

/// Representa una respuesta HTTP/1.0 completa
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers en el orden en que se agregaron. Un nombre aparece una sola vez.
    headers: Vec<(String, String)>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe (sin importar mayúsculas), se sobrescribe
    /// manteniendo su posición.
    ///
    /// # Ejemplo
    /// ```
    /// use reqlog_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok)
    ///     .with_header("Content-Type", "text/html")
    ///     .with_header("content-type", "text/plain");
    ///
    /// assert_eq!(response.header("Content-Type"), Some("text/plain"));
    /// assert_eq!(response.headers().len(), 1);
    /// ```
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(entry) => entry.1 = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Establece el cuerpo de la respuesta desde un string
    ///
    /// Automáticamente calcula y agrega el header `Content-Length`.
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// Se usa para el contenido de archivos, que puede ser binario.
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        let length = self.body.len().to_string();
        self.add_header("Content-Length", &length);
        self
    }

    /// Crea una respuesta HTML exitosa (200 OK)
    pub fn html(body: &str) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", "text/html; charset=utf-8")
            .with_body(body)
    }

    /// Crea una redirección 301 hacia `location`, sin body
    pub fn redirect(location: &str) -> Self {
        Self::new(StatusCode::MovedPermanently).with_header("Location", location)
    }

    /// Crea una respuesta de error con la página HTML estándar
    ///
    /// # Ejemplo
    /// ```
    /// use reqlog_server::http::{Response, StatusCode};
    ///
    /// let response = Response::error(StatusCode::NotFound, "File not found");
    /// let body = String::from_utf8(response.body().to_vec()).unwrap();
    ///
    /// assert!(body.contains("Error code 404."));
    /// assert!(body.contains("Message: File not found."));
    /// ```
    pub fn error(status: StatusCode, message: &str) -> Self {
        let body = format!(
            "<head>\n\
             <title>Error response</title>\n\
             </head>\n\
             <body>\n\
             <h1>Error response</h1>\n\
             <p>Error code {code}.\n\
             <p>Message: {message}.\n\
             <p>Error code explanation: {code} = {explain}.\n\
             </body>\n",
            code = status.as_u16(),
            message = escape_html(message),
            explain = status.explanation(),
        );

        Self::new(status)
            .with_header("Content-Type", "text/html")
            .with_body(&body)
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.0 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = self.head_bytes();
        result.extend_from_slice(&self.body);
        result
    }

    /// Igual que `to_bytes` pero sin body (respuestas a HEAD)
    ///
    /// `Content-Length` se conserva para que el cliente conozca el tamaño.
    pub fn head_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();

        let status_line = format!("HTTP/1.0 {}\r\n", self.status);
        result.extend_from_slice(status_line.as_bytes());

        for (name, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        result.extend_from_slice(b"\r\n");
        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene los headers en orden
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Obtiene un header específico (sin importar mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

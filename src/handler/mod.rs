//! # Handler de Requests
//! src/handler/mod.rs
//!
//! Registra lo observable de cada request y delega la respuesta al
//! servidor de archivos estáticos.
//!
//! ```text
//! Request → log de headers → (POST: body al sink) → StaticFiles → Response
//! ```
//!
//! Un POST se responde exactamente igual que un GET al mismo path.

use crate::error::ServerResult;
use crate::files::StaticFiles;
use crate::http::{Method, Request, Response};
use log::error;
use std::io::{self, Write};

/// Handler que registra headers y bodies antes de servir archivos
pub struct LoggingHandler {
    files: StaticFiles,

    /// Destino del texto de los bodies de POST (stdout por defecto)
    body_sink: Box<dyn Write + Send>,
}

impl LoggingHandler {
    /// Crea un handler que escribe los bodies en stdout
    pub fn new(files: StaticFiles) -> Self {
        Self::with_body_sink(files, Box::new(io::stdout()))
    }

    /// Crea un handler con otro destino para los bodies
    ///
    /// # Ejemplo
    /// ```
    /// use reqlog_server::files::StaticFiles;
    /// use reqlog_server::handler::LoggingHandler;
    ///
    /// let handler = LoggingHandler::with_body_sink(StaticFiles::new("."), Box::new(std::io::sink()));
    /// ```
    pub fn with_body_sink(files: StaticFiles, body_sink: Box<dyn Write + Send>) -> Self {
        Self { files, body_sink }
    }

    /// Servidor de archivos usado para las respuestas
    pub fn files(&self) -> &StaticFiles {
        &self.files
    }

    /// Despacha el request según su método
    pub fn dispatch(&mut self, request: &Request) -> ServerResult<Response> {
        match request.method() {
            Method::GET => self.handle_get(request),
            Method::HEAD => self.handle_head(request),
            Method::POST => self.handle_post(request),
        }
    }

    /// Registra los headers y sirve el path pedido
    pub fn handle_get(&mut self, request: &Request) -> ServerResult<Response> {
        self.log_headers(request);
        Ok(self.files.respond(request))
    }

    /// Registra headers y body, y responde como si fuera un GET
    ///
    /// Si hay body se decodifica como UTF-8 y se escribe en el sink seguido
    /// de `\n` (un body vacío produce una línea vacía). Un body que no es
    /// UTF-8 válido corta el request con `ServerError::BodyNotUtf8`.
    pub fn handle_post(&mut self, request: &Request) -> ServerResult<Response> {
        self.log_headers(request);

        if let Some(body) = request.body() {
            let text = String::from_utf8(body.to_vec())?;
            writeln!(self.body_sink, "{}", text)?;
            self.body_sink.flush()?;
        }

        Ok(self.files.respond(request))
    }

    /// Igual que GET pero sin registrar headers
    ///
    /// El servidor se encarga de no mandar el body.
    pub fn handle_head(&mut self, request: &Request) -> ServerResult<Response> {
        Ok(self.files.respond(request))
    }

    fn log_headers(&self, request: &Request) {
        error!("{}", request.header_block());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServerError;
    use crate::http::StatusCode;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Sink compartido para revisar lo que se escribió
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn setup() -> (TempDir, LoggingHandler, SharedBuffer) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hello.txt"), "world").unwrap();

        let sink = SharedBuffer::default();
        let handler = LoggingHandler::with_body_sink(StaticFiles::new(dir.path()), Box::new(sink.clone()));
        (dir, handler, sink)
    }

    fn request(raw: &[u8]) -> Request {
        Request::read_from(&mut &raw[..]).unwrap().unwrap()
    }

    #[test]
    fn test_get_serves_file() {
        let (_dir, mut handler, sink) = setup();
        let response = handler.dispatch(&request(b"GET /hello.txt HTTP/1.1\r\n\r\n")).unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"world");
        assert_eq!(sink.contents(), "");
    }

    #[test]
    fn test_post_prints_body_and_mirrors_get() {
        let (_dir, mut handler, sink) = setup();

        let get = handler.dispatch(&request(b"GET /hello.txt HTTP/1.1\r\n\r\n")).unwrap();
        let post = handler
            .dispatch(&request(b"POST /hello.txt HTTP/1.1\r\nContent-Length: 4\r\n\r\nping"))
            .unwrap();

        assert_eq!(sink.contents(), "ping\n");
        assert_eq!(post.status(), get.status());
        assert_eq!(post.body(), get.body());
    }

    #[test]
    fn test_post_zero_length_prints_empty_line() {
        let (_dir, mut handler, sink) = setup();
        let response = handler
            .dispatch(&request(b"POST /hello.txt HTTP/1.1\r\nContent-Length: 0\r\n\r\n"))
            .unwrap();

        assert_eq!(sink.contents(), "\n");
        assert_eq!(response.body(), b"world");
    }

    #[test]
    fn test_post_without_body_prints_nothing() {
        let (_dir, mut handler, sink) = setup();
        let response = handler.dispatch(&request(b"POST /missing HTTP/1.1\r\n\r\n")).unwrap();

        assert_eq!(sink.contents(), "");
        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_post_invalid_utf8_is_error() {
        let (_dir, mut handler, sink) = setup();
        let result = handler.dispatch(&request(b"POST / HTTP/1.1\r\nContent-Length: 2\r\n\r\n\xff\xfe"));

        assert!(matches!(result, Err(ServerError::BodyNotUtf8(_))));
        assert_eq!(sink.contents(), "");
    }

    #[test]
    fn test_head_returns_get_response() {
        let (_dir, mut handler, _sink) = setup();
        let response = handler.dispatch(&request(b"HEAD /hello.txt HTTP/1.1\r\n\r\n")).unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.header("Content-Length"), Some("5"));
    }
}

//! # Lectura y Parsing de Requests HTTP
//! src/http/request.rs
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /hello.txt HTTP/1.1\r\n
//! Host: localhost:8000\r\n
//! Content-Length: 4\r\n
//! \r\n
//! ping
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path?query HTTP/1.x`
//! 2. **Headers**: Pares `Name: Value` en orden de llegada (se permiten duplicados)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: Solo se lee en POST y solo si hay `Content-Length`

use crate::error::{ServerError, ServerResult};
use crate::http::StatusCode;
use std::io::{self, BufRead, Read};
use std::str::FromStr;
use thiserror::Error;

/// Largo máximo de una línea del head (request line o header)
pub const MAX_LINE_LENGTH: usize = 65_536;

/// Cantidad máxima de headers (las líneas de continuación no cuentan)
pub const MAX_HEADERS: usize = 100;

/// Tamaño máximo del head completo (request line + headers)
pub const MAX_HEAD_LENGTH: usize = 1 << 20;

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un archivo o listado
    GET,

    /// HEAD - Como GET pero solo retorna headers
    HEAD,

    /// POST - Se registra el body y se responde como GET
    POST,
}

impl Method {
    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
        }
    }
}

impl FromStr for Method {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "POST" => Ok(Method::POST),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errores que pueden ocurrir al parsear el head de un request
///
/// Los mensajes terminan en la página de error que recibe el cliente.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Request vacío (el cliente cerró o mandó una línea en blanco)
    #[error("Empty request")]
    EmptyRequest,

    /// Formato inválido de la request line
    #[error("Bad request syntax ('{0}')")]
    InvalidRequestLine(String),

    /// Versión distinta de HTTP/1.0 o HTTP/1.1
    #[error("Bad request version ('{0}')")]
    InvalidHttpVersion(String),

    #[error("Unsupported method ('{0}')")]
    UnsupportedMethod(String),

    /// Header sin `:` o continuación sin header previo
    #[error("Invalid header ('{0}')")]
    InvalidHeader(String),

    #[error("Line too long")]
    LineTooLong,

    #[error("Too many headers")]
    TooManyHeaders,

    #[error("Request head too large")]
    HeadTooLarge,

    /// `Content-Length` que no es un entero no negativo
    #[error("Invalid Content-Length ('{0}')")]
    InvalidContentLength(String),
}

impl ParseError {
    /// Código con el que se responde este error
    pub fn status(&self) -> StatusCode {
        match self {
            ParseError::UnsupportedMethod(_) => StatusCode::NotImplemented,
            _ => StatusCode::BadRequest,
        }
    }
}

/// Representa un request HTTP parseado
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Método HTTP (GET, HEAD, POST)
    method: Method,

    /// Target tal como llegó (ej: "/docs/?page=2")
    target: String,

    /// Path sin query ni fragmento, aún sin decodificar (ej: "/docs/")
    path: String,

    /// Query string sin el `?` (ej: "page=2")
    query: Option<String>,

    /// Versión HTTP ("HTTP/1.0" o "HTTP/1.1")
    version: String,

    /// Headers en orden de llegada
    headers: Vec<(String, String)>,

    /// Body del request, solo presente en POST con `Content-Length`
    body: Option<Vec<u8>>,
}

impl Request {
    /// Lee un request completo desde el stream
    ///
    /// Lee el head línea por línea hasta la línea vacía y, si es un POST
    /// con `Content-Length`, exactamente esa cantidad de bytes de body.
    ///
    /// # Retorna
    ///
    /// * `Ok(Some(Request))` - Request leído
    /// * `Ok(None)` - El cliente cerró sin mandar nada
    /// * `Err(ServerError::Parse(_))` - Head malformado
    /// * `Err(ServerError::Io(_))` - Error de socket o body truncado
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use reqlog_server::http::{Method, Request};
    ///
    /// let raw = b"POST /hello.txt HTTP/1.1\r\nContent-Length: 4\r\n\r\nping";
    /// let request = Request::read_from(&mut &raw[..]).unwrap().unwrap();
    ///
    /// assert_eq!(request.method(), Method::POST);
    /// assert_eq!(request.body(), Some(&b"ping"[..]));
    /// ```
    pub fn read_from<R: BufRead>(reader: &mut R) -> ServerResult<Option<Self>> {
        let mut head = Vec::new();
        let mut line = Vec::new();

        if read_line(reader, &mut line)? == 0 {
            return Ok(None);
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            return Err(ParseError::EmptyRequest.into());
        }
        head.extend_from_slice(&line);

        // La cantidad de headers la valida `parse`
        loop {
            if read_line(reader, &mut line)? == 0 {
                break;
            }
            if head.len() + line.len() > MAX_HEAD_LENGTH {
                return Err(ParseError::HeadTooLarge.into());
            }
            head.extend_from_slice(&line);
            if line == b"\r\n" || line == b"\n" {
                break;
            }
        }

        let mut request = Self::parse(&head)?;

        if request.method == Method::POST {
            if let Some(length) = request.content_length()? {
                let mut body = Vec::new();
                reader.by_ref().take(length as u64).read_to_end(&mut body)?;

                if body.len() < length {
                    return Err(ServerError::Io(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("body truncated: expected {} bytes, got {}", length, body.len()),
                    )));
                }
                request.body = Some(body);
            }
        }

        Ok(Some(request))
    }

    /// Parsea el head de un request (request line + headers)
    ///
    /// El body no se toca; para eso está `read_from`.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use reqlog_server::http::Request;
    ///
    /// let raw = b"GET /hello.txt?x=1 HTTP/1.0\r\nHost: localhost\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/hello.txt");
    /// assert_eq!(request.query(), Some("x=1"));
    /// assert_eq!(request.header("host"), Some("localhost"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let text = String::from_utf8_lossy(buffer);
        let mut lines = text.lines();

        let request_line = match lines.next() {
            Some(line) if !line.trim().is_empty() => line,
            _ => return Err(ParseError::EmptyRequest),
        };

        // 1. Request line
        let (method, target, version) = Self::parse_request_line(request_line)?;
        let (path, query) = Self::split_target(&target);

        // 2. Headers hasta la línea vacía
        let headers = Self::parse_headers(lines)?;

        Ok(Request {
            method,
            target,
            path,
            query,
            version,
            headers,
            body: None,
        })
    }

    /// Formato: `GET /path?query HTTP/1.1`
    ///
    /// La versión se valida antes que el método, así un método
    /// desconocido con versión correcta termina en 501 y no en 400.
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine(line.trim().to_string()));
        }

        let version = parts[2].to_string();
        if version != "HTTP/1.0" && version != "HTTP/1.1" {
            return Err(ParseError::InvalidHttpVersion(version));
        }

        let method = parts[0].parse::<Method>()?;

        Ok((method, parts[1].to_string(), version))
    }

    /// Separa el target en path y query, descartando el fragmento
    ///
    /// Ejemplo: "/docs/?page=2#top" → ("/docs/", Some("page=2"))
    fn split_target(target: &str) -> (String, Option<String>) {
        let target = match target.split_once('#') {
            Some((before, _)) => before,
            None => target,
        };

        match target.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query.to_string())),
            None => (target.to_string(), None),
        }
    }

    /// Parsea los headers HTTP
    ///
    /// Cada header tiene formato `Name: Value`. Una línea que empieza con
    /// espacio o tab continúa el valor del header anterior.
    fn parse_headers<'a>(
        lines: impl Iterator<Item = &'a str>,
    ) -> Result<Vec<(String, String)>, ParseError> {
        let mut headers: Vec<(String, String)> = Vec::new();

        for line in lines {
            if line.trim().is_empty() {
                break;
            }

            if line.starts_with(' ') || line.starts_with('\t') {
                match headers.last_mut() {
                    Some((_, value)) => {
                        value.push(' ');
                        value.push_str(line.trim());
                        continue;
                    }
                    None => return Err(ParseError::InvalidHeader(line.to_string())),
                }
            }

            if headers.len() >= MAX_HEADERS {
                return Err(ParseError::TooManyHeaders);
            }

            match line.split_once(':') {
                Some((name, value)) if !name.trim().is_empty() => {
                    headers.push((name.trim().to_string(), value.trim().to_string()));
                }
                _ => return Err(ParseError::InvalidHeader(line.to_string())),
            }
        }

        Ok(headers)
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el target completo (path + query + fragmento)
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la query string, si hay
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Obtiene el primer header con ese nombre (sin importar mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Valor de `Content-Length`, si está presente
    pub fn content_length(&self) -> Result<Option<usize>, ParseError> {
        match self.header("Content-Length") {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map(Some)
                .map_err(|_| ParseError::InvalidContentLength(raw.to_string())),
        }
    }

    /// Obtiene el body del request
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Request line tal como llegó, para el log de acceso
    pub fn request_line(&self) -> String {
        format!("{} {} {}", self.method, self.target, self.version)
    }

    /// Bloque de headers listo para el log, una línea por header
    pub fn header_block(&self) -> String {
        self.headers
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Lee una línea (incluyendo el `\n`) con límite de largo
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> ServerResult<usize> {
    buf.clear();
    let read = reader
        .by_ref()
        .take(MAX_LINE_LENGTH as u64 + 1)
        .read_until(b'\n', buf)?;

    if read > MAX_LINE_LENGTH {
        return Err(ParseError::LineTooLong.into());
    }

    Ok(read)
}

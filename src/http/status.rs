//! # Códigos de Estado HTTP
//!
//! Códigos que el servidor puede devolver. Es un subconjunto pequeño:
//!
//! - **2xx**: Éxito (200 OK)
//! - **3xx**: Redirección de directorios sin `/` final (301)
//! - **4xx**: Error del cliente (400, 404)
//! - **5xx**: Método no soportado (501)

/// Representa los códigos de estado HTTP que soporta nuestro servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - Archivo o listado servido
    Ok = 200,

    /// 301 Moved Permanently - Directorio pedido sin `/` final
    MovedPermanently = 301,

    /// 400 Bad Request - Request line, headers o Content-Length inválidos
    BadRequest = 400,

    /// 404 Not Found - El path no existe o no se puede leer
    NotFound = 404,

    /// 501 Not Implemented - Método distinto de GET, HEAD o POST
    NotImplemented = 501,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use reqlog_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    ///
    /// # Ejemplo
    /// ```
    /// use reqlog_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::MovedPermanently => "Moved Permanently",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }

    /// Explicación larga que se muestra en la página de error
    pub fn explanation(&self) -> &'static str {
        match self {
            StatusCode::Ok => "Request fulfilled, document follows",
            StatusCode::MovedPermanently => "Object moved permanently -- see URI list",
            StatusCode::BadRequest => "Bad request syntax or unsupported method",
            StatusCode::NotFound => "Nothing matches the given URI",
            StatusCode::NotImplemented => "Server does not support this operation",
        }
    }

    /// Verifica si el código indica éxito (2xx)
    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Ok)
    }

    /// Verifica si el código indica error del cliente (4xx)
    ///
    /// # Ejemplo
    /// ```
    /// use reqlog_server::http::StatusCode;
    /// assert!(StatusCode::BadRequest.is_client_error());
    /// assert!(!StatusCode::Ok.is_client_error());
    /// ```
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.as_u16())
    }

    /// Verifica si el código indica error del servidor (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.as_u16())
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_values() {
        assert_eq!(StatusCode::Ok.as_u16(), 200);
        assert_eq!(StatusCode::MovedPermanently.as_u16(), 301);
        assert_eq!(StatusCode::BadRequest.as_u16(), 400);
        assert_eq!(StatusCode::NotFound.as_u16(), 404);
        assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
    }

    #[test]
    fn test_reason_phrases() {
        assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
        assert_eq!(StatusCode::MovedPermanently.reason_phrase(), "Moved Permanently");
        assert_eq!(StatusCode::NotImplemented.reason_phrase(), "Not Implemented");
    }

    #[test]
    fn test_error_classes() {
        assert!(StatusCode::Ok.is_success());
        assert!(!StatusCode::MovedPermanently.is_success());
        assert!(StatusCode::NotFound.is_client_error());
        assert!(!StatusCode::NotImplemented.is_client_error());
        assert!(StatusCode::NotImplemented.is_server_error());
        assert!(!StatusCode::BadRequest.is_server_error());
    }

    #[test]
    fn test_display() {
        assert_eq!(StatusCode::Ok.to_string(), "200 OK");
        assert_eq!(StatusCode::NotFound.to_string(), "404 Not Found");
        assert_eq!(StatusCode::NotImplemented.to_string(), "501 Not Implemented");
    }
}

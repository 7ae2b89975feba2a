//! # Escapado de URLs y HTML
//! src/http/escape.rs
//!
//! Utilidades pequeñas usadas al traducir paths y al generar HTML:
//! - `percent_decode`: `%20` → espacio (solo paths, `+` se deja igual)
//! - `percent_encode`: para los links del listado de directorios
//! - `escape_html`: para nombres de archivo y mensajes de error

/// Decodifica secuencias `%XX` de un path
///
/// Las secuencias inválidas (`%zz`, `%` al final) se dejan tal cual.
/// Bytes que no forman UTF-8 válido se reemplazan por U+FFFD.
///
/// # Ejemplo
/// ```
/// use reqlog_server::http::escape::percent_decode;
///
/// assert_eq!(percent_decode("/hello%20world.txt"), "/hello world.txt");
/// assert_eq!(percent_decode("/100%"), "/100%");
/// ```
pub fn percent_decode(input: &str) -> String {
    let decoded = urlencoding::decode_binary(input.as_bytes());
    String::from_utf8_lossy(&decoded).into_owned()
}

/// Codifica un nombre para usarlo dentro de un `href`
///
/// Se conservan letras, dígitos, `_ . - ~` y `/`.
///
/// # Ejemplo
/// ```
/// use reqlog_server::http::escape::percent_encode;
///
/// assert_eq!(percent_encode("my file.txt"), "my%20file.txt");
/// assert_eq!(percent_encode("docs/"), "docs/");
/// ```
pub fn percent_encode(input: &str) -> String {
    // urlencoding codifica también `/`, así que se codifica por segmento
    input
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

/// Escapa `& < > "` para insertar texto en HTML
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_decode_basic() {
        assert_eq!(percent_decode("/a%20b"), "/a b");
        assert_eq!(percent_decode("/%41%42c"), "/ABc");
        assert_eq!(percent_decode("/plain"), "/plain");
    }

    #[test]
    fn test_percent_decode_keeps_plus() {
        assert_eq!(percent_decode("/a+b"), "/a+b");
    }

    #[test]
    fn test_percent_decode_invalid_sequences() {
        assert_eq!(percent_decode("/%zz"), "/%zz");
        assert_eq!(percent_decode("/%4"), "/%4");
        assert_eq!(percent_decode("%"), "%");
    }

    #[test]
    fn test_percent_decode_utf8() {
        assert_eq!(percent_decode("/caf%C3%A9"), "/café");
    }

    #[test]
    fn test_percent_decode_mixed_case_hex() {
        assert_eq!(percent_decode("/%2f%2F"), "///");
    }

    #[test]
    fn test_percent_decode_invalid_utf8_is_lossy() {
        assert_eq!(percent_decode("/%FF"), "/\u{FFFD}");
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("a b&c"), "a%20b%26c");
        assert_eq!(percent_encode("café"), "caf%C3%A9");
        assert_eq!(percent_encode("sub-dir_1.0~/"), "sub-dir_1.0~/");
        assert_eq!(percent_encode("a b/c?d"), "a%20b/c%3Fd");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>\"x\" & y</b>"), "&lt;b&gt;&quot;x&quot; &amp; y&lt;/b&gt;");
        assert_eq!(escape_html("plain.txt"), "plain.txt");
    }
}

//! Content-Type a partir de la extensión del archivo (vía `mime_guess`).

use std::path::Path;

/// Tipo usado cuando la extensión no es conocida
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Infiere el `Content-Type` de un archivo por su extensión
///
/// La comparación no distingue mayúsculas.
///
/// # Ejemplo
/// ```
/// use reqlog_server::files::mime::content_type;
/// use std::path::Path;
///
/// assert_eq!(content_type(Path::new("index.HTML")), "text/html");
/// assert_eq!(content_type(Path::new("data.unknownext")), "application/octet-stream");
/// ```
pub fn content_type(path: &Path) -> &'static str {
    mime_guess::from_path(path).first_raw().unwrap_or(DEFAULT_CONTENT_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(content_type(Path::new("hello.txt")), "text/plain");
        assert_eq!(content_type(Path::new("a/b/style.css")), "text/css");
        assert_eq!(content_type(Path::new("photo.JPG")), "image/jpeg");
        assert_eq!(content_type(Path::new("page.htm")), "text/html");
        assert!(content_type(Path::new("app.js")).ends_with("javascript"));
    }

    #[test]
    fn test_modern_extensions() {
        assert_eq!(content_type(Path::new("image.avif")), "image/avif");
        assert_eq!(content_type(Path::new("doc.pdf")), "application/pdf");
    }

    #[test]
    fn test_unknown_or_missing_extension() {
        assert_eq!(content_type(Path::new("Makefile")), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type(Path::new("archive.xyzq")), DEFAULT_CONTENT_TYPE);
    }
}

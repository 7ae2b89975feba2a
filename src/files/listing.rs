//! # Listado de Directorios
//! src/files/listing.rs
//!
//! Genera la página HTML que se sirve cuando se pide un directorio que no
//! tiene `index.html` ni `index.htm`.
//!
//! - Las entradas se ordenan sin distinguir mayúsculas
//! - Los directorios llevan `/` al final (en el texto y en el link)
//! - Los symlinks se muestran con `@` al final

use crate::http::escape::{escape_html, percent_decode, percent_encode};
use std::fs;
use std::io;
use std::path::Path;

/// Renderiza el listado de `dir`, pedido como `url_path`
///
/// # Errores
///
/// Retorna el error de `read_dir` si el directorio no se puede leer.
pub fn render(dir: &Path, url_path: &str) -> io::Result<String> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let is_symlink = entry.file_type().map(|t| t.is_symlink()).unwrap_or(false);
        entries.push((entry.file_name().to_string_lossy().into_owned(), entry.path(), is_symlink));
    }
    entries.sort_by_key(|(name, _, _)| name.to_lowercase());

    let title = escape_html(&percent_decode(url_path));
    let mut html = format!(
        "<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 3.2 Final//EN\"><html>\n\
         <title>Directory listing for {title}</title>\n\
         <body>\n\
         <h2>Directory listing for {title}</h2>\n\
         <hr>\n\
         <ul>\n",
        title = title
    );

    for (name, full_path, is_symlink) in entries {
        let mut display = name.clone();
        let mut link = name.clone();

        // is_dir sigue symlinks: un link a directorio también lleva `/`
        if full_path.is_dir() {
            display.push('/');
            link.push('/');
        }
        if is_symlink {
            display = format!("{}@", name);
        }

        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a>\n",
            percent_encode(&link),
            escape_html(&display)
        ));
    }

    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(html)
}

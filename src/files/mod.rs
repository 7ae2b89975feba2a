//! # Servidor de Archivos Estáticos
//! src/files/mod.rs
//!
//! Traduce el path de un request a un archivo bajo el directorio raíz y
//! construye la respuesta:
//!
//! ```text
//! /docs      (directorio) → 301 Location: /docs/
//! /docs/     (directorio) → index.html | index.htm | listado HTML
//! /hello.txt (archivo)    → 200 con el contenido
//! /missing   (no existe)  → 404 File not found
//! ```
//!
//! El path nunca sale de la raíz: los `..` se resuelven antes de unirlo.

pub mod listing;
pub mod mime;

use crate::http::escape::percent_decode;
use crate::http::{Request, Response, StatusCode};
use log::{debug, warn};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Archivos que se sirven en lugar del listado, en orden de preferencia
pub const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Sirve archivos de un directorio raíz
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    /// Crea un servidor de archivos con raíz en `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directorio raíz
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Convierte el path de la URL en un path del sistema de archivos
    ///
    /// Decodifica `%XX`, descarta segmentos vacíos, `.` y los que tienen
    /// `\`, y resuelve `..` sin pasar de la raíz.
    ///
    /// # Ejemplo
    /// ```
    /// use reqlog_server::files::StaticFiles;
    /// use std::path::Path;
    ///
    /// let files = StaticFiles::new("/srv");
    /// assert_eq!(files.translate_path("/a/../../etc/passwd"), Path::new("/srv/etc/passwd"));
    /// assert_eq!(files.translate_path("/my%20file.txt"), Path::new("/srv/my file.txt"));
    /// ```
    pub fn translate_path(&self, url_path: &str) -> PathBuf {
        let decoded = percent_decode(url_path);

        let mut segments: Vec<&str> = Vec::new();
        for segment in decoded.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                s if s.contains('\\') => {}
                s => segments.push(s),
            }
        }

        let mut path = self.root.clone();
        for segment in segments {
            path.push(segment);
        }
        path
    }

    /// Construye la respuesta para el path del request
    ///
    /// Nunca falla: cualquier problema de lectura termina en un 404.
    pub fn respond(&self, request: &Request) -> Response {
        let url_path = request.path();
        let fs_path = self.translate_path(url_path);

        if fs_path.is_dir() {
            if !url_path.ends_with('/') {
                let location = match request.query() {
                    Some(query) => format!("{}/?{}", url_path, query),
                    None => format!("{}/", url_path),
                };
                return Response::redirect(&location);
            }

            for index in INDEX_FILES {
                let candidate = fs_path.join(index);
                if candidate.is_file() {
                    return self.serve_file(&candidate);
                }
            }

            return self.serve_listing(&fs_path, url_path);
        }

        // Un archivo pedido como directorio no existe
        if url_path.ends_with('/') {
            return Response::error(StatusCode::NotFound, "File not found");
        }

        self.serve_file(&fs_path)
    }

    fn serve_file(&self, path: &Path) -> Response {
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                debug!("no se pudo abrir {}: {}", path.display(), e);
                return Response::error(StatusCode::NotFound, "File not found");
            }
        };

        let mut body = Vec::new();
        if let Err(e) = file.read_to_end(&mut body) {
            debug!("no se pudo leer {}: {}", path.display(), e);
            return Response::error(StatusCode::NotFound, "File not found");
        }

        let mut response = Response::new(StatusCode::Ok)
            .with_header("Content-Type", mime::content_type(path));

        if let Ok(modified) = file.metadata().and_then(|m| m.modified()) {
            response.add_header("Last-Modified", &httpdate::fmt_http_date(modified));
        }

        response.with_body_bytes(body)
    }

    fn serve_listing(&self, dir: &Path, url_path: &str) -> Response {
        match listing::render(dir, url_path) {
            Ok(html) => Response::html(&html),
            Err(e) => {
                warn!("no se pudo listar {}: {}", dir.display(), e);
                Response::error(StatusCode::NotFound, "No permission to list directory")
            }
        }
    }
}

//! # Handler de Archivos Estáticos
//! src/files/handler.rs
//!
//! El handler de requests del servidor: reescribe la ruta raíz al
//! documento del dashboard, resuelve el path contra el directorio raíz
//! y produce la respuesta (archivo, listado de directorio, 304 o 404).
//!
//! Los headers CORS NO se agregan aquí: el servidor los aplica al
//! finalizar toda respuesta, incluidas las de error.

use crate::files::{mime, resolver};
use crate::http::{Method, Request, Response, StatusCode};
use std::fs;
use std::path::Path;

/// Atiende un request contra el directorio raíz.
///
/// - `/` se reescribe a `/{index}` antes de resolver
/// - GET/HEAD: servido estático normal
/// - POST/OPTIONS: 405 (sin lógica específica de método; el preflight
///   CORS no está implementado)
pub fn serve(request: &Request, root: &Path, index: &str) -> Response {
    match request.method() {
        Method::GET | Method::HEAD => {}
        Method::POST | Method::OPTIONS => {
            return Response::error(
                StatusCode::MethodNotAllowed,
                &format!("Method {} not allowed", request.method().as_str()),
            )
            .with_header("Allow", "GET, HEAD");
        }
    }

    // Reescritura de la raíz al documento del dashboard
    let raw_path = if request.path() == "/" {
        format!("/{}", index)
    } else {
        request.path().to_string()
    };

    let decoded = resolver::url_decode(&raw_path);
    let clean = resolver::sanitize_path(&decoded);
    let fs_path = root.join(clean.trim_start_matches('/'));

    if !fs_path.exists() {
        return Response::error(
            StatusCode::NotFound,
            &format!("File not found: {}", clean),
        );
    }

    if fs_path.is_dir() {
        // index.html del directorio si existe, si no, listado
        let dir_index = fs_path.join("index.html");
        if dir_index.is_file() {
            return serve_file(&dir_index, request);
        }

        return match resolver::directory_listing_html(&fs_path, &clean) {
            Ok(html) => Response::new(StatusCode::Ok)
                .with_header("Content-Type", "text/html; charset=utf-8")
                .with_body(&html),
            Err(e) => Response::error(
                StatusCode::InternalServerError,
                &format!("Failed to list directory: {}", e),
            ),
        };
    }

    serve_file(&fs_path, request)
}

/// Sirve un archivo regular, con soporte de GET condicional por ETag
fn serve_file(path: &Path, request: &Request) -> Response {
    let meta = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => {
            return Response::error(
                StatusCode::InternalServerError,
                &format!("Failed to stat file: {}", e),
            );
        }
    };

    let etag = resolver::file_etag(path, &meta);

    // GET condicional: si el navegador ya tiene esta versión, 304
    if let Some(candidate) = request.header("If-None-Match") {
        if candidate.trim() == etag {
            return Response::new(StatusCode::NotModified).with_header("ETag", &etag);
        }
    }

    match fs::read(path) {
        Ok(data) => Response::new(StatusCode::Ok)
            .with_header("Content-Type", mime::content_type_for(path))
            .with_header("ETag", &etag)
            .with_body_bytes(data),
        Err(e) => Response::error(
            StatusCode::InternalServerError,
            &format!("Failed to read file: {}", e),
        ),
    }
}

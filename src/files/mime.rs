//! # Detección de Content-Type
//! src/files/mime.rs
//!
//! Mapea extensiones de archivo a su Content-Type. Cubre los tipos que
//! aparecen en un dashboard estático (HTML/CSS/JS, imágenes, fuentes);
//! cualquier otra cosa se sirve como `application/octet-stream`.

use std::path::Path;

/// Obtiene el Content-Type para un archivo según su extensión.
///
/// # Ejemplo
/// ```
/// use std::path::Path;
/// use dashboard_server::files::content_type_for;
///
/// assert_eq!(content_type_for(Path::new("style.css")), "text/css; charset=utf-8");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        // Texto
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "json" | "map" => "application/json",
        "txt" => "text/plain; charset=utf-8",
        "xml" => "application/xml",
        "csv" => "text/csv",
        "md" => "text/markdown; charset=utf-8",

        // Imágenes
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",

        // Fuentes
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",

        // Otros
        "pdf" => "application/pdf",
        "wasm" => "application/wasm",

        _ => "application/octet-stream",
    }
}

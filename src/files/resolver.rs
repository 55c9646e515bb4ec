//! # Resolución de Paths y Utilidades de Archivos
//! src/files/resolver.rs
//!
//! Decodificación percent-encoding, sanitización contra traversal,
//! cálculo de ETags, listado HTML de directorios y enumeración de los
//! assets del arranque.

use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;
use std::time::UNIX_EPOCH;

/// Decodifica percent-encoding de una URL (%20 → espacio, etc.)
pub fn url_decode(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '%' {
            let hex: String = chars.by_ref().take(2).collect();
            if hex.len() == 2 {
                if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                    result.push(byte as char);
                    continue;
                }
            }
            // Secuencia % inválida: se deja tal cual
            result.push('%');
            result.push_str(&hex);
        } else if c == '+' {
            result.push(' ');
        } else {
            result.push(c);
        }
    }

    result
}

/// Sanitiza un path HTTP para que la resolución no escape de la raíz.
///
/// Elimina componentes vacíos, `.` y `..`; el resultado siempre es un
/// path absoluto dentro de la raíz.
pub fn sanitize_path(path: &str) -> String {
    let parts: Vec<&str> = path
        .split('/')
        .filter(|p| !p.is_empty() && *p != "." && *p != "..")
        .collect();

    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", parts.join("/"))
    }
}

/// Calcula el ETag (fuerte, entre comillas) de un archivo.
///
/// SHA-256 sobre identidad + tamaño + mtime: si el archivo cambia,
/// cambia el ETag y el navegador vuelve a descargarlo.
pub fn file_etag(path: &Path, meta: &fs::Metadata) -> String {
    let mtime = meta
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| (d.as_secs(), d.subsec_nanos()))
        .unwrap_or((0, 0));

    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    hasher.update(meta.len().to_le_bytes());
    hasher.update(mtime.0.to_le_bytes());
    hasher.update(mtime.1.to_le_bytes());
    let digest = hasher.finalize();

    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    format!("\"{}\"", &hex[..32])
}

/// Enumera los assets del dashboard en la raíz: archivos con extensión
/// `.html`, `.css` o `.js`, ordenados por nombre.
pub fn list_assets(root: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let ext = Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        if matches!(ext.as_str(), "html" | "css" | "js") {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

/// Formatea un tamaño de archivo para el listado de directorios
pub fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.1} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.1} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.1} KB", size as f64 / KB as f64)
    } else {
        format!("{} B", size)
    }
}

/// Genera el HTML del listado de un directorio.
///
/// Directorios primero, luego archivos, ambos en orden alfabético.
pub fn directory_listing_html(dir: &Path, url_path: &str) -> io::Result<String> {
    let mut items: Vec<_> = fs::read_dir(dir)?.filter_map(|e| e.ok()).collect();

    items.sort_by(|a, b| {
        let a_dir = a.file_type().map(|t| t.is_dir()).unwrap_or(false);
        let b_dir = b.file_type().map(|t| t.is_dir()).unwrap_or(false);
        match (a_dir, b_dir) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            _ => a.file_name().cmp(&b.file_name()),
        }
    });

    let mut rows = String::new();

    if url_path != "/" {
        let parent = Path::new(url_path)
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|| "/".to_string());
        rows.push_str(&format!(
            "      <tr><td><a href=\"{}\">../</a></td><td>-</td></tr>\n",
            parent
        ));
    }

    for entry in items {
        let name = entry.file_name().to_string_lossy().to_string();
        let meta = entry.metadata()?;
        let is_dir = meta.is_dir();

        let display_name = if is_dir { format!("{}/", name) } else { name.clone() };
        let href = format!("{}/{}", url_path.trim_end_matches('/'), name);
        let size = if is_dir { "-".to_string() } else { format_size(meta.len()) };

        rows.push_str(&format!(
            "      <tr><td><a href=\"{}\">{}</a></td><td>{}</td></tr>\n",
            href, display_name, size
        ));
    }

    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"utf-8\">\n  <title>Index of {path}</title>\n  <style>\n    body {{ font-family: monospace; margin: 2em; }}\n    table {{ border-collapse: collapse; }}\n    td {{ padding: 0.2em 1.5em 0.2em 0; }}\n  </style>\n</head>\n<body>\n  <h1>Index of {path}</h1>\n  <hr>\n  <table>\n{rows}  </table>\n  <hr>\n</body>\n</html>\n",
        path = url_path,
        rows = rows
    ))
}

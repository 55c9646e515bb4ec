//! # Módulo de Archivos Estáticos
//! src/files/mod.rs
//!
//! Todo lo que convierte un path HTTP en bytes de un archivo:
//! - `mime`: detección de Content-Type por extensión
//! - `resolver`: decodificación de URLs, sanitización de paths,
//!   ETags y listado de directorios
//! - `handler`: el handler de requests (reescritura de `/`,
//!   resolución, 404, condicionales)

pub mod handler;
pub mod mime;
pub mod resolver;

// Re-exportar para facilitar el uso
pub use handler::serve;
pub use mime::content_type_for;
pub use resolver::{list_assets, url_decode};

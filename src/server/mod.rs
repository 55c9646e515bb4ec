//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Hace bind del puerto (con reintentos acotados si está ocupado)
//! 2. Acepta conexiones entrantes (un thread por conexión)
//! 3. Despacha cada request al handler de archivos estáticos
//! 4. Finaliza toda respuesta con los headers CORS
//! 5. Se detiene limpiamente ante SIGINT/SIGTERM

pub mod signal;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::{Server, ServerError};

//! # Dashboard Server
//! src/lib.rs
//!
//! Servidor HTTP de desarrollo para servir los archivos estáticos del
//! dashboard (HTML/CSS/JS) desde un directorio local.
//!
//! Comportamiento principal:
//! - Sirve archivos estáticos desde un directorio raíz configurable
//! - Reescribe la ruta raíz `/` al documento por defecto (`dashboard.html`)
//! - Agrega headers CORS permisivos a todas las respuestas
//! - Abre el navegador del sistema un segundo después de arrancar
//! - Si el puerto está ocupado, reintenta con el siguiente (acotado)
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing y construcción del protocolo HTTP/1.0
//! - `config`: Configuración por CLI y variables de entorno
//! - `files`: Resolución y servido de archivos estáticos
//! - `server`: Socket TCP, bind con reintentos y manejo de conexiones
//! - `metrics`: Contadores de requests para el resumen de cierre
//! - `browser`: Apertura diferida (y cancelable) del navegador
//!
//! ## Ejemplo de uso
//!
//! ```ignore
//! use dashboard_server::server::Server;
//! use dashboard_server::config::Config;
//!
//! let config = Config::default();
//! let server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod http;
pub mod config;
pub mod files;
pub mod server;
pub mod metrics;
pub mod browser;

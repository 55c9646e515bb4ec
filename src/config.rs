//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor de desarrollo con
//! soporte para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./dashboard_server --port 8000 \
//!   --root-dir ./dashboard \
//!   --index dashboard.html \
//!   --max-port-retries 16
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! DASHBOARD_PORT=8080 DASHBOARD_HOST=127.0.0.1 ./dashboard_server
//! ```

use clap::Parser;
use std::path::{Path, PathBuf};

/// Configuración del servidor de desarrollo
#[derive(Debug, Clone, Parser)]
#[command(name = "dashboard_server")]
#[command(about = "Servidor HTTP de desarrollo para el dashboard estático")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto inicial en el que intenta escuchar el servidor
    #[arg(short, long, default_value = "8000", env = "DASHBOARD_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha (todas las interfaces por defecto)
    #[arg(long, default_value = "0.0.0.0", env = "DASHBOARD_HOST")]
    pub host: String,

    /// Directorio raíz de los archivos estáticos.
    /// Por defecto: el directorio donde vive el ejecutable.
    #[arg(long = "root-dir", env = "DASHBOARD_ROOT")]
    pub root_dir: Option<PathBuf>,

    /// Documento al que se reescribe la ruta raíz "/"
    #[arg(long, default_value = "dashboard.html", env = "DASHBOARD_INDEX")]
    pub index: String,

    /// Reintentos máximos con el puerto siguiente cuando el puerto está ocupado
    #[arg(long = "max-port-retries", default_value = "16", env = "MAX_PORT_RETRIES")]
    pub max_port_retries: u32,

    /// No abrir el navegador automáticamente al arrancar
    #[arg(long = "no-browser", env = "NO_BROWSER")]
    pub no_browser: bool,

    /// Milisegundos de espera antes de abrir el navegador
    #[arg(long = "browser-delay-ms", default_value = "1000", env = "BROWSER_DELAY_MS")]
    pub browser_delay_ms: u64,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```
    /// use dashboard_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8000");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resuelve el directorio raíz efectivo.
    ///
    /// Si no se configuró `--root-dir`, usa el directorio que contiene
    /// el ejecutable. Se resuelve una sola vez al arrancar, nunca se
    /// recarga.
    pub fn effective_root(&self) -> std::io::Result<PathBuf> {
        if let Some(dir) = &self.root_dir {
            return Ok(dir.clone());
        }

        let exe = std::env::current_exe()?;
        exe.parent().map(Path::to_path_buf).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "executable has no parent directory",
            )
        })
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        // Puerto 0 significa "puerto efímero" para el SO; no es un
        // puerto al que un navegador pueda volver, así que se rechaza.
        if self.port == 0 {
            return Err("Port must be in range 1-65535".to_string());
        }

        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }

        // El índice se concatena a la raíz: debe ser un nombre de
        // archivo plano, sin separadores.
        if self.index.is_empty() || self.index.contains('/') || self.index.contains('\\') {
            return Err("Index document must be a bare file name".to_string());
        }

        if let Some(dir) = &self.root_dir {
            if !dir.is_dir() {
                return Err(format!("Root directory does not exist: {}", dir.display()));
            }
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("⚙️  Configuración:");
        println!("   Puerto inicial:       {}", self.port);
        println!("   Host:                 {}", self.host);
        match &self.root_dir {
            Some(dir) => println!("   Raíz:                 {}", dir.display()),
            None => println!("   Raíz:                 (directorio del ejecutable)"),
        }
        println!("   Documento raíz:       /{}", self.index);
        println!("   Reintentos de puerto: {}", self.max_port_retries);
        if self.no_browser {
            println!("   Navegador:            deshabilitado");
        } else {
            println!("   Navegador:            automático tras {} ms", self.browser_delay_ms);
        }
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
            root_dir: None,
            index: "dashboard.html".to_string(),
            max_port_retries: 16,
            no_browser: false,
            browser_delay_ms: 1000,
        }
    }
}

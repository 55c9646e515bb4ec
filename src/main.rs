//! # Dashboard Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor de desarrollo.
//!
//! Parsea la configuración, la valida, instala el handler de
//! interrupción (Ctrl+C) y arranca el servidor.

use std::sync::Arc;

use dashboard_server::config::Config;
use dashboard_server::server::{signal, Server};

fn main() {
    println!("=================================");
    println!("  Dashboard Dev Server");
    println!("=================================\n");

    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary();

    let server = Arc::new(Server::new(config));

    // Ctrl+C / SIGTERM: detener el accept loop; run() termina solo.
    let server_for_signal = Arc::clone(&server);
    signal::install(move || {
        println!("\n\n👋 Interrupción recibida, deteniendo el servidor...");
        server_for_signal.stop();
    });

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}

//! # Apertura Diferida del Navegador
//! src/browser.rs
//!
//! Tarea one-shot que espera un momento (para que el servidor ya esté
//! aceptando conexiones) y abre el navegador del sistema en la URL del
//! dashboard.
//!
//! La tarea pertenece al ciclo de vida del servidor: si el servidor se
//! detiene antes de que venza el plazo, se cancela y el navegador no se
//! abre. Un fallo al abrir el navegador se degrada a un warning; nunca
//! afecta al serving loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Tarea programada de apertura del navegador, cancelable
pub struct BrowserOpener {
    cancelled: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl BrowserOpener {
    /// Programa la apertura de `url` después de `delay`.
    ///
    /// El thread espera en intervalos cortos revisando la bandera de
    /// cancelación, así `cancel()` responde en milisegundos.
    pub fn schedule(url: String, delay: Duration) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let handle = thread::spawn(move || {
            let deadline = Instant::now() + delay;

            while Instant::now() < deadline {
                if flag.load(Ordering::Relaxed) {
                    return;
                }
                thread::sleep(Duration::from_millis(25));
            }

            if flag.load(Ordering::Relaxed) {
                return;
            }

            if let Err(e) = open::that(&url) {
                eprintln!(
                    "   ⚠️  No se pudo abrir el navegador: {} (abrir {} manualmente)",
                    e, url
                );
            }
        });

        Self {
            cancelled,
            handle: Some(handle),
        }
    }

    /// Cancela la apertura si todavía no ocurrió
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

impl Drop for BrowserOpener {
    /// Al soltar la tarea se cancela y se espera al thread.
    fn drop(&mut self) {
        self.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

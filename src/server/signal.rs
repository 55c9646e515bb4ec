//! # Manejo de Señales
//! src/server/signal.rs
//!
//! Handler de SIGINT/SIGTERM sin dependencias de alto nivel: se
//! bloquean las señales en el thread que llama (y por herencia en todos
//! los threads que se creen después) y un thread dedicado las espera
//! con `sigwait`.
//!
//! Debe llamarse ANTES de crear los threads del servidor para que la
//! máscara se herede y la señal llegue siempre al thread dedicado.

use std::thread;

/// Instala un handler que corre una sola vez al recibir SIGINT o SIGTERM.
pub fn install<F>(handler: F)
where
    F: FnOnce() + Send + 'static,
{
    let mask = unsafe {
        let mut mask: libc::sigset_t = std::mem::zeroed();
        libc::sigemptyset(&mut mask);
        libc::sigaddset(&mut mask, libc::SIGINT);
        libc::sigaddset(&mut mask, libc::SIGTERM);

        // Bloquear en el thread actual; los threads hijos heredan la máscara
        libc::pthread_sigmask(libc::SIG_BLOCK, &mask, std::ptr::null_mut());
        mask
    };

    thread::spawn(move || {
        let mut sig: libc::c_int = 0;
        let result = unsafe { libc::sigwait(&mask, &mut sig) };
        if result == 0 {
            handler();
        }
    });
}

//! # Módulo de Métricas
//! src/metrics/mod.rs
//!
//! Contadores de requests del servidor. El snapshot se imprime como
//! JSON en el aviso de cierre.

pub mod collector;

// Re-exportar para facilitar el uso
pub use collector::{MetricsCollector, Snapshot};

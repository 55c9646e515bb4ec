//! # Collector de Métricas
//! src/metrics/collector.rs
//!
//! Recolecta contadores del servidor en tiempo real: total de requests,
//! requests por código de estado y bytes enviados.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Collector de métricas thread-safe
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<Mutex<MetricsData>>,
    start_time: Instant,
}

/// Datos internos de métricas
struct MetricsData {
    /// Contador total de requests
    total_requests: u64,

    /// Requests por código de estado
    status_codes: HashMap<u16, u64>,

    /// Bytes enviados (headers + body)
    bytes_sent: u64,
}

/// Snapshot serializable de las métricas
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub uptime_seconds: u64,
    pub total_requests: u64,
    /// BTreeMap para que el JSON salga en orden estable
    pub status_codes: BTreeMap<u16, u64>,
    pub bytes_sent: u64,
}

impl MetricsCollector {
    /// Crea un nuevo collector de métricas
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MetricsData {
                total_requests: 0,
                status_codes: HashMap::new(),
                bytes_sent: 0,
            })),
            start_time: Instant::now(),
        }
    }

    /// Registra un request atendido
    pub fn record_request(&self, status_code: u16, bytes_sent: u64) {
        let mut data = self.inner.lock().unwrap();

        data.total_requests += 1;
        *data.status_codes.entry(status_code).or_insert(0) += 1;
        data.bytes_sent += bytes_sent;
    }

    /// Obtiene un snapshot de las métricas actuales
    pub fn snapshot(&self) -> Snapshot {
        let data = self.inner.lock().unwrap();

        Snapshot {
            uptime_seconds: self.start_time.elapsed().as_secs(),
            total_requests: data.total_requests,
            status_codes: data.status_codes.iter().map(|(k, v)| (*k, *v)).collect(),
            bytes_sent: data.bytes_sent,
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

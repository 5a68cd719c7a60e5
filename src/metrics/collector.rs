//! # Collector de Métricas
//! src/metrics/collector.rs
//!
//! Cuenta conexiones, admisiones, descartes y respuestas por código de
//! estado. Lo actualizan el camino de admisión y los workers.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// Collector de métricas thread-safe
pub struct MetricsCollector {
    inner: Mutex<MetricsData>,
    start_time: Instant,
}

/// Datos internos de métricas
#[derive(Default)]
struct MetricsData {
    /// Conexiones recibidas por el camino de admisión
    total_connections: u64,

    /// Requests que entraron a la cola
    admitted: u64,

    /// Requests descartados por cola llena (sin respuesta)
    dropped: u64,

    /// Respuestas por código de estado
    status_codes: BTreeMap<u16, u64>,

    /// Bytes de cuerpo escritos en respuestas 200
    body_bytes: u64,
}

/// Snapshot de métricas (para uso externo)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub uptime_secs: u64,
    pub total_connections: u64,
    pub admitted: u64,
    pub dropped: u64,
    pub status_codes: BTreeMap<u16, u64>,
    pub body_bytes: u64,
}

impl MetricsCollector {
    /// Crea un nuevo collector de métricas
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsData::default()),
            start_time: Instant::now(),
        }
    }

    fn data(&self) -> MutexGuard<'_, MetricsData> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registra una conexión nueva
    pub fn record_connection(&self) {
        self.data().total_connections += 1;
    }

    /// Registra un request aceptado en la cola
    pub fn record_admitted(&self) {
        self.data().admitted += 1;
    }

    /// Registra un request descartado por cola llena
    pub fn record_dropped(&self) {
        self.data().dropped += 1;
    }

    /// Registra una respuesta enviada
    pub fn record_response(&self, status_code: u16, body_bytes: u64) {
        let mut data = self.data();
        *data.status_codes.entry(status_code).or_insert(0) += 1;
        data.body_bytes += body_bytes;
    }

    /// Obtiene un snapshot de las métricas
    pub fn snapshot(&self) -> MetricsSnapshot {
        let data = self.data();

        MetricsSnapshot {
            uptime_secs: self.start_time.elapsed().as_secs(),
            total_connections: data.total_connections,
            admitted: data.admitted,
            dropped: data.dropped,
            status_codes: data.status_codes.clone(),
            body_bytes: data.body_bytes,
        }
    }

    /// Obtiene las métricas actuales en formato JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

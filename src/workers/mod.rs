//! # Pool de Workers
//! src/workers/mod.rs
//!
//! Un número fijo de threads creados al arrancar. Cada uno repite para
//! siempre:
//!
//! ```text
//! remove() (bloquea si la cola está vacía) → servir → cerrar conexión
//! ```
//!
//! Los workers no guardan estado entre iteraciones y no se reemplazan ni se
//! detienen: viven lo mismo que el proceso. Un error de I/O en una conexión
//! termina solo esa conexión.

use crate::error::ServeError;
use crate::http::{respond_error, StatusCode};
use crate::metrics::MetricsCollector;
use crate::queue::{PendingRequest, RequestQueue};
use crate::server::static_files::serve_static;
use std::io::{self, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Handles de los threads del pool
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Lanza `size` workers sobre la cola compartida
    pub fn spawn<C>(
        size: usize,
        queue: Arc<RequestQueue<C>>,
        metrics: Arc<MetricsCollector>,
    ) -> io::Result<Self>
    where
        C: Write + Send + 'static,
    {
        let mut handles = Vec::with_capacity(size);

        for i in 0..size {
            let name = format!("worker-{}", i);
            let queue = Arc::clone(&queue);
            let metrics = Arc::clone(&metrics);

            let handle = thread::Builder::new()
                .name(name.clone())
                .spawn(move || worker_loop(&name, &queue, &metrics))?;
            handles.push(handle);
        }

        Ok(Self { handles })
    }

    /// Número de workers del pool
    pub fn size(&self) -> usize {
        self.handles.len()
    }
}

/// Loop principal del worker
fn worker_loop<C: Write>(name: &str, queue: &RequestQueue<C>, metrics: &MetricsCollector) {
    info!(worker = name, "worker started");

    loop {
        // Esperar por un request
        let request = queue.remove();
        debug!(worker = name, path = %request.path.display(), size = request.size, "picked up request");

        handle_request(name, request, metrics);
    }
}

/// Sirve un request y cierra su conexión (drop al salir)
pub fn handle_request<C: Write>(name: &str, request: PendingRequest<C>, metrics: &MetricsCollector) {
    let PendingRequest {
        mut conn,
        path,
        size,
        content_type,
    } = request;

    match serve_static(&mut conn, &path, size, content_type) {
        Ok(written) => {
            metrics.record_response(StatusCode::Ok.as_u16(), written);
            debug!(worker = name, path = %path.display(), bytes = written, "served");
        }
        Err(ServeError::Io(e)) => {
            warn!(worker = name, path = %path.display(), error = %e, "connection failed while serving");
        }
        Err(err) => {
            metrics.record_response(err.status().as_u16(), 0);
            info!(worker = name, status = err.status().as_u16(), error = %err, "error response");
            if let Err(e) = respond_error(conn, &err) {
                warn!(worker = name, error = %e, "failed to write error response");
            }
        }
    }
}

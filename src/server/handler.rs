//! # Manejo Inicial de Conexiones
//! src/server/handler.rs
//!
//! Camino de admisión de una conexión recién aceptada:
//!
//! ```text
//! request line → ¿GET? → headers → clasificar/resolver → validar
//!     → cola.admit() → (worker)          ok
//!     → drop(conn)                       cola llena (sin respuesta)
//!     → página de error + cerrar         cualquier otro fallo
//! ```

use crate::error::ServeError;
use crate::http::request::{parse_request_line, read_headers};
use crate::http::{respond_error, Method};
use crate::metrics::MetricsCollector;
use crate::queue::{PendingRequest, RequestQueue};
use crate::resolve::{classify_and_resolve, validate};
use crate::server::static_files::content_type;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Resultado de pasar una conexión por el camino de admisión
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Encolado en la posición indicada
    Queued(usize),

    /// Descartado por cola llena: conexión cerrada sin respuesta
    Dropped,

    /// Respondido con una página de error (código HTTP)
    Rejected(u16),
}

/// Archivo validado listo para encolar
struct Resolved {
    /// Ruta canónica, ya verificada contra el document root
    path: PathBuf,
    size: u64,
    content_type: &'static str,
}

/// Lee y valida el request.
fn parse_and_validate<C: Read>(conn: &mut C, doc_root: &Path) -> Result<Resolved, ServeError> {
    let mut reader = BufReader::new(conn);

    let line = parse_request_line(&mut reader)?;
    debug!(method = line.method.as_str(), uri = %line.uri, version = %line.version, "request line");

    if line.method != Method::Get {
        return Err(ServeError::UnsupportedMethod(line.method.as_str().to_string()));
    }

    read_headers(&mut reader)?;

    let target = classify_and_resolve(&line.uri, doc_root);
    let (path, size) = validate(&target, doc_root)?;

    Ok(Resolved {
        path,
        size,
        content_type: content_type(target.path()),
    })
}

/// Maneja una conexión desde que se acepta hasta que queda encolada o cerrada.
///
/// La conexión se consume: si no termina en la cola, se cierra antes de
/// retornar.
pub fn handle_connection<C>(
    mut conn: C,
    doc_root: &Path,
    queue: &RequestQueue<C>,
    metrics: &MetricsCollector,
) -> Admission
where
    C: Read + Write,
{
    metrics.record_connection();

    let resolved = match parse_and_validate(&mut conn, doc_root) {
        Ok(found) => found,
        Err(err) => {
            let status = err.status().as_u16();
            metrics.record_response(status, 0);
            info!(status, error = %err, "rejecting request");

            if let Err(e) = respond_error(conn, &err) {
                warn!(error = %e, "failed to write error response");
            }
            return Admission::Rejected(status);
        }
    };

    let size = resolved.size;
    let request =
        PendingRequest::new(conn, resolved.path, size).with_content_type(resolved.content_type);

    match queue.admit(request) {
        Ok(position) => {
            metrics.record_admitted();
            debug!(position, size, policy = %queue.policy(), "request queued");
            Admission::Queued(position)
        }
        Err(rejected) => {
            let request = rejected.into_inner();
            metrics.record_dropped();
            warn!(
                path = %request.path.display(),
                capacity = queue.capacity(),
                stats = %metrics.to_json(),
                "queue full, dropping connection"
            );
            drop(request);
            Admission::Dropped
        }
    }
}

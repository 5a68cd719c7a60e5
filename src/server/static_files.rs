//! # Servidor de Archivos Estáticos
//! src/server/static_files.rs
//!
//! Escribe la respuesta 200 de un archivo ya validado:
//!
//! ```text
//! HTTP/1.0 200 OK
//! Server: RedUnix-HTTP/1.0
//! Content-Length: <tamaño al momento de la admisión>
//! Content-Type: <por substring del nombre>
//!
//! <bytes del archivo mapeado en memoria>
//! ```

use crate::error::ServeError;
use crate::http::{ResponseHead, StatusCode, SERVER_NAME};
use memmap2::{Mmap, MmapOptions};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Content-Type por substring del nombre (no por sufijo): `report.html.bak`
/// también es `text/html`.
pub fn content_type(path: &Path) -> &'static str {
    let name = path.to_string_lossy();

    if name.contains(".html") {
        "text/html"
    } else if name.contains(".gif") {
        "image/gif"
    } else if name.contains(".jpg") {
        "image/jpeg"
    } else {
        "text/plain"
    }
}

/// Abre y mapea el archivo en modo lectura/privado.
///
/// Un archivo vacío no se mapea.
fn map_file(path: &Path) -> io::Result<Option<Mmap>> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(None);
    }

    // SAFETY: el mapeo es de solo lectura y privado, pero no protege contra
    // otro proceso que trunque el archivo mientras se sirve: leer páginas
    // más allá del nuevo final produce SIGBUS y termina el proceso. El
    // document root debe tratarse como inmutable mientras el servidor corre.
    let mmap = unsafe { MmapOptions::new().map_copy_read_only(&file)? };
    Ok(Some(mmap))
}

/// Sirve un archivo estático por la conexión.
///
/// `size` es el tamaño capturado en la admisión y es el que se anuncia en
/// `Content-Length` aunque el archivo haya cambiado desde entonces.
///
/// `content_type` se decide en la admisión a partir del nombre pedido.
///
/// Si el archivo ya no se puede abrir se retorna `Err(ServeError::NotFound)`
/// sin haber escrito nada, para que el worker responda 404. Un fallo al
/// escribir en la conexión es `Err(ServeError::Io)`.
pub fn serve_static<W: Write>(
    conn: &mut W,
    path: &Path,
    size: u64,
    content_type: &str,
) -> Result<u64, ServeError> {
    let mapping = map_file(path).map_err(|e| {
        debug!(path = %path.display(), error = %e, "file vanished before serve");
        ServeError::NotFound(path.to_path_buf())
    })?;

    Ok(write_static(conn, size, content_type, mapping.as_deref())?)
}

/// Escribe encabezado + cuerpo. Retorna los bytes de cuerpo escritos.
fn write_static<W: Write>(
    conn: &mut W,
    size: u64,
    content_type: &str,
    mapping: Option<&[u8]>,
) -> io::Result<u64> {
    let head = ResponseHead::new(StatusCode::Ok)
        .with_header("Server", SERVER_NAME)
        .with_header("Content-Length", size)
        .with_header("Content-Type", content_type);

    conn.write_all(&head.to_bytes())?;

    let body = mapping.unwrap_or(&[]);
    let len = body.len().min(usize::try_from(size).unwrap_or(usize::MAX));
    conn.write_all(&body[..len])?;
    conn.flush()?;

    Ok(len as u64)
}

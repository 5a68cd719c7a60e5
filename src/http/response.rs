//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! Arma el encabezado de una respuesta HTTP/1.0 y la página HTML de error.
//!
//! ## Formato de una respuesta HTTP/1.0
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Server: RedUnix-HTTP/1.0\r\n
//! Content-Length: 13\r\n
//! Content-Type: text/html\r\n
//! \r\n
//! <html>...</html>
//! ```
//!
//! Los headers se guardan en un `Vec` para respetar el orden de escritura.

use super::StatusCode;
use crate::error::ServeError;
use std::io::{self, Write};

/// Identificación del servidor en el header `Server`
pub const SERVER_NAME: &str = "RedUnix-HTTP/1.0";

/// Encabezado (status line + headers) de una respuesta HTTP/1.0
#[derive(Debug, Clone)]
pub struct ResponseHead {
    status: StatusCode,
    headers: Vec<(String, String)>,
}

impl ResponseHead {
    /// Crea un encabezado sin headers
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::http::{ResponseHead, StatusCode};
    ///
    /// let head = ResponseHead::new(StatusCode::Ok)
    ///     .with_header("Content-Type", "text/plain");
    /// assert_eq!(head.header("Content-Type"), Some("text/plain"));
    /// ```
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
        }
    }

    /// Agrega un header al final (el orden de inserción es el de escritura)
    pub fn with_header(mut self, name: &str, value: impl ToString) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Busca un header por nombre exacto
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convierte el encabezado a bytes, incluyendo la línea vacía final
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = format!("HTTP/1.0 {}\r\n", self.status).into_bytes();

        for (name, value) in &self.headers {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }

        // Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");
        result
    }
}

/// Genera el cuerpo HTML de una página de error
fn error_body(cause: &str, status: StatusCode, short: &str, long: &str) -> String {
    format!(
        "<!doctype html>\r\n\
         <head>\r\n  <title>{} Error</title>\r\n</head>\r\n\
         <body>\r\n  <h2>{}: {}</h2>\r\n  <p>{}: {}</p>\r\n</body>\r\n</html>\r\n",
        SERVER_NAME,
        status.as_u16(),
        short,
        long,
        cause
    )
}

/// Arma la respuesta de error completa: encabezado + cuerpo HTML
///
/// El `Content-Length` siempre coincide con el tamaño del cuerpo generado.
pub fn error_response(cause: &str, status: StatusCode, short: &str, long: &str) -> Vec<u8> {
    let body = error_body(cause, status, short, long);

    let mut bytes = ResponseHead::new(status)
        .with_header("Content-Type", "text/html")
        .with_header("Content-Length", body.len())
        .to_bytes();
    bytes.extend_from_slice(body.as_bytes());
    bytes
}

/// Error Responder: escribe la página de error y cierra la conexión.
///
/// Consume la conexión; al salir de esta función el socket se cierra aunque
/// la escritura haya fallado.
pub fn respond_error<C: Write>(mut conn: C, err: &ServeError) -> io::Result<()> {
    let status = err.status();
    let bytes = error_response(
        &err.cause(),
        status,
        status.reason_phrase(),
        err.long_message(),
    );

    conn.write_all(&bytes)?;
    conn.flush()
}

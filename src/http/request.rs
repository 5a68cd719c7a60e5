//! # Lectura de Requests HTTP/1.0
//! src/http/request.rs
//!
//! Lee la request line y consume los headers directamente desde la conexión.
//!
//! ## Formato de un Request HTTP/1.0
//!
//! ```text
//! GET /index.html HTTP/1.0\r\n
//! Host: localhost:10000\r\n
//! User-Agent: curl/7.68.0\r\n
//! \r\n
//! ```
//!
//! Los headers se descartan: el servidor no les da ningún uso.

use crate::error::ServeError;
use std::io::{BufRead, Read};

/// Tamaño máximo de una línea del request
pub const MAXBUF: u64 = 8192;

/// Métodos HTTP que reconocemos
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - El único método que el servidor implementa
    Get,

    /// Cualquier otro método (se responde 501)
    Other(String),
}

impl Method {
    /// Parsea un método HTTP. La comparación ignora mayúsculas/minúsculas.
    fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("GET") {
            Method::Get
        } else {
            Method::Other(token.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Other(m) => m,
        }
    }
}

/// Request line parseada: `METHOD URI VERSION`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    pub uri: String,
    pub version: String,
}

/// Lee una línea completa (hasta `\n`) con límite de `MAXBUF` bytes.
///
/// Retorna la línea con su terminador. Una línea vacía significa EOF.
fn read_bounded_line<R: BufRead>(reader: &mut R) -> Result<String, ServeError> {
    let mut raw = Vec::new();
    reader.by_ref().take(MAXBUF).read_until(b'\n', &mut raw)?;

    if raw.len() as u64 == MAXBUF && raw.last() != Some(&b'\n') {
        return Err(ServeError::Protocol(format!(
            "request line longer than {} bytes",
            MAXBUF
        )));
    }

    String::from_utf8(raw)
        .map_err(|e| ServeError::Protocol(String::from_utf8_lossy(e.as_bytes()).into_owned()))
}

/// Lee la request line y la separa en exactamente tres campos.
///
/// Cualquier otra cantidad de campos (incluyendo una conexión que se cierra
/// sin enviar nada) es un `ServeError::Protocol`.
///
/// # Ejemplo
/// ```
/// use static_server::http::request::{parse_request_line, Method};
/// use std::io::Cursor;
///
/// let mut input = Cursor::new(b"GET /index.html HTTP/1.0\r\n\r\n".to_vec());
/// let line = parse_request_line(&mut input).unwrap();
/// assert_eq!(line.method, Method::Get);
/// assert_eq!(line.uri, "/index.html");
/// ```
pub fn parse_request_line<R: BufRead>(reader: &mut R) -> Result<RequestLine, ServeError> {
    let line = read_bounded_line(reader)?;

    let parts: Vec<&str> = line.split_whitespace().collect();

    // Debe tener exactamente 3 partes: METHOD URI VERSION
    if parts.len() != 3 {
        return Err(ServeError::Protocol(line));
    }

    Ok(RequestLine {
        method: Method::from_token(parts[0]),
        uri: parts[1].to_string(),
        version: parts[2].to_string(),
    })
}

/// Consume y descarta headers hasta encontrar la línea vacía (o EOF)
pub fn read_headers<R: BufRead>(reader: &mut R) -> Result<(), ServeError> {
    loop {
        let line = read_bounded_line(reader)?;
        if line.is_empty() || line == "\r\n" || line == "\n" {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn input(raw: &[u8]) -> Cursor<Vec<u8>> {
        Cursor::new(raw.to_vec())
    }

    #[test]
    fn test_parse_simple_get() {
        let mut raw = input(b"GET / HTTP/1.0\r\n\r\n");
        let line = parse_request_line(&mut raw).unwrap();

        assert_eq!(line.method, Method::Get);
        assert_eq!(line.uri, "/");
        assert_eq!(line.version, "HTTP/1.0");
    }

    #[test]
    fn test_method_is_case_insensitive() {
        let mut raw = input(b"get /a.html HTTP/1.1\r\n\r\n");
        let line = parse_request_line(&mut raw).unwrap();
        assert_eq!(line.method, Method::Get);
    }

    #[test]
    fn test_other_method_is_kept() {
        let mut raw = input(b"POST /x HTTP/1.0\r\n\r\n");
        let line = parse_request_line(&mut raw).unwrap();
        assert_eq!(line.method, Method::Other("POST".to_string()));
        assert_eq!(line.method.as_str(), "POST");
    }

    #[test]
    fn test_invalid_request_line() {
        let mut raw = input(b"GET\r\n\r\n"); // Falta uri y version
        let result = parse_request_line(&mut raw);
        assert!(matches!(result, Err(ServeError::Protocol(_))));
    }

    #[test]
    fn test_too_many_fields() {
        let mut raw = input(b"GET / HTTP/1.0 extra\r\n\r\n");
        assert!(matches!(
            parse_request_line(&mut raw),
            Err(ServeError::Protocol(_))
        ));
    }

    #[test]
    fn test_empty_request() {
        let mut raw = input(b"");
        assert!(matches!(
            parse_request_line(&mut raw),
            Err(ServeError::Protocol(_))
        ));
    }

    #[test]
    fn test_line_too_long() {
        let mut raw = vec![b'A'; MAXBUF as usize + 10];
        raw.extend_from_slice(b"\r\n");
        let mut raw = Cursor::new(raw);
        assert!(matches!(
            parse_request_line(&mut raw),
            Err(ServeError::Protocol(_))
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        let mut raw = input(b"GET /\xff\xfe HTTP/1.0\r\n\r\n");
        assert!(matches!(
            parse_request_line(&mut raw),
            Err(ServeError::Protocol(_))
        ));
    }

    #[test]
    fn test_read_headers_stops_at_blank_line() {
        let mut raw = input(b"Host: x\r\nUser-Agent: test\r\n\r\nleftover");
        read_headers(&mut raw).unwrap();

        let mut rest = String::new();
        raw.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "leftover");
    }

    #[test]
    fn test_read_headers_stops_at_eof() {
        let mut raw = input(b"Host: x\r\n");
        assert!(read_headers(&mut raw).is_ok());
    }
}

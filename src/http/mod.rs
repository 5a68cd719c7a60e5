//! # Módulo HTTP
//! src/http/mod.rs
//!
//! Piezas del protocolo HTTP/1.0 que usa el servidor estático:
//!
//! - Lectura de la request line y descarte de headers
//! - Encabezados de respuesta y página de error
//! - Códigos de estado
//!
//! Una conexión = un request = una respuesta. Nunca hay keep-alive,
//! chunked transfer ni TLS.

pub mod request;
pub mod response;
pub mod status;

pub use request::{Method, RequestLine};
pub use response::{respond_error, ResponseHead, SERVER_NAME};
pub use status::StatusCode;

//! # Errores del Servidor
//! src/error.rs
//!
//! Taxonomía de fallos de una conexión. Cada variante sabe qué código HTTP
//! le corresponde y qué textos usar en la página de error.
//!
//! El rechazo por cola llena NO está aquí: no produce respuesta HTTP, la
//! conexión simplemente se cierra (ver `queue::Rejected`).

use crate::http::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Motivo de un 403
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenReason {
    /// No es un archivo regular o no tiene el bit de lectura del dueño
    Permission,

    /// La ruta canónica cae fuera del document root (o no se pudo canonicalizar)
    Traversal,
}

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("malformed request line: {0:?}")]
    Protocol(String),

    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    #[error("dynamic content not supported: {}", .0.display())]
    DynamicContentUnsupported(PathBuf),

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("forbidden ({reason:?}): {}", .path.display())]
    Forbidden {
        path: PathBuf,
        reason: ForbiddenReason,
    },

    #[error("I/O error on connection: {0}")]
    Io(#[from] std::io::Error),
}

impl ServeError {
    /// Código HTTP con el que se responde este error
    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::Protocol(_) | ServeError::Io(_) => StatusCode::BadRequest,
            ServeError::UnsupportedMethod(_) | ServeError::DynamicContentUnsupported(_) => {
                StatusCode::NotImplemented
            }
            ServeError::NotFound(_) => StatusCode::NotFound,
            ServeError::Forbidden { .. } => StatusCode::Forbidden,
        }
    }

    /// Lo que provocó el error (método, ruta, línea recibida)
    pub fn cause(&self) -> String {
        match self {
            ServeError::Protocol(line) => line.trim_end().to_string(),
            ServeError::UnsupportedMethod(method) => method.clone(),
            ServeError::DynamicContentUnsupported(path)
            | ServeError::NotFound(path)
            | ServeError::Forbidden { path, .. } => path.display().to_string(),
            ServeError::Io(e) => e.to_string(),
        }
    }

    /// Descripción larga para el cuerpo HTML
    pub fn long_message(&self) -> &'static str {
        match self {
            ServeError::Protocol(_) | ServeError::Io(_) => "server could not parse this request",
            ServeError::UnsupportedMethod(_) => "server does not implement this method",
            ServeError::DynamicContentUnsupported(_) => {
                "server does not serve dynamic content request"
            }
            ServeError::NotFound(_) => "server could not find this file",
            ServeError::Forbidden {
                reason: ForbiddenReason::Permission,
                ..
            } => "server could not read this file",
            ServeError::Forbidden {
                reason: ForbiddenReason::Traversal,
                ..
            } => "server could not access this directory",
        }
    }
}

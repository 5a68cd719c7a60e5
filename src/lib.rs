//! # Static HTTP Server
//! src/lib.rs
//!
//! Servidor HTTP/1.0 de contenido estático con una cola acotada de requests
//! y un pool fijo de workers. Demuestra conceptos de sistemas operativos:
//! productor/consumidor, sincronización con mutex + condvar, control de
//! admisión y políticas de planificación.
//!
//! ## Arquitectura
//!
//! ```text
//! accept → handler (parseo + validación) → scheduler → queue → workers → static_files
//!                       │                                │
//!                       └── página de error              └── cola llena: se cierra sin respuesta
//! ```
//!
//! - `http`: request line, headers, respuestas y códigos de estado
//! - `resolve`: URI → ruta, protección contra directory traversal
//! - `scheduler`: políticas FIFO, SFF y Random
//! - `queue`: cola acotada compartida
//! - `workers`: pool de threads que sirven los requests
//! - `server`: accept loop, admisión y envío de archivos
//! - `metrics`: contadores del servidor
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use static_server::config::Config;
//! use static_server::server::Server;
//!
//! let config = Config::default();
//! let server = Server::bind(config).expect("Error al abrir el socket");
//! server.run().expect("Error en el servidor");
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod queue;
pub mod resolve;
pub mod scheduler;
pub mod server;
pub mod workers;

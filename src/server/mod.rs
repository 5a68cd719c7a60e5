//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa:
//! 1. El loop que acepta conexiones (`tcp`)
//! 2. El camino de admisión: parseo, validación y encolado (`handler`)
//! 3. El envío de archivos estáticos desde los workers (`static_files`)

pub mod handler;
pub mod static_files;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use handler::{handle_connection, Admission};
pub use tcp::Server;

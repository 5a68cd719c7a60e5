//! # Sistema de Métricas
//! src/metrics/mod.rs
//!
//! Contadores del servidor:
//! - Conexiones recibidas, admitidas y descartadas
//! - Respuestas por código de estado
//! - Bytes servidos

pub mod collector;

pub use collector::{MetricsCollector, MetricsSnapshot};

//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor estático con soporte para argumentos CLI y
//! variables de entorno. Se construye una sola vez en `main` y no cambia
//! después de lanzar los workers.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./static_server -d ./public -p 8003 -t 8 -b 16 -s 1
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! DOC_ROOT=./public THREADS=8 BUFFERS=16 SCHEDALG=sff ./static_server
//! ```

use crate::scheduler::SchedulingPolicy;
use clap::Parser;
use std::path::Path;

/// Configuración del servidor HTTP/1.0
#[derive(Debug, Clone, Parser)]
#[command(name = "static_server")]
#[command(about = "Servidor HTTP/1.0 de contenido estático con pool de workers")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Document root: no se sirve nada fuera de este directorio
    #[arg(short = 'd', long, default_value = ".", env = "DOC_ROOT")]
    pub root: String,

    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "10000", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Número de workers del pool
    #[arg(short, long, default_value = "1", env = "THREADS")]
    pub threads: usize,

    /// Capacidad máxima de la cola de requests
    #[arg(short, long, default_value = "1", env = "BUFFERS")]
    pub buffers: usize,

    /// Política de planificación: 0=fifo, 1=sff, 2=random
    #[arg(short, long, default_value = "0", env = "SCHEDALG")]
    pub schedalg: SchedulingPolicy,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use static_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:10000");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.threads == 0 {
            return Err("Worker threads must be >= 1".to_string());
        }

        if self.buffers == 0 {
            return Err("Queue capacity (buffers) must be >= 1".to_string());
        }

        if !Path::new(&self.root).is_dir() {
            return Err(format!("Document root '{}' is not a directory", self.root));
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║          RedUnix Static HTTP/1.0 Server Configuration        ║");
        println!("╚══════════════════════════════════════════════════════════════╝");
        println!();
        println!("🌐 Network:");
        println!("   Address:      {}", self.address());
        println!("   Doc root:     {}", self.root);
        println!();
        println!("👷 Workers & Queue:");
        println!("   Workers:      {}", self.threads);
        println!("   Queue cap:    {}", self.buffers);
        println!(
            "   Scheduling:   {} ({})",
            self.schedalg,
            self.schedalg.id()
        );
        println!();
        println!("═══════════════════════════════════════════════════════════════");
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            port: 10000,
            host: "127.0.0.1".to_string(),
            threads: 1,
            buffers: 1,
            schedalg: SchedulingPolicy::Fifo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 10000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.threads, 1);
        assert_eq!(config.buffers, 1);
        assert_eq!(config.schedalg, SchedulingPolicy::Fifo);
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "0.0.0.0".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_success() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_threads() {
        let mut config = Config::default();
        config.threads = 0;
        let result = config.validate();
        assert!(result.unwrap_err().contains("Worker threads"));
    }

    #[test]
    fn test_validate_invalid_buffers() {
        let mut config = Config::default();
        config.buffers = 0;
        let result = config.validate();
        assert!(result.unwrap_err().contains("Queue capacity"));
    }

    #[test]
    fn test_validate_missing_root() {
        let mut config = Config::default();
        config.root = "/definitely/not/a/dir".to_string();
        assert!(config.validate().unwrap_err().contains("Document root"));
    }

    #[test]
    fn test_parse_short_flags() {
        let config = Config::try_parse_from([
            "static_server",
            "-d",
            "/tmp",
            "-p",
            "8003",
            "-t",
            "8",
            "-b",
            "16",
            "-s",
            "1",
        ])
        .unwrap();

        assert_eq!(config.root, "/tmp");
        assert_eq!(config.port, 8003);
        assert_eq!(config.threads, 8);
        assert_eq!(config.buffers, 16);
        assert_eq!(config.schedalg, SchedulingPolicy::ShortestFileFirst);
    }

    #[test]
    fn test_parse_policy_by_name() {
        let config = Config::try_parse_from(["static_server", "--schedalg", "random"]).unwrap();
        assert_eq!(config.schedalg, SchedulingPolicy::Random);
    }

    #[test]
    fn test_parse_rejects_unknown_policy() {
        assert!(Config::try_parse_from(["static_server", "-s", "7"]).is_err());
    }

    #[test]
    fn test_config_print_summary() {
        // Should not panic
        Config::default().print_summary();
    }
}

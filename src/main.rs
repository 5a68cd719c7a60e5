//! # Static HTTP Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor: configuración, logging, bind y loop.
//!
//! `RUST_LOG` controla el nivel (por defecto `static_server=info`) y
//! `LOG_FORMAT=json` cambia la salida a JSON.

use static_server::config::Config;
use static_server::server::Server;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("static_server=info"));

    let json = std::env::var("LOG_FORMAT").map(|f| f == "json").unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_thread_names(true))
            .init();
    }
}

fn main() {
    let config = Config::new();
    init_logging();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary();

    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("💥 Error al abrir el socket: {}", e);
            std::process::exit(1);
        }
    };

    // Esto bloquea el thread para siempre
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}

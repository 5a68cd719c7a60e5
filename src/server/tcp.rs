//! # Servidor TCP
//! src/server/tcp.rs
//!
//! Acepta conexiones y las pasa por el camino de admisión. El trabajo de
//! servir archivos lo hace el pool de workers: el thread que acepta solo
//! lee la request line, valida y encola.

use crate::config::Config;
use crate::metrics::MetricsCollector;
use crate::queue::RequestQueue;
use crate::server::handler::handle_connection;
use crate::workers::WorkerPool;
use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Servidor HTTP/1.0 de contenido estático
pub struct Server {
    config: Config,
    doc_root: PathBuf,
    queue: Arc<RequestQueue<TcpStream>>,
    metrics: Arc<MetricsCollector>,
    listener: TcpListener,
}

impl Server {
    /// Abre el socket y crea la cola. Los workers arrancan en `run`.
    pub fn bind(config: Config) -> io::Result<Self> {
        let address = config.address();
        let listener = TcpListener::bind(&address)?;
        info!(address = %listener.local_addr()?, "listening");

        let queue = Arc::new(RequestQueue::new(config.buffers, config.schedalg));

        Ok(Self {
            doc_root: PathBuf::from(&config.root),
            config,
            queue,
            metrics: Arc::new(MetricsCollector::new()),
            listener,
        })
    }

    /// Dirección real del socket (útil con puerto 0)
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Cola compartida con los workers
    pub fn queue(&self) -> Arc<RequestQueue<TcpStream>> {
        Arc::clone(&self.queue)
    }

    pub fn metrics(&self) -> Arc<MetricsCollector> {
        Arc::clone(&self.metrics)
    }

    /// Lanza el pool de workers y atiende conexiones para siempre.
    pub fn run(self) -> io::Result<()> {
        let pool = WorkerPool::spawn(
            self.config.threads,
            Arc::clone(&self.queue),
            Arc::clone(&self.metrics),
        )?;
        info!(
            workers = pool.size(),
            capacity = self.queue.capacity(),
            policy = %self.queue.policy(),
            root = %self.doc_root.display(),
            "server ready"
        );

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    handle_connection(stream, &self.doc_root, &self.queue, &self.metrics);
                }
                Err(e) => {
                    error!(error = %e, "failed to accept connection");
                }
            }
        }

        Ok(())
    }
}

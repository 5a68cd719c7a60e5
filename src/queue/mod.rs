//! # Cola Acotada de Requests
//! src/queue/mod.rs
//!
//! Cola thread-safe con capacidad máxima, compartida entre el camino de
//! admisión (productor) y los workers (consumidores).
//!
//! ## Sincronización
//!
//! ```text
//! admit():  lock → ¿llena? → posición (política) → insert → notify_one → unlock
//! remove(): lock → while vacía { wait(not_empty) } → pop_front → unlock
//! ```
//!
//! La verificación de capacidad, el cálculo de la posición y la inserción
//! ocurren dentro de la MISMA sección crítica. Nunca hay una verificación
//! previa sin lock.

use crate::scheduler::SchedulingPolicy;
use crate::server::static_files::content_type;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Request validado esperando un worker.
///
/// Mientras está en la cola le pertenece a la cola; al desencolarse pasa
/// completo a un único worker.
#[derive(Debug)]
pub struct PendingRequest<C> {
    /// Conexión con el cliente (se cierra al hacer drop)
    pub conn: C,

    /// Ruta canónica del archivo a servir
    pub path: PathBuf,

    /// Tamaño del archivo al momento de la admisión
    pub size: u64,

    /// Content-Type decidido con el nombre pedido por el cliente
    pub content_type: &'static str,
}

impl<C> PendingRequest<C> {
    /// Crea un request con el Content-Type deducido de `path`
    pub fn new(conn: C, path: PathBuf, size: u64) -> Self {
        let content_type = content_type(&path);
        Self {
            conn,
            path,
            size,
            content_type,
        }
    }

    /// Reemplaza el Content-Type (cuando la ruta canónica no conserva el
    /// nombre de la URI, por ejemplo detrás de un symlink)
    pub fn with_content_type(mut self, content_type: &'static str) -> Self {
        self.content_type = content_type;
        self
    }
}

/// Request rechazado por cola llena. Devuelve la propiedad al que llamó,
/// que decide cerrarlo.
pub struct Rejected<C>(pub PendingRequest<C>);

impl<C> Rejected<C> {
    pub fn into_inner(self) -> PendingRequest<C> {
        self.0
    }
}

impl<C> fmt::Debug for Rejected<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("path", &self.0.path)
            .field("size", &self.0.size)
            .finish_non_exhaustive()
    }
}

/// Estado protegido por el mutex
struct QueueState<C> {
    requests: VecDeque<PendingRequest<C>>,

    /// Generador para la política aleatoria
    rng: StdRng,
}

/// Cola acotada con política de inserción configurable
pub struct RequestQueue<C> {
    state: Mutex<QueueState<C>>,

    /// Condvar para despertar workers cuando hay requests
    not_empty: Condvar,

    capacity: usize,
    policy: SchedulingPolicy,
}

impl<C> RequestQueue<C> {
    /// Crea una nueva cola con capacidad máxima
    pub fn new(capacity: usize, policy: SchedulingPolicy) -> Self {
        Self::with_rng(capacity, policy, StdRng::from_entropy())
    }

    /// Igual que `new` pero con un generador dado (útil para tests)
    pub fn with_rng(capacity: usize, policy: SchedulingPolicy, rng: StdRng) -> Self {
        Self {
            state: Mutex::new(QueueState {
                requests: VecDeque::with_capacity(capacity),
                rng,
            }),
            not_empty: Condvar::new(),
            capacity,
            policy,
        }
    }

    /// Toma el lock. Cada mutación es una sola operación sobre el `VecDeque`,
    /// así que un mutex envenenado sigue teniendo un estado consistente.
    fn lock(&self) -> MutexGuard<'_, QueueState<C>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Decide la admisión de un request.
    ///
    /// Retorna la posición donde quedó insertado, o `Err(Rejected)` con el
    /// request intacto si la cola está llena.
    pub fn admit(&self, request: PendingRequest<C>) -> Result<usize, Rejected<C>> {
        let mut guard = self.lock();

        if guard.requests.len() >= self.capacity {
            return Err(Rejected(request));
        }

        let state = &mut *guard;
        let position = self.policy.insertion_index(
            state.requests.iter().map(|r| r.size),
            request.size,
            &mut state.rng,
        );
        state.requests.insert(position, request);

        // Notificar a un worker esperando
        self.not_empty.notify_one();

        Ok(position)
    }

    /// Desencola el request del frente.
    ///
    /// Bloquea hasta que haya uno disponible.
    pub fn remove(&self) -> PendingRequest<C> {
        let mut guard = self.lock();

        loop {
            if let Some(request) = guard.requests.pop_front() {
                return request;
            }

            // Esperar a que haya requests (re-verifica al despertar)
            guard = self
                .not_empty
                .wait(guard)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Intenta desencolar sin bloquear
    pub fn try_remove(&self) -> Option<PendingRequest<C>> {
        self.lock().requests.pop_front()
    }

    /// Retorna el tamaño actual de la cola
    pub fn len(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> SchedulingPolicy {
        self.policy
    }

    /// Tamaños encolados, del frente al final
    pub fn sizes(&self) -> Vec<u64> {
        self.lock().requests.iter().map(|r| r.size).collect()
    }
}

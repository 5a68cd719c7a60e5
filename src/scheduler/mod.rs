//! # Políticas de Planificación
//! src/scheduler/mod.rs
//!
//! La política decide DÓNDE se inserta un request nuevo dentro de la cola.
//! La cola siempre se vacía por el frente, así que el orden de inserción es
//! el orden de atención.
//!
//! | Política | Posición                                             |
//! |----------|------------------------------------------------------|
//! | FIFO     | al final (`count`)                                   |
//! | SFF      | antes del primer archivo estrictamente más grande    |
//! | Random   | uniforme en `0..=count`                              |
//!
//! Con la cola vacía las tres retornan `0`.

use rand::Rng;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulingPolicy {
    /// First In First Out: orden de llegada
    #[default]
    Fifo,

    /// Shortest File First: orden ascendente por tamaño, estable
    ShortestFileFirst,

    /// Posición aleatoria uniforme
    Random,
}

impl SchedulingPolicy {
    /// Calcula la posición de inserción para un request de `new_size` bytes.
    ///
    /// `existing` son los tamaños de los requests encolados, del frente al
    /// final. El resultado siempre está en `0..=existing.len()`.
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::scheduler::SchedulingPolicy;
    ///
    /// let mut rng = rand::thread_rng();
    /// let sizes = [10u64, 30, 50];
    /// assert_eq!(SchedulingPolicy::Fifo.insertion_index(sizes.iter().copied(), 20, &mut rng), 3);
    /// assert_eq!(
    ///     SchedulingPolicy::ShortestFileFirst.insertion_index(sizes.iter().copied(), 20, &mut rng),
    ///     1
    /// );
    /// ```
    pub fn insertion_index<I, R>(&self, existing: I, new_size: u64, rng: &mut R) -> usize
    where
        I: ExactSizeIterator<Item = u64>,
        R: Rng,
    {
        let count = existing.len();
        if count == 0 {
            return 0;
        }

        match self {
            SchedulingPolicy::Fifo => count,
            SchedulingPolicy::ShortestFileFirst => {
                let mut existing = existing;
                existing.position(|size| size > new_size).unwrap_or(count)
            }
            SchedulingPolicy::Random => rng.gen_range(0..=count),
        }
    }

    /// Identificador numérico (`0`, `1`, `2`)
    pub fn id(&self) -> u8 {
        match self {
            SchedulingPolicy::Fifo => 0,
            SchedulingPolicy::ShortestFileFirst => 1,
            SchedulingPolicy::Random => 2,
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchedulingPolicy::Fifo => "FIFO",
            SchedulingPolicy::ShortestFileFirst => "SFF",
            SchedulingPolicy::Random => "RANDOM",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SchedulingPolicy {
    type Err = String;

    /// Acepta el id numérico o el nombre (sin importar mayúsculas)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "fifo" => Ok(SchedulingPolicy::Fifo),
            "1" | "sff" => Ok(SchedulingPolicy::ShortestFileFirst),
            "2" | "random" => Ok(SchedulingPolicy::Random),
            other => Err(format!(
                "unknown scheduling policy '{}' (expected 0=fifo, 1=sff, 2=random)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn index(policy: SchedulingPolicy, sizes: &[u64], new_size: u64) -> usize {
        let mut rng = StdRng::seed_from_u64(7);
        policy.insertion_index(sizes.iter().copied(), new_size, &mut rng)
    }

    #[test]
    fn test_empty_queue_is_position_zero() {
        for policy in [
            SchedulingPolicy::Fifo,
            SchedulingPolicy::ShortestFileFirst,
            SchedulingPolicy::Random,
        ] {
            assert_eq!(index(policy, &[], 42), 0, "{}", policy);
        }
    }

    #[test]
    fn test_fifo_appends() {
        assert_eq!(index(SchedulingPolicy::Fifo, &[10, 5, 20], 1), 3);
    }

    #[test]
    fn test_sff_before_first_larger() {
        let sff = SchedulingPolicy::ShortestFileFirst;
        assert_eq!(index(sff, &[10, 30, 50], 5), 0);
        assert_eq!(index(sff, &[10, 30, 50], 20), 1);
        assert_eq!(index(sff, &[10, 30, 50], 60), 3);
    }

    #[test]
    fn test_sff_is_stable_for_equal_sizes() {
        // Un tamaño igual va DESPUÉS de los existentes iguales
        assert_eq!(
            index(SchedulingPolicy::ShortestFileFirst, &[10, 30, 30, 50], 30),
            3
        );
    }

    #[test]
    fn test_sff_builds_ascending_order() {
        let mut queue: Vec<u64> = Vec::new();
        for size in [50, 10, 30] {
            let pos = index(SchedulingPolicy::ShortestFileFirst, &queue, size);
            queue.insert(pos, size);
        }
        assert_eq!(queue, vec![10, 30, 50]);
    }

    #[test]
    fn test_random_covers_every_position() {
        let mut rng = StdRng::seed_from_u64(2024);
        let sizes = [1u64, 2, 3];
        let mut seen = [0usize; 4];

        for _ in 0..1000 {
            let pos = SchedulingPolicy::Random.insertion_index(sizes.iter().copied(), 9, &mut rng);
            assert!(pos <= sizes.len(), "position {} out of range", pos);
            seen[pos] += 1;
        }

        assert!(seen.iter().all(|&n| n > 0), "distribution: {:?}", seen);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("0".parse::<SchedulingPolicy>(), Ok(SchedulingPolicy::Fifo));
        assert_eq!(
            "1".parse::<SchedulingPolicy>(),
            Ok(SchedulingPolicy::ShortestFileFirst)
        );
        assert_eq!(
            "Random".parse::<SchedulingPolicy>(),
            Ok(SchedulingPolicy::Random)
        );
        assert!("3".parse::<SchedulingPolicy>().is_err());
    }

    #[test]
    fn test_id_roundtrip() {
        for policy in [
            SchedulingPolicy::Fifo,
            SchedulingPolicy::ShortestFileFirst,
            SchedulingPolicy::Random,
        ] {
            assert_eq!(policy.id().to_string().parse::<SchedulingPolicy>(), Ok(policy));
        }
    }
}

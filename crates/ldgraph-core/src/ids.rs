//! Opaque identifier generation.
//!
//! Node, edge, and relationship ids are 10-character strings drawn from the
//! 62-symbol alphanumeric alphabet. The generator is injected so tests can
//! substitute a deterministic sequence.

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Length of every generated identifier.
pub const ID_LENGTH: usize = 10;

/// Source of fresh opaque identifiers.
pub trait IdGenerator {
    /// Produce the next identifier.
    fn next_id(&mut self) -> String;
}

/// Non-cryptographic random generator over `[A-Za-z0-9]`.
pub struct RandomIdGenerator {
    rng: StdRng,
}

impl RandomIdGenerator {
    /// Entropy-seeded generator.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible generator: the same seed yields the same id sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&mut self) -> String {
        (0..ID_LENGTH)
            .map(|_| self.rng.sample(Alphanumeric) as char)
            .collect()
    }
}

/// Deterministic generator yielding `{prefix}{n}` for n = 1, 2, 3, ...
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    counter: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("{}{}", self.prefix, self.counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_are_ten_alphanumeric_chars() {
        let mut ids = RandomIdGenerator::new();
        for _ in 0..100 {
            let id = ids.next_id();
            assert_eq!(id.len(), ID_LENGTH);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn seeded_generators_agree() {
        let mut a = RandomIdGenerator::seeded(7);
        let mut b = RandomIdGenerator::seeded(7);
        assert_eq!(a.next_id(), b.next_id());
        assert_eq!(a.next_id(), b.next_id());
    }

    #[test]
    fn sequential_ids_count_up() {
        let mut ids = SequentialIdGenerator::new("gen-");
        assert_eq!(ids.next_id(), "gen-1");
        assert_eq!(ids.next_id(), "gen-2");
    }
}

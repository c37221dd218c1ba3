//! Shared random source for event draws and code generation.

use parking_lot::Mutex;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Process-wide generator. Seeded from the OS unless a fixed seed is given,
/// in which case every draw sequence is reproducible.
#[derive(Debug)]
pub struct GameRng {
    inner: Mutex<ChaCha8Rng>,
}

impl GameRng {
    pub fn from_os() -> Self {
        Self {
            inner: Mutex::new(ChaCha8Rng::from_os_rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_os(),
        }
    }

    /// Run `f` with exclusive access to the generator.
    ///
    /// Callers may already hold a session lock; this lock is always taken
    /// last and never held across an await.
    pub fn with<T>(&self, f: impl FnOnce(&mut ChaCha8Rng) -> T) -> T {
        let mut rng = self.inner.lock();
        f(&mut rng)
    }
}

//! Random index sources for the picker.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Uniform index source.
///
/// `index(len)` must return a value in `[0, len)`. It is never called with
/// `len == 0`.
pub trait Sampler: Send + Sync {
    /// Pick an index in `[0, len)`.
    fn index(&self, len: usize) -> usize;
}

/// Sampler backed by `rand::thread_rng`.
///
/// The thread-local generator is seeded from the OS once per thread, never
/// per pick.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSampler;

impl Sampler for ThreadRngSampler {
    fn index(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible sampler seeded from a `u64`.
#[derive(Debug)]
pub struct SeededSampler {
    rng: Mutex<StdRng>,
}

impl SeededSampler {
    /// Create a sampler with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Sampler for SeededSampler {
    fn index(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(0..len)
    }
}

/// Sampler that replays a fixed script of indices, cycling when exhausted.
///
/// Each scripted value is reduced modulo `len`.
#[derive(Debug)]
pub struct SequenceSampler {
    script: Vec<usize>,
    next: AtomicUsize,
}

impl SequenceSampler {
    /// Create a sampler replaying `script`. An empty script always yields 0.
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        Self {
            script: script.into(),
            next: AtomicUsize::new(0),
        }
    }
}

impl Sampler for SequenceSampler {
    fn index(&self, len: usize) -> usize {
        if self.script.is_empty() || len == 0 {
            return 0;
        }
        let at = self.next.fetch_add(1, Ordering::Relaxed) % self.script.len();
        self.script[at] % len
    }
}

// seeded randomness
// a mulberry32 stream seeded by an xmur3 hash of a string, so the same seed
// string yields the same sequence on every platform

use rand::rand_core::impls;
use rand::{Rng, RngCore};

/// Supplies seed strings when the caller did not pass one.
pub trait EntropySource: Send + Sync {
    fn seed_string(&self) -> String;
}

/// Process-wide fallback entropy, backed by the thread-local OS-seeded generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEntropy;

pub static SYSTEM_ENTROPY: SystemEntropy = SystemEntropy;

impl EntropySource for SystemEntropy {
    fn seed_string(&self) -> String {
        format!("{:x}", rand::rng().random::<u64>())
    }
}

/// Deterministic 32-bit pseudo-random stream.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn from_seed_str(seed: &str) -> Self {
        Self { state: xmur3(seed) }
    }

    /// Seeded stream when `seed` is given, otherwise seeded from `entropy`.
    pub fn new(seed: Option<&str>, entropy: &dyn EntropySource) -> Self {
        match seed {
            Some(seed) => Self::from_seed_str(seed),
            None => Self::from_seed_str(&entropy.seed_string()),
        }
    }

    /// Next value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let a = self.state;
        let mut t = (a ^ (a >> 15)).wrapping_mul(1 | a);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}

// order-sensitive string hash, folds utf-16 code units so seeds hash
// the same way they would in a browser
fn xmur3(seed: &str) -> u32 {
    let units: Vec<u16> = seed.encode_utf16().collect();
    let mut h = 1_779_033_703u32 ^ units.len() as u32;

    for unit in units {
        h = (h ^ unit as u32).wrapping_mul(3_432_918_353);
        h = h.rotate_left(13);
    }

    h = (h ^ (h >> 16)).wrapping_mul(2_246_822_507);
    h = (h ^ (h >> 13)).wrapping_mul(3_266_489_909);
    h ^ (h >> 16)
}

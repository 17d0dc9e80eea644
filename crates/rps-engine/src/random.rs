//! Injected random sources
//!
//! The opponent never reaches for an ambient generator. Every decision
//! draws from a `RandomSource` handed in by the session, so a replay with
//! the same source produces the same moves.

/// Uniform random source over [0, 1).
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Pick an element with a single draw.
///
/// Returns `None` only for an empty slice, in which case nothing is drawn.
pub fn pick<T: Copy>(rng: &mut impl RandomSource, items: &[T]) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let draw = rng.next_unit().clamp(0.0, 1.0);
    let idx = ((draw * items.len() as f64) as usize).min(items.len() - 1);
    Some(items[idx])
}

/// Seeded random number generator
///
/// Deterministic: same seed + stream = same sequence
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a 32-byte seed and a stream index
    pub fn new(seed: &[u8; 32], stream: u32) -> Self {
        let mut state = 0u64;
        for (i, chunk) in seed.chunks(8).enumerate() {
            let mut bytes = [0u8; 8];
            bytes[..chunk.len()].copy_from_slice(chunk);
            state ^= u64::from_le_bytes(bytes).wrapping_add(i as u64);
        }

        state ^= (stream as u64).wrapping_mul(0x517cc1b727220a95);
        // xorshift never leaves zero
        if state == 0 {
            state = 0x9e3779b97f4a7c15;
        }

        let mut rng = Self { state };
        for _ in 0..8 {
            rng.next_u64();
        }
        rng
    }

    /// Convenience seed from a single integer
    pub fn from_u64(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&seed.to_le_bytes());
        Self::new(&bytes, 0)
    }

    pub fn next_u64(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }
}

impl RandomSource for SeededRng {
    fn next_unit(&mut self) -> f64 {
        // top 53 bits fill the mantissa exactly
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Useful for tests and for reproducing a reported game.
#[derive(Clone, Debug)]
pub struct SequenceRng {
    draws: Vec<f64>,
    pos: usize,
}

impl SequenceRng {
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        let mut draws: Vec<f64> = draws.into();
        if draws.is_empty() {
            draws.push(0.0);
        }
        Self { draws, pos: 0 }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl RandomSource for SequenceRng {
    fn next_unit(&mut self) -> f64 {
        let draw = self.draws[self.pos % self.draws.len()];
        self.pos += 1;
        draw
    }
}

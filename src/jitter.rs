//! Pseudo-random sources for spawn pacing
//!
//! The pool only needs a stream of raw integers; it reduces them to the
//! configured jitter range itself. Tests replay fixed values through
//! [`CycleJitter`].

/// Source of pacing jitter
pub trait JitterSource {
    /// Produce the next raw jitter value
    fn next_jitter(&mut self) -> u16;
}

/// Seed used when none (or zero) is given
const DEFAULT_SEED: u32 = 0x2545_f491;

/// Xorshift32 pseudo-random generator
#[derive(Debug, Clone)]
pub struct XorShift32 {
    state: u32,
}

impl Default for XorShift32 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl XorShift32 {
    /// Create a generator from a seed
    ///
    /// Xorshift never leaves the zero state, so a zero seed is replaced.
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_SEED } else { seed },
        }
    }

    /// Next 32-bit value
    pub const fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl JitterSource for XorShift32 {
    #[allow(clippy::cast_possible_truncation)]
    fn next_jitter(&mut self) -> u16 {
        (self.next_u32() >> 16) as u16
    }
}

/// Replays a fixed list of values, wrapping at the end
#[derive(Debug, Clone)]
pub struct CycleJitter<'a> {
    values: &'a [u16],
    cursor: usize,
}

impl<'a> CycleJitter<'a> {
    pub const fn new(values: &'a [u16]) -> Self {
        Self { values, cursor: 0 }
    }
}

impl JitterSource for CycleJitter<'_> {
    fn next_jitter(&mut self) -> u16 {
        let Some(&value) = self.values.get(self.cursor) else {
            return 0;
        };
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}

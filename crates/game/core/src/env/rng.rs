//! Deterministic, state-threaded random number generation.
//!
//! The generator is a 32-bit mulberry32 stream. Every draw consumes the
//! incoming [`GeneratorState`] by value and hands back its successor, so a
//! caller can never read the generator without carrying the new state
//! forward.
//!
//! # Determinism
//!
//! Given the same starting state and the same sequence of operations the
//! outputs are identical on every platform. The generator is reproducible,
//! not secure.

/// Opaque 32-bit generator state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GeneratorState(u32);

impl GeneratorState {
    /// Substitute used when a seed hashes to zero.
    pub const ZERO_SEED_FALLBACK: u32 = 0x9E37_79B9;

    const INCREMENT: u32 = 0x6D2B_79F5;
    const FNV_OFFSET: u32 = 0x811C_9DC5;
    const FNV_PRIME: u32 = 0x0100_0193;

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Derives a generator state from seed text.
    ///
    /// FNV-1a over the UTF-16 code units, order-sensitive and never zero.
    pub fn seed(text: &str) -> Self {
        let hash = text.encode_utf16().fold(Self::FNV_OFFSET, |h, unit| {
            (h ^ u32::from(unit)).wrapping_mul(Self::FNV_PRIME)
        });
        if hash == 0 {
            Self(Self::ZERO_SEED_FALLBACK)
        } else {
            Self(hash)
        }
    }

    /// Returns the successor state and a float uniform in `[0, 1)`.
    #[must_use]
    pub fn next(self) -> (Self, f64) {
        let advanced = self.0.wrapping_add(Self::INCREMENT);
        let mut t = advanced;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        let mixed = t ^ (t >> 14);
        (Self(advanced), f64::from(mixed) / 4_294_967_296.0)
    }

    /// Returns the successor state and an integer in `[min, max]`.
    ///
    /// A reversed range collapses to `min` but still consumes one draw.
    #[must_use]
    pub fn int(self, min: u32, max: u32) -> (Self, u32) {
        let (next, value) = self.next();
        if max <= min {
            return (next, min);
        }
        let span = f64::from(max - min) + 1.0;
        let offset = (value * span).floor() as u32;
        (next, min + offset.min(max - min))
    }

    /// Fisher–Yates pass consuming one [`int`](Self::int) per swap.
    #[must_use]
    pub fn shuffle<T>(self, mut items: Vec<T>) -> (Self, Vec<T>) {
        let mut state = self;
        for i in (1..items.len()).rev() {
            let (next, j) = state.int(0, i as u32);
            state = next;
            items.swap(i, j as usize);
        }
        (state, items)
    }

    /// In-place helpers for code that already owns a `&mut GeneratorState`.
    pub fn draw_float(&mut self) -> f64 {
        let (next, value) = self.next();
        *self = next;
        value
    }

    pub fn draw_int(&mut self, min: u32, max: u32) -> u32 {
        let (next, value) = self.int(min, max);
        *self = next;
        value
    }

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    pub fn draw_index(&mut self, len: usize) -> usize {
        self.draw_int(0, len.saturating_sub(1) as u32) as usize
    }

    pub fn shuffle_in_place<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.draw_int(0, i as u32) as usize;
            items.swap(i, j);
        }
    }
}

impl Default for GeneratorState {
    fn default() -> Self {
        Self(Self::ZERO_SEED_FALLBACK)
    }
}

//! Deterministic generator that replays a fixed list of unit deviates.
//!
//! Useful for pinning exact draw boundaries in tests and for replaying a
//! recorded resolution. Values cycle once the list is exhausted.

use rand::{Error, RngCore};

const FRACTION_BITS: u32 = 53;

#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRng {
    /// Creates a generator that yields `values` as successive `gen::<f64>()` draws.
    ///
    /// Values are clamped into [0, 1). An empty list behaves like `[0.0]`.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0.0);
        }
        Self { values, cursor: 0 }
    }

    /// Number of deviates handed out so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }

    /// Maps a unit value onto the 64-bit word that rand's `Standard` f64
    /// sampling turns back into that value (top 53 bits, scaled by 2^-53).
    fn encode(value: f64) -> u64 {
        let max_fraction = (1u64 << FRACTION_BITS) - 1;
        let scaled = (value.clamp(0.0, 1.0) * (1u64 << FRACTION_BITS) as f64) as u64;
        scaled.min(max_fraction) << (64 - FRACTION_BITS)
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        Self::encode(value)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
